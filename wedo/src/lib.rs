#![doc = include_str!("../../readme.md")]

pub mod channel;
pub mod device;
pub mod discovery;
mod err;
#[cfg(all(target_os = "linux", feature = "hiddev"))]
pub mod hiddev;
pub mod hub;
#[cfg(test)]
mod mock;
pub mod processor;
pub mod report;
pub mod ty;
pub mod usb;

pub use channel::{Candidate, DeviceEnumerator, HidChannel, RawChannel, UsbId};
pub use device::Device;
pub use discovery::{Probe, discover_hubs_with, probe};
pub use err::{Error, Result};
pub use hub::Hub;
pub use nusb;
pub use processor::Processor;
pub use ty::{PeripheralType, SLOT_COUNT, Slot};

/// `vendor_id` of every WeDo hub
pub const VENDOR_ID: u16 = 0x0694;
/// `product_id` of every WeDo hub
pub const PRODUCT_ID: u16 = 0x0003;

/// Enumerator used by [`discover_hubs`] on this platform
#[cfg(all(target_os = "linux", feature = "hiddev"))]
pub type PlatformEnumerator = hiddev::HiddevEnumerator;

/// Enumerator used by [`discover_hubs`] on this platform
#[cfg(not(all(target_os = "linux", feature = "hiddev")))]
pub type PlatformEnumerator = usb::UsbEnumerator;

/// Channel owned by a hub found through [`discover_hubs`]
pub type PlatformChannel = <<PlatformEnumerator as DeviceEnumerator>::Candidate as Candidate>::Channel;

/// Hub as returned by [`discover_hubs`]
pub type PlatformHub = Hub<PlatformChannel>;

/// Finds every hub currently connected to the host.
///
/// Devices that cannot be opened or are not hubs are skipped, an empty list
/// is a valid result. Only a failing device enumeration is an error
pub fn discover_hubs() -> Result<Vec<PlatformHub>> {
	discover_hubs_with(&PlatformEnumerator::default())
}
