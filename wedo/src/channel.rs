use std::{
	fmt::{Display, Formatter},
	io,
};

use crate::{PRODUCT_ID, Result, VENDOR_ID, report::Report};

/// An opened, exclusively owned byte channel to one physical device.
///
/// Transfers are blocking and always move a whole [`Report`]. Implementations
/// release the underlying handle on drop.
pub trait RawChannel {
	/// Fills `report` with one fresh input report. Bytes the device did not
	/// send in a short transfer are zeroed, never left from an earlier read
	fn read_report(&mut self, report: &mut Report) -> Result<()>;

	fn write_report(&mut self, report: &Report) -> Result<()>;
}

/// Metadata queries available on an opened HID channel
pub trait HidChannel: RawChannel {
	fn usb_id(&mut self) -> Result<UsbId>;

	fn product_name(&mut self) -> Result<String>;

	/// Takes exclusive control of the device for report transfers.
	///
	/// Discovery calls this only after [`HidChannel::usb_id`] matched, so
	/// backends can postpone intrusive steps (driver detach) until the device
	/// is known to be a hub
	fn claim(&mut self) -> Result<()> {
		Ok(())
	}
}

/// A device found by a [`DeviceEnumerator`], not opened yet
pub trait Candidate {
	type Channel: HidChannel;

	/// Platform path of the device
	fn path(&self) -> &str;

	fn open(&self) -> Result<Self::Channel>;
}

/// Source of candidate devices.
///
/// The outer error reports that enumeration could not start, an item error
/// reports that it broke off midway. Running out of items is the iterator
/// ending, never an error
pub trait DeviceEnumerator {
	type Candidate: Candidate;

	fn candidates(&self) -> io::Result<impl Iterator<Item = io::Result<Self::Candidate>>>;
}

/// Vendor and product identifier pair of a USB device
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UsbId {
	pub vendor: u16,
	pub product: u16,
}

impl UsbId {
	pub const HUB: UsbId = UsbId::new(VENDOR_ID, PRODUCT_ID);

	pub const fn new(vendor: u16, product: u16) -> Self {
		Self { vendor, product }
	}

	pub fn is_hub(self) -> bool {
		self == Self::HUB
	}
}

impl Display for UsbId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:04x}:{:04x}", self.vendor, self.product)
	}
}
