//! Backend talking to hubs through `nusb`, on every platform it supports.
//!
//! The hub is driven like a plain USB device: input reports arrive on the
//! interrupt IN endpoint, output reports are sent with the HID class
//! `SET_REPORT` request. Report id 0 is implied and not transferred, so the
//! first byte of a [`Report`] never crosses the wire.

use std::{
	fmt::{Debug, Formatter},
	io,
};

use futures::executor::block_on;
use nusb::{
	DeviceInfo,
	transfer::{ControlOut, ControlType, Recipient, RequestBuffer},
};
use tracing::trace;

use crate::{
	Error, Result,
	channel::{Candidate, DeviceEnumerator, HidChannel, RawChannel, UsbId},
	report::{REPORT_SIZE, Report},
};

const INTERFACE: u8 = 0;
const INTERRUPT_IN: u8 = 0x81;
const PAYLOAD_SIZE: usize = REPORT_SIZE - 1;

const HID_SET_REPORT: u8 = 0x09;
const HID_OUTPUT_REPORT: u16 = 0x02 << 8;

/// Lists every USB device on the host
#[derive(Debug, Default, Copy, Clone)]
pub struct UsbEnumerator;

impl DeviceEnumerator for UsbEnumerator {
	type Candidate = UsbCandidate;

	fn candidates(&self) -> io::Result<impl Iterator<Item = io::Result<Self::Candidate>>> {
		let devices = nusb::list_devices()?;
		Ok(devices.map(|info| Ok(UsbCandidate::new(info))))
	}
}

#[derive(Debug, Clone)]
pub struct UsbCandidate {
	info: DeviceInfo,
	path: String,
}

impl UsbCandidate {
	pub fn new(info: DeviceInfo) -> Self {
		Self { path: device_path(&info), info }
	}

	pub fn info(&self) -> &DeviceInfo {
		&self.info
	}
}

impl Candidate for UsbCandidate {
	type Channel = UsbChannel;

	fn path(&self) -> &str {
		&self.path
	}

	/// Opens the device without claiming any interface
	fn open(&self) -> Result<UsbChannel> {
		let device = self.info.open()?;
		Ok(UsbChannel { info: self.info.clone(), device, interface: None })
	}
}

#[cfg(target_os = "linux")]
fn device_path(info: &DeviceInfo) -> String {
	info.sysfs_path().display().to_string()
}

#[cfg(target_os = "windows")]
fn device_path(info: &DeviceInfo) -> String {
	info.instance_id().to_string_lossy().into_owned()
}

#[cfg(target_os = "macos")]
fn device_path(info: &DeviceInfo) -> String {
	format!("{:#x}", info.registry_entry_id())
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
fn device_path(info: &DeviceInfo) -> String {
	format!("{:03}", info.device_address())
}

pub struct UsbChannel {
	info: DeviceInfo,
	device: nusb::Device,
	interface: Option<nusb::Interface>,
}

impl UsbChannel {
	/// Claims interface 0 on first use, detaching the kernel HID driver where
	/// the platform allows it
	fn interface(&mut self) -> Result<&nusb::Interface> {
		match &mut self.interface {
			Some(it) => Ok(it),
			slot @ None => {
				trace!(id = %usb_id(&self.info), "Claiming interface");
				Ok(slot.insert(self.device.detach_and_claim_interface(INTERFACE)?))
			}
		}
	}
}

impl RawChannel for UsbChannel {
	fn read_report(&mut self, report: &mut Report) -> Result<()> {
		let interface = self.interface()?;
		let completion = block_on(interface.interrupt_in(INTERRUPT_IN, RequestBuffer::new(PAYLOAD_SIZE)));
		completion.status?;

		let len = completion.data.len().min(PAYLOAD_SIZE);
		if len < PAYLOAD_SIZE {
			trace!(len, "Short input report");
		}

		report.fill(0);
		report[1..=len].copy_from_slice(&completion.data[..len]);
		Ok(())
	}

	fn write_report(&mut self, report: &Report) -> Result<()> {
		let interface = self.interface()?;
		let data = ControlOut {
			control_type: ControlType::Class,
			recipient: Recipient::Interface,
			request: HID_SET_REPORT,
			value: HID_OUTPUT_REPORT,
			index: u16::from(INTERFACE),
			data: &report[1..],
		};

		let result = block_on(interface.control_out(data));
		result.status?;
		Ok(())
	}
}

impl HidChannel for UsbChannel {
	fn usb_id(&mut self) -> Result<UsbId> {
		Ok(usb_id(&self.info))
	}

	fn product_name(&mut self) -> Result<String> {
		self.info.product_string().map(str::to_owned).ok_or(Error::MissingName)
	}

	fn claim(&mut self) -> Result<()> {
		self.interface().map(drop)
	}
}

impl Debug for UsbChannel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "UsbChannel {{ {} }}", usb_id(&self.info))
	}
}

fn usb_id(info: &DeviceInfo) -> UsbId {
	UsbId::new(info.vendor_id(), info.product_id())
}
