//! Backend for the Linux `hiddev` interface under `/dev/usb`.

use std::{
	ffi::CStr,
	fmt::{Debug, Formatter},
	fs::{self, File, OpenOptions, ReadDir},
	io::{self, Read, Write},
	os::fd::AsRawFd,
	path::{Path, PathBuf},
};

use tracing::trace;

use crate::{
	Error, Result,
	channel::{Candidate, DeviceEnumerator, HidChannel, RawChannel, UsbId},
	report::Report,
};

pub const DEVICE_DIR: &str = "/dev/usb";

const NAME_LEN: usize = 256;

/// `struct hiddev_devinfo` from `linux/hiddev.h`
#[allow(dead_code)]
#[derive(Debug, Default)]
#[repr(C)]
struct DevInfo {
	bustype: u32,
	busnum: u32,
	devnum: u32,
	ifnum: u32,
	vendor: i16,
	product: i16,
	version: i16,
	num_applications: u32,
}

mod ioctl {
	nix::ioctl_read!(device_info, b'H', 0x03, super::DevInfo);
	nix::ioctl_read_buf!(device_name, b'H', 0x06, u8);
}

/// Lists `hid*` nodes of a device directory, `/dev/usb` by default
#[derive(Debug, Clone)]
pub struct HiddevEnumerator {
	dir: PathBuf,
}

impl HiddevEnumerator {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}
}

impl Default for HiddevEnumerator {
	fn default() -> Self {
		Self::new(DEVICE_DIR)
	}
}

impl DeviceEnumerator for HiddevEnumerator {
	type Candidate = HiddevCandidate;

	fn candidates(&self) -> io::Result<impl Iterator<Item = io::Result<Self::Candidate>>> {
		let entries = fs::read_dir(&self.dir)?;
		Ok(HidNodes { entries })
	}
}

struct HidNodes {
	entries: ReadDir,
}

impl Iterator for HidNodes {
	type Item = io::Result<HiddevCandidate>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let entry = match self.entries.next()? {
				Ok(it) => it,
				Err(err) => return Some(Err(err)),
			};

			if is_hid_node(entry.file_name().as_encoded_bytes()) {
				return Some(Ok(HiddevCandidate::new(entry.path())));
			}
		}
	}
}

fn is_hid_node(file_name: &[u8]) -> bool {
	file_name.starts_with(b"hid")
}

#[derive(Debug, Clone)]
pub struct HiddevCandidate {
	path: String,
}

impl HiddevCandidate {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self { path: path.as_ref().display().to_string() }
	}
}

impl Candidate for HiddevCandidate {
	type Channel = HiddevChannel;

	fn path(&self) -> &str {
		&self.path
	}

	fn open(&self) -> Result<HiddevChannel> {
		let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
		Ok(HiddevChannel { file })
	}
}

pub struct HiddevChannel {
	file: File,
}

impl RawChannel for HiddevChannel {
	fn read_report(&mut self, report: &mut Report) -> Result<()> {
		let len = self.file.read(report)?;
		if len < report.len() {
			trace!(len, "Short input report");
			report[len..].fill(0);
		}

		Ok(())
	}

	fn write_report(&mut self, report: &Report) -> Result<()> {
		self.file.write_all(report)?;
		Ok(())
	}
}

impl HidChannel for HiddevChannel {
	fn usb_id(&mut self) -> Result<UsbId> {
		let mut info = DevInfo::default();
		unsafe { ioctl::device_info(self.file.as_raw_fd(), &raw mut info) }.map_err(io::Error::from)?;

		Ok(UsbId::new(reinterpret(info.vendor), reinterpret(info.product)))
	}

	fn product_name(&mut self) -> Result<String> {
		let mut buf = [0u8; NAME_LEN];
		unsafe { ioctl::device_name(self.file.as_raw_fd(), &mut buf[..NAME_LEN - 1]) }.map_err(io::Error::from)?;

		parse_name(&buf)
	}
}

impl Debug for HiddevChannel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "HiddevChannel {{ fd: {} }}", self.file.as_raw_fd())
	}
}

/// The kernel declares ids as `__s16`, USB defines them unsigned
fn reinterpret(id: i16) -> u16 {
	u16::from_ne_bytes(id.to_ne_bytes())
}

/// Decodes the NUL-terminated name the kernel filled in. The last byte of
/// `buf` is never handed to the kernel, so a terminator is always present
fn parse_name(buf: &[u8]) -> Result<String> {
	let name = CStr::from_bytes_until_nul(buf).map_err(|_| Error::MissingName)?;
	Ok(name.to_str()?.to_owned())
}
