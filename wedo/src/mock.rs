//! Scripted channels and enumerators for exercising the protocol without a hub

use std::{cell::RefCell, collections::VecDeque, io, rc::Rc};

use crate::{
	Error, Result, Slot,
	channel::{Candidate, DeviceEnumerator, HidChannel, RawChannel, UsbId},
	report::{Report, type_read_offset, value_read_offset, value_write_offset},
};

/// Observations shared between a test and the channels it handed out
#[derive(Debug, Default)]
pub struct Log {
	pub writes: Vec<Report>,
	pub reads: usize,
	pub closed: Vec<String>,
}

pub type SharedLog = Rc<RefCell<Log>>;

#[derive(Debug)]
pub struct MockChannel {
	pub path: String,
	pub id: UsbId,
	pub name: Option<String>,
	/// Report returned by reads once `script` is exhausted
	pub input: Report,
	pub script: VecDeque<Report>,
	/// Mirror written values into the value offsets of `input`
	pub echo: bool,
	pub fail_io: bool,
	pub fail_claim: bool,
	pub log: SharedLog,
}

impl MockChannel {
	pub fn new(log: &SharedLog) -> Self {
		Self {
			path: String::new(),
			id: UsbId::HUB,
			name: Some("LEGO USB Hub V1.00".into()),
			input: [0; 9],
			script: VecDeque::new(),
			echo: false,
			fail_io: false,
			fail_claim: false,
			log: Rc::clone(log),
		}
	}

	pub fn with_types(mut self, a: u8, b: u8) -> Self {
		self.input[type_read_offset(Slot::A)] = a;
		self.input[type_read_offset(Slot::B)] = b;
		self
	}

	pub fn echoing(mut self) -> Self {
		self.echo = true;
		self
	}
}

fn broken_pipe() -> Error {
	io::Error::from(io::ErrorKind::BrokenPipe).into()
}

impl RawChannel for MockChannel {
	fn read_report(&mut self, report: &mut Report) -> Result<()> {
		if self.fail_io {
			return Err(broken_pipe());
		}

		self.log.borrow_mut().reads += 1;
		*report = self.script.pop_front().unwrap_or(self.input);
		Ok(())
	}

	fn write_report(&mut self, report: &Report) -> Result<()> {
		if self.fail_io {
			return Err(broken_pipe());
		}

		self.log.borrow_mut().writes.push(*report);

		if self.echo {
			for slot in Slot::ALL {
				self.input[value_read_offset(slot)] = report[value_write_offset(slot)];
			}
		}

		Ok(())
	}
}

impl HidChannel for MockChannel {
	fn usb_id(&mut self) -> Result<UsbId> {
		Ok(self.id)
	}

	fn product_name(&mut self) -> Result<String> {
		self.name.clone().ok_or(Error::MissingName)
	}

	fn claim(&mut self) -> Result<()> {
		if self.fail_claim { Err(broken_pipe()) } else { Ok(()) }
	}
}

impl Drop for MockChannel {
	fn drop(&mut self) {
		self.log.borrow_mut().closed.push(self.path.clone());
	}
}

/// What opening a [`MockCandidate`] produces
#[derive(Debug)]
pub enum Behavior {
	Open(RefCell<Option<MockChannel>>),
	OpenFails,
}

#[derive(Debug)]
pub struct MockCandidate {
	pub path: String,
	pub behavior: Behavior,
}

impl MockCandidate {
	pub fn opening(path: &str, mut channel: MockChannel) -> Self {
		channel.path = path.into();
		Self { path: path.into(), behavior: Behavior::Open(RefCell::new(Some(channel))) }
	}

	pub fn failing(path: &str) -> Self {
		Self { path: path.into(), behavior: Behavior::OpenFails }
	}
}

impl Candidate for MockCandidate {
	type Channel = MockChannel;

	fn path(&self) -> &str {
		&self.path
	}

	fn open(&self) -> Result<Self::Channel> {
		match &self.behavior {
			Behavior::Open(channel) => {
				channel.borrow_mut().take().ok_or_else(|| io::Error::from(io::ErrorKind::ResourceBusy).into())
			}
			Behavior::OpenFails => Err(io::Error::from(io::ErrorKind::PermissionDenied).into()),
		}
	}
}

/// Enumerator replaying a fixed list of entries, each either a candidate or
/// an enumeration failure
#[derive(Debug, Default)]
pub struct MockEnumerator {
	pub entries: RefCell<Vec<io::Result<MockCandidate>>>,
	pub fail_start: bool,
}

impl MockEnumerator {
	pub fn new(entries: Vec<io::Result<MockCandidate>>) -> Self {
		Self { entries: RefCell::new(entries), fail_start: false }
	}
}

impl DeviceEnumerator for MockEnumerator {
	type Candidate = MockCandidate;

	fn candidates(&self) -> io::Result<impl Iterator<Item = io::Result<Self::Candidate>>> {
		if self.fail_start {
			return Err(io::Error::from(io::ErrorKind::NotFound));
		}

		Ok(self.entries.take().into_iter())
	}
}
