use std::fmt::{Debug, Formatter};

use tracing::trace;

use crate::{
	Result, Slot,
	channel::RawChannel,
	report::{REPORT_SIZE, Report, WRITE_HEADER, WRITE_HEADER_OFFSET, type_read_offset, value_read_offset, value_write_offset},
};

/// Protocol engine of a hub.
///
/// Owns the channel together with one read and one write scratch report. The
/// write report is never cleared: writing one slot retransmits the value last
/// written to the other slot.
///
/// There is no internal locking, callers must not overlap operations on one
/// processor.
pub struct Processor<C> {
	channel: C,
	read_buf: Report,
	write_buf: Report,
}

impl<C: RawChannel> Processor<C> {
	pub fn new(channel: C) -> Self {
		Self { channel, read_buf: [0; REPORT_SIZE], write_buf: [0; REPORT_SIZE] }
	}

	/// Gives the channel back, closing nothing
	pub fn into_channel(self) -> C {
		self.channel
	}

	/// Samples the hub and returns the raw type code of `slot`
	pub fn read_type(&mut self, slot: Slot) -> Result<u8> {
		self.sample()?;
		let code = self.read_buf[type_read_offset(slot)];
		trace!(%slot, code, "Read type");
		Ok(code)
	}

	/// Samples the hub and returns the current value of `slot`
	pub fn read_value(&mut self, slot: Slot) -> Result<u8> {
		self.sample()?;
		let value = self.read_buf[value_read_offset(slot)];
		trace!(%slot, value, "Read value");
		Ok(value)
	}

	/// Sets `slot` to `value`. No readback is performed
	pub fn write_value(&mut self, slot: Slot, value: u8) -> Result<()> {
		self.write_buf[WRITE_HEADER_OFFSET] = WRITE_HEADER;
		self.write_buf[value_write_offset(slot)] = value;
		trace!(%slot, value, report = ?self.write_buf, "Write value");
		self.channel.write_report(&self.write_buf)
	}

	fn sample(&mut self) -> Result<()> {
		self.channel.read_report(&mut self.read_buf)
	}
}

impl<C> Debug for Processor<C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Processor")
			.field("channel", &format_args!(".."))
			.field("read_buf", &self.read_buf)
			.field("write_buf", &self.write_buf)
			.finish()
	}
}
