use std::{
	cell::RefCell,
	fmt::{Debug, Formatter},
};

use crate::{PeripheralType, Processor, Result, Slot, channel::RawChannel};

/// View of one slot of a [`Hub`](crate::Hub).
///
/// Holds nothing but the slot and a borrow of the hub's processor, so it
/// cannot outlive the hub. Every call goes to the hardware, nothing is cached
pub struct Device<'hub, C> {
	slot: Slot,
	processor: &'hub RefCell<Processor<C>>,
}

impl<'hub, C: RawChannel> Device<'hub, C> {
	pub(crate) fn new(slot: Slot, processor: &'hub RefCell<Processor<C>>) -> Self {
		Self { slot, processor }
	}

	pub fn slot(&self) -> Slot {
		self.slot
	}

	/// Identifies the peripheral currently plugged into the slot
	pub fn peripheral_type(&self) -> Result<PeripheralType> {
		let code = self.processor.borrow_mut().read_type(self.slot)?;
		Ok(PeripheralType::decode(code))
	}

	/// Reads the current raw value of the slot, e.g. a sensor reading
	pub fn value(&self) -> Result<u8> {
		self.processor.borrow_mut().read_value(self.slot)
	}

	/// Drives the slot, e.g. motor power or light brightness
	pub fn set_value(&self, value: u8) -> Result<()> {
		self.processor.borrow_mut().write_value(self.slot, value)
	}
}

impl<C> Clone for Device<'_, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<C> Copy for Device<'_, C> {}

impl<C> Debug for Device<'_, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Device").field("slot", &self.slot).finish_non_exhaustive()
	}
}
