use std::{
	cell::RefCell,
	fmt::{Debug, Formatter},
};

use crate::{Device, Processor, SLOT_COUNT, Slot, channel::RawChannel};

/// A WeDo hub with its two peripheral slots.
///
/// The hub is the sole owner of its channel, dropping it closes the device.
///
/// A hub is not [`Sync`]. To drive it from several threads, serialize access
/// yourself, e.g. with one `Mutex<Hub<_>>` per hub
pub struct Hub<C> {
	name: String,
	path: String,
	processor: RefCell<Processor<C>>,
}

impl<C: RawChannel> Hub<C> {
	/// Wraps an already opened channel
	pub fn new(name: impl Into<String>, path: impl Into<String>, channel: C) -> Self {
		Self { name: name.into(), path: path.into(), processor: RefCell::new(Processor::new(channel)) }
	}

	/// Human-readable product name reported by the device
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Platform path the hub was discovered at
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Views of both slots, ordered by slot index
	pub fn devices(&self) -> [Device<'_, C>; SLOT_COUNT] {
		Slot::ALL.map(|slot| self.device(slot))
	}

	pub fn device(&self, slot: Slot) -> Device<'_, C> {
		Device::new(slot, &self.processor)
	}

	/// Extracts the underlying channel, discarding the hub's report buffers
	pub fn into_channel(self) -> C {
		self.processor.into_inner().into_channel()
	}
}

impl<C> Debug for Hub<C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Hub").field("name", &self.name).field("path", &self.path).finish_non_exhaustive()
	}
}
