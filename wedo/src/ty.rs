use std::fmt::{Display, Formatter};

use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};

use crate::Error;

/// Number of peripheral slots on every hub
pub const SLOT_COUNT: usize = 2;

/// One of the two peripheral ports of a hub, labeled A and B on the casing
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[num_enum(error_type(name = Error, constructor = Error::InvalidSlot))]
#[repr(u8)]
pub enum Slot {
	A = 0,
	B = 1,
}

impl Slot {
	/// Both slots, ordered by index
	pub const ALL: [Slot; SLOT_COUNT] = [Slot::A, Slot::B];

	pub fn index(self) -> usize {
		usize::from(u8::from(self))
	}
}

impl Display for Slot {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Slot::A => write!(f, "A"),
			Slot::B => write!(f, "B"),
		}
	}
}

/// Kind of peripheral plugged into a slot.
///
/// Decoding is total: every status byte the hub can report maps to exactly one
/// variant and unknown codes read as [`PeripheralType::None`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum PeripheralType {
	/// Empty slot, also the fallback for unrecognized codes
	#[num_enum(default)]
	None = 231,
	#[num_enum(alternatives = [1, 2, 3, 239, 240, 241])]
	Motor = 0,
	#[num_enum(alternatives = [103])]
	ServoMotor = 102,
	#[num_enum(alternatives = [203, 204, 205])]
	Light = 202,
	#[num_enum(alternatives = [178, 179, 180])]
	DistanceSensor = 177,
	#[num_enum(alternatives = [39])]
	TiltSensor = 38,
}

impl PeripheralType {
	pub fn decode(code: u8) -> Self {
		code.into()
	}
}

impl Display for PeripheralType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PeripheralType::None => write!(f, "None"),
			PeripheralType::Motor => write!(f, "Motor"),
			PeripheralType::ServoMotor => write!(f, "Servo Motor"),
			PeripheralType::Light => write!(f, "Light"),
			PeripheralType::DistanceSensor => write!(f, "Distance Sensor"),
			PeripheralType::TiltSensor => write!(f, "Tilt Sensor"),
		}
	}
}
