//! Layout of the fixed-size reports exchanged with a hub.
//!
//! Write report:
//!
//! | offset | content            |
//! |--------|--------------------|
//! | 0      | report id, unused  |
//! | 1      | [`WRITE_HEADER`]   |
//! | 2      | value for slot A   |
//! | 3      | value for slot B   |
//!
//! Read report:
//!
//! | offset | content            |
//! |--------|--------------------|
//! | 3      | value of slot A    |
//! | 4      | type code of slot A|
//! | 5      | value of slot B    |
//! | 6      | type code of slot B|

use crate::Slot;

pub const REPORT_SIZE: usize = 9;

/// Every report travels as exactly [`REPORT_SIZE`] bytes in either direction
pub type Report = [u8; REPORT_SIZE];

/// Constant flag byte the hub expects at offset 1 of every write report
pub const WRITE_HEADER: u8 = 64;
pub const WRITE_HEADER_OFFSET: usize = 1;

#[inline]
pub const fn value_write_offset(slot: Slot) -> usize {
	2 + slot as usize
}

#[inline]
pub const fn value_read_offset(slot: Slot) -> usize {
	3 + slot as usize * 2
}

#[inline]
pub const fn type_read_offset(slot: Slot) -> usize {
	4 + slot as usize * 2
}
