use std::{io, str::Utf8Error};

use thiserror::Error;

pub type Result<T = (), E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Transport: {0}")]
	Transport(#[from] io::Error),

	#[error("Transfer: {0}")]
	Transfer(#[from] nusb::transfer::TransferError),

	#[error("Enumeration: {0}")]
	Enumeration(#[source] io::Error),

	#[error("Device name is not valid UTF-8: {0}")]
	Encoding(#[from] Utf8Error),

	#[error("Device reports no product name")]
	MissingName,

	#[error("Invalid slot index: {0}")]
	InvalidSlot(u8),
}

impl Error {
	/// Only a failing enumeration facility aborts a scan, everything else
	/// just disqualifies the candidate at hand
	pub fn is_fatal_to_discovery(&self) -> bool {
		matches!(self, Error::Enumeration(_))
	}
}
