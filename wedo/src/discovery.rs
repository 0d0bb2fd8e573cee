use tracing::{debug, info, warn};

use crate::{
	Error, Hub, Result,
	channel::{Candidate, DeviceEnumerator, HidChannel, UsbId},
};

/// How probing a single candidate ended
#[derive(Debug)]
pub enum Probe<C> {
	/// The candidate is a hub and is now owned by the returned [`Hub`]
	Hub(Hub<C>),
	/// The candidate is some other device, its channel was closed
	Mismatch(UsbId),
	/// The candidate identifies as a hub but could not be claimed or named,
	/// its channel was closed
	Rejected { id: UsbId, err: Error },
	/// The candidate could not be opened or identified, its channel was closed
	Failed(Error),
}

/// Opens `candidate` and turns it into a [`Hub`] if it identifies as one.
///
/// Never fails as a whole: problems before the identifier check are reported
/// as [`Probe::Failed`], problems after it as [`Probe::Rejected`]. Either way
/// the channel is released before returning
pub fn probe<D: Candidate>(candidate: &D) -> Probe<D::Channel> {
	let mut channel = match candidate.open() {
		Ok(it) => it,
		Err(err) => return Probe::Failed(err),
	};

	let id = match channel.usb_id() {
		Ok(it) => it,
		Err(err) => return Probe::Failed(err),
	};

	if !id.is_hub() {
		return Probe::Mismatch(id);
	}

	let name = match channel.claim().and_then(|()| channel.product_name()) {
		Ok(it) => it,
		Err(err) => return Probe::Rejected { id, err },
	};

	Probe::Hub(Hub::new(name, candidate.path(), channel))
}

/// Scans `enumerator` for hubs, in enumeration order.
///
/// Candidates that fail to open, do not identify as a hub or fail to report
/// their name are skipped. Only a failure of the enumeration itself aborts the
/// scan, with [`Error::Enumeration`], and releases every hub found so far
pub fn discover_hubs_with<E: DeviceEnumerator>(
	enumerator: &E,
) -> Result<Vec<Hub<<E::Candidate as Candidate>::Channel>>> {
	let mut hubs = Vec::new();

	for candidate in enumerator.candidates().map_err(Error::Enumeration)? {
		let candidate = candidate.map_err(Error::Enumeration)?;
		let path = candidate.path();

		match probe(&candidate) {
			Probe::Hub(hub) => {
				info!(path, name = hub.name(), "Found hub");
				hubs.push(hub);
			}
			Probe::Mismatch(id) => {
				debug!(path, %id, "Not a hub");
			}
			Probe::Rejected { id, err } => {
				warn!(?err, path, %id, "Skipping unusable hub");
			}
			Probe::Failed(err) => {
				debug!(?err, path, "Skipping device");
			}
		}
	}

	Ok(hubs)
}
