//! Lists connected hubs with the peripherals in their slots.
//!
//! `hub_info set <A|B> <value>` additionally drives a slot on the first hub.

use std::{env, io};

use anyhow::{Context, Result, bail};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;
use wedo::{Slot, discover_hubs};

fn main() -> Result<()> {
	init_logging();

	let hubs = discover_hubs().context("failed to enumerate devices")?;

	if hubs.is_empty() {
		println!("No hubs connected");
		return Ok(());
	}

	for hub in &hubs {
		println!("{} ({})", hub.name(), hub.path());

		for device in hub.devices() {
			let ty = device.peripheral_type()?;
			let value = device.value()?;
			println!("  slot {}: {ty}, value {value}", device.slot());
		}
	}

	let mut args = env::args().skip(1);

	if let Some(action) = args.next() {
		if action != "set" {
			bail!("unknown action `{action}`, expected `set`");
		}

		let slot = match args.next().as_deref() {
			Some("A" | "a") => Slot::A,
			Some("B" | "b") => Slot::B,
			other => bail!("expected slot A or B, got {other:?}"),
		};
		let value: u8 = args.next().context("missing value")?.parse().context("value must be 0-255")?;

		hubs[0].device(slot).set_value(value)?;
		info!(%slot, value, hub = hubs[0].name(), "Value written");
	}

	Ok(())
}

/// Compact log lines on stderr, `INFO` unless `RUST_LOG` says otherwise
fn init_logging() {
	let filter = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();

	tracing_subscriber::fmt().compact().with_writer(io::stderr).with_env_filter(filter).init();
}
