//! One-shot boot identification message.
//!
//! Fires at most once per process lifetime, after a completed beacon
//! cycle, preferring the Internet relay. When neither backhaul condition
//! holds the call is a no-op and is retried on the next cycle.

use crate::agent::StationContext;
use crate::beacon::PayloadBuf;
use crate::config::Config;
use crate::links::{Links, LogCategory};
use crate::{APP_TAG, FIRMWARE_VERSION, PROJECT_URL};
use core::fmt::Write;

/// Settle before the relay upload.
const RELAY_SETTLE_MS: u32 = 1_000;
/// Longer settle before handing the packet to the radio buffer.
const RADIO_SETTLE_MS: u32 = 2_000;

#[derive(Debug)]
pub struct StatusReporter;

impl StatusReporter {
    pub fn process(config: &Config, ctx: &mut StationContext, links: &mut Links) {
        let mut status = PayloadBuf::new();
        let _ = write!(status, "{}>{}", config.callsign, APP_TAG);
        if config.beacon.path.starts_with("WIDE") {
            let _ = write!(status, ",{}", config.beacon.path);
        }

        if links.relay.is_active() && config.beacon.send_via_relay {
            links.system.settle(RELAY_SETTLE_MS);
            let _ = write!(status, ",qAC:>{PROJECT_URL} {FIRMWARE_VERSION}");
            links.relay.upload(&status);
            links.log.record(LogCategory::RelayTx, &status, 0, 0.0, 0);
            ctx.scheduler.pending_boot_status = false;
        }

        if ctx.scheduler.pending_boot_status
            && !config.beacon.send_via_relay
            && config.beacon.send_via_rf
        {
            links.system.settle(RADIO_SETTLE_MS);
            let _ = write!(status, ":>{PROJECT_URL} {FIRMWARE_VERSION}");
            links.radio.enqueue(&status);
            ctx.scheduler.pending_boot_status = false;
        }
    }
}
