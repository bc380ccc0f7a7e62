//! Beacon interval state machine and payload composition.
//!
//! On a timed or forced trigger the scheduler purges stale station
//! records, recomputes the station-count display line, composes the
//! Internet-bound and radio-bound payload variants, folds in the battery
//! report, and dispatches to whichever backhauls are enabled. The two
//! dispatch decisions are independent; neither blocks the other.

use crate::agent::StationContext;
use crate::config::Config;
use crate::display::Line;
use crate::links::Links;
use crate::power::PowerMonitor;
use crate::status::StatusReporter;
use crate::APP_TAG;
use arrayvec::ArrayString;
use core::fmt::Write;

pub const MAX_PAYLOAD: usize = 256;
pub type PayloadBuf = ArrayString<MAX_PAYLOAD>;

/// Weather field template used when a module is configured but not
/// detected: same layout, empty fields.
pub const WX_PLACEHOLDER: &str = ".../...g...t...r...p...P...h..b.....";

/// Process-lifetime scheduler state, owned by the orchestration core
/// through [`StationContext`].
#[derive(Debug, Clone)]
pub struct SchedulerState {
    /// Monotonic timestamp of the last beacon dispatch; 0 = never sent.
    pub last_beacon_tx_ms: u32,
    /// Monotonic timestamp of the last display activation.
    pub last_screen_on_ms: u32,
    /// Set by the interval check or forced externally, cleared once a
    /// beacon cycle completes.
    pub beacon_due: bool,
    /// True until the one-shot boot status message is sent.
    pub pending_boot_status: bool,
}

impl SchedulerState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_beacon_tx_ms: 0,
            last_screen_on_ms: 0,
            beacon_due: true,
            pending_boot_status: true,
        }
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct BeaconScheduler;

impl BeaconScheduler {
    /// Interval check on the wrapping monotonic clock. Never compares
    /// `last + interval > now` directly; the clock wraps.
    #[must_use]
    pub fn is_due(state: &SchedulerState, now_ms: u32, interval_ms: u32) -> bool {
        state.last_beacon_tx_ms == 0
            || now_ms.wrapping_sub(state.last_beacon_tx_ms) >= interval_ms
    }

    /// One poll-loop iteration of the beacon watchdog: raise `beacon_due`
    /// when the interval elapsed, run the cycle while due, then retry the
    /// one-shot boot status if it is still pending.
    pub fn check(config: &Config, ctx: &mut StationContext, links: &mut Links, now_ms: u32) {
        if Self::is_due(&ctx.scheduler, now_ms, config.beacon_interval_ms()) {
            ctx.scheduler.beacon_due = true;
        }

        if ctx.scheduler.beacon_due {
            Self::run_cycle(config, ctx, links, now_ms);
        }

        if ctx.scheduler.pending_boot_status {
            StatusReporter::process(config, ctx, links);
        }
    }

    fn run_cycle(config: &Config, ctx: &mut StationContext, links: &mut Links, now_ms: u32) {
        if !config.display.always_on && config.display.timeout_seconds != 0 {
            links.display.set_power(true);
        }
        tracing::info!("sending periodic beacon");

        // Prune before counting; the counter line shows the post-prune size.
        links.stations.prune_stale();
        Self::update_station_count(config, ctx, links);

        let mut relay_payload = PayloadBuf::new();
        let mut radio_payload = PayloadBuf::new();
        Self::compose_base(&mut relay_payload, config);
        Self::compose_base(&mut radio_payload, config);

        if config.weather.active {
            let summary = links.weather.as_mut().map(|sensor| sensor.read_summary());
            let fields = summary.as_ref().map_or(WX_PLACEHOLDER, |s| s.as_str());
            let _ = relay_payload.try_push_str(fields);
            let _ = radio_payload.try_push_str(fields);
        }

        let _ = relay_payload.try_push_str(&config.beacon.comment);
        let _ = radio_payload.try_push_str(&config.beacon.comment);

        let report = PowerMonitor::evaluate(
            &config.battery,
            links.battery_internal.as_deref_mut(),
            links.battery_external.as_deref_mut(),
            &mut ctx.panel,
        );
        let _ = relay_payload.try_push_str(&report.annotations);
        let _ = radio_payload.try_push_str(&report.annotations);
        if report.sleep_requested {
            // Latched for the rest of the process lifetime.
            ctx.low_voltage_sleep_requested = true;
        }

        if links.relay.is_active() && config.beacon.send_via_relay && !ctx.backup_digi_mode {
            ctx.panel.set(Line::Signal, "SENDING IGATE BEACON");
            links.display.show(ctx.panel.lines(), 0);
            ctx.panel.set_listening();
            links.relay.upload(&relay_payload);
        }

        if config.beacon.send_via_rf || ctx.backup_digi_mode {
            ctx.panel.set(Line::Signal, "SENDING DIGI BEACON");
            links.display.show(ctx.panel.lines(), 0);
            ctx.panel.set_listening();
            links.radio.enqueue(&radio_payload);
        }

        // Keep 0 reserved as the never-sent sentinel.
        ctx.scheduler.last_beacon_tx_ms = if now_ms == 0 { 1 } else { now_ms };
        ctx.scheduler.last_screen_on_ms = now_ms;
        ctx.scheduler.beacon_due = false;
    }

    /// `Stations ({m}min) = {n}`, space-padded to keep single digits
    /// column-aligned.
    fn update_station_count(config: &Config, ctx: &mut StationContext, links: &mut Links) {
        let count = links.stations.count();
        let mut line = crate::display::LineBuf::new();
        let _ = write!(line, "Stations ({}min) = ", config.remember_station_minutes);
        if count < 10 {
            let _ = line.try_push(' ');
        }
        let _ = write!(line, "{count}");
        ctx.panel.set(Line::StationCount, &line);
    }

    /// Static payload prefix: callsign, application tag, and the
    /// configured path when it carries a WIDE digipeating prefix.
    fn compose_base(buf: &mut PayloadBuf, config: &Config) {
        let _ = write!(buf, "{}>{}", config.callsign, APP_TAG);
        if config.beacon.path.starts_with("WIDE") {
            let _ = write!(buf, ",{}", config.beacon.path);
        }
        let _ = buf.try_push(':');
    }
}
