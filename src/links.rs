//! Collaborator interfaces consumed by the orchestration core.
//!
//! Everything hardware- or transport-shaped sits behind these traits: the
//! core composes payloads and decides when, the collaborators move bytes.
//! Dispatch calls are fire-and-forget; delivery retry, if any, belongs to
//! the transport implementation.

use crate::config::Config;
use crate::display::{LineBuf, LINE_COUNT};
use arrayvec::ArrayString;

/// Fixed-width weather field summary, e.g. `220/004g007t077r000p000P000h50b09900`.
pub type WeatherSummary = ArrayString<40>;
/// Formatted distance in kilometers, e.g. `12.3`.
pub type DistanceText = ArrayString<8>;
/// Free-text comment resolved from a position report.
pub type CommentText = ArrayString<64>;

/// Heard-station directory. The core only prunes it and reads its size.
pub trait StationDirectory: Send {
    fn prune_stale(&mut self);
    fn count(&self) -> usize;
}

/// Outbound radio channel. `enqueue` hands a payload to the transmit
/// buffer without delivery confirmation.
pub trait RadioLink: Send {
    fn enqueue(&mut self, payload: &str);
    fn enter_low_power(&mut self);
}

/// Internet relay (APRS-IS style) backhaul.
pub trait RelayLink: Send {
    /// Connectivity is established and the relay session is up.
    fn is_active(&self) -> bool;
    fn upload(&mut self, payload: &str);
    fn local_address(&self) -> LineBuf;
}

pub trait WeatherSensor: Send {
    fn read_summary(&mut self) -> WeatherSummary;
}

pub trait BatteryProbe: Send {
    fn read_voltage(&mut self) -> f32;
}

#[derive(Debug, Clone, Default)]
pub struct PositionInfo {
    pub distance_km: DistanceText,
    pub comment: CommentText,
}

/// Distance/comment resolver for received position reports.
pub trait PositionLookup: Send {
    fn resolve(&mut self, packet: &str) -> PositionInfo;
}

pub trait DisplayLink: Send {
    fn show(&mut self, lines: &[LineBuf; LINE_COUNT], hold_ms: u32);
    fn set_power(&mut self, on: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    RelayTx,
    RadioTx,
    Beacon,
    Safety,
    System,
}

/// Structured event log transport (remote syslog or serial).
pub trait EventLog: Send {
    fn record(&mut self, category: LogCategory, message: &str, rssi: i16, snr: f32, freq_error: i32);
}

/// Process- and board-level controls. `restart` and `deep_sleep` are
/// terminal on real hardware; simulated implementations record the call
/// and return so the poll loop can surface the outcome.
pub trait SystemControl: Send {
    /// Bounded settle delay before hardware-sensitive operations.
    fn settle(&mut self, ms: u32);
    fn persist_config(&mut self, config: &Config);
    fn restart(&mut self);
    fn arm_wake_timer(&mut self, seconds: u32);
    /// Auxiliary peripheral power rail.
    fn set_peripheral_power(&mut self, on: bool);
    fn deep_sleep(&mut self);
}

/// Board capability descriptor: every collaborator the core talks to,
/// with board-variant features as optional members. The orchestration
/// logic stays variant-agnostic and only asks whether a capability is
/// present.
pub struct Links {
    pub stations: Box<dyn StationDirectory>,
    pub radio: Box<dyn RadioLink>,
    pub relay: Box<dyn RelayLink>,
    pub display: Box<dyn DisplayLink>,
    pub lookup: Box<dyn PositionLookup>,
    pub log: Box<dyn EventLog>,
    pub system: Box<dyn SystemControl>,

    // Board-variant capabilities.
    pub weather: Option<Box<dyn WeatherSensor>>,
    pub battery_internal: Option<Box<dyn BatteryProbe>>,
    pub battery_external: Option<Box<dyn BatteryProbe>>,
}
