//! # LoRa APRS Gateway Core
//!
//! Orchestration and validation engine for a radio-to-Internet amateur-radio
//! packet gateway (iGate) and digipeater: beacon timing and payload
//! composition, packet-type classification, callsign validation,
//! frequency-guard-band enforcement, and the low-voltage safety state
//! machine.
//!
//! Hardware and transport concerns (radio PHY, APRS-IS upload, display
//! rendering, sensor sampling, persistent storage) live behind the
//! collaborator traits in [`links`]; the core itself is single-threaded and
//! driven by a cooperative poll loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use lorigate::{Config, GatewayAgent};
//! use lorigate::sim::SimBoard;
//!
//! let board = SimBoard::new();
//! let mut agent = GatewayAgent::new(Config::default(), board.links());
//!
//! agent.start(0);
//! agent.poll(60_000);
//! ```
//!
//! ## Architecture
//!
//! - [`agent`] - top-level orchestrator and poll loop body
//! - [`beacon`] - beacon interval state machine and payload composition
//! - [`status`] - one-shot boot identification message
//! - [`classifier`] - received-packet classification for the display
//! - [`callsign`] - amateur-radio callsign validation
//! - [`freq`] - transmit/receive frequency guard band
//! - [`power`] - battery monitoring and the low-voltage shutdown sequence
//! - [`watchdog`] - display timeout and periodic reboot checks
//! - [`display`] - bounded display-line buffers
//! - [`links`] - collaborator traits and the board capability descriptor

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::doc_markdown)]

pub mod agent;
pub mod beacon;
pub mod callsign;
pub mod classifier;
pub mod config;
pub mod display;
pub mod freq;
pub mod links;
pub mod power;
pub mod sim;
pub mod status;
pub mod watchdog;

// Re-export main public types for convenience
pub use agent::{GatewayAgent, PollOutcome, StationContext};
pub use callsign::is_valid_callsign;
pub use classifier::{PacketClassifier, PacketDirection, PayloadKind, SignalMeta};
pub use config::Config;
pub use freq::FrequencyGuard;
pub use links::Links;

/// Build tag appended to the boot identification message.
pub const FIRMWARE_VERSION: &str = "2025.08.29";

/// Project URL carried in the boot identification message.
pub const PROJECT_URL: &str = "https://github.com/example/lorigate";

/// APRS destination/application tag used as the address field of every
/// packet this station originates.
pub const APP_TAG: &str = "APLRG1";
