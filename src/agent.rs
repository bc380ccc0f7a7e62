//! Top-level gateway orchestrator.
//!
//! Owns the configuration, the shared station state, and the board
//! capability descriptor. An external driver calls [`GatewayAgent::poll`]
//! on every iteration of its cooperative loop; within one iteration the
//! beacon scheduler, the display timeout, the reboot watchdog, and the
//! low-voltage check run in that order, each to completion.

use crate::beacon::{BeaconScheduler, SchedulerState};
use crate::classifier::{PacketClassifier, PacketDirection, PayloadKind, SignalMeta};
use crate::config::Config;
use crate::display::{DisplayPanel, Line, LineBuf, LINE_COUNT};
use crate::freq::{FreqAction, FrequencyGuard};
use crate::links::Links;
use crate::power::{LowVoltageShutdown, ShutdownPhase};
use crate::watchdog::{DisplayTimeoutScheduler, RebootScheduler};
use crate::FIRMWARE_VERSION;

const SPLASH_HOLD_MS: u32 = 4_000;
const FREQ_DIAG_HOLD_MS: u32 = 1_000;

/// Shared mutable station state: display lines, scheduler timestamps, and
/// the process-lifetime flags. One instance, owned by the agent, passed by
/// reference to every component.
#[derive(Debug)]
pub struct StationContext {
    pub panel: DisplayPanel,
    pub scheduler: SchedulerState,
    /// Radio-only relay operation while Internet connectivity is down.
    pub backup_digi_mode: bool,
    /// Latched true by the power monitor; only a restart or wake clears it.
    pub low_voltage_sleep_requested: bool,
    /// Set by the shutdown sequence so a stale packet is not retransmitted
    /// on wake.
    pub transmit_guard: bool,
}

impl StationContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            panel: DisplayPanel::new(),
            scheduler: SchedulerState::new(),
            backup_digi_mode: false,
            low_voltage_sleep_requested: false,
            transmit_guard: false,
        }
    }
}

impl Default for StationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one poll iteration. `Restarting` and `Sleeping` are terminal
/// on real hardware; the simulated system control records them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Running,
    Restarting,
    Sleeping,
}

pub struct GatewayAgent {
    config: Config,
    ctx: StationContext,
    classifier: PacketClassifier,
    links: Links,
}

impl GatewayAgent {
    #[must_use]
    pub fn new(config: Config, links: Links) -> Self {
        let classifier = PacketClassifier::new(config.log_only);
        Self {
            config,
            ctx: StationContext::new(),
            classifier,
            links,
        }
    }

    /// Boot sequence: frequency plan enforcement, splash screen, initial
    /// display lines, reboot-timer notice, boot-time low-voltage check.
    pub fn start(&mut self, now_ms: u32) {
        tracing::info!(
            callsign = %self.config.callsign,
            version = FIRMWARE_VERSION,
            "starting station"
        );

        if self.enforce_frequency_plan() {
            return;
        }

        self.links.display.show(&splash_lines(), SPLASH_HOLD_MS);
        self.ctx.panel.set(Line::StationId, &self.config.callsign);
        self.ctx.panel.set_listening();
        self.refresh_connectivity();
        RebootScheduler::announce(&self.config);
        self.ctx.scheduler.last_screen_on_ms = now_ms;

        let _ = self.check_low_voltage(ShutdownPhase::Boot);
    }

    /// One cooperative poll-loop iteration.
    pub fn poll(&mut self, now_ms: u32) -> PollOutcome {
        self.refresh_connectivity();
        BeaconScheduler::check(&self.config, &mut self.ctx, &mut self.links, now_ms);
        DisplayTimeoutScheduler::check(&self.config, &self.ctx, &mut self.links, now_ms);

        if RebootScheduler::check(&self.config, &mut self.links, now_ms) {
            return PollOutcome::Restarting;
        }
        if self.check_low_voltage(ShutdownPhase::Runtime) {
            return PollOutcome::Sleeping;
        }
        PollOutcome::Running
    }

    /// Classifies a received packet and refreshes the display.
    pub fn handle_packet(
        &mut self,
        packet: &str,
        direction: PacketDirection,
        signal: SignalMeta,
    ) -> PayloadKind {
        let update =
            self.classifier
                .classify(packet, direction, signal, &mut *self.links.lookup);
        update.apply(&mut self.ctx.panel);
        self.links.display.show(self.ctx.panel.lines(), 0);
        update.kind
    }

    /// External beacon trigger, independent of the interval check.
    pub fn force_beacon(&mut self) {
        self.ctx.scheduler.beacon_due = true;
    }

    pub fn set_backup_digi_mode(&mut self, on: bool) {
        self.ctx.backup_digi_mode = on;
    }

    /// Guard-band enforcement. A violating plan is corrected, surfaced on
    /// the display and the log, persisted, and resolved by a restart.
    /// Returns true when the restart was issued.
    pub fn enforce_frequency_plan(&mut self) -> bool {
        match FrequencyGuard::check(self.config.lora.tx_freq_hz, self.config.lora.rx_freq_hz) {
            FreqAction::None => false,
            FreqAction::CorrectAndRestart { corrected_tx_hz } => {
                tracing::error!(
                    tx_hz = self.config.lora.tx_freq_hz,
                    rx_hz = self.config.lora.rx_freq_hz,
                    "tx freq within guard band of rx freq, autofixing and rebooting"
                );
                self.links
                    .display
                    .show(&freq_diagnostic_lines(), FREQ_DIAG_HOLD_MS);
                self.config.lora.tx_freq_hz = corrected_tx_hz;
                self.links.system.persist_config(&self.config);
                self.links.system.restart();
                true
            }
        }
    }

    /// Runs the terminal shutdown sequence when the sleep request is
    /// latched. Returns true when the sequence ran.
    pub fn check_low_voltage(&mut self, phase: ShutdownPhase) -> bool {
        if !self.ctx.low_voltage_sleep_requested {
            return false;
        }
        LowVoltageShutdown::execute(phase, &mut self.ctx, &mut self.links);
        true
    }

    fn refresh_connectivity(&mut self) {
        if self.ctx.backup_digi_mode {
            self.ctx.panel.set(Line::Connectivity, "- BACKUP DIGI MODE -");
        } else {
            let address = self.links.relay.local_address();
            self.ctx.panel.set(Line::Connectivity, &address);
        }
    }

    #[must_use]
    pub fn context(&self) -> &StationContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut StationContext {
        &mut self.ctx
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn splash_lines() -> [LineBuf; LINE_COUNT] {
    let mut lines = [LineBuf::new(); LINE_COUNT];
    let _ = lines[0].try_push_str(" LoRa APRS");
    let _ = lines[2].try_push_str("   ( iGATE & DIGI )");
    let _ = lines[6].try_push_str("      ");
    let _ = lines[6].try_push_str(FIRMWARE_VERSION);
    lines
}

fn freq_diagnostic_lines() -> [LineBuf; LINE_COUNT] {
    let mut lines = [LineBuf::new(); LINE_COUNT];
    let _ = lines[0].try_push_str("Tx Freq is less than");
    let _ = lines[1].try_push_str("125kHz from Rx Freq");
    let _ = lines[2].try_push_str("device will autofix");
    let _ = lines[3].try_push_str("and then reboot");
    lines
}
