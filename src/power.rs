//! Battery safety: voltage reporting, low-voltage detection, and the
//! terminal shutdown sequence.
//!
//! [`PowerMonitor::evaluate`] only signals intent through the latched
//! sleep request; the irreversible transition lives in
//! [`LowVoltageShutdown::execute`] and runs from the poll loop.

use crate::agent::StationContext;
use crate::config::BatterySettings;
use crate::display::{DisplayPanel, Line, LineBuf};
use crate::links::{BatteryProbe, Links, LogCategory};
use arrayvec::ArrayString;
use core::fmt::Write;

/// Beacon text fragments appended by one evaluation (two voltage reports
/// plus two warnings at most).
pub type PowerAnnotations = ArrayString<96>;

const INTERNAL_WARNING: &str = " **IntBatWarning:SLEEP**";
const EXTERNAL_WARNING: &str = " **ExtBatWarning:SLEEP**";

/// Wake again after half an hour of deep sleep.
const WAKE_TIMER_SECONDS: u32 = 30 * 60;
const BOOT_SETTLE_MS: u32 = 3_000;
const PRE_SLEEP_SETTLE_MS: u32 = 100;

#[derive(Debug, Default)]
pub struct PowerReport {
    pub annotations: PowerAnnotations,
    /// Latched within the evaluation: true once any threshold is breached.
    pub sleep_requested: bool,
}

#[derive(Debug)]
pub struct PowerMonitor;

impl PowerMonitor {
    /// Samples the configured voltage sources, appends beacon fragments and
    /// the display report, and raises the sleep request on any breached
    /// threshold. Threshold checks are independent per source.
    pub fn evaluate(
        settings: &BatterySettings,
        internal: Option<&mut (dyn BatteryProbe + 'static)>,
        external: Option<&mut (dyn BatteryProbe + 'static)>,
        panel: &mut DisplayPanel,
    ) -> PowerReport {
        let mut report = PowerReport::default();

        if let Some(probe) = internal {
            if settings.send_internal_voltage || settings.monitor_internal_voltage {
                let voltage = probe.read_voltage();
                if settings.send_internal_voltage {
                    let _ = write!(report.annotations, " Batt={voltage:.2}V");
                    let mut line = LineBuf::new();
                    let _ = write!(line, "    (Batt={voltage:.2}V)");
                    panel.set(Line::Packet, &line);
                }
                if settings.monitor_internal_voltage && voltage < settings.internal_sleep_voltage {
                    let _ = report.annotations.try_push_str(INTERNAL_WARNING);
                    report.sleep_requested = true;
                }
            }
        }

        if let Some(probe) = external {
            if settings.send_external_voltage || settings.monitor_external_voltage {
                let voltage = probe.read_voltage();
                if settings.send_external_voltage {
                    let _ = write!(report.annotations, " Ext={voltage:.2}V");
                    let mut line = LineBuf::new();
                    let _ = write!(line, "    (Ext V={voltage:.2}V)");
                    panel.set(Line::Packet, &line);
                }
                if settings.monitor_external_voltage && voltage < settings.external_sleep_voltage {
                    let _ = report.annotations.try_push_str(EXTERNAL_WARNING);
                    report.sleep_requested = true;
                }
            }
        }

        report
    }
}

/// Execution context of the shutdown: boot-time checks settle first,
/// runtime checks power the display down instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Boot,
    Runtime,
}

#[derive(Debug)]
pub struct LowVoltageShutdown;

impl LowVoltageShutdown {
    /// Terminal low-power transition. On real hardware `deep_sleep` does
    /// not return; the caller must treat this call as the end of the
    /// process instance.
    pub fn execute(phase: ShutdownPhase, ctx: &mut StationContext, links: &mut Links) {
        if phase == ShutdownPhase::Boot {
            links.system.settle(BOOT_SETTLE_MS);
        }
        tracing::warn!("low battery voltage, entering deep sleep");
        links.log.record(
            LogCategory::Safety,
            "*** Sleeping Low Battery Voltage ***",
            0,
            0.0,
            0,
        );
        links.system.arm_wake_timer(WAKE_TIMER_SECONDS);
        if phase == ShutdownPhase::Runtime {
            links.display.set_power(false);
        }
        links.system.set_peripheral_power(false);
        links.radio.enter_low_power();
        // Prevents a stale retransmit when the radio wakes back up.
        ctx.transmit_guard = true;
        links.system.settle(PRE_SLEEP_SETTLE_MS);
        links.system.deep_sleep();
    }
}
