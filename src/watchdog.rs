//! Interval watchdogs sharing the beacon scheduler's monotonic-clock
//! pattern: display blanking after inactivity and the optional periodic
//! restart.

use crate::agent::StationContext;
use crate::config::Config;
use crate::links::Links;

#[derive(Debug)]
pub struct DisplayTimeoutScheduler;

impl DisplayTimeoutScheduler {
    /// Blanks the display once the inactivity timeout elapsed. A no-op in
    /// always-on mode.
    pub fn check(config: &Config, ctx: &StationContext, links: &mut Links, now_ms: u32) {
        let idle_ms = now_ms.wrapping_sub(ctx.scheduler.last_screen_on_ms);
        if !config.display.always_on && idle_ms >= config.display_timeout_ms() {
            links.display.set_power(false);
        }
    }
}

#[derive(Debug)]
pub struct RebootScheduler;

impl RebootScheduler {
    /// Boot-time notice so the operator knows the restart budget is armed.
    pub fn announce(config: &Config) {
        if config.reboot.enabled && config.reboot.hours > 0 {
            tracing::info!(hours = config.reboot.hours, "periodic reboot timer armed");
        }
    }

    /// Restarts the process once total uptime exceeds the configured hour
    /// budget. Returns true when the restart was issued.
    pub fn check(config: &Config, links: &mut Links, now_ms: u32) -> bool {
        if !config.reboot.enabled || config.reboot.hours == 0 {
            return false;
        }
        let budget_ms = u64::from(config.reboot.hours) * 3_600_000;
        if u64::from(now_ms) > budget_ms {
            tracing::warn!("automatic reboot timer expired, restarting");
            links.system.restart();
            return true;
        }
        false
    }
}
