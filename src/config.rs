use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Periodic beacon settings. The path is only prepended to outbound
/// packets when it carries a `WIDE` digipeating prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconSettings {
    pub interval_minutes: u32,
    pub path: String,
    pub comment: String,
    pub send_via_relay: bool,
    pub send_via_rf: bool,
}

impl Default for BeaconSettings {
    fn default() -> Self {
        Self {
            interval_minutes: 15,
            path: String::from("WIDE1-1"),
            comment: String::from("LoRa iGate"),
            send_via_relay: true,
            send_via_rf: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub always_on: bool,
    pub timeout_seconds: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            always_on: false,
            timeout_seconds: 30,
        }
    }
}

/// Per-source battery reporting and monitoring flags. `send_*` puts the
/// voltage into the beacon text and display; `monitor_*` arms the
/// low-voltage sleep threshold for that source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterySettings {
    pub send_internal_voltage: bool,
    pub monitor_internal_voltage: bool,
    pub internal_sleep_voltage: f32,
    pub send_external_voltage: bool,
    pub monitor_external_voltage: bool,
    pub external_sleep_voltage: f32,
}

impl Default for BatterySettings {
    fn default() -> Self {
        Self {
            send_internal_voltage: false,
            monitor_internal_voltage: false,
            internal_sleep_voltage: 3.0,
            send_external_voltage: false,
            monitor_external_voltage: false,
            external_sleep_voltage: 10.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoraSettings {
    pub tx_freq_hz: u32,
    pub rx_freq_hz: u32,
}

impl Default for LoraSettings {
    fn default() -> Self {
        Self {
            tx_freq_hz: 433_775_000,
            rx_freq_hz: 433_775_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebootSettings {
    pub enabled: bool,
    pub hours: u32,
}

impl Default for RebootSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            hours: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// Weather telemetry is composed into beacons when true; whether a
    /// module is actually fitted is a board capability, not configuration.
    pub active: bool,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self { active: false }
    }
}

/// Station configuration, read-only to the orchestration core. The agent
/// only ever mutates it through the frequency guard correction, which
/// persists and restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub callsign: String,
    pub beacon: BeaconSettings,
    pub display: DisplaySettings,
    pub battery: BatterySettings,
    pub lora: LoraSettings,
    pub reboot: RebootSettings,
    pub weather: WeatherSettings,
    /// Minutes a heard station stays in the directory before pruning.
    pub remember_station_minutes: u32,
    /// Remote-log-only mode: position lookups are skipped during packet
    /// classification.
    pub log_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            callsign: String::from("N0CALL-10"),
            beacon: BeaconSettings::default(),
            display: DisplaySettings::default(),
            battery: BatterySettings::default(),
            lora: LoraSettings::default(),
            reboot: RebootSettings::default(),
            weather: WeatherSettings::default(),
            remember_station_minutes: 30,
            log_only: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Beacon interval in monotonic-clock milliseconds.
    pub fn beacon_interval_ms(&self) -> u32 {
        self.beacon.interval_minutes.saturating_mul(60_000)
    }

    /// Display timeout in monotonic-clock milliseconds.
    pub fn display_timeout_ms(&self) -> u32 {
        self.display.timeout_seconds.saturating_mul(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.callsign, config.callsign);
        assert_eq!(back.beacon.interval_minutes, config.beacon.interval_minutes);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"callsign":"CA2RXU-10"}"#).unwrap();
        assert_eq!(config.callsign, "CA2RXU-10");
        assert_eq!(config.beacon.interval_minutes, 15);
        assert!(!config.log_only);
    }

    #[test]
    fn test_interval_conversion() {
        let mut config = Config::default();
        config.beacon.interval_minutes = 10;
        assert_eq!(config.beacon_interval_ms(), 600_000);
        config.display.timeout_seconds = 45;
        assert_eq!(config.display_timeout_ms(), 45_000);
    }
}
