//! Simulated board: in-memory collaborators for tests and the station
//! simulator binary. Every call the core makes is recorded in a shared
//! [`SimState`] so tests can assert on dispatch order and arguments.

use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::display::{LineBuf, LINE_COUNT};
use crate::links::{
    BatteryProbe, DisplayLink, EventLog, Links, LogCategory, PositionInfo, PositionLookup,
    RadioLink, RelayLink, StationDirectory, SystemControl, WeatherSensor, WeatherSummary,
};

/// Recorded state shared by every simulated collaborator.
#[derive(Debug)]
pub struct SimState {
    pub relay_active: bool,
    pub local_address: String,
    pub relay_uploads: Vec<String>,
    pub radio_packets: Vec<String>,
    pub radio_low_power: bool,
    pub prune_calls: u32,
    pub station_count: usize,
    pub weather_summary: String,
    pub internal_voltage: f32,
    pub external_voltage: f32,
    pub distance_km: String,
    pub comment: String,
    pub lookup_calls: u32,
    pub display_power: bool,
    pub show_calls: u32,
    pub last_shown: Vec<String>,
    pub last_hold_ms: u32,
    pub events: Vec<(LogCategory, String)>,
    pub settles: Vec<u32>,
    pub persisted_configs: Vec<Config>,
    pub restarts: u32,
    pub wake_timer_s: Option<u32>,
    pub peripheral_power: bool,
    pub deep_sleeps: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            relay_active: true,
            local_address: "10.0.0.12".to_string(),
            relay_uploads: Vec::new(),
            radio_packets: Vec::new(),
            radio_low_power: false,
            prune_calls: 0,
            station_count: 0,
            weather_summary: "220/004g007t077r000p000P000h50b09900".to_string(),
            internal_voltage: 4.1,
            external_voltage: 12.6,
            distance_km: "12.3".to_string(),
            comment: String::new(),
            lookup_calls: 0,
            display_power: true,
            show_calls: 0,
            last_shown: Vec::new(),
            last_hold_ms: 0,
            events: Vec::new(),
            settles: Vec::new(),
            persisted_configs: Vec::new(),
            restarts: 0,
            wake_timer_s: None,
            peripheral_power: true,
            deep_sleeps: 0,
        }
    }
}

type Shared = Arc<Mutex<SimState>>;

/// Builder for a full set of simulated links sharing one [`SimState`].
pub struct SimBoard {
    state: Shared,
}

impl SimBoard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState::default())),
        }
    }

    /// Handle for inspecting and mutating the recorded state.
    #[must_use]
    pub fn state(&self) -> Shared {
        Arc::clone(&self.state)
    }

    /// Links with every board-variant capability present. Tests that model
    /// a leaner board drop the optional members afterwards.
    #[must_use]
    pub fn links(&self) -> Links {
        Links {
            stations: Box::new(SimStations(self.state())),
            radio: Box::new(SimRadio(self.state())),
            relay: Box::new(SimRelay(self.state())),
            display: Box::new(SimDisplay(self.state())),
            lookup: Box::new(SimLookup(self.state())),
            log: Box::new(SimLog(self.state())),
            system: Box::new(SimControl(self.state())),
            weather: Some(Box::new(SimWeather(self.state()))),
            battery_internal: Some(Box::new(SimBattery {
                state: self.state(),
                external: false,
            })),
            battery_external: Some(Box::new(SimBattery {
                state: self.state(),
                external: true,
            })),
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

struct SimStations(Shared);

impl StationDirectory for SimStations {
    fn prune_stale(&mut self) {
        self.0.lock().unwrap().prune_calls += 1;
    }

    fn count(&self) -> usize {
        self.0.lock().unwrap().station_count
    }
}

struct SimRadio(Shared);

impl RadioLink for SimRadio {
    fn enqueue(&mut self, payload: &str) {
        self.0.lock().unwrap().radio_packets.push(payload.to_string());
    }

    fn enter_low_power(&mut self) {
        self.0.lock().unwrap().radio_low_power = true;
    }
}

struct SimRelay(Shared);

impl RelayLink for SimRelay {
    fn is_active(&self) -> bool {
        self.0.lock().unwrap().relay_active
    }

    fn upload(&mut self, payload: &str) {
        self.0.lock().unwrap().relay_uploads.push(payload.to_string());
    }

    fn local_address(&self) -> LineBuf {
        let mut line = LineBuf::new();
        for ch in self.0.lock().unwrap().local_address.chars() {
            if line.try_push(ch).is_err() {
                break;
            }
        }
        line
    }
}

struct SimDisplay(Shared);

impl DisplayLink for SimDisplay {
    fn show(&mut self, lines: &[LineBuf; LINE_COUNT], hold_ms: u32) {
        let mut state = self.0.lock().unwrap();
        state.show_calls += 1;
        state.last_shown = lines.iter().map(|l| l.as_str().to_string()).collect();
        state.last_hold_ms = hold_ms;
    }

    fn set_power(&mut self, on: bool) {
        self.0.lock().unwrap().display_power = on;
    }
}

struct SimLookup(Shared);

impl PositionLookup for SimLookup {
    fn resolve(&mut self, _packet: &str) -> PositionInfo {
        let mut state = self.0.lock().unwrap();
        state.lookup_calls += 1;
        let mut info = PositionInfo::default();
        let _ = info.distance_km.try_push_str(&state.distance_km);
        let _ = info.comment.try_push_str(&state.comment);
        info
    }
}

struct SimLog(Shared);

impl EventLog for SimLog {
    fn record(&mut self, category: LogCategory, message: &str, _rssi: i16, _snr: f32, _freq_error: i32) {
        self.0
            .lock()
            .unwrap()
            .events
            .push((category, message.to_string()));
    }
}

struct SimControl(Shared);

impl SystemControl for SimControl {
    fn settle(&mut self, ms: u32) {
        self.0.lock().unwrap().settles.push(ms);
    }

    fn persist_config(&mut self, config: &Config) {
        self.0.lock().unwrap().persisted_configs.push(config.clone());
    }

    fn restart(&mut self) {
        self.0.lock().unwrap().restarts += 1;
    }

    fn arm_wake_timer(&mut self, seconds: u32) {
        self.0.lock().unwrap().wake_timer_s = Some(seconds);
    }

    fn set_peripheral_power(&mut self, on: bool) {
        self.0.lock().unwrap().peripheral_power = on;
    }

    fn deep_sleep(&mut self) {
        self.0.lock().unwrap().deep_sleeps += 1;
    }
}

struct SimWeather(Shared);

impl WeatherSensor for SimWeather {
    fn read_summary(&mut self) -> WeatherSummary {
        let mut summary = WeatherSummary::new();
        for ch in self.0.lock().unwrap().weather_summary.chars() {
            if summary.try_push(ch).is_err() {
                break;
            }
        }
        summary
    }
}

struct SimBattery {
    state: Shared,
    external: bool,
}

impl BatteryProbe for SimBattery {
    fn read_voltage(&mut self) -> f32 {
        let state = self.state.lock().unwrap();
        if self.external {
            state.external_voltage
        } else {
            state.internal_voltage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_state_visible_across_links() {
        let board = SimBoard::new();
        let mut links = board.links();

        links.radio.enqueue("CALL>APRS:>test");
        links.relay.upload("CALL>APRS:>test");
        board.state().lock().unwrap().station_count = 4;

        let state = board.state();
        let state = state.lock().unwrap();
        assert_eq!(state.radio_packets.len(), 1);
        assert_eq!(state.relay_uploads.len(), 1);
        drop(state);
        assert_eq!(links.stations.count(), 4);
    }
}
