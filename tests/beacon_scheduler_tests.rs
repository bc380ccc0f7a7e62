use lorigate::display::Line;
use lorigate::sim::SimBoard;
use lorigate::{Config, GatewayAgent, PollOutcome, FIRMWARE_VERSION, PROJECT_URL};

#[test]
fn test_first_poll_dispatches_igate_beacon() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.start(0);
    assert_eq!(agent.poll(1_000), PollOutcome::Running);

    let state = board.state();
    let state = state.lock().unwrap();
    assert_eq!(state.relay_uploads[0], "N0CALL-10>APLRG1,WIDE1-1:LoRa iGate");
    assert!(state.radio_packets.is_empty());
    assert_eq!(state.prune_calls, 1);
}

#[test]
fn test_boot_status_sent_once_after_first_beacon() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.start(0);
    agent.poll(1_000);
    agent.poll(2_000);
    agent.poll(3_000);

    let state = board.state();
    let state = state.lock().unwrap();
    let expected = format!(
        "N0CALL-10>APLRG1,WIDE1-1,qAC:>{} {}",
        PROJECT_URL, FIRMWARE_VERSION
    );
    let status_count = state
        .relay_uploads
        .iter()
        .filter(|u| u.contains(",qAC:>"))
        .count();
    assert_eq!(status_count, 1);
    assert_eq!(state.relay_uploads[1], expected);
}

#[test]
fn test_no_beacon_before_interval_elapses() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.start(0);
    agent.poll(1_000);
    let sent_after_first = board.state().lock().unwrap().relay_uploads.len();

    // Default interval is 15 minutes.
    agent.poll(300_000);
    agent.poll(600_000);
    assert_eq!(board.state().lock().unwrap().relay_uploads.len(), sent_after_first);

    agent.poll(901_001);
    assert_eq!(
        board.state().lock().unwrap().relay_uploads.len(),
        sent_after_first + 1
    );
}

#[test]
fn test_forced_beacon_ignores_interval() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.start(0);
    agent.poll(1_000);
    let sent_after_first = board.state().lock().unwrap().relay_uploads.len();

    agent.force_beacon();
    agent.poll(2_000);
    assert_eq!(
        board.state().lock().unwrap().relay_uploads.len(),
        sent_after_first + 1
    );
}

#[test]
fn test_backup_digi_mode_routes_beacon_to_radio() {
    let board = SimBoard::new();
    board.state().lock().unwrap().relay_active = false;
    let mut agent = GatewayAgent::new(Config::default(), board.links());
    agent.set_backup_digi_mode(true);

    agent.start(0);
    agent.poll(1_000);

    let state = board.state();
    let state = state.lock().unwrap();
    assert!(state.relay_uploads.is_empty());
    assert_eq!(state.radio_packets[0], "N0CALL-10>APLRG1,WIDE1-1:LoRa iGate");
    drop(state);
    assert_eq!(
        agent.context().panel.get(Line::Connectivity),
        "- BACKUP DIGI MODE -"
    );
    // Boot status has no backhaul; it stays pending for a later cycle.
    assert!(agent.context().scheduler.pending_boot_status);
}

#[test]
fn test_rf_beacon_dispatches_both_variants() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.beacon.send_via_rf = true;
    let mut agent = GatewayAgent::new(config, board.links());

    agent.start(0);
    agent.poll(1_000);

    let state = board.state();
    let state = state.lock().unwrap();
    assert_eq!(state.relay_uploads[0], "N0CALL-10>APLRG1,WIDE1-1:LoRa iGate");
    assert_eq!(state.radio_packets[0], "N0CALL-10>APLRG1,WIDE1-1:LoRa iGate");
}

#[test]
fn test_non_wide_path_is_omitted() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.beacon.path = String::from("GATE");
    let mut agent = GatewayAgent::new(config, board.links());

    agent.start(0);
    agent.poll(1_000);

    let uploads = board.state().lock().unwrap().relay_uploads.clone();
    assert_eq!(uploads[0], "N0CALL-10>APLRG1:LoRa iGate");
}

#[test]
fn test_weather_placeholder_without_sensor() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.weather.active = true;
    let mut links = board.links();
    links.weather = None;
    let mut agent = GatewayAgent::new(config, links);

    agent.start(0);
    agent.poll(1_000);

    let uploads = board.state().lock().unwrap().relay_uploads.clone();
    assert_eq!(
        uploads[0],
        "N0CALL-10>APLRG1,WIDE1-1:.../...g...t...r...p...P...h..b.....LoRa iGate"
    );
}

#[test]
fn test_weather_summary_from_sensor() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.weather.active = true;
    let mut agent = GatewayAgent::new(config, board.links());

    agent.start(0);
    agent.poll(1_000);

    let uploads = board.state().lock().unwrap().relay_uploads.clone();
    assert_eq!(
        uploads[0],
        "N0CALL-10>APLRG1,WIDE1-1:220/004g007t077r000p000P000h50b09900LoRa iGate"
    );
}

#[test]
fn test_station_count_line_padding() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.start(0);
    agent.poll(1_000);
    assert_eq!(
        agent.context().panel.get(Line::StationCount),
        "Stations (30min) =  0"
    );

    board.state().lock().unwrap().station_count = 12;
    agent.force_beacon();
    agent.poll(2_000);
    assert_eq!(
        agent.context().panel.get(Line::StationCount),
        "Stations (30min) = 12"
    );
}

#[test]
fn test_display_blanks_after_timeout() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.start(0);
    agent.poll(1_000);
    assert!(board.state().lock().unwrap().display_power);

    // Default timeout is 30 seconds past the last screen activation.
    agent.poll(32_000);
    assert!(!board.state().lock().unwrap().display_power);
}

#[test]
fn test_always_on_display_never_blanks() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.display.always_on = true;
    let mut agent = GatewayAgent::new(config, board.links());

    agent.start(0);
    agent.poll(1_000);
    agent.poll(120_000);
    assert!(board.state().lock().unwrap().display_power);
}

#[test]
fn test_reboot_timer_restarts_after_budget() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.reboot.enabled = true;
    config.reboot.hours = 1;
    let mut agent = GatewayAgent::new(config, board.links());

    agent.start(0);
    assert_eq!(agent.poll(1_800_000), PollOutcome::Running);
    assert_eq!(agent.poll(3_600_001), PollOutcome::Restarting);
    assert_eq!(board.state().lock().unwrap().restarts, 1);
}
