use lorigate::classifier::{PacketDirection, PayloadKind, SignalMeta};
use lorigate::display::Line;
use lorigate::sim::SimBoard;
use lorigate::{Config, GatewayAgent};

fn signal(rssi_dbm: i16, snr_db: f32) -> SignalMeta {
    SignalMeta {
        rssi_dbm,
        snr_db,
        freq_error_hz: 0,
    }
}

#[test]
fn test_message_packet_display_lines() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    let kind = agent.handle_packet(
        "CA2RXU-7>APLRG1,WIDE1-1::CD2RXU   :hello{1",
        PacketDirection::RadioToInternet,
        signal(-97, 8.75),
    );

    assert_eq!(kind, PayloadKind::Message);
    let panel = &agent.context().panel;
    assert_eq!(panel.get(Line::Direction), "LoRa Rx ----> APRS-IS");
    assert_eq!(panel.get(Line::Packet), "CA2RXU-7 > MESSAGE");
    assert_eq!(panel.get(Line::Signal), "RSSI:-97dBm SNR: 8.75dBm");
}

#[test]
fn test_position_packet_resolves_distance() {
    let board = SimBoard::new();
    board.state().lock().unwrap().distance_km = "12.3".to_string();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    let kind = agent.handle_packet(
        "CA2RXU-7>APLRG1:!4916.45N/12311.12W>test",
        PacketDirection::RadioToInternet,
        signal(-97, 8.75),
    );

    assert_eq!(kind, PayloadKind::Position);
    assert_eq!(board.state().lock().unwrap().lookup_calls, 1);
    assert_eq!(
        agent.context().panel.get(Line::Signal),
        "RSSI:-97dBm  D:12.3km"
    );
}

#[test]
fn test_position_signal_line_column_alignment() {
    let board = SimBoard::new();
    board.state().lock().unwrap().distance_km = "5.4".to_string();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    // Single-digit distance gets one extra space.
    agent.handle_packet(
        "CA2RXU-7>APLRG1:!4916.45N",
        PacketDirection::RadioToInternet,
        signal(-97, 8.75),
    );
    assert_eq!(
        agent.context().panel.get(Line::Signal),
        "RSSI:-97dBm   D:5.4km"
    );

    // Three-digit RSSI keeps a single space after the unit.
    board.state().lock().unwrap().distance_km = "12.3".to_string();
    agent.handle_packet(
        "CA2RXU-7>APLRG1:!4916.45N",
        PacketDirection::RadioToInternet,
        signal(-113, 2.0),
    );
    assert_eq!(
        agent.context().panel.get(Line::Signal),
        "RSSI:-113dBm D:12.3km"
    );
}

#[test]
fn test_log_only_mode_skips_lookup() {
    let board = SimBoard::new();
    let mut config = Config::default();
    config.log_only = true;
    let mut agent = GatewayAgent::new(config, board.links());

    let kind = agent.handle_packet(
        "CA2RXU-7>APLRG1:!4916.45N",
        PacketDirection::RadioToInternet,
        signal(-97, 8.75),
    );

    assert_eq!(kind, PayloadKind::Position);
    assert_eq!(board.state().lock().unwrap().lookup_calls, 0);
}

#[test]
fn test_direction_labels() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.handle_packet(
        "CA2RXU-7>APLRG1:>online",
        PacketDirection::InternetToRadio,
        signal(-97, 8.75),
    );
    assert_eq!(
        agent.context().panel.get(Line::Direction),
        "APRS-IS ----> LoRa Tx"
    );

    agent.handle_packet(
        "CA2RXU-7>APLRG1:>online",
        PacketDirection::Relay,
        signal(-97, 8.75),
    );
    assert_eq!(
        agent.context().panel.get(Line::Direction),
        "LoRa Rx ----> LoRa Tx"
    );
}

#[test]
fn test_unknown_payload_marker() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    let kind = agent.handle_packet(
        "CA2RXU-7>APLRG1:invalid payload",
        PacketDirection::RadioToInternet,
        signal(-97, 8.75),
    );

    assert_eq!(kind, PayloadKind::Unknown);
    assert_eq!(agent.context().panel.get(Line::Packet), "CA2RXU-7 > ??????????");
}

#[test]
fn test_handled_packet_refreshes_display() {
    let board = SimBoard::new();
    let mut agent = GatewayAgent::new(Config::default(), board.links());

    agent.handle_packet(
        "CA2RXU-7>APLRG1:>online",
        PacketDirection::RadioToInternet,
        signal(-97, 8.75),
    );

    let state = board.state();
    let state = state.lock().unwrap();
    assert_eq!(state.show_calls, 1);
    assert_eq!(state.last_shown[4], "LoRa Rx ----> APRS-IS");
    assert_eq!(state.last_shown[5], "CA2RXU-7 > NEW STATUS");
}
