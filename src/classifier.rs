//! Received-packet classification for the status display.
//!
//! Inspects a packet's text, extracts the sender from the addressing
//! header, matches the APRS payload marker, and produces the three display
//! lines describing the packet. Position reports additionally trigger the
//! distance/comment lookup collaborator unless log-only mode is active.

use crate::display::{DisplayPanel, Line, LineBuf};
use crate::links::{DistanceText, PositionLookup};
use core::fmt::Write;

/// Sender field is space-padded to this display width.
const SENDER_WIDTH: usize = 9;

/// Payload markers only count at or after this character position, to
/// avoid false positives inside the addressing header.
const MIN_MARKER_POS: usize = 10;

/// Routing direction of a handled packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketDirection {
    RadioToInternet,
    InternetToRadio,
    Relay,
}

impl PacketDirection {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PacketDirection::RadioToInternet => "LoRa Rx ----> APRS-IS",
            PacketDirection::InternetToRadio => "APRS-IS ----> LoRa Tx",
            PacketDirection::Relay => "LoRa Rx ----> LoRa Tx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Message,
    Status,
    Position,
    Telemetry,
    CompressedPosition,
    Object,
    Unknown,
}

impl PayloadKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PayloadKind::Message => "> MESSAGE",
            PayloadKind::Status => "> NEW STATUS",
            PayloadKind::Position => "> GPS BEACON",
            PayloadKind::Telemetry => "> TELEMETRY",
            PayloadKind::CompressedPosition => ">  MIC-E",
            PayloadKind::Object => ">  OBJECT",
            PayloadKind::Unknown => "> ??????????",
        }
    }
}

/// Signal quality annotation of the received packet.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMeta {
    pub rssi_dbm: i16,
    pub snr_db: f32,
    pub freq_error_hz: i32,
}

/// Display lines produced by one classification.
#[derive(Debug, Clone)]
pub struct DisplayUpdate {
    pub kind: PayloadKind,
    pub direction_line: LineBuf,
    pub packet_line: LineBuf,
    pub signal_line: LineBuf,
}

impl DisplayUpdate {
    pub fn apply(&self, panel: &mut DisplayPanel) {
        panel.set(Line::Direction, &self.direction_line);
        panel.set(Line::Packet, &self.packet_line);
        panel.set(Line::Signal, &self.signal_line);
    }
}

fn marker_at(packet: &str, marker: &str) -> bool {
    matches!(packet.find(marker), Some(pos) if pos >= MIN_MARKER_POS)
}

/// Matches the payload marker table. Check order matters: a `:=` position
/// marker wins over the `:T#` telemetry marker.
#[must_use]
pub fn payload_kind(packet: &str) -> PayloadKind {
    if marker_at(packet, "::") {
        PayloadKind::Message
    } else if marker_at(packet, ":>") {
        PayloadKind::Status
    } else if marker_at(packet, ":!") || marker_at(packet, ":=") {
        PayloadKind::Position
    } else if marker_at(packet, ":T#") && !packet.contains(":=/") {
        PayloadKind::Telemetry
    } else if marker_at(packet, ":`") {
        PayloadKind::CompressedPosition
    } else if marker_at(packet, ":;") {
        PayloadKind::Object
    } else {
        PayloadKind::Unknown
    }
}

#[derive(Debug)]
pub struct PacketClassifier {
    /// Log-only mode skips the position lookup.
    log_only: bool,
    /// Distance shown for position reports while the lookup is skipped.
    last_distance: DistanceText,
}

impl PacketClassifier {
    #[must_use]
    pub fn new(log_only: bool) -> Self {
        Self {
            log_only,
            last_distance: DistanceText::new(),
        }
    }

    pub fn classify(
        &mut self,
        packet: &str,
        direction: PacketDirection,
        signal: SignalMeta,
        lookup: &mut dyn PositionLookup,
    ) -> DisplayUpdate {
        let kind = payload_kind(packet);

        let mut direction_line = LineBuf::new();
        let _ = direction_line.try_push_str(direction.label());

        let sender = packet.find('>').map_or(packet, |pos| &packet[..pos]);
        let mut packet_line = LineBuf::new();
        let _ = packet_line.try_push_str(sender);
        for _ in sender.chars().count()..SENDER_WIDTH {
            let _ = packet_line.try_push(' ');
        }
        let _ = packet_line.try_push_str(kind.label());

        let signal_line = if kind == PayloadKind::Position {
            if !self.log_only {
                let info = lookup.resolve(packet);
                self.last_distance = info.distance_km;
            }
            Self::position_signal_line(signal, &self.last_distance)
        } else {
            Self::default_signal_line(signal)
        };

        DisplayUpdate {
            kind,
            direction_line,
            packet_line,
            signal_line,
        }
    }

    fn default_signal_line(signal: SignalMeta) -> LineBuf {
        let mut line = LineBuf::new();
        let _ = write!(
            line,
            "RSSI:{}dBm SNR: {:.2}dBm",
            signal.rssi_dbm, signal.snr_db
        );
        line
    }

    /// Distance-annotated variant, column-aligned for the fixed-width
    /// display: one space after RSSI below -100 dBm (the extra digit eats
    /// it), plus one more when the distance is single-digit kilometers.
    fn position_signal_line(signal: SignalMeta, distance: &str) -> LineBuf {
        let mut line = LineBuf::new();
        let _ = write!(line, "RSSI:{}dBm", signal.rssi_dbm);
        if signal.rssi_dbm <= -100 {
            let _ = line.try_push(' ');
        } else {
            let _ = line.try_push_str("  ");
        }
        if distance.find('.') == Some(1) {
            let _ = line.try_push(' ');
        }
        let _ = write!(line, "D:{distance}km");
        line
    }
}
