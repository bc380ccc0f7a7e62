//! Bounded display-line buffers.
//!
//! The status display is seven fixed logical lines of text. Each line is an
//! owned, bounded buffer; writes past [`LINE_CHARS`] truncate instead of
//! growing. Within one poll iteration each line has a single writer.

use arrayvec::ArrayString;

pub const LINE_CHARS: usize = 26;
pub const LINE_COUNT: usize = 7;

/// One display line, truncated at [`LINE_CHARS`].
pub type LineBuf = ArrayString<LINE_CHARS>;

/// Idle marker shown in the signal slot between packets.
pub const LISTENING: &str = "     listening...";

/// Logical display-line slots, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Own callsign.
    StationId,
    /// Relay link address or backup-digi marker.
    Connectivity,
    /// Free status slot.
    Status,
    /// Tracked-station counter.
    StationCount,
    /// Routing direction of the last packet.
    Direction,
    /// Sender and classification of the last packet, or battery report.
    Packet,
    /// Signal quality of the last packet, or activity banner.
    Signal,
}

impl Line {
    fn index(self) -> usize {
        match self {
            Line::StationId => 0,
            Line::Connectivity => 1,
            Line::Status => 2,
            Line::StationCount => 3,
            Line::Direction => 4,
            Line::Packet => 5,
            Line::Signal => 6,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct DisplayPanel {
    lines: [LineBuf; LINE_COUNT],
}

impl DisplayPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a line, truncating at the line width.
    pub fn set(&mut self, line: Line, text: &str) {
        let buf = &mut self.lines[line.index()];
        buf.clear();
        push_truncated(buf, text);
    }

    /// Appends to a line, truncating at the line width.
    pub fn append(&mut self, line: Line, text: &str) {
        push_truncated(&mut self.lines[line.index()], text);
    }

    #[must_use]
    pub fn get(&self, line: Line) -> &str {
        &self.lines[line.index()]
    }

    #[must_use]
    pub fn lines(&self) -> &[LineBuf; LINE_COUNT] {
        &self.lines
    }

    pub fn set_listening(&mut self) {
        self.set(Line::Signal, LISTENING);
    }
}

fn push_truncated(buf: &mut LineBuf, text: &str) {
    for ch in text.chars() {
        if buf.try_push(ch).is_err() {
            break;
        }
    }
}
