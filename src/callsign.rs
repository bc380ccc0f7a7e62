//! Amateur-radio callsign validation.
//!
//! Accepts a base callsign of 4-6 characters with an optional numeric SSID
//! suffix in `[0, 15]`. Short prefixes of the `A0AA` class are normalized by
//! left-padding one blank so every accepted shape places a digit at index 2
//! and a letter at index 3.

use heapless::Vec;

/// Winlink gateway identifier, always accepted.
const RESERVED_WINLINK: &str = "WLNK-1";

const MIN_BASE_LEN: usize = 4;
const MAX_BASE_LEN: usize = 6;
const MAX_SSID: u8 = 15;

/// Normalized base: at most 6 characters plus one padding blank.
type NormalizedBase = Vec<u8, 7>;

fn ssid_in_range(ssid: &str) -> bool {
    matches!(ssid.parse::<u8>(), Ok(n) if n <= MAX_SSID)
}

/// Validates a station identifier against the amateur-radio callsign
/// grammar. Pure, no side effects.
#[must_use]
pub fn is_valid_callsign(callsign: &str) -> bool {
    if callsign == RESERVED_WINLINK {
        return true;
    }

    // A separator at any position (including 0) splits base and SSID.
    let base = match callsign.find('-') {
        Some(sep) => {
            if !ssid_in_range(&callsign[sep + 1..]) {
                return false;
            }
            &callsign[..sep]
        }
        None => callsign,
    };

    let bytes = base.as_bytes();
    if bytes.len() < MIN_BASE_LEN || bytes.len() > MAX_BASE_LEN {
        return false;
    }

    // Short letter-digit-letter-letter bases (A0AA) join the 6-character
    // validation path through a leading blank.
    let mut normalized = NormalizedBase::new();
    if bytes.len() < MAX_BASE_LEN
        && bytes[0].is_ascii_alphabetic()
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_alphabetic()
        && bytes[3].is_ascii_alphabetic()
    {
        let _ = normalized.push(b' ');
    }
    if normalized.extend_from_slice(bytes).is_err() {
        return false;
    }

    // Every valid shape carries a digit at index 2 and a letter at index 3.
    if !normalized[2].is_ascii_digit() || !normalized[3].is_ascii_alphabetic() {
        return false;
    }

    let letter_head = (normalized[0].is_ascii_alphabetic() || normalized[0] == b' ')
        && normalized[1].is_ascii_alphabetic();
    let digit_head = normalized[0].is_ascii_alphabetic() && normalized[1].is_ascii_digit();
    let head_valid = letter_head || digit_head;
    if !head_valid {
        return false;
    }

    // The suffix past index 3 is letters only.
    normalized
        .iter()
        .skip(4)
        .all(|byte| byte.is_ascii_alphabetic())
}
