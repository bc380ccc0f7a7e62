//! Transmit/receive frequency guard band.
//!
//! Split-frequency operation closer than the guard band causes
//! adjacent-channel interference on the receiver, so a violating plan is
//! never kept: the agent corrects the transmit frequency to the receive
//! frequency, persists, and restarts.

/// Minimum separation between distinct tx and rx frequencies.
pub const MIN_TX_RX_SEPARATION_HZ: u32 = 125_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreqAction {
    /// Frequency plan is valid.
    None,
    /// Force tx to the corrected value, persist configuration, restart.
    CorrectAndRestart { corrected_tx_hz: u32 },
}

#[derive(Debug)]
pub struct FrequencyGuard;

impl FrequencyGuard {
    /// Pure guard-band check. Simplex (tx == rx) is always valid.
    #[must_use]
    pub fn check(tx_freq_hz: u32, rx_freq_hz: u32) -> FreqAction {
        if tx_freq_hz != rx_freq_hz && tx_freq_hz.abs_diff(rx_freq_hz) < MIN_TX_RX_SEPARATION_HZ {
            FreqAction::CorrectAndRestart {
                corrected_tx_hz: rx_freq_hz,
            }
        } else {
            FreqAction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_is_valid() {
        assert_eq!(FrequencyGuard::check(433_775_000, 433_775_000), FreqAction::None);
    }

    #[test]
    fn test_wide_split_is_valid() {
        assert_eq!(FrequencyGuard::check(433_900_000, 433_775_000), FreqAction::None);
        assert_eq!(FrequencyGuard::check(433_775_000, 433_900_000), FreqAction::None);
    }

    #[test]
    fn test_exact_guard_band_is_valid() {
        assert_eq!(
            FrequencyGuard::check(433_775_000 + MIN_TX_RX_SEPARATION_HZ, 433_775_000),
            FreqAction::None
        );
    }

    #[test]
    fn test_narrow_split_forces_correction() {
        let action = FrequencyGuard::check(433_800_000, 433_775_000);
        assert_eq!(
            action,
            FreqAction::CorrectAndRestart {
                corrected_tx_hz: 433_775_000
            }
        );
        // Symmetric in either direction.
        let action = FrequencyGuard::check(433_775_000, 433_800_000);
        assert_eq!(
            action,
            FreqAction::CorrectAndRestart {
                corrected_tx_hz: 433_800_000
            }
        );
    }
}
