//! Combo tracking
//!
//! A combo is a streak of successful matches, each landing within
//! `combo_threshold` seconds of the previous one. The streak count drives a
//! linear score multiplier:
//!
//! | Combo | Multiplier |
//! |-------|------------|
//! | 0-1 | 1.0 |
//! | 2 | 1 + base |
//! | n >= 2 | 1 + base + (n - 2) * increment |

use std::time::Duration;

use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ComboHandler {
    current_combo: u32,
    /// Clock reading of the last successful match
    last_success: Option<Duration>,
    threshold: Duration,
    base_bonus: f64,
    increment: f64,
}

impl ComboHandler {
    /// `threshold_secs` is the combo window; bonuses are fractions (0.10 = 10%)
    ///
    /// Windows too long for a `Duration` saturate; NaN or negative means no window.
    pub fn new(threshold_secs: f64, base_bonus: f64, increment: f64) -> Self {
        let threshold =
            Duration::try_from_secs_f64(threshold_secs.max(0.0)).unwrap_or(Duration::MAX);
        Self {
            current_combo: 0,
            last_success: None,
            threshold,
            base_bonus,
            increment,
        }
    }

    /// Register a successful match at clock reading `now`
    ///
    /// Returns the new streak count. Counts above 1 are combos worth announcing.
    pub fn update_combo(&mut self, now: Duration) -> u32 {
        let within_window = self
            .last_success
            .map(|last| now.saturating_sub(last) <= self.threshold)
            .unwrap_or(false);

        if within_window {
            self.current_combo += 1;
        } else {
            self.current_combo = 1;
        }
        self.last_success = Some(now);

        if self.current_combo > 1 {
            debug!(target: "combo", "combo x{}", self.current_combo);
        }
        self.current_combo
    }

    /// Zero the streak and forget the last success
    pub fn reset_combo(&mut self) {
        self.current_combo = 0;
        self.last_success = None;
    }

    pub fn current_combo(&self) -> u32 {
        self.current_combo
    }

    pub fn last_success(&self) -> Option<Duration> {
        self.last_success
    }

    pub fn combo_multiplier(&self) -> f64 {
        if self.current_combo <= 1 {
            return 1.0;
        }
        1.0 + self.base_bonus + (self.current_combo - 2) as f64 * self.increment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> ComboHandler {
        ComboHandler::new(3.0, 0.10, 0.05)
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_first_success_starts_streak() {
        let mut combo = handler();
        assert_eq!(combo.update_combo(secs(0.0)), 1);
        assert_eq!(combo.combo_multiplier(), 1.0);
        assert_eq!(combo.last_success(), Some(secs(0.0)));
    }

    #[test]
    fn test_second_success_within_threshold() {
        let mut combo = handler();
        combo.update_combo(secs(1.0));
        assert_eq!(combo.update_combo(secs(2.5)), 2);
        assert!((combo.combo_multiplier() - 1.10).abs() < 1e-9);
    }

    #[test]
    fn test_third_success_adds_increment() {
        let mut combo = handler();
        combo.update_combo(secs(0.0));
        combo.update_combo(secs(1.0));
        assert_eq!(combo.update_combo(secs(2.0)), 3);
        assert!((combo.combo_multiplier() - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_exactly_at_threshold_still_counts() {
        let mut combo = handler();
        combo.update_combo(secs(10.0));
        assert_eq!(combo.update_combo(secs(13.0)), 2);
    }

    #[test]
    fn test_gap_restarts_streak() {
        let mut combo = handler();
        combo.update_combo(secs(0.0));
        combo.update_combo(secs(1.0));
        assert_eq!(combo.update_combo(secs(4.5)), 1);
        assert_eq!(combo.combo_multiplier(), 1.0);
    }

    #[test]
    fn test_oversized_threshold_saturates() {
        for threshold in [1e30, f64::INFINITY] {
            let mut combo = ComboHandler::new(threshold, 0.10, 0.05);
            combo.update_combo(secs(0.0));
            assert_eq!(combo.update_combo(secs(1_000_000.0)), 2);
        }
    }

    #[test]
    fn test_nan_threshold_means_no_window() {
        let mut combo = ComboHandler::new(f64::NAN, 0.10, 0.05);
        combo.update_combo(secs(0.0));
        assert_eq!(combo.update_combo(secs(0.5)), 1);
    }

    #[test]
    fn test_reset() {
        let mut combo = handler();
        combo.update_combo(secs(0.0));
        combo.update_combo(secs(0.5));
        combo.reset_combo();
        assert_eq!(combo.current_combo(), 0);
        assert_eq!(combo.last_success(), None);
        assert_eq!(combo.update_combo(secs(0.6)), 1);
    }
}
