//! Multi-tap detection for the hero-name easter egg.

pub const TAP_WINDOW_MS: f64 = 500.0;
pub const TAPS_TO_TRIGGER: u8 = 3;

/// Counts taps that arrive within `window_ms` of the previous one.
///
/// A gap of `window_ms` or more starts a fresh sequence. Reaching the target
/// count fires once and resets, so a following tap begins from one again.
#[derive(Clone, Debug)]
pub struct TapCounter {
    count: u8,
    last_tap_ms: Option<f64>,
    window_ms: f64,
    required: u8,
}

impl Default for TapCounter {
    fn default() -> Self {
        Self::new(TAPS_TO_TRIGGER, TAP_WINDOW_MS)
    }
}

impl TapCounter {
    pub fn new(required: u8, window_ms: f64) -> Self {
        Self {
            count: 0,
            last_tap_ms: None,
            window_ms,
            required: required.max(1),
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Record a tap at `now_ms`; true when this tap completes the sequence.
    pub fn register(&mut self, now_ms: f64) -> bool {
        if self
            .last_tap_ms
            .is_some_and(|last| now_ms - last >= self.window_ms)
        {
            self.count = 0;
        }
        self.count += 1;
        if self.count >= self.required {
            self.count = 0;
            self.last_tap_ms = None;
            return true;
        }
        self.last_tap_ms = Some(now_ms);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_quick_taps_fire_once() {
        let mut taps = TapCounter::default();
        assert!(!taps.register(0.0));
        assert!(!taps.register(200.0));
        assert!(taps.register(400.0));
        assert_eq!(taps.count(), 0);
    }

    #[test]
    fn window_is_measured_from_previous_tap() {
        let mut taps = TapCounter::default();
        assert!(!taps.register(0.0));
        assert!(!taps.register(450.0));
        assert!(taps.register(900.0));
    }

    #[test]
    fn slow_tap_restarts_sequence() {
        let mut taps = TapCounter::default();
        taps.register(0.0);
        taps.register(100.0);
        assert!(!taps.register(600.0));
        assert_eq!(taps.count(), 1);
        assert!(!taps.register(700.0));
        assert!(taps.register(800.0));
    }

    #[test]
    fn fourth_tap_does_not_compound() {
        let mut taps = TapCounter::default();
        taps.register(0.0);
        taps.register(100.0);
        assert!(taps.register(200.0));
        assert!(!taps.register(300.0));
        assert_eq!(taps.count(), 1);
    }
}
