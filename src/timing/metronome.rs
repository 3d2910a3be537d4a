// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Metronome driven by an external playback clock.
//!
//! The metronome does not own a timer. It is polled once per frame with the
//! current media time and reports whether a beat boundary has been crossed
//! since the previous poll.

/// Beat boundary predictor
#[derive(Debug, Clone)]
pub struct Metronome {
    /// Tempo in BPM
    bpm: f64,
    /// Milliseconds between beats
    tick_interval_ms: f64,
    /// Phase origin in milliseconds
    start_at_ms: f64,
    /// Next beat boundary in milliseconds
    next_tick_ms: f64,
}

impl Metronome {
    /// Create a metronome whose first beat falls on `start_at_ms`
    pub fn new(bpm: f64, start_at_ms: f64) -> Self {
        Self {
            bpm,
            tick_interval_ms: (60.0 / bpm) * 1000.0,
            start_at_ms,
            next_tick_ms: start_at_ms,
        }
    }

    /// Get the tempo
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Milliseconds between beats
    pub fn tick_interval_ms(&self) -> f64 {
        self.tick_interval_ms
    }

    /// Phase origin
    pub fn start_at_ms(&self) -> f64 {
        self.start_at_ms
    }

    /// Next scheduled beat boundary
    pub fn next_tick_ms(&self) -> f64 {
        self.next_tick_ms
    }

    /// Move the phase origin. The pending boundary is left as is.
    pub fn set_start_at(&mut self, start_at_ms: f64) {
        self.start_at_ms = start_at_ms;
    }

    /// Resynchronize after a seek so that a beat landing exactly on
    /// `current_ms` still fires on the next poll.
    pub fn set_current(&mut self, current_ms: f64) {
        self.update_next_tick(current_ms - 1.0);
    }

    /// Poll with the current media time. Returns true once per crossed boundary.
    ///
    /// Several boundaries skipped between two polls fire only once.
    pub fn tick(&mut self, current_ms: f64) -> bool {
        if self.next_tick_ms > current_ms {
            return false;
        }

        self.update_next_tick(current_ms);
        true
    }

    fn update_next_tick(&mut self, current_ms: f64) {
        let total_ticks = (current_ms - self.start_at_ms) / self.tick_interval_ms;
        self.next_tick_ms = self.start_at_ms + (total_ticks.floor() + 1.0) * self.tick_interval_ms;
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(120.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metronome_creation() {
        let metronome = Metronome::new(120.0, 5000.0);
        assert_eq!(metronome.bpm(), 120.0);
        assert_eq!(metronome.tick_interval_ms(), 500.0);
        assert_eq!(metronome.next_tick_ms(), 5000.0);
    }

    #[test]
    fn test_first_beat_fires_at_origin() {
        let mut metronome = Metronome::new(60.0, 0.0);
        assert!(metronome.tick(0.0));
        assert_eq!(metronome.next_tick_ms(), 1000.0);
    }

    #[test]
    fn test_tick_sequence() {
        let mut metronome = Metronome::new(60.0, 0.0);
        assert!(metronome.tick(0.0));

        assert!(!metronome.tick(999.0));
        assert!(metronome.tick(1000.0));
        assert!(!metronome.tick(1000.0));
        // 2000 was missed; fires once and schedules 3000
        assert!(metronome.tick(2500.0));
        assert_eq!(metronome.next_tick_ms(), 3000.0);
        assert!(!metronome.tick(2999.0));
    }

    #[test]
    fn test_rejected_tick_leaves_state() {
        let mut metronome = Metronome::new(60.0, 0.0);
        metronome.tick(0.0);
        let before = metronome.next_tick_ms();
        assert!(!metronome.tick(500.0));
        assert_eq!(metronome.next_tick_ms(), before);
    }

    #[test]
    fn test_set_current_on_boundary() {
        let mut metronome = Metronome::new(60.0, 0.0);
        metronome.set_current(3000.0);
        assert_eq!(metronome.next_tick_ms(), 3000.0);
        assert!(metronome.tick(3000.0));
        assert!(!metronome.tick(3000.0));
    }

    #[test]
    fn test_set_current_between_boundaries() {
        let mut metronome = Metronome::new(120.0, 100.0);
        metronome.set_current(1234.0);
        assert_eq!(metronome.next_tick_ms(), 1600.0);
        assert!(!metronome.tick(1500.0));
        assert!(metronome.tick(1600.0));
    }

    #[test]
    fn test_set_start_at_keeps_pending_tick() {
        let mut metronome = Metronome::new(60.0, 0.0);
        metronome.tick(0.0);
        metronome.set_start_at(250.0);
        assert_eq!(metronome.next_tick_ms(), 1000.0);
        // Next boundary is computed from the new origin
        assert!(metronome.tick(1000.0));
        assert_eq!(metronome.next_tick_ms(), 1250.0);
    }
}
