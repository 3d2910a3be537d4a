// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Conversion between elapsed seconds and chart ticks.
//!
//! Charts are quantized at a fixed resolution (ticks per quarter note) and a
//! single tempo, so the conversion is a plain linear scale in both directions.

/// Ticks per quarter note used by every chart
pub const RESOLUTION: u32 = 240;

/// Beats in one bar (charts are always 4/4)
pub const BEATS_PER_BAR: u32 = 4;

/// Tempo-based tick/seconds converter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickConverter {
    /// Tempo in BPM
    bpm: f64,
    /// Ticks per quarter note
    resolution: u32,
}

impl TickConverter {
    /// Create a converter for the given tempo and resolution
    pub fn new(bpm: f64, resolution: u32) -> Self {
        Self { bpm, resolution }
    }

    /// Get the tempo
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Get the resolution
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Convert elapsed seconds to (fractional) ticks. Negative input yields 0.
    pub fn tick_by_duration(&self, elapsed_sec: f64) -> f64 {
        if elapsed_sec < 0.0 {
            return 0.0;
        }
        elapsed_sec * (self.bpm / 60.0) * self.resolution as f64
    }

    /// Convert ticks to elapsed seconds. Negative input yields 0.
    pub fn duration_by_tick(&self, tick: f64) -> f64 {
        if tick < 0.0 {
            return 0.0;
        }
        (tick * (60.0 / self.bpm)) / self.resolution as f64
    }

    /// Length in whole ticks of a fixed-duration window
    pub fn ticks_for_seconds(&self, seconds: f64) -> u32 {
        self.tick_by_duration(seconds).round() as u32
    }

    /// Ticks in `bars` bars of 4/4
    pub fn ticks_per_bars(&self, bars: u32) -> u32 {
        self.resolution.saturating_mul(BEATS_PER_BAR).saturating_mul(bars)
    }

    /// Smallest length step (a sixteenth note)
    pub fn length_quantum(&self) -> u32 {
        self.resolution / 4
    }

    /// Absolute media time in milliseconds of a tick, given the chart origin
    pub fn tick_to_ms(&self, start_at_ms: f64, tick: f64) -> f64 {
        start_at_ms + self.duration_by_tick(tick) * 1000.0
    }
}

impl Default for TickConverter {
    fn default() -> Self {
        Self::new(120.0, RESOLUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_by_duration() {
        let conv = TickConverter::new(120.0, RESOLUTION);
        // 120 BPM: one beat every 0.5s
        assert_eq!(conv.tick_by_duration(0.5), 240.0);
        assert_eq!(conv.tick_by_duration(4.0), 1920.0);
    }

    #[test]
    fn test_duration_by_tick() {
        let conv = TickConverter::new(60.0, RESOLUTION);
        assert_eq!(conv.duration_by_tick(240.0), 1.0);
        assert_eq!(conv.duration_by_tick(60.0), 0.25);
    }

    #[test]
    fn test_negative_input_clamps() {
        let conv = TickConverter::new(138.0, RESOLUTION);
        assert_eq!(conv.tick_by_duration(-1.0), 0.0);
        assert_eq!(conv.duration_by_tick(-240.0), 0.0);
    }

    #[test]
    fn test_round_trip() {
        for bpm in [60.0, 94.0, 120.0, 138.0, 181.0, 222.5] {
            let conv = TickConverter::new(bpm, RESOLUTION);
            for tick in [0.0, 1.0, 60.0, 240.0, 1920.0, 12345.0, 480_000.0] {
                let back = conv.tick_by_duration(conv.duration_by_tick(tick));
                assert!((back - tick).abs() < 1e-6, "bpm {} tick {} -> {}", bpm, tick, back);
            }
            for sec in [0.0, 0.001, 1.5, 60.0, 123.456] {
                let back = conv.duration_by_tick(conv.tick_by_duration(sec));
                assert!((back - sec).abs() < 1e-9, "bpm {} sec {} -> {}", bpm, sec, back);
            }
        }
    }

    #[test]
    fn test_grid_helpers() {
        let conv = TickConverter::new(120.0, RESOLUTION);
        assert_eq!(conv.ticks_per_bars(2), 1920);
        assert_eq!(conv.length_quantum(), 60);
        // 181 BPM, 5 seconds
        let conv = TickConverter::new(181.0, RESOLUTION);
        assert_eq!(conv.ticks_for_seconds(5.0), 3620);
    }

    #[test]
    fn test_tick_to_ms() {
        let conv = TickConverter::new(120.0, RESOLUTION);
        assert_eq!(conv.tick_to_ms(5000.0, 480.0), 6000.0);
    }
}
