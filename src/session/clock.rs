// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Media playback clock abstraction.

/// Trait for the media player the editor follows.
///
/// The editor never keeps time itself. It asks the player where playback is
/// and tells it where to go. All times are seconds on the media timeline.
pub trait PlaybackClock {
    /// Check if the player has loaded its media
    fn is_ready(&self) -> bool;

    /// Check if playback is running
    fn is_playing(&self) -> bool;

    /// Current media position in seconds
    fn current_time(&self) -> f64;

    /// Total media length in seconds
    fn duration(&self) -> f64;

    /// Jump to a media position
    fn seek_to(&mut self, seconds: f64);

    /// Start playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);
}

/// Clock that only moves when told to.
///
/// Used for headless sessions and tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: f64,
    duration: f64,
    playing: bool,
    ready: bool,
}

impl ManualClock {
    /// Create a ready clock for media of the given length
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration: duration.max(0.0),
            playing: false,
            ready: true,
        }
    }

    /// Mark the media as loaded or not
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Advance playback by `seconds` if playing. Stops at the end of the media.
    pub fn advance(&mut self, seconds: f64) {
        if !self.playing {
            return;
        }
        self.time = (self.time + seconds).min(self.duration);
    }
}

impl PlaybackClock for ManualClock {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn seek_to(&mut self, seconds: f64) {
        self.time = seconds.clamp(0.0, self.duration);
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}
