// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chart limits.

use serde::{Deserialize, Serialize};

/// Maximum number of sections in a chart
pub const SECTION_MAX: usize = 10;
/// Required number of appeal windows
pub const APPEAL_MAX: usize = 3;
/// Required number of fever windows
pub const FEVER_MAX: usize = 1;
/// Length of an appeal window
pub const APPEAL_DURATION_SEC: f64 = 5.0;
/// Length of a fever window
pub const FEVER_DURATION_SEC: f64 = 10.0;
/// Length of a newly placed section
pub const DEFAULT_SECTION_BARS: u32 = 2;
/// Shortest a section can be shrunk to
pub const MIN_SECTION_BARS: u32 = 1;

/// Counts and durations that bound a chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Limits {
    /// Maximum sections
    pub section_max: usize,
    /// Appeals, both the maximum and the count a finished chart needs
    pub appeal_max: usize,
    /// Fevers, both the maximum and the count a finished chart needs
    pub fever_max: usize,
    /// Appeal window length in seconds
    pub appeal_duration_sec: f64,
    /// Fever window length in seconds
    pub fever_duration_sec: f64,
    /// Bars in a newly placed section
    pub default_section_bars: u32,
    /// Minimum bars in a section
    pub min_section_bars: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            section_max: SECTION_MAX,
            appeal_max: APPEAL_MAX,
            fever_max: FEVER_MAX,
            appeal_duration_sec: APPEAL_DURATION_SEC,
            fever_duration_sec: FEVER_DURATION_SEC,
            default_section_bars: DEFAULT_SECTION_BARS,
            min_section_bars: MIN_SECTION_BARS,
        }
    }
}
