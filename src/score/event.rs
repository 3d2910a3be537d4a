// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timed chart entries.

use serde::Serialize;

use super::lane::{LaneType, NoteType};

/// Tick position within a chart
pub type Tick = u32;

/// A note. Length 0 is a tap, anything longer is a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Note direction
    #[serde(rename = "type")]
    pub note_type: NoteType,
    /// Start tick
    pub tick: Tick,
    /// Hold length in ticks
    pub length: Tick,
}

impl Note {
    /// Create a tap note
    pub fn new(tick: Tick, note_type: NoteType) -> Self {
        Self { note_type, tick, length: 0 }
    }

    /// Check if this is a hold note
    pub fn is_long(&self) -> bool {
        self.length > 0
    }

    /// Span covered by the note
    pub fn range(&self) -> TickRange {
        TickRange::new(self.tick, self.tick.saturating_add(self.length))
    }
}

/// A lane-behavior region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Lane behavior
    #[serde(rename = "type")]
    pub lane: LaneType,
    /// Start tick
    pub tick: Tick,
    /// Length in ticks
    pub length_tick: Tick,
}

impl Section {
    /// Create a section
    pub fn new(tick: Tick, length_tick: Tick, lane: LaneType) -> Self {
        Self { lane, tick, length_tick }
    }

    /// Span covered by the section
    pub fn range(&self) -> TickRange {
        TickRange::new(self.tick, self.tick.saturating_add(self.length_tick))
    }
}

/// Special appeal window (fixed duration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appeal {
    pub tick: Tick,
}

/// Fever time window (fixed duration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fever {
    pub tick: Tick,
}

/// Kind of event on the shared event timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Section,
    Appeal,
    Fever,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Section => write!(f, "section"),
            EventKind::Appeal => write!(f, "appeal"),
            EventKind::Fever => write!(f, "fever"),
        }
    }
}

/// Closed tick interval `[from, to]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickRange {
    pub from: Tick,
    pub to: Tick,
}

impl TickRange {
    /// Create a range
    pub fn new(from: Tick, to: Tick) -> Self {
        Self { from, to }
    }

    /// Length in ticks
    pub fn len(&self) -> Tick {
        self.to - self.from
    }

    /// Check if the range is a single point
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Closed-interval overlap; touching endpoints count as overlap
    pub fn overlaps(&self, other: &TickRange) -> bool {
        other.from <= self.to && self.from <= other.to
    }

    /// Check if `other` lies within this range, start inclusive and end
    /// inclusive, with its start strictly before this range's end
    pub fn contains(&self, other: &TickRange) -> bool {
        self.from <= other.from && other.from < self.to && other.to <= self.to
    }
}
