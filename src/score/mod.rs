// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chart data model.
//!
//! This module provides:
//! - Info: title, tempo, resolution, stage and the editable media window
//! - Notes, sections, appeals and fevers on a tick timeline
//! - Read-only statistics used by the editor panels
//!
//! The model holds no rules of its own. Everything that keeps it consistent
//! lives in the editor.

pub mod event;
pub mod lane;

pub use event::{Appeal, EventKind, Fever, Note, Section, Tick, TickRange};
pub use lane::{DanceLane, FashionLane, LaneType, LiveLane, NoteType, StageType};

use serde::Serialize;

use crate::config::SongResource;
use crate::timing::{TickConverter, RESOLUTION};

/// Chart header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Song title
    pub title: String,
    /// Difficulty level (1-5)
    pub level: u8,
    /// Tempo in BPM
    pub bpm: f64,
    /// Ticks per quarter note
    pub resolution: u32,
    /// Stage variant
    pub stage: StageType,
    /// Source video id
    pub mv_id: String,
    /// Start of the editable window in the video
    pub start_at_ms: f64,
    /// End of the editable window in the video
    pub end_at_ms: f64,
}

impl Info {
    /// Tick converter for this chart's tempo
    pub fn converter(&self) -> TickConverter {
        TickConverter::new(self.bpm, self.resolution)
    }

    /// Length of the editable window in seconds
    pub fn duration_sec(&self) -> f64 {
        ((self.end_at_ms - self.start_at_ms) / 1000.0).max(0.0)
    }
}

/// A complete chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub info: Info,
    pub notes: Vec<Note>,
    pub sections: Vec<Section>,
    pub appeals: Vec<Appeal>,
    pub fevers: Vec<Fever>,
}

impl Score {
    /// Create an empty chart for a song
    pub fn new(resource: &SongResource) -> Self {
        Self::with_resolution(resource, RESOLUTION)
    }

    /// Create an empty chart with a non-default tick resolution
    pub fn with_resolution(resource: &SongResource, resolution: u32) -> Self {
        Self {
            info: Info {
                title: resource.title.clone(),
                level: 1,
                bpm: resource.bpm,
                resolution,
                stage: StageType::default(),
                mv_id: resource.mv_id.clone(),
                start_at_ms: resource.start_at_ms,
                end_at_ms: resource.end_at_ms,
            },
            notes: Vec::new(),
            sections: Vec::new(),
            appeals: Vec::new(),
            fevers: Vec::new(),
        }
    }

    /// Tick converter for this chart's tempo
    pub fn converter(&self) -> TickConverter {
        self.info.converter()
    }

    /// Note starting at `tick`
    pub fn note_at(&self, tick: Tick) -> Option<&Note> {
        self.notes.iter().find(|note| note.tick == tick)
    }

    /// Section starting at `tick`
    pub fn section_at(&self, tick: Tick) -> Option<&Section> {
        self.sections.iter().find(|section| section.tick == tick)
    }

    /// Counts shown in the editor panel
    pub fn stats(&self) -> ScoreStats {
        let long_notes = self.notes.iter().filter(|note| note.is_long()).count();
        ScoreStats {
            total_notes: self.notes.len(),
            normal_notes: self.notes.len() - long_notes,
            long_notes,
            sections: self.sections.len(),
            appeals: self.appeals.len(),
            fevers: self.fevers.len(),
        }
    }
}

/// Entry counts of a chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreStats {
    pub total_notes: usize,
    pub normal_notes: usize,
    pub long_notes: usize,
    pub sections: usize,
    pub appeals: usize,
    pub fevers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> SongResource {
        SongResource::new("Test", "abc123", 120.0, 5000.0, 15000.0)
    }

    #[test]
    fn test_score_creation() {
        let score = Score::new(&resource());
        assert_eq!(score.info.title, "Test");
        assert_eq!(score.info.level, 1);
        assert_eq!(score.info.resolution, 240);
        assert_eq!(score.info.stage, StageType::Live);
        assert!(score.notes.is_empty());
        assert!(score.sections.is_empty());
        assert_eq!(score.info.duration_sec(), 10.0);
    }

    #[test]
    fn test_stats() {
        let mut score = Score::new(&resource());
        score.notes.push(Note::new(0, NoteType::Up));
        score.notes.push(Note { note_type: NoteType::Left, tick: 240, length: 120 });
        score.notes.push(Note::new(480, NoteType::Right));

        let stats = score.stats();
        assert_eq!(stats.total_notes, 3);
        assert_eq!(stats.normal_notes, 2);
        assert_eq!(stats.long_notes, 1);
        assert_eq!(stats.sections, 0);
    }

    #[test]
    fn test_lookup() {
        let mut score = Score::new(&resource());
        score.notes.push(Note::new(240, NoteType::Up));
        assert!(score.note_at(240).is_some());
        assert!(score.note_at(241).is_none());
    }
}
