// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Whole-chart validation.
//!
//! Validation only reports. Nothing here changes the chart, and no edit
//! runs it; the editor shows the report so the author can fix things.

use thiserror::Error;

use super::event_ranges;
use super::limits::Limits;
use crate::score::{EventKind, Score, Tick};

/// A problem found in a chart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Chart has {count} sections, expected 1 to {max}")]
    SectionCount { count: usize, max: usize },

    #[error("Chart has {count} appeals, expected exactly {required}")]
    AppealCount { count: usize, required: usize },

    #[error("Chart has {count} fevers, expected exactly {required}")]
    FeverCount { count: usize, required: usize },

    #[error("Note at tick {tick} is not inside any section")]
    NoteOutsideSection { tick: Tick },

    #[error("{first_kind} at tick {first} overlaps {second_kind} at tick {second}")]
    EventOverlap {
        first_kind: EventKind,
        first: Tick,
        second_kind: EventKind,
        second: Tick,
    },

    #[error("Note at tick {first} overlaps note at tick {second}")]
    NoteOverlap { first: Tick, second: Tick },
}

/// Result of validating a chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Check if no issues were found
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues found, in check order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

/// Check a chart for completeness and consistency
pub fn validate(score: &Score, limits: &Limits) -> ValidationReport {
    let mut issues = Vec::new();

    let sections = score.sections.len();
    if sections < 1 || sections > limits.section_max {
        issues.push(ValidationIssue::SectionCount { count: sections, max: limits.section_max });
    }
    if score.appeals.len() != limits.appeal_max {
        issues.push(ValidationIssue::AppealCount {
            count: score.appeals.len(),
            required: limits.appeal_max,
        });
    }
    if score.fevers.len() != limits.fever_max {
        issues.push(ValidationIssue::FeverCount {
            count: score.fevers.len(),
            required: limits.fever_max,
        });
    }

    for note in &score.notes {
        let inside = score
            .sections
            .iter()
            .any(|section| section.range().contains(&note.range()));
        if !inside {
            issues.push(ValidationIssue::NoteOutsideSection { tick: note.tick });
        }
    }

    let mut events = event_ranges(score, limits);
    events.sort_by_key(|(_, tick, range)| (range.from, *tick));
    for pair in events.windows(2) {
        let (first_kind, first, first_range) = pair[0];
        let (second_kind, second, second_range) = pair[1];
        if first_range.overlaps(&second_range) {
            issues.push(ValidationIssue::EventOverlap { first_kind, first, second_kind, second });
        }
    }

    let mut notes: Vec<_> = score.notes.iter().map(|note| note.range()).collect();
    notes.sort();
    for pair in notes.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            issues.push(ValidationIssue::NoteOverlap { first: pair[0].from, second: pair[1].from });
        }
    }

    ValidationReport { issues }
}
