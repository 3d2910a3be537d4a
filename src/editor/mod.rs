// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chart editing engine.
//!
//! This module provides:
//! - `ScoreBuilder`: every edit on a chart, each applied whole or not at all
//! - `Edit` and `try_apply`: edits as values, applied to a copy of a chart
//! - Whole-chart validation for the editor's diagnostics panel
//! - Edit scripts for batch editing from YAML
//!
//! Sections, appeals and fevers share a single event timeline: no two of
//! them may overlap, whatever their kind.

pub mod builder;
pub mod edit;
pub mod error;
pub mod limits;
pub mod script;
pub mod validate;

pub use builder::ScoreBuilder;
pub use edit::{try_apply, Edit};
pub use error::EditError;
pub use limits::Limits;
pub use script::{EditScript, ScriptOutcome};
pub use validate::{validate, ValidationIssue, ValidationReport};

use crate::score::{EventKind, Score, Tick, TickRange};

/// Length in ticks of a fixed-duration window at the chart's tempo
pub fn fixed_length(score: &Score, duration_sec: f64) -> Tick {
    score.converter().ticks_for_seconds(duration_sec)
}

/// Every section, appeal and fever as a tick range, in that order
pub fn event_ranges(score: &Score, limits: &Limits) -> Vec<(EventKind, Tick, TickRange)> {
    let appeal_length = fixed_length(score, limits.appeal_duration_sec);
    let fever_length = fixed_length(score, limits.fever_duration_sec);

    let sections = score
        .sections
        .iter()
        .map(|section| (EventKind::Section, section.tick, section.range()));
    let fixed = |tick: Tick, length: Tick| TickRange::new(tick, tick.saturating_add(length));
    let appeals = score
        .appeals
        .iter()
        .map(|appeal| (EventKind::Appeal, appeal.tick, fixed(appeal.tick, appeal_length)));
    let fevers = score
        .fevers
        .iter()
        .map(|fever| (EventKind::Fever, fever.tick, fixed(fever.tick, fever_length)));

    sections.chain(appeals).chain(fevers).collect()
}
