// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Edits as values.
//!
//! `Edit` names one operation of the builder together with its arguments, so
//! edits can be queued, scripted from YAML, or tried against a copy of a chart.

use serde::Deserialize;

use super::builder::ScoreBuilder;
use super::error::EditError;
use super::limits::Limits;
use crate::score::{NoteType, Score, Tick};

/// A single chart edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    AddNote { tick: Tick, note: NoteType },
    RemoveNote { tick: Tick },
    ToggleNote { tick: Tick },
    AddNoteLength { tick: Tick },
    SubNoteLength { tick: Tick },
    AddSection { tick: Tick },
    RemoveSection { tick: Tick },
    AddSectionLength { tick: Tick },
    SubSectionLength { tick: Tick },
    MoveSection { tick: Tick, diff: i64 },
    ToggleSectionType { tick: Tick },
    AddAppeal { tick: Tick },
    RemoveAppeal { tick: Tick },
    MoveAppeal { tick: Tick, diff: i64 },
    AddFever { tick: Tick },
    RemoveFever { tick: Tick },
    MoveFever { tick: Tick, diff: i64 },
    NormalizeNotes,
    ClearAllNotes,
}

impl ScoreBuilder {
    /// Apply an edit. Removals succeed whether or not anything was there.
    pub fn apply(&mut self, edit: Edit) -> Result<(), EditError> {
        match edit {
            Edit::AddNote { tick, note } => self.add_note(tick, note),
            Edit::RemoveNote { tick } => {
                self.remove_note(tick);
                Ok(())
            }
            Edit::ToggleNote { tick } => self.toggle_note(tick).map(|_| ()),
            Edit::AddNoteLength { tick } => self.add_note_length(tick).map(|_| ()),
            Edit::SubNoteLength { tick } => self.sub_note_length(tick).map(|_| ()),
            Edit::AddSection { tick } => self.add_section(tick),
            Edit::RemoveSection { tick } => {
                self.remove_section(tick);
                Ok(())
            }
            Edit::AddSectionLength { tick } => self.add_section_length(tick).map(|_| ()),
            Edit::SubSectionLength { tick } => self.sub_section_length(tick).map(|_| ()),
            Edit::MoveSection { tick, diff } => self.move_section(tick, diff).map(|_| ()),
            Edit::ToggleSectionType { tick } => self.toggle_section_type(tick).map(|_| ()),
            Edit::AddAppeal { tick } => self.add_appeal(tick),
            Edit::RemoveAppeal { tick } => {
                self.remove_appeal(tick);
                Ok(())
            }
            Edit::MoveAppeal { tick, diff } => self.move_appeal(tick, diff).map(|_| ()),
            Edit::AddFever { tick } => self.add_fever(tick),
            Edit::RemoveFever { tick } => {
                self.remove_fever(tick);
                Ok(())
            }
            Edit::MoveFever { tick, diff } => self.move_fever(tick, diff).map(|_| ()),
            Edit::NormalizeNotes => {
                self.normalize_notes();
                Ok(())
            }
            Edit::ClearAllNotes => {
                self.clear_all_notes();
                Ok(())
            }
        }
    }
}

/// Apply `edit` to a copy of `score`, returning the edited copy
pub fn try_apply(score: &Score, limits: &Limits, edit: Edit) -> Result<Score, EditError> {
    let mut builder = ScoreBuilder::with_limits(score.clone(), limits.clone());
    builder.apply(edit)?;
    Ok(builder.into_score())
}
