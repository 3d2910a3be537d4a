// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Gestures raised by the editor views.
//!
//! Views only know what was clicked and where. Each gesture turns into an
//! `Edit` here so the session can hand it to the builder.

use crate::editor::Edit;
use crate::score::{NoteType, Tick};

/// Gesture on the note grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    AddNote,
    RemoveNote,
    ToggleNote,
    AddLength,
    SubLength,
}

impl SequencerEvent {
    /// Edit for this gesture. `note_type` is only used when adding.
    pub fn to_edit(self, tick: Tick, note_type: NoteType) -> Edit {
        match self {
            SequencerEvent::AddNote => Edit::AddNote { tick, note: note_type },
            SequencerEvent::RemoveNote => Edit::RemoveNote { tick },
            SequencerEvent::ToggleNote => Edit::ToggleNote { tick },
            SequencerEvent::AddLength => Edit::AddNoteLength { tick },
            SequencerEvent::SubLength => Edit::SubNoteLength { tick },
        }
    }
}

/// Gesture on the section/appeal/fever lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLaneEvent {
    AddSection,
    RemoveSection,
    AddSectionLength,
    SubSectionLength,
    MoveSection,
    ToggleSectionType,
    AddAppeal,
    RemoveAppeal,
    MoveAppeal,
    AddFever,
    RemoveFever,
    MoveFever,
}

impl EventLaneEvent {
    /// Edit for this gesture. Moves use `value` as the tick delta, zero if absent.
    pub fn to_edit(self, tick: Tick, value: Option<i64>) -> Edit {
        let diff = value.unwrap_or(0);
        match self {
            EventLaneEvent::AddSection => Edit::AddSection { tick },
            EventLaneEvent::RemoveSection => Edit::RemoveSection { tick },
            EventLaneEvent::AddSectionLength => Edit::AddSectionLength { tick },
            EventLaneEvent::SubSectionLength => Edit::SubSectionLength { tick },
            EventLaneEvent::MoveSection => Edit::MoveSection { tick, diff },
            EventLaneEvent::ToggleSectionType => Edit::ToggleSectionType { tick },
            EventLaneEvent::AddAppeal => Edit::AddAppeal { tick },
            EventLaneEvent::RemoveAppeal => Edit::RemoveAppeal { tick },
            EventLaneEvent::MoveAppeal => Edit::MoveAppeal { tick, diff },
            EventLaneEvent::AddFever => Edit::AddFever { tick },
            EventLaneEvent::RemoveFever => Edit::RemoveFever { tick },
            EventLaneEvent::MoveFever => Edit::MoveFever { tick, diff },
        }
    }
}

/// Command from the editor control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    PutSectionMode,
    PutAppealMode,
    PutFeverMode,
    NormalizeNotes,
    ClearAllNotes,
}

/// What a put gesture on the event lane places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PutMode {
    Section,
    Appeal,
    Fever,
}

impl PutMode {
    /// Edit that places this kind of event at `tick`
    pub fn edit_at(self, tick: Tick) -> Edit {
        match self {
            PutMode::Section => Edit::AddSection { tick },
            PutMode::Appeal => Edit::AddAppeal { tick },
            PutMode::Fever => Edit::AddFever { tick },
        }
    }
}
