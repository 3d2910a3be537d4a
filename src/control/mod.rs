// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard control for the editor.
//!
//! Key events from whatever front end hosts the editor are mapped to
//! `ControlAction`s, which the session then carries out.

pub mod keyboard;

pub use keyboard::{KeyBinding, KeyboardController, Shortcut};

use crate::score::NoteType;
use crate::session::PutMode;

/// Action that can be triggered by controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    // Transport
    /// Toggle play/pause
    TogglePlay,
    /// Stop and rewind to the start of the window
    Stop,
    /// Toggle the metronome sound
    ToggleMetronome,

    // Cursor
    /// Move the cursor by whole beats (positive is later)
    ScrollBeats(i32),

    // Editing
    /// Note type placed by the next note gesture
    SelectNote(NoteType),
    /// What a put gesture on the event lane places
    SetPutMode(PutMode),
    /// Tidy up the note list
    NormalizeNotes,
    /// Remove all notes
    ClearAllNotes,
    /// Write the chart to the log
    Dump,
}
