// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use thiserror::Error;

use crate::score::{EventKind, Tick};

/// Reason an edit was rejected. A rejected edit never changes the chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("No room for another {kind} (limit {max})")]
    AtCapacity { kind: EventKind, max: usize },

    #[error("Range [{from}, {to}] conflicts with {kind} at tick {tick}")]
    Conflict {
        kind: EventKind,
        tick: Tick,
        from: Tick,
        to: Tick,
    },

    #[error("Range [{from}, {to}] lies outside the editable window")]
    OutOfBounds { from: i64, to: i64 },

    #[error("Note at tick {tick} would overlap the note at tick {other}")]
    NoteConflict { tick: Tick, other: Tick },

    #[error("A note already exists at tick {0}")]
    NoteExists(Tick),

    #[error("Nothing at tick {0}")]
    NotFound(Tick),
}
