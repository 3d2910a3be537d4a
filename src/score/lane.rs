// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note, stage and lane enumerations.
//!
//! Each stage variant defines its own set of lane behaviors for sections.
//! `LaneType` tags the lane with its stage so a section can never hold a
//! lane value from a different enumeration than the one it is cycled in.

use serde::{Deserialize, Serialize};

/// Note direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", rename_all = "lowercase")]
pub enum NoteType {
    Up,
    Left,
    Right,
}

impl NoteType {
    /// Number of note types
    pub const COUNT: u8 = 3;

    /// Next type in the cycle Up -> Left -> Right -> Up
    pub fn cycle(self) -> Self {
        Self::from_index((self as u8 + 1) % Self::COUNT)
    }

    fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => NoteType::Up,
            1 => NoteType::Left,
            _ => NoteType::Right,
        }
    }
}

impl Default for NoteType {
    fn default() -> Self {
        NoteType::Left
    }
}

impl From<NoteType> for u8 {
    fn from(note: NoteType) -> u8 {
        note as u8
    }
}

/// Stage presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", rename_all = "lowercase")]
pub enum StageType {
    Live,
    Fashion,
    Dance,
}

impl Default for StageType {
    fn default() -> Self {
        StageType::Live
    }
}

impl From<StageType> for u8 {
    fn from(stage: StageType) -> u8 {
        stage as u8
    }
}

impl std::str::FromStr for StageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(StageType::Live),
            "fashion" => Ok(StageType::Fashion),
            "dance" => Ok(StageType::Dance),
            other => Err(format!("Unknown stage: {}", other)),
        }
    }
}

/// Lane behavior on the Live stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveLane {
    PositiveClockwise,
    PositiveCounterclockwise,
    NegativeClockwise,
    NegativeCounterclockwise,
}

/// Lane behavior on the Fashion stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FashionLane {
    Circle,
    Square,
}

/// Lane behavior on the Dance stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DanceLane {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Section lane type, tagged with the stage it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum LaneType {
    Live(LiveLane),
    Fashion(FashionLane),
    Dance(DanceLane),
}

impl LaneType {
    /// First lane of the given stage
    pub fn default_for(stage: StageType) -> Self {
        Self::for_stage(stage, 0)
    }

    /// Lane of `stage` at `index`, wrapping around the stage's variant count
    pub fn for_stage(stage: StageType, index: u8) -> Self {
        match stage {
            StageType::Live => LaneType::Live(match index % 4 {
                0 => LiveLane::PositiveClockwise,
                1 => LiveLane::PositiveCounterclockwise,
                2 => LiveLane::NegativeClockwise,
                _ => LiveLane::NegativeCounterclockwise,
            }),
            StageType::Fashion => LaneType::Fashion(match index % 2 {
                0 => FashionLane::Circle,
                _ => FashionLane::Square,
            }),
            StageType::Dance => LaneType::Dance(match index % 4 {
                0 => DanceLane::UpperLeft,
                1 => DanceLane::UpperRight,
                2 => DanceLane::LowerLeft,
                _ => DanceLane::LowerRight,
            }),
        }
    }

    /// Stage this lane belongs to
    pub fn stage(&self) -> StageType {
        match self {
            LaneType::Live(_) => StageType::Live,
            LaneType::Fashion(_) => StageType::Fashion,
            LaneType::Dance(_) => StageType::Dance,
        }
    }

    /// Position within the stage's enumeration
    pub fn index(&self) -> u8 {
        match self {
            LaneType::Live(lane) => *lane as u8,
            LaneType::Fashion(lane) => *lane as u8,
            LaneType::Dance(lane) => *lane as u8,
        }
    }

    /// Number of lanes the stage defines
    pub fn variant_count(&self) -> u8 {
        match self {
            LaneType::Live(_) => 4,
            LaneType::Fashion(_) => 2,
            LaneType::Dance(_) => 4,
        }
    }

    /// Next lane of the same stage
    pub fn cycle(self) -> Self {
        Self::for_stage(self.stage(), (self.index() + 1) % self.variant_count())
    }

    /// The same lane index re-expressed on another stage
    pub fn remap(self, stage: StageType) -> Self {
        Self::for_stage(stage, self.index())
    }
}

impl From<LaneType> for u8 {
    fn from(lane: LaneType) -> u8 {
        lane.index()
    }
}
