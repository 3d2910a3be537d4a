// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides tempo-based tick conversion and the metronome
//! used while the source video is playing.

pub mod convert;
pub mod metronome;

pub use convert::{TickConverter, RESOLUTION};
pub use metronome::Metronome;
