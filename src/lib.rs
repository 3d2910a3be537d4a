// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chart editor core for a video-synchronised rhythm game.
//!
//! Charts ("amson" files) place notes, sections, appeals and fevers on a
//! tick timeline locked to a song's tempo and to a window of its video.

pub mod config;
pub mod control;
pub mod editor;
pub mod export;
pub mod score;
pub mod session;
pub mod timing;
