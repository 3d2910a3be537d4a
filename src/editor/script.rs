// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scripted editing.
//!
//! An edit script names a song, the chart header fields, and a list of edits:
//!
//! ```yaml
//! song: 0
//! stage: live
//! level: 3
//! edits:
//!   - op: add_section
//!     tick: 0
//!   - op: add_note
//!     tick: 240
//!     note: up
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use super::builder::ScoreBuilder;
use super::edit::Edit;
use super::error::EditError;
use super::validate::ValidationReport;
use crate::config::{EditorConfig, SongTable};
use crate::score::{Score, StageType};

/// A batch of edits against a fresh chart
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditScript {
    /// Index into the song table
    #[serde(default)]
    pub song: usize,
    /// Stage variant
    #[serde(default)]
    pub stage: StageType,
    /// Difficulty level
    #[serde(default = "default_level")]
    pub level: u8,
    /// Edits, applied in order
    #[serde(default)]
    pub edits: Vec<Edit>,
}

fn default_level() -> u8 {
    1
}

/// Result of running a script
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    /// The edited chart
    pub score: Score,
    /// Edits that were rejected, with their position in the script
    pub rejected: Vec<(usize, Edit, EditError)>,
    /// Validation of the final chart
    pub report: ValidationReport,
}

impl EditScript {
    /// Load a script from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read edit script: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a script from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse edit script YAML")
    }

    /// Build a chart by applying every edit. Rejected edits are collected, not fatal.
    pub fn run(&self, songs: &SongTable, config: &EditorConfig) -> Result<ScriptOutcome> {
        let resource = songs
            .get(self.song)
            .with_context(|| format!("No song at index {} ({} songs)", self.song, songs.len()))?;

        let mut builder = ScoreBuilder::from_config(resource, config);
        builder.set_stage(self.stage);
        builder.set_level(self.level);

        let mut rejected = Vec::new();
        for (index, edit) in self.edits.iter().enumerate() {
            if let Err(err) = builder.apply(*edit) {
                debug!(index, ?edit, error = %err, "script edit rejected");
                rejected.push((index, *edit, err));
            }
        }

        info!(
            title = %resource.title,
            applied = self.edits.len() - rejected.len(),
            rejected = rejected.len(),
            "edit script finished"
        );

        let report = builder.validate();
        Ok(ScriptOutcome { score: builder.into_score(), rejected, report })
    }
}
