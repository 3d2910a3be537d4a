// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system.
//!
//! This module provides the song resource table (YAML) that charts are
//! created from, and the editor configuration (TOML) holding chart limits.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::editor::Limits;
use crate::timing::RESOLUTION;

/// A song a chart can be authored against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongResource {
    /// Song title
    pub title: String,
    /// Source video id
    pub mv_id: String,
    /// Tempo in BPM
    pub bpm: f64,
    /// Start of the playable part of the video
    pub start_at_ms: f64,
    /// End of the playable part of the video
    pub end_at_ms: f64,
}

impl SongResource {
    /// Create a song resource
    pub fn new(
        title: impl Into<String>,
        mv_id: impl Into<String>,
        bpm: f64,
        start_at_ms: f64,
        end_at_ms: f64,
    ) -> Self {
        Self {
            title: title.into(),
            mv_id: mv_id.into(),
            bpm,
            start_at_ms,
            end_at_ms,
        }
    }
}

/// Table of songs available to the editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongTable {
    #[serde(default)]
    pub songs: Vec<SongResource>,
}

impl SongTable {
    /// Load a song table from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read song table: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a song table from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let table: Self = serde_yaml::from_str(yaml).context("Failed to parse song table YAML")?;
        for song in &table.songs {
            if song.bpm <= 0.0 || song.end_at_ms <= song.start_at_ms {
                warn!(title = %song.title, "song has an empty window or non-positive tempo");
            }
        }
        Ok(table)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize song table to YAML")
    }

    /// Save the song table to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write song table: {:?}", path.as_ref()))
    }

    /// Song by position
    pub fn get(&self, index: usize) -> Option<&SongResource> {
        self.songs.get(index)
    }

    /// Song by title
    pub fn find(&self, title: &str) -> Option<&SongResource> {
        self.songs.iter().find(|song| song.title == title)
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl Default for SongTable {
    fn default() -> Self {
        Self {
            songs: vec![
                SongResource::new("おけまる", "nxU0C9mRI0w", 181.0, 5220.0, 123000.0),
                SongResource::new("6㎝上の景色", "5CPUWvvZy9U", 138.0, 5495.0, 118000.0),
                SongResource::new("Believe it", "swGUp33vfqc", 94.0, 5670.0, 128000.0),
            ],
        }
    }
}

/// Editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Ticks per quarter note for new charts
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Play the metronome while the video runs
    #[serde(default = "default_metronome")]
    pub metronome: bool,
    /// Chart limits
    #[serde(default)]
    pub limits: Limits,
}

fn default_resolution() -> u32 {
    RESOLUTION
}
fn default_metronome() -> bool {
    true
}

impl EditorConfig {
    /// Load editor settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read editor config: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse editor settings from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse editor config TOML")?;
        if config.resolution == 0 || config.resolution % 4 != 0 {
            bail!("Resolution must be a positive multiple of 4, got {}", config.resolution);
        }
        let limits = &config.limits;
        if limits.min_section_bars > limits.default_section_bars {
            bail!(
                "min_section_bars ({}) must not exceed default_section_bars ({})",
                limits.min_section_bars,
                limits.default_section_bars
            );
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize editor config to TOML")
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            metronome: default_metronome(),
            limits: Limits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_song_table() {
        let yaml = r#"
songs:
  - title: "Test Song"
    mvId: "abc123"
    bpm: 120
    startAtMs: 1000
    endAtMs: 61000
  - title: "Other"
    mvId: "xyz"
    bpm: 95.5
    startAtMs: 0
    endAtMs: 30000
"#;

        let table = SongTable::from_yaml(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.songs[0].title, "Test Song");
        assert_eq!(table.songs[0].bpm, 120.0);
        assert_eq!(table.songs[0].start_at_ms, 1000.0);
        assert_eq!(table.songs[1].bpm, 95.5);
        assert_eq!(table.find("Other").map(|s| s.mv_id.as_str()), Some("xyz"));
    }

    #[test]
    fn test_song_table_round_trip() {
        let original = SongTable::default();
        let yaml = original.to_yaml().unwrap();
        let parsed = SongTable::from_yaml(&yaml).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_default_song_table() {
        let table = SongTable::default();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0).unwrap().bpm, 181.0);
        assert!(table.get(3).is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.yaml");
        SongTable::default().save(&path).unwrap();
        let loaded = SongTable::load(&path).unwrap();
        assert_eq!(loaded, SongTable::default());
    }

    #[test]
    fn test_parse_editor_config() {
        let text = r#"
metronome = false

[limits]
section_max = 4
appeal_duration_sec = 7.5
"#;

        let config = EditorConfig::from_toml(text).unwrap();
        assert!(!config.metronome);
        assert_eq!(config.resolution, 240);
        assert_eq!(config.limits.section_max, 4);
        assert_eq!(config.limits.appeal_duration_sec, 7.5);
        assert_eq!(config.limits.fever_max, Limits::default().fever_max);
    }

    #[test]
    fn test_editor_config_defaults() {
        let config = EditorConfig::from_toml("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(EditorConfig::from_toml("resolution = 0").is_err());
        assert!(EditorConfig::from_toml("resolution = 250").is_err());
    }

    #[test]
    fn test_min_section_bars_above_default() {
        let text = r#"
[limits]
default_section_bars = 1
min_section_bars = 4
"#;
        let err = EditorConfig::from_toml(text).unwrap_err();
        assert!(err.to_string().contains("min_section_bars"));

        let text = r#"
[limits]
default_section_bars = 4
min_section_bars = 4
"#;
        assert!(EditorConfig::from_toml(text).is_ok());
    }

    #[test]
    fn test_editor_config_round_trip() {
        let config = EditorConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(EditorConfig::from_toml(&text).unwrap(), config);
    }
}
