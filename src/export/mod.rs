// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chart export.
//!
//! Charts are written out as JSON with the field names of the chart format
//! (`info`, `notes`, `sections`, `appeals`, `fevers`). There is no import.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::score::Score;

/// Serialize a chart to pretty-printed JSON
pub fn to_json(score: &Score) -> Result<String> {
    serde_json::to_string_pretty(score).context("Failed to serialize chart to JSON")
}

/// Write a chart to a JSON file
pub fn write_json<P: AsRef<Path>>(score: &Score, path: P) -> Result<()> {
    let json = to_json(score)?;
    fs::write(path.as_ref(), json)
        .with_context(|| format!("Failed to write chart: {:?}", path.as_ref()))?;
    info!(path = ?path.as_ref(), title = %score.info.title, "chart exported");
    Ok(())
}

/// Dump a chart to the log
pub fn dump(score: &Score) -> Result<()> {
    let json = serde_json::to_string(score).context("Failed to serialize chart to JSON")?;
    info!(chart = %json, "chart dump");
    Ok(())
}
