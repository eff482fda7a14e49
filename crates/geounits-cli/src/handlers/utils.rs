//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use geounits_core::UnitMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Whether a path names a YAML file
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Read a JSON or YAML file into a JSON value
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    let invalid = |expected: &str, reason: String| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: expected.to_string(),
        reason,
    };

    // The parser message carries the line and column
    let parsed = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| invalid("YAML", e.to_string()))?
    } else {
        serde_json::from_str(&content).map_err(|e| invalid("JSON", e.to_string()))?
    };

    Ok(parsed)
}

/// Load a schema file and build its unit map
pub fn load_unit_map(schema: &Path, config: &Config) -> Result<UnitMap> {
    let schema_value = load_document(schema)?;

    let _timer = Timer::with_details("unit_map_build", &schema.display().to_string());
    let units = UnitMap::from_schema(&schema_value, &config.units);

    tracing::info!(
        schema = %schema.display(),
        entries = units.len(),
        "Built unit map"
    );

    Ok(units)
}

/// Write a converted document to disk, as YAML or JSON by extension
pub fn save_document(path: &Path, value: &Value, pretty: bool) -> Result<()> {
    let content = if is_yaml(path) {
        serde_yaml::to_string(value)?
    } else if pretty {
        serde_json::to_string_pretty(value)? + "\n"
    } else {
        serde_json::to_string(value)? + "\n"
    };

    fs::write(path, content)?;
    Ok(())
}
