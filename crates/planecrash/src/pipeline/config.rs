//! Pipeline configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clean::{DEFAULT_DATE_FORMATS, ROUTE_SEPARATOR};
use crate::error::{PipelineError, Result};

/// Housekeeping columns the archive export carries and the pipeline drops.
const HOUSEKEEPING_COLUMNS: &[&str] = &[
    "Unnamed: 0",
    "Unnamed: 0.1",
    "Registration:",
    "Flight #:",
    "cn / ln:",
];

/// Names of the columns the pipeline reads and writes.
///
/// Input names are as they read after the header suffix is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub route: String,
    pub fatalities: String,
    pub ground: String,
    pub location: String,
    /// Aircraft type column, matched after collapsing runs of whitespace.
    pub aircraft_type: String,
    pub origin: String,
    pub destination: String,
    pub fatalities_total: String,
    pub country: String,
    /// Name the aircraft type column is renamed to.
    pub aircraft_type_renamed: String,
    pub accident_type: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            route: "Route".to_string(),
            fatalities: "Fatalities".to_string(),
            ground: "Ground".to_string(),
            location: "Location".to_string(),
            aircraft_type: "AC Type".to_string(),
            origin: "Origin".to_string(),
            destination: "Destination".to_string(),
            fatalities_total: "Fatalities_total".to_string(),
            country: "Location_Country".to_string(),
            aircraft_type_renamed: "AC_Type".to_string(),
            accident_type: "Accident_type".to_string(),
        }
    }
}

/// Configuration for the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Columns dropped unconditionally (raw names, before suffix stripping).
    pub housekeeping_columns: Vec<String>,
    /// Trailing separator stripped from every column name.
    pub header_suffix: String,
    /// Cell text that stands for "unknown" in the raw export.
    pub placeholder: String,
    /// Accepted date layouts, tried in order (chrono format strings).
    pub date_formats: Vec<String>,
    /// Separator between origin and destination in the route column.
    pub route_separator: String,
    /// Maximum per-row audits kept for each step.
    pub max_row_audits: usize,
    /// Column names.
    pub columns: ColumnNames,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            housekeeping_columns: HOUSEKEEPING_COLUMNS.iter().map(|s| s.to_string()).collect(),
            header_suffix: ":".to_string(),
            placeholder: "?".to_string(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
            route_separator: ROUTE_SEPARATOR.to_string(),
            max_row_audits: 100,
            columns: ColumnNames::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Absent keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| PipelineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings the pipeline cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.route_separator.is_empty() {
            return Err(PipelineError::Config(
                "route_separator must not be empty".to_string(),
            ));
        }
        if self.date_formats.is_empty() {
            return Err(PipelineError::Config(
                "at least one date format is required".to_string(),
            ));
        }
        Ok(())
    }
}
