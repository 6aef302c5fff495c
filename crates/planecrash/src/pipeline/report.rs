//! Cleaning steps and the report of what each one changed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::clean::AccidentType;
use crate::table::Value;

/// A step of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStep {
    /// Drop housekeeping columns.
    DropColumns,
    /// Strip the trailing separator from column names.
    StripHeaderSuffix,
    /// Turn placeholder cells into missing values.
    NormalizePlaceholder,
    /// Index and sort rows by date, then drop the date column.
    IndexByDate,
    /// Derive origin and destination from the route.
    SplitRoute,
    /// Derive the fatality total.
    ParseFatalities,
    /// Make ground casualties numeric.
    CoerceGround,
    /// Remove filler words and fix typos in locations.
    CleanLocation,
    /// Derive the country from the location.
    ExtractCountry,
    /// Give the aircraft type column its canonical name.
    RenameAircraftType,
    /// Derive the accident phase.
    ClassifyAccident,
}

impl CleaningStep {
    /// Every step, in execution order.
    pub const ALL: [CleaningStep; 11] = [
        CleaningStep::DropColumns,
        CleaningStep::StripHeaderSuffix,
        CleaningStep::NormalizePlaceholder,
        CleaningStep::IndexByDate,
        CleaningStep::SplitRoute,
        CleaningStep::ParseFatalities,
        CleaningStep::CoerceGround,
        CleaningStep::CleanLocation,
        CleaningStep::ExtractCountry,
        CleaningStep::RenameAircraftType,
        CleaningStep::ClassifyAccident,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CleaningStep::DropColumns => "drop_columns",
            CleaningStep::StripHeaderSuffix => "strip_header_suffix",
            CleaningStep::NormalizePlaceholder => "normalize_placeholder",
            CleaningStep::IndexByDate => "index_by_date",
            CleaningStep::SplitRoute => "split_route",
            CleaningStep::ParseFatalities => "parse_fatalities",
            CleaningStep::CoerceGround => "coerce_ground",
            CleaningStep::CleanLocation => "clean_location",
            CleaningStep::ExtractCountry => "extract_country",
            CleaningStep::RenameAircraftType => "rename_aircraft_type",
            CleaningStep::ClassifyAccident => "classify_accident",
        }
    }

    /// Number of columns the step appends.
    pub fn adds_columns(&self) -> usize {
        match self {
            CleaningStep::SplitRoute => 2,
            CleaningStep::ParseFatalities
            | CleaningStep::ExtractCountry
            | CleaningStep::ClassifyAccident => 1,
            _ => 0,
        }
    }
}

/// Result of running the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Number of rows cleaned.
    pub rows: usize,

    /// Number of steps applied.
    pub steps_applied: usize,

    /// Number of cells rewritten or derived across all steps.
    pub values_changed: usize,

    /// Number of columns added.
    pub columns_added: usize,

    /// Rows per accident phase.
    pub accident_types: IndexMap<AccidentType, usize>,

    /// Detailed changes for each step.
    pub changes: Vec<StepChange>,
}

impl CleaningReport {
    /// Create an empty report.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Add a step's change to the report.
    pub fn add_change(&mut self, change: StepChange) {
        self.steps_applied += 1;
        self.values_changed += change.values_changed;
        self.columns_added += change.step.adds_columns();
        self.changes.push(change);
    }

    /// Find the change recorded for a step.
    pub fn change(&self, step: CleaningStep) -> Option<&StepChange> {
        self.changes.iter().find(|c| c.step == step)
    }

    /// Count accident phases, every phase listed even when zero.
    pub fn count_accident_types(&mut self, types: &[AccidentType]) {
        self.accident_types = AccidentType::ALL.iter().map(|t| (*t, 0)).collect();
        for t in types {
            *self.accident_types.entry(*t).or_insert(0) += 1;
        }
    }
}

/// What one step changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepChange {
    /// The step.
    pub step: CleaningStep,

    /// Description of the change.
    pub description: String,

    /// Column affected; empty for steps that touch the whole table.
    pub column: String,

    /// Number of values changed.
    pub values_changed: usize,

    /// Per-row audit information, capped by the pipeline configuration.
    pub row_audits: Vec<RowAudit>,
}

impl StepChange {
    pub fn new(step: CleaningStep, column: impl Into<String>) -> Self {
        Self {
            step,
            description: String::new(),
            column: column.into(),
            values_changed: 0,
            row_audits: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Count a changed value and keep its audit while under `cap`.
    pub fn record(&mut self, audit: RowAudit, cap: usize) {
        self.values_changed += 1;
        if self.row_audits.len() < cap {
            self.row_audits.push(audit);
        }
    }
}

/// Audit information for a single cell change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row position (0-based) at the time of the step.
    pub row: usize,

    /// Column that was changed.
    pub column: String,

    /// Value before the step.
    pub original_value: Value,

    /// Value after the step.
    pub new_value: Value,

    /// Reason for the change.
    pub reason: String,
}
