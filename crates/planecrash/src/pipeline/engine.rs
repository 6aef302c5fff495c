//! Pipeline engine that runs every cleaning step over a raw table.

use tracing::{debug, info, warn};

use crate::clean::{
    AccidentType, UNKNOWN_COUNTRY, clean_location, country_of_loc, get_accident_type, parse_date,
    split_fatalities, split_route,
};
use crate::error::{PipelineError, Result};
use crate::table::{Table, Value};

use super::config::PipelineConfig;
use super::report::{CleaningReport, CleaningStep, RowAudit, StepChange};

/// Clean a raw archive table with the default configuration.
///
/// The input is left untouched; the cleaned table is a new value.
pub fn clean_database(raw: &Table) -> Result<Table> {
    Pipeline::new().run(raw).map(|(table, _)| table)
}

/// Engine for running the cleaning steps in order.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Columns the pipeline needs that `raw` lacks, by their configured
    /// names. An empty list means every step will find its input.
    pub fn missing_columns(&self, raw: &Table) -> Vec<String> {
        let suffix = self.config.header_suffix.as_str();
        let stripped: Vec<&str> = raw
            .headers
            .iter()
            .map(|h| h.strip_suffix(suffix).unwrap_or(h.as_str()))
            .collect();

        let columns = &self.config.columns;
        let mut missing: Vec<String> = self
            .config
            .housekeeping_columns
            .iter()
            .filter(|c| raw.column_index(c).is_none())
            .cloned()
            .collect();

        for name in [
            &columns.date,
            &columns.route,
            &columns.fatalities,
            &columns.ground,
            &columns.location,
        ] {
            if !stripped.contains(&name.as_str()) {
                missing.push(name.clone());
            }
        }

        let aircraft = collapse_whitespace(&columns.aircraft_type);
        if !stripped.iter().any(|h| collapse_whitespace(h) == aircraft) {
            missing.push(columns.aircraft_type.clone());
        }

        missing
    }

    /// Clean a copy of `raw` and report what each step changed.
    pub fn run(&self, raw: &Table) -> Result<(Table, CleaningReport)> {
        self.config.validate()?;

        let mut table = raw.clone();
        let mut report = CleaningReport::new(table.row_count());
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Cleaning accident table"
        );

        for step in CleaningStep::ALL {
            let change = self.apply_step(step, &mut table, &mut report)?;
            debug!(
                step = step.name(),
                values_changed = change.values_changed,
                "{}",
                change.description
            );
            report.add_change(change);
        }

        info!(
            rows = table.row_count(),
            values_changed = report.values_changed,
            "Cleaned accident table"
        );
        Ok((table, report))
    }

    /// Apply one step to the table.
    fn apply_step(
        &self,
        step: CleaningStep,
        table: &mut Table,
        report: &mut CleaningReport,
    ) -> Result<StepChange> {
        match step {
            CleaningStep::DropColumns => self.apply_drop_columns(table),
            CleaningStep::StripHeaderSuffix => Ok(self.apply_strip_header_suffix(table)),
            CleaningStep::NormalizePlaceholder => Ok(self.apply_normalize_placeholder(table)),
            CleaningStep::IndexByDate => self.apply_index_by_date(table),
            CleaningStep::SplitRoute => self.apply_split_route(table),
            CleaningStep::ParseFatalities => self.apply_parse_fatalities(table),
            CleaningStep::CoerceGround => self.apply_coerce_ground(table),
            CleaningStep::CleanLocation => self.apply_clean_location(table),
            CleaningStep::ExtractCountry => self.apply_extract_country(table),
            CleaningStep::RenameAircraftType => self.apply_rename_aircraft_type(table),
            CleaningStep::ClassifyAccident => self.apply_classify_accident(table, report),
        }
    }

    fn apply_drop_columns(&self, table: &mut Table) -> Result<StepChange> {
        let columns = &self.config.housekeeping_columns;
        table.drop_columns(columns)?;

        Ok(StepChange::new(CleaningStep::DropColumns, columns.join(", "))
            .with_description(format!("Dropped {} housekeeping column(s)", columns.len())))
    }

    fn apply_strip_header_suffix(&self, table: &mut Table) -> StepChange {
        let suffix = &self.config.header_suffix;
        let mut renamed = 0;

        if !suffix.is_empty() {
            for header in &mut table.headers {
                if let Some(stripped) = header.strip_suffix(suffix.as_str()) {
                    *header = stripped.to_string();
                    renamed += 1;
                }
            }
        }

        let mut change = StepChange::new(CleaningStep::StripHeaderSuffix, "")
            .with_description(format!("Stripped '{}' from {} column name(s)", suffix, renamed));
        change.values_changed = renamed;
        change
    }

    fn apply_normalize_placeholder(&self, table: &mut Table) -> StepChange {
        let placeholder = &self.config.placeholder;
        let mut change = StepChange::new(CleaningStep::NormalizePlaceholder, "");

        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            for (col_idx, cell) in row.iter_mut().enumerate() {
                if cell.is_text(placeholder) {
                    change.record(
                        RowAudit {
                            row: row_idx,
                            column: table.headers[col_idx].clone(),
                            original_value: std::mem::take(cell),
                            new_value: Value::Missing,
                            reason: format!("'{}' marks an unknown value", placeholder),
                        },
                        self.config.max_row_audits,
                    );
                }
            }
        }

        let count = change.values_changed;
        change.with_description(format!("Converted {} '{}' cell(s) to missing", count, placeholder))
    }

    fn apply_index_by_date(&self, table: &mut Table) -> Result<StepChange> {
        let column = &self.config.columns.date;
        let col = table.require_column(column)?;

        let index = table
            .column_values(col)
            .enumerate()
            .map(|(row, value)| match value {
                Value::Missing => Ok(None),
                Value::Text(text) => parse_date(text, &self.config.date_formats)
                    .map(Some)
                    .ok_or_else(|| PipelineError::DateParse {
                        row,
                        value: text.clone(),
                    }),
                other => Err(PipelineError::DateParse {
                    row,
                    value: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        let undated = index.iter().filter(|d| d.is_none()).count();
        if undated > 0 {
            warn!(rows = undated, "Rows without a date sorted last");
        }

        let order = table.set_index_sorted(index);
        table.drop_columns(&[column])?;

        let moved = order.iter().enumerate().filter(|(pos, from)| pos != *from).count();
        let mut change = StepChange::new(CleaningStep::IndexByDate, column.as_str())
            .with_description(format!("Indexed by '{}', {} row(s) reordered", column, moved));
        change.values_changed = moved;
        Ok(change)
    }

    fn apply_split_route(&self, table: &mut Table) -> Result<StepChange> {
        let columns = &self.config.columns;
        let col = table.require_column(&columns.route)?;

        let (origins, destinations): (Vec<Value>, Vec<Value>) = table
            .column_values(col)
            .map(|route| split_route(route, &self.config.route_separator))
            .unzip();
        let derived = origins.iter().filter(|v| !v.is_missing()).count();

        table.put_column(columns.origin.as_str(), origins);
        table.put_column(columns.destination.as_str(), destinations);

        let mut change = StepChange::new(CleaningStep::SplitRoute, columns.route.as_str())
            .with_description(format!(
                "Split '{}' into '{}' and '{}' for {} row(s)",
                columns.route, columns.origin, columns.destination, derived
            ));
        change.values_changed = derived;
        Ok(change)
    }

    fn apply_parse_fatalities(&self, table: &mut Table) -> Result<StepChange> {
        let columns = &self.config.columns;
        let col = table.require_column(&columns.fatalities)?;

        let totals: Vec<Value> = table
            .column_values(col)
            .map(|entry| match entry.as_text() {
                Some(text) => split_fatalities(text).total_value(),
                None => Value::Missing,
            })
            .collect();
        let derived = totals.iter().filter(|v| !v.is_missing()).count();
        let unknown = totals.len() - derived;
        if unknown > 0 {
            debug!(rows = unknown, "Fatality totals unknown");
        }

        table.put_column(columns.fatalities_total.as_str(), totals);

        let mut change = StepChange::new(CleaningStep::ParseFatalities, columns.fatalities.as_str())
            .with_description(format!(
                "Derived '{}' for {} row(s), {} unknown",
                columns.fatalities_total, derived, unknown
            ));
        change.values_changed = derived;
        Ok(change)
    }

    fn apply_coerce_ground(&self, table: &mut Table) -> Result<StepChange> {
        let column = &self.config.columns.ground;
        let col = table.require_column(column)?;
        let mut change = StepChange::new(CleaningStep::CoerceGround, column.as_str());
        let mut degraded = 0;

        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            let coerced = row[col].to_numeric();
            if coerced == row[col] {
                continue;
            }
            let reason = if coerced.is_missing() {
                degraded += 1;
                format!("'{}' is not numeric", row[col])
            } else {
                "Coerced to number".to_string()
            };
            change.record(
                RowAudit {
                    row: row_idx,
                    column: column.clone(),
                    original_value: std::mem::replace(&mut row[col], coerced.clone()),
                    new_value: coerced,
                    reason,
                },
                self.config.max_row_audits,
            );
        }

        if degraded > 0 {
            warn!(column = %column, rows = degraded, "Non-numeric values set to missing");
        }

        let count = change.values_changed;
        Ok(change.with_description(format!(
            "Coerced {} value(s) in '{}' to numeric, {} set to missing",
            count, column, degraded
        )))
    }

    fn apply_clean_location(&self, table: &mut Table) -> Result<StepChange> {
        let column = &self.config.columns.location;
        let col = table.require_column(column)?;
        let mut change = StepChange::new(CleaningStep::CleanLocation, column.as_str());

        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            let cleaned = clean_location(&row[col]);
            if cleaned == row[col] {
                continue;
            }
            change.record(
                RowAudit {
                    row: row_idx,
                    column: column.clone(),
                    original_value: std::mem::replace(&mut row[col], cleaned.clone()),
                    new_value: cleaned,
                    reason: "Removed filler words or fixed a typo".to_string(),
                },
                self.config.max_row_audits,
            );
        }

        let count = change.values_changed;
        Ok(change.with_description(format!("Cleaned {} location(s) in '{}'", count, column)))
    }

    fn apply_extract_country(&self, table: &mut Table) -> Result<StepChange> {
        let columns = &self.config.columns;
        let col = table.require_column(&columns.location)?;

        let countries: Vec<Value> = table
            .column_values(col)
            .map(|location| Value::Text(country_of_loc(location)))
            .collect();
        let derived = countries
            .iter()
            .filter(|c| !c.is_text(UNKNOWN_COUNTRY))
            .count();

        table.put_column(columns.country.as_str(), countries);

        let mut change = StepChange::new(CleaningStep::ExtractCountry, columns.location.as_str())
            .with_description(format!(
                "Derived '{}' for {} row(s)",
                columns.country, derived
            ));
        change.values_changed = derived;
        Ok(change)
    }

    fn apply_rename_aircraft_type(&self, table: &mut Table) -> Result<StepChange> {
        let columns = &self.config.columns;
        let wanted = collapse_whitespace(&columns.aircraft_type);

        let current = table
            .headers
            .iter()
            .find(|h| collapse_whitespace(h) == wanted)
            .cloned()
            .ok_or_else(|| PipelineError::MissingColumn(columns.aircraft_type.clone()))?;
        table.rename_column(&current, columns.aircraft_type_renamed.as_str())?;

        Ok(StepChange::new(CleaningStep::RenameAircraftType, current.as_str())
            .with_description(format!(
                "Renamed '{}' to '{}'",
                current, columns.aircraft_type_renamed
            )))
    }

    fn apply_classify_accident(
        &self,
        table: &mut Table,
        report: &mut CleaningReport,
    ) -> Result<StepChange> {
        let columns = &self.config.columns;
        let loc = table.require_column(&columns.location)?;
        let origin = table.require_column(&columns.origin)?;
        let dest = table.require_column(&columns.destination)?;

        let types = get_accident_type(
            table
                .rows
                .iter()
                .map(|row| (&row[loc], &row[origin], &row[dest])),
        );
        report.count_accident_types(&types);

        let classified = types
            .iter()
            .filter(|t| **t != AccidentType::Unknown)
            .count();
        table.put_column(
            columns.accident_type.as_str(),
            types.iter().map(|t| Value::Integer(t.code())).collect(),
        );

        let mut change = StepChange::new(CleaningStep::ClassifyAccident, columns.accident_type.as_str())
            .with_description(format!(
                "Classified {} of {} row(s) by accident phase",
                classified,
                types.len()
            ));
        change.values_changed = classified;
        Ok(change)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse runs of whitespace to single spaces and trim.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
