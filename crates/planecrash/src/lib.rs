//! planecrash: cleaning pipeline for aviation accident archive exports.
//!
//! Takes the raw table scraped from the accident archive and produces an
//! analysis-ready one: housekeeping columns dropped, rows indexed and sorted
//! by date, routes split into origin and destination, fatality totals
//! parsed, locations cleaned, countries extracted and each accident
//! classified by phase.
//!
//! # Core Principles
//!
//! - **Non-destructive**: the input table is never modified
//! - **Local recovery**: a malformed cell degrades to a missing value, it
//!   never aborts the run
//! - **Deterministic**: the same input always gives the same output
//!
//! # Example
//!
//! ```no_run
//! use planecrash::{Parser, clean_database};
//!
//! let (raw, _source) = Parser::new().parse_file("Airplane_Crashes.csv").unwrap();
//! let cleaned = clean_database(&raw).unwrap();
//!
//! println!("Rows: {}", cleaned.row_count());
//! println!("Columns: {:?}", cleaned.headers);
//! ```

pub mod clean;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod table;

pub use clean::{
    AccidentType, Count, FatalityCounts, FatalityField, UNKNOWN_COUNTRY, classify_accident,
    clean_location, country_of_loc, get_accident_type, split_fatalities, split_route,
};
pub use error::{PipelineError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use output::{OutputFormat, TableWriter};
pub use pipeline::{
    CleaningReport, CleaningStep, ColumnNames, Pipeline, PipelineConfig, RowAudit, StepChange,
    clean_database,
};
pub use table::{DateIndex, Table, Value};
