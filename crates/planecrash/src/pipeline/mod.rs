//! The cleaning pipeline: ordered steps from a raw archive export to an
//! analysis-ready table.

mod config;
mod engine;
mod report;

pub use config::{ColumnNames, PipelineConfig};
pub use engine::{Pipeline, clean_database};
pub use report::{CleaningReport, CleaningStep, RowAudit, StepChange};
