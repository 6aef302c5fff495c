//! Writing cleaned tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::table::{Table, Value};

/// Name of the column the date index is written under.
pub const INDEX_COLUMN: &str = "Date";

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    /// Array of records, one object per row.
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

/// Writes tables to CSV, TSV or JSON.
///
/// The date index, when present, becomes the first column. Missing cells
/// are empty fields in delimited output and `null` in JSON.
pub struct TableWriter {
    format: OutputFormat,
}

impl TableWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a table to a file, creating or truncating it.
    pub fn write_file(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PipelineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        self.write(table, &mut writer)?;
        writer.flush().map_err(|e| PipelineError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write a table to any writer.
    pub fn write<W: Write>(&self, table: &Table, writer: W) -> Result<()> {
        match self.format {
            OutputFormat::Csv => write_delimited(table, writer, b','),
            OutputFormat::Tsv => write_delimited(table, writer, b'\t'),
            OutputFormat::Json => write_json(table, writer),
        }
    }
}

fn index_cell(table: &Table, row: usize) -> Option<String> {
    table.index.as_ref().map(|index| {
        index[row]
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    })
}

fn write_delimited<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(table.column_count() + 1);
    if table.index.is_some() {
        header.push(INDEX_COLUMN);
    }
    header.extend(table.headers.iter().map(String::as_str));
    out.write_record(&header)?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
        record.extend(index_cell(table, row_idx));
        record.extend(row.iter().map(|cell| cell.to_string()));
        out.write_record(&record)?;
    }

    out.flush().map_err(|e| PipelineError::Csv(e.into()))
}

fn write_json<W: Write>(table: &Table, writer: W) -> Result<()> {
    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| json_record(table, row_idx, row))
        .collect::<Result<Vec<_>>>()?;

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

fn json_record<'a>(
    table: &'a Table,
    row_idx: usize,
    row: &[Value],
) -> Result<IndexMap<&'a str, serde_json::Value>> {
    let mut record = IndexMap::with_capacity(row.len() + 1);
    if let Some(date) = index_cell(table, row_idx) {
        let date = if date.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(date)
        };
        record.insert(INDEX_COLUMN, date);
    }
    for (header, cell) in table.headers.iter().zip(row) {
        record.insert(header.as_str(), serde_json::to_value(cell)?);
    }
    Ok(record)
}
