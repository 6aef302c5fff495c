//! Row-major table with named columns and an optional date index.

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};

use super::value::Value;

/// One date slot per row. `None` is a row whose date is missing.
pub type DateIndex = Vec<Option<NaiveDate>>;

/// Represents tabular data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Value>>,
    /// Row index, present once the table has been indexed by date.
    pub index: Option<DateIndex>,
}

impl Table {
    /// Create a new table. Short rows are padded with `Missing`, long rows
    /// are truncated to the header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Value>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, Value::Missing);
        }
        Self {
            headers,
            rows,
            index: None,
        }
    }

    /// Create a table from raw string fields, as read from a delimited file.
    /// Empty fields become `Missing`.
    pub fn from_records<S: AsRef<str>>(headers: &[S], records: &[Vec<S>]) -> Self {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = records
            .iter()
            .map(|r| r.iter().map(|f| Value::from_raw(f.as_ref())).collect())
            .collect();
        Self::new(headers, rows)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Find the position of a column, failing if it is absent.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Overwrite a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Append a column, or overwrite it if one with the same name exists.
    /// `values` is aligned with the rows; missing trailing values are padded.
    pub fn put_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        let name = name.into();
        debug_assert_eq!(values.len(), self.row_count());

        let col = match self.column_index(&name) {
            Some(col) => col,
            None => {
                self.headers.push(name);
                for row in &mut self.rows {
                    row.push(Value::Missing);
                }
                self.headers.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
    }

    /// Drop columns by name. Fails without modifying the table if any
    /// column is absent.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let mut positions = names
            .iter()
            .map(|n| self.require_column(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        positions.sort_unstable();
        positions.dedup();

        for &col in positions.iter().rev() {
            self.headers.remove(col);
            for row in &mut self.rows {
                row.remove(col);
            }
        }
        Ok(())
    }

    /// Rename a column, failing if it is absent.
    pub fn rename_column(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let col = self.require_column(from)?;
        self.headers[col] = to.into();
        Ok(())
    }

    /// Attach a date index and reorder rows ascending by it.
    ///
    /// The sort is stable, so rows sharing a date keep their input order.
    /// Rows with no date go last. Returns the new order as positions in the
    /// old one.
    pub fn set_index_sorted(&mut self, index: DateIndex) -> Vec<usize> {
        debug_assert_eq!(index.len(), self.row_count());

        let mut order: Vec<usize> = (0..index.len()).collect();
        order.sort_by_key(|&i| (index[i].is_none(), index[i]));

        let mut rows: Vec<Option<Vec<Value>>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = order.iter().filter_map(|&i| rows[i].take()).collect();
        self.index = Some(order.iter().map(|&i| index[i]).collect());
        order
    }

    /// Returns true if the index is non-decreasing, missing dates last.
    /// An unindexed table is trivially sorted.
    pub fn is_sorted_by_index(&self) -> bool {
        match &self.index {
            None => true,
            Some(index) => index.windows(2).all(|w| match (w[0], w[1]) {
                (Some(a), Some(b)) => a <= b,
                (Some(_), None) | (None, None) => true,
                (None, Some(_)) => false,
            }),
        }
    }
}
