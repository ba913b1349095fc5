//! Columnar Table Implementation

use crate::error::TableError;
use std::sync::Arc;

/// Numeric column shared between table versions
#[derive(Debug, Clone)]
struct NumericColumn {
    name: String,
    values: Arc<[f64]>,
}

/// Per-row text labels
#[derive(Debug, Clone)]
struct LabelColumn {
    name: String,
    values: Arc<[String]>,
    /// Number of numeric columns that preceded the label when it was added
    position: usize,
}

/// Read-only view of one column
#[derive(Debug, Clone, Copy)]
pub enum ColumnView<'a> {
    /// Time or channel/feature values (`NaN` = missing)
    Numeric(&'a [f64]),
    /// Label values
    Text(&'a [String]),
}

/// Time-ordered columnar table of sensor channels
///
/// Columns are reference counted, so cloning a table and appending or
/// replacing a column never copies the other columns. Row count and the
/// time column are fixed at construction.
#[derive(Debug, Clone)]
pub struct SensorTable {
    time_name: String,
    time: Arc<[f64]>,
    columns: Vec<NumericColumn>,
    label: Option<LabelColumn>,
}

impl SensorTable {
    /// Create a table from its time column
    ///
    /// Time must be non-empty, finite and non-decreasing.
    pub fn new(time_name: impl Into<String>, time: Vec<f64>) -> Result<Self, TableError> {
        if time.is_empty() {
            return Err(TableError::EmptyTable);
        }

        for (row, &t) in time.iter().enumerate() {
            if !t.is_finite() {
                return Err(TableError::NonFiniteTime { row });
            }
            if row > 0 && t < time[row - 1] {
                return Err(TableError::NonMonotonicTime {
                    row,
                    previous: time[row - 1],
                    current: t,
                });
            }
        }

        Ok(Self {
            time_name: time_name.into(),
            time: time.into(),
            columns: Vec::new(),
            label: None,
        })
    }

    /// Builder-style variant of [`SensorTable::push_column`]
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        self.push_column(name, values)?;
        Ok(self)
    }

    /// Append a numeric column
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        self.check_length(&name, values.len())?;

        self.columns.push(NumericColumn {
            name,
            values: values.into(),
        });
        Ok(())
    }

    /// Replace the values of an existing numeric column
    pub fn replace_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), TableError> {
        self.check_length(name, values.len())?;
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        column.values = values.into();
        Ok(())
    }

    /// Set (or replace) the label column
    pub fn set_labels(
        &mut self,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if name == self.time_name || self.numeric_index(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }
        self.check_length(&name, values.len())?;

        let position = match &self.label {
            Some(existing) if existing.name == name => existing.position,
            _ => self.columns.len(),
        };
        self.label = Some(LabelColumn {
            name,
            values: values.into(),
            position,
        });
        Ok(())
    }

    /// Numeric column values by name
    pub fn column(&self, name: &str) -> Result<&[f64], TableError> {
        self.numeric_index(name)
            .map(|i| &*self.columns[i].values)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Whether a column of any kind has this name
    pub fn has_column(&self, name: &str) -> bool {
        name == self.time_name
            || self.numeric_index(name).is_some()
            || self.label.as_ref().is_some_and(|l| l.name == name)
    }

    /// Whether a numeric (non-time) column has this name
    pub fn has_numeric_column(&self, name: &str) -> bool {
        self.numeric_index(name).is_some()
    }

    /// Names of the numeric columns in insertion order (time excluded)
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Time column values
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Time column name
    pub fn time_name(&self) -> &str {
        &self.time_name
    }

    /// Label values, if a label column has been added
    pub fn labels(&self) -> Option<&[String]> {
        self.label.as_ref().map(|l| &*l.values)
    }

    /// Label column name, if present
    pub fn label_name(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.name.as_str())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.time.len()
    }

    /// Number of columns including time and label
    pub fn num_columns(&self) -> usize {
        1 + self.columns.len() + usize::from(self.label.is_some())
    }

    /// All columns in output order: time, numeric columns, with the label
    /// placed where it was added
    pub fn columns_in_order(&self) -> Vec<(&str, ColumnView<'_>)> {
        let mut out = Vec::with_capacity(self.num_columns());
        out.push((self.time_name.as_str(), ColumnView::Numeric(&self.time)));

        let label_at = self.label.as_ref().map(|l| l.position);
        for (i, column) in self.columns.iter().enumerate() {
            if label_at == Some(i) {
                self.push_label_view(&mut out);
            }
            out.push((column.name.as_str(), ColumnView::Numeric(&column.values)));
        }
        if label_at.is_some_and(|p| p >= self.columns.len()) {
            self.push_label_view(&mut out);
        }
        out
    }

    fn push_label_view<'a>(&'a self, out: &mut Vec<(&'a str, ColumnView<'a>)>) {
        if let Some(label) = &self.label {
            out.push((label.name.as_str(), ColumnView::Text(&label.values)));
        }
    }

    fn numeric_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn check_length(&self, name: &str, actual: usize) -> Result<(), TableError> {
        if actual != self.num_rows() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.num_rows(),
                actual,
            });
        }
        Ok(())
    }
}
