//! Declared channel set

use crate::error::TableError;
use crate::table::SensorTable;

/// The numeric channels a pipeline run operates on
///
/// Declared once at pipeline entry and passed to every stage, so that
/// feature columns added by one stage are never picked up by the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSet {
    names: Vec<String>,
}

impl ChannelSet {
    /// Create a channel set from explicit names (duplicates dropped, order kept)
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self { names: out }
    }

    /// Every numeric column currently in the table
    pub fn all(table: &SensorTable) -> Self {
        Self::new(table.column_names())
    }

    /// Check that every channel is a numeric column of `table`
    pub fn validate(&self, table: &SensorTable) -> Result<(), TableError> {
        for name in &self.names {
            if table.has_numeric_column(name) {
                continue;
            }
            if table.has_column(name) {
                return Err(TableError::NotAChannel(name.clone()));
            }
            return Err(TableError::MissingColumn(name.clone()));
        }
        Ok(())
    }

    /// Iterate channel names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` is a declared channel
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl<S: Into<String>> FromIterator<S> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
