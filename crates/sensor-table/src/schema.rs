//! Table schema

use crate::channels::ChannelSet;
use crate::error::TableError;
use crate::table::SensorTable;
use serde::{Deserialize, Serialize};

/// Names of the structural columns of a recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Time column (seconds)
    pub time_column: String,
    /// Per-sample label column
    pub label_column: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            time_column: "Time".to_string(),
            label_column: "label".to_string(),
        }
    }
}

impl Schema {
    /// Check that `table` was built against this schema
    pub fn validate(&self, table: &SensorTable) -> Result<(), TableError> {
        if table.time_name() != self.time_column {
            return Err(TableError::MissingColumn(self.time_column.clone()));
        }
        if table.has_numeric_column(&self.label_column) {
            return Err(TableError::NotAChannel(self.label_column.clone()));
        }
        if let Some(name) = table.label_name() {
            if name != self.label_column {
                return Err(TableError::MissingColumn(self.label_column.clone()));
            }
        }
        Ok(())
    }

    /// Resolve the channel set for a run
    ///
    /// With no explicit selection every numeric column is a channel.
    pub fn channels(
        &self,
        table: &SensorTable,
        selection: Option<&[String]>,
    ) -> Result<ChannelSet, TableError> {
        self.validate(table)?;
        let channels = match selection {
            Some(names) => ChannelSet::new(names.iter().cloned()),
            None => ChannelSet::all(table),
        };
        channels.validate(table)?;
        Ok(channels)
    }
}
