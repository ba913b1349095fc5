//! Columnar Sensor Table
//!
//! Provides the in-memory table that flows through the preprocessing and
//! feature pipelines, the schema and channel declarations validated at
//! pipeline entry, and the label intervals used for ground truth.

mod channels;
mod error;
mod labels;
mod schema;
mod table;

pub use channels::ChannelSet;
pub use error::TableError;
pub use labels::LabelInterval;
pub use schema::Schema;
pub use table::{ColumnView, SensorTable};
