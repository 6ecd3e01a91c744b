//! Telemetry Log
//!
//! Parsed representation of a recorded flight log and the row parser
//! that produces it from delimited text.

mod error;
mod parser;

pub use error::{FetchError, IngestError, ParseError};
pub use parser::{parse_log, TIME_COLUMN};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single cell value from the source log.
///
/// Cells that look numeric are parsed as numbers; anything else is kept
/// verbatim as text. Empty cells never produce a value at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A numeric reading.
    Number(f64),
    /// A non-numeric cell kept as-is.
    Text(String),
}

impl FieldValue {
    /// The numeric value, if this cell parsed as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

/// One timestamped raw sample with all its channel values.
///
/// Records are immutable once parsed; the full ordered sequence is produced
/// once per ingestion and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Source-assigned timestamp. Monotonic in well-formed logs, but
    /// spacing may be irregular.
    pub time: f64,
    /// Channel values keyed by channel name. The time column is not
    /// duplicated here; empty cells have no entry.
    pub values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Look up the raw value for a channel.
    pub fn value(&self, channel: &str) -> Option<&FieldValue> {
        self.values.get(channel)
    }

    /// Look up a channel's value as a number, if it is numeric.
    pub fn number(&self, channel: &str) -> Option<f64> {
        self.values.get(channel).and_then(FieldValue::as_number)
    }

    /// Names of the channels populated in this record, in sorted order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
