//! Replay
//!
//! Replays an ingested flight log incrementally to any number of
//! observers at a fixed tick rate, simulating a live feed from a
//! recorded file.

mod manager;
mod subscribers;

pub use manager::{TelemetryManager, DEFAULT_TICK_PERIOD};
pub use subscribers::SubscriberId;

use serde::Serialize;

use crate::log::IngestError;
use crate::series::GroupSeries;

/// Atomic, consistent view of replay state handed to observers.
///
/// Produced from one consistent state under the manager's lock; observers
/// receive read-only copies and never a partially updated view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Per-group series computed over the visible record prefix.
    pub series: GroupSeries,
    /// True while an ingest is in flight.
    pub loading: bool,
    /// Error from the most recent ingest, sticky until the next
    /// successful one.
    pub error: Option<IngestError>,
    /// True while the replay tick is advancing the cursor.
    pub streaming: bool,
    /// Replay position: inclusive end of the visible prefix.
    pub cursor: usize,
    /// Total number of records in the ingested log.
    pub total: usize,
}
