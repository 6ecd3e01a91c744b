//! # SkyLog Core Library
//!
//! Core functionality for the SkyLog flight telemetry ground station.
//!
//! This library provides:
//! - Row parsing of recorded flight logs (delimited text) into typed records
//! - A channel registry mapping raw channels onto logical sensor groups
//! - Incremental per-group series derivation over a growing replay prefix
//! - A replay engine that simulates a live feed from a recorded file
//! - A subscription hub broadcasting consistent snapshots to observers
//!
//! ## Example
//!
//! ```rust,ignore
//! use skylog_core::prelude::*;
//!
//! let manager = TelemetryManager::default();
//! manager.subscribe(|snapshot| println!("cursor {}", snapshot.cursor));
//! manager.ingest_path("phase1.csv").await;
//! manager.start().await;
//! ```

#![warn(missing_docs)]

pub mod log;
pub mod registry;
pub mod replay;
pub mod series;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::log::{parse_log, FetchError, FieldValue, IngestError, ParseError, Record};
    pub use crate::registry::{ChannelRegistry, ChannelSpec, GroupInfo};
    pub use crate::replay::{Snapshot, SubscriberId, TelemetryManager};
    pub use crate::series::{build_group_series, GroupEntry, GroupSeries, SeriesBuilder};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
