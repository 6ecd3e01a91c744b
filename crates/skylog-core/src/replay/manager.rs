//! Telemetry manager
//!
//! Owns the record sequence and the replay cursor, drives the fixed-period
//! tick that advances it, and broadcasts consistent snapshots through the
//! subscription hub. All mutations resynchronize onto one state lock, so
//! ingest completion, ticks and control calls never race.

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::subscribers::SubscriberHub;
use super::{Snapshot, SubscriberId};
use crate::log::{parse_log, FetchError, IngestError, Record};
use crate::registry::ChannelRegistry;
use crate::series::SeriesBuilder;

/// Default replay tick period. Governs replay speed, not physical time.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Ingestion-and-replay manager for one flight log.
///
/// Constructed with its channel registry and tick period, so independent
/// instances can run side by side. Cloning is cheap and shares the same
/// underlying state.
#[derive(Clone)]
pub struct TelemetryManager {
    inner: Arc<Inner>,
}

struct Inner {
    registry: ChannelRegistry,
    tick_period: Duration,
    hub: SubscriberHub,
    state: Mutex<ReplayState>,
}

#[derive(Default)]
struct ReplayState {
    records: Vec<Record>,
    cursor: usize,
    series: SeriesBuilder,
    loading: bool,
    error: Option<IngestError>,
    streaming: bool,
    /// Bumped whenever streaming halts; a tick task spawned under an older
    /// epoch exits without touching state.
    epoch: u64,
    /// Monotonic ingest generation; only the newest ingest installs its
    /// outcome.
    ingest_gen: u64,
    task: Option<JoinHandle<()>>,
}

impl ReplayState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            series: self.series.series(),
            loading: self.loading,
            error: self.error.clone(),
            streaming: self.streaming,
            cursor: self.cursor,
            total: self.records.len(),
        }
    }

    /// Stop the tick synchronously: bump the epoch so any already-scheduled
    /// tick cannot mutate state, then abort the task.
    fn halt_streaming(&mut self) {
        self.epoch += 1;
        self.streaming = false;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Recompute the series accumulator over the prefix `[0, cursor]`.
    fn rebuild_series(&mut self, registry: &ChannelRegistry) {
        let mut series = SeriesBuilder::new(registry);
        for record in self.records.iter().take(self.cursor + 1) {
            series.fold(registry, record);
        }
        self.series = series;
    }
}

impl TelemetryManager {
    /// Create a manager with the given channel registry and tick period.
    pub fn new(registry: ChannelRegistry, tick_period: Duration) -> Self {
        let series = SeriesBuilder::new(&registry);
        Self {
            inner: Arc::new(Inner {
                registry,
                tick_period,
                hub: SubscriberHub::default(),
                state: Mutex::new(ReplayState {
                    series,
                    ..ReplayState::default()
                }),
            }),
        }
    }

    /// The registry this manager groups channels with. Read-only.
    pub fn registry(&self) -> &ChannelRegistry {
        &self.inner.registry
    }

    /// The fixed replay tick period.
    pub fn tick_period(&self) -> Duration {
        self.inner.tick_period
    }

    /// Register an observer. It is not called until the next state change;
    /// a late subscriber should request [`TelemetryManager::snapshot`]
    /// itself for the current state.
    pub fn subscribe(
        &self,
        observer: impl Fn(&Snapshot) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.inner.hub.subscribe(observer)
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.hub.unsubscribe(id)
    }

    /// The current snapshot, for non-subscribed reads.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.state.lock().await.snapshot()
    }

    /// Channel names present in the first record, excluding the time
    /// column, in sorted order.
    pub async fn available_channels(&self) -> Vec<String> {
        let state = self.inner.state.lock().await;
        state
            .records
            .first()
            .map(|record| record.channel_names().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Ingest a log from a fetch future supplied by an I/O collaborator.
    ///
    /// Halts any running replay, broadcasts a loading snapshot, awaits the
    /// fetch without holding the state lock, then installs the outcome.
    /// If a newer ingest started meanwhile this one is discarded (last
    /// call wins). Fetch and parse failures land in the
    /// snapshot's error field; prior records survive with the cursor reset
    /// to 0.
    pub async fn ingest<F>(&self, fetch: F)
    where
        F: Future<Output = Result<String, FetchError>>,
    {
        let generation = {
            let mut state = self.inner.state.lock().await;
            state.halt_streaming();
            state.ingest_gen += 1;
            state.loading = true;
            let snapshot = state.snapshot();
            self.inner.hub.notify(&snapshot);
            state.ingest_gen
        };

        let outcome = match fetch.await {
            Ok(text) => parse_log(&text).map_err(IngestError::from),
            Err(err) => Err(IngestError::from(err)),
        };

        let mut state = self.inner.state.lock().await;
        if state.ingest_gen != generation {
            tracing::debug!(generation, "discarding superseded ingest");
            return;
        }

        // A replay started while the fetch was in flight must not keep
        // ticking against the new log.
        state.halt_streaming();
        state.loading = false;
        state.cursor = 0;
        match outcome {
            Ok(records) => {
                tracing::debug!(records = records.len(), "installed telemetry log");
                state.records = records;
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "ingest failed");
                state.error = Some(err);
            }
        }
        state.rebuild_series(&self.inner.registry);

        let snapshot = state.snapshot();
        self.inner.hub.notify(&snapshot);
    }

    /// Ingest a log file from disk.
    pub async fn ingest_path(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.ingest(async move {
            tokio::fs::read_to_string(path)
                .await
                .map_err(FetchError::from)
        })
        .await;
    }

    /// Begin advancing the cursor at the fixed tick period.
    ///
    /// No-op when already streaming or when there are no records.
    pub async fn start(&self) {
        let mut state = self.inner.state.lock().await;
        if state.streaming || state.records.is_empty() {
            return;
        }
        state.streaming = true;

        let epoch = state.epoch;
        let period = self.inner.tick_period;
        let weak = Arc::downgrade(&self.inner);
        state.task = Some(tokio::spawn(tick_loop(weak, epoch, period)));

        let snapshot = state.snapshot();
        self.inner.hub.notify(&snapshot);
    }

    /// Halt streaming. Always safe to call.
    pub async fn stop(&self) {
        let mut state = self.inner.state.lock().await;
        state.halt_streaming();
        let snapshot = state.snapshot();
        self.inner.hub.notify(&snapshot);
    }

    /// Halt streaming and rewind the cursor to the first record.
    pub async fn reset(&self) {
        let mut state = self.inner.state.lock().await;
        state.halt_streaming();
        state.cursor = 0;
        state.rebuild_series(&self.inner.registry);
        let snapshot = state.snapshot();
        self.inner.hub.notify(&snapshot);
    }

    /// Move the cursor directly, clamped to the record range. Used for
    /// scrubbing; neither starts nor stops streaming. No-op with no
    /// records.
    pub async fn seek(&self, index: usize) {
        let mut state = self.inner.state.lock().await;
        if state.records.is_empty() {
            return;
        }

        let target = index.min(state.records.len() - 1);
        if target >= state.cursor {
            // Forward scrub folds only the newly visible records.
            let state = &mut *state;
            for record in &state.records[state.cursor + 1..=target] {
                state.series.fold(&self.inner.registry, record);
            }
            state.cursor = target;
        } else {
            state.cursor = target;
            state.rebuild_series(&self.inner.registry);
        }

        let snapshot = state.snapshot();
        self.inner.hub.notify(&snapshot);
    }
}

/// Fixed-period tick driving the replay cursor.
///
/// Holds only a weak handle to the manager internals so a dropped manager
/// terminates the loop; the epoch check makes a tick scheduled before a
/// halt exit without mutating post-halt state.
async fn tick_loop(weak: Weak<Inner>, epoch: u64, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first interval tick completes immediately; consume it so the
    // first cursor advance lands one full period after start().
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let Some(inner) = weak.upgrade() else {
            break;
        };
        let mut guard = inner.state.lock().await;
        if guard.epoch != epoch || !guard.streaming {
            break;
        }

        let state = &mut *guard;
        if state.cursor + 1 < state.records.len() {
            state.cursor += 1;
            state
                .series
                .fold(&inner.registry, &state.records[state.cursor]);
            let snapshot = state.snapshot();
            inner.hub.notify(&snapshot);
        } else {
            // Replay reached the end of the log.
            state.streaming = false;
            state.task = None;
            let snapshot = state.snapshot();
            inner.hub.notify(&snapshot);
            break;
        }
    }
}

impl Default for TelemetryManager {
    fn default() -> Self {
        Self::new(ChannelRegistry::flight_default(), DEFAULT_TICK_PERIOD)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        // Nobody can hold the state lock once the last handle is gone.
        if let Ok(mut state) = self.state.try_lock() {
            if let Some(task) = state.task.take() {
                task.abort();
            }
        }
    }
}
