//! Best-effort analytics dispatch.
//!
//! [`TelemetryDispatcher`] puts events on a bounded queue that a worker thread
//! drains into the real sink, so request threads never wait on delivery.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::collaborators::TelemetrySink;

/// Event recorded once per authenticated mobile page load.
pub const ACTIVE_SITE_MOBILE: &str = "active_site:mobile";
/// Project the mobile events are filed under.
pub const RAVEN_APP: &str = "raven";

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    pub name: String,
    pub app: String,
}

impl TelemetryEvent {
    pub fn new(name: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app: app.into(),
        }
    }
}

pub struct TelemetryDispatcher {
    tx: Option<SyncSender<TelemetryEvent>>,
    worker: Option<JoinHandle<()>>,
    dropped: Arc<AtomicU64>,
}

impl TelemetryDispatcher {
    pub fn spawn(sink: Arc<dyn TelemetrySink>) -> Self {
        Self::with_capacity(sink, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(sink: Arc<dyn TelemetrySink>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel::<TelemetryEvent>(capacity);
        let worker = thread::Builder::new()
            .name("raven-telemetry".into())
            .spawn(move || {
                for event in rx {
                    sink.capture(&event.name, &event.app);
                }
            })
            .map_err(|e| {
                warn!(error = %e, "telemetry worker failed to start; events will be dropped")
            })
            .ok();
        Self {
            tx: Some(tx),
            worker,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Events discarded because the queue was full or the worker was gone.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the queue and wait until already-queued events are delivered.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("telemetry worker panicked");
            }
        }
    }
}

impl TelemetrySink for TelemetryDispatcher {
    fn capture(&self, event: &str, app: &str) {
        let Some(tx) = &self.tx else { return };
        match tx.try_send(TelemetryEvent::new(event, app)) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!(event = %ev.name, "telemetry queue full, dropping event");
            }
            Err(TrySendError::Disconnected(ev)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!(event = %ev.name, "telemetry worker gone, dropping event");
            }
        }
    }
}

impl Drop for TelemetryDispatcher {
    fn drop(&mut self) {
        self.close();
    }
}
