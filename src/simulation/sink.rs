//! Display sinks notified by the incident register

use std::sync::{Arc, Mutex, PoisonError};

use super::incident::Incident;
use super::types::TrafficStatus;

/// Observer for register changes
///
/// `render` receives the full ordered incident list after every mutation.
/// Renderers paint each row with `Severity::band()`.
pub trait IncidentSink: Send + Sync {
    fn render(&mut self, incidents: &[Incident]);

    /// Called whenever the displayed status label changes
    fn status_changed(&mut self, _status: TrafficStatus) {}
}

impl<F> IncidentSink for F
where
    F: FnMut(&[Incident]) + Send + Sync,
{
    fn render(&mut self, incidents: &[Incident]) {
        self(incidents)
    }
}

/// Changes collected by a `SnapshotSink` since the last `take_update`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SinkUpdate {
    pub incidents: Option<Vec<Incident>>,
    pub status: Option<TrafficStatus>,
}

impl SinkUpdate {
    pub fn is_empty(&self) -> bool {
        self.incidents.is_none() && self.status.is_none()
    }
}

/// A cloneable sink that keeps the latest frame for pull-based renderers
///
/// One clone is subscribed to the register, the other is polled once per
/// display frame.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSink {
    shared: Arc<Mutex<SinkUpdate>>,
}

impl SnapshotSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything that changed since the previous call
    pub fn take_update(&self) -> SinkUpdate {
        let mut pending = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }
}

impl IncidentSink for SnapshotSink {
    fn render(&mut self, incidents: &[Incident]) {
        let mut pending = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        pending.incidents = Some(incidents.to_vec());
    }

    fn status_changed(&mut self, status: TrafficStatus) {
        let mut pending = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        pending.status = Some(status);
    }
}
