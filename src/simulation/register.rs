//! The incident register: an ordered, self-expiring list of incidents
//!
//! The register owns its own clock. Callers drive it with `advance`, which
//! fires scheduled expiries and alert lapses in deadline order. Every timer
//! always fires; removing an incident early turns its expiry into a no-op,
//! and any alert lapse ends whatever override is showing at the time.

use log::{debug, info};
use std::collections::VecDeque;
use std::time::Duration;

use super::incident::{Incident, IncidentReport};
use super::sink::IncidentSink;
use super::timer::TimerQueue;
use super::types::{
    IncidentCategory, IncidentId, Severity, TrafficStatus, ALERT_DURATION, INCIDENT_TTL,
};

/// Durations the register works with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterConfig {
    /// How long each incident stays visible
    pub incident_ttl: Duration,
    /// How long an acknowledged alert overrides the derived status
    pub alert_duration: Duration,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            incident_ttl: INCIDENT_TTL,
            alert_duration: ALERT_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterTask {
    Expire(IncidentId),
    AlertLapse,
}

/// Owns the incident list, its timers and the display sinks
pub struct IncidentRegister {
    config: RegisterConfig,
    incidents: Vec<Incident>,
    timers: TimerQueue<RegisterTask>,
    /// Deadlines of alert lapses that have not fired yet, earliest first
    alert_lapses: VecDeque<Duration>,
    alerted: bool,
    now: Duration,
    last_id: Option<IncidentId>,
    sinks: Vec<Box<dyn IncidentSink>>,
    /// Status most recently reported to sinks
    shown_status: TrafficStatus,
}

impl Default for IncidentRegister {
    fn default() -> Self {
        Self::new(RegisterConfig::default())
    }
}

impl IncidentRegister {
    pub fn new(config: RegisterConfig) -> Self {
        Self {
            config,
            incidents: Vec::new(),
            timers: TimerQueue::new(),
            alert_lapses: VecDeque::new(),
            alerted: false,
            now: Duration::ZERO,
            last_id: None,
            sinks: Vec::new(),
            shown_status: TrafficStatus::Normal,
        }
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Current register time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Register a display sink. It is immediately sent the current state.
    pub fn subscribe(&mut self, mut sink: impl IncidentSink + 'static) {
        sink.render(&self.incidents);
        sink.status_changed(self.displayed_status());
        self.sinks.push(Box::new(sink));
    }

    /// Record a new incident and schedule its expiry
    pub fn record_incident(
        &mut self,
        location: impl Into<String>,
        severity: Severity,
        category: IncidentCategory,
    ) -> Incident {
        self.record_report(IncidentReport::new(location, severity, category))
    }

    /// Record a prepared report (which may carry a map coordinate)
    pub fn record_report(&mut self, report: IncidentReport) -> Incident {
        let id = self.next_id();
        let incident = Incident {
            id,
            location: report.location,
            severity: report.severity,
            category: report.category,
            created_at: self.now,
            coordinate: report.coordinate,
        };
        self.incidents.push(incident.clone());

        let deadline = self.now.saturating_add(self.config.incident_ttl);
        self.timers.schedule(deadline, RegisterTask::Expire(id));

        debug!(
            "Recorded incident {} ({}, {}) at {}, expires at {:?}",
            id, incident.category, incident.severity, incident.location, deadline
        );

        self.render_all();
        self.refresh_status();
        incident
    }

    /// Remove an incident. Returns false if it was already gone.
    pub fn expire(&mut self, id: IncidentId) -> bool {
        let Some(index) = self.incidents.iter().position(|i| i.id == id) else {
            debug!("Incident {} already removed", id);
            return false;
        };
        self.incidents.remove(index);
        debug!("Expired incident {}, {} remaining", id, self.incidents.len());

        self.render_all();
        self.refresh_status();
        true
    }

    /// Remove every incident at once. Their expiry timers still fire later.
    pub fn clear(&mut self) -> usize {
        let removed = self.incidents.len();
        if removed == 0 {
            return 0;
        }
        self.incidents.clear();
        info!("Cleared {} incidents", removed);

        self.render_all();
        self.refresh_status();
        removed
    }

    /// Status derived from the incident list alone
    pub fn current_status(&self) -> TrafficStatus {
        if self.incidents.is_empty() {
            TrafficStatus::Normal
        } else {
            TrafficStatus::Congested
        }
    }

    /// Status the label shows, including the alert override
    pub fn displayed_status(&self) -> TrafficStatus {
        if self.alerted {
            TrafficStatus::Alerted
        } else {
            self.current_status()
        }
    }

    /// Show the alerted status for the configured duration
    ///
    /// Each acknowledge schedules its own lapse. The first lapse to come due
    /// ends the override, so acknowledging again does not extend it.
    pub fn acknowledge_alert(&mut self) {
        let deadline = self.now.saturating_add(self.config.alert_duration);
        self.timers.schedule(deadline, RegisterTask::AlertLapse);
        self.alert_lapses.push_back(deadline);
        self.alerted = true;
        info!("Emergency services alerted, override until {:?}", deadline);
        self.refresh_status();
    }

    /// Time until the next lapse ends the alert override, if active
    pub fn alert_remaining(&self) -> Option<Duration> {
        if !self.alerted {
            return None;
        }
        self.alert_lapses
            .front()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// Move the clock forward, firing every timer that comes due
    pub fn advance(&mut self, delta: Duration) {
        let target = self.now.saturating_add(delta);
        while let Some((deadline, _, task)) = self.timers.pop_due(target) {
            self.now = self.now.max(deadline);
            self.fire(task);
        }
        self.now = target;
    }

    fn fire(&mut self, task: RegisterTask) {
        match task {
            RegisterTask::Expire(id) => {
                self.expire(id);
            }
            RegisterTask::AlertLapse => {
                self.alert_lapses.pop_front();
                if self.alerted {
                    self.alerted = false;
                    debug!("Alert override lapsed");
                    self.refresh_status();
                }
            }
        }
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Timers that have not fired yet, including no-op expiries
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn next_id(&mut self) -> IncidentId {
        let millis = self.now.as_millis() as u64;
        let id = match self.last_id {
            Some(IncidentId(last)) if millis <= last => IncidentId(last + 1),
            _ => IncidentId(millis),
        };
        self.last_id = Some(id);
        id
    }

    fn render_all(&mut self) {
        for sink in &mut self.sinks {
            sink.render(&self.incidents);
        }
    }

    fn refresh_status(&mut self) {
        let status = self.displayed_status();
        if status == self.shown_status {
            return;
        }
        self.shown_status = status;
        for sink in &mut self.sinks {
            sink.status_changed(status);
        }
    }
}
