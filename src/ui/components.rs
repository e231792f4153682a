//! UI components and resources for linking Bevy entities to dashboard state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{Dashboard, IncidentGenerator, IncidentId, Rgb, SnapshotSink};

/// Resource wrapper for the dashboard, plus the sink the panel reads from
#[derive(Resource)]
pub struct DashboardResource {
    pub dashboard: Dashboard,
    pub feed: SnapshotSink,
}

impl DashboardResource {
    /// Wrap a dashboard and subscribe the panel feed to its register
    pub fn new(mut dashboard: Dashboard) -> Self {
        let feed = SnapshotSink::new();
        dashboard.register.subscribe(feed.clone());
        Self { dashboard, feed }
    }
}

/// Source of reports for the "simulate incident" action
#[derive(Resource)]
pub struct IncidentSourceResource(pub IncidentGenerator);

impl Default for IncidentSourceResource {
    fn default() -> Self {
        Self(IncidentGenerator::new())
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a Bevy entity to a scene vehicle by index
#[derive(Component)]
pub struct VehicleLink(pub usize);

/// Marker for static scene geometry (roads and sensors)
#[derive(Component)]
pub struct SceneProp;

/// Links a Bevy entity to an incident's map marker
#[derive(Component)]
pub struct MarkerLink(pub IncidentId);

/// Resource to track marker entities by incident
#[derive(Resource, Default)]
pub struct MarkerMappings {
    pub markers: HashMap<IncidentId, Entity>,
}

/// Marker for the status label
#[derive(Component)]
pub struct StatusText;

/// Marker for the container the incident rows are rebuilt into
#[derive(Component)]
pub struct IncidentList;

/// The two user actions
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    SimulateIncident,
    Alert,
}

impl ActionButton {
    pub fn base_color(&self) -> Color {
        match self {
            ActionButton::SimulateIncident => Color::srgb(0.2, 0.35, 0.7),
            ActionButton::Alert => Color::srgb(0.75, 0.2, 0.2),
        }
    }
}

/// Convert a scene color to a Bevy color
pub fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::srgb(r, g, b)
}
