//! Standalone dashboard simulation module
//!
//! This module contains the scene animation and incident bookkeeping that can
//! run independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full UI.

mod dashboard;
mod incident;
mod map_overlay;
mod register;
mod scene;
mod sink;
mod timer;
mod types;
mod vehicle;

pub use dashboard::Dashboard;
pub use incident::{Incident, IncidentGenerator, IncidentReport, IncidentSource, LOCATION_COUNT};
pub use map_overlay::{
    GeoCoord, MapMarker, MapOverlay, MapProjection, DEFAULT_MAP_CENTER, DEFAULT_MAP_SCALE,
    MARKER_HEIGHT,
};
pub use register::{IncidentRegister, RegisterConfig};
pub use scene::{
    RoadSlab, SceneAnimator, SensorMarker, BACKGROUND_COLOR, ROAD_COLOR, ROAD_HALF_LENGTH,
    SENSOR_COLOR, SENSOR_SIZE, VEHICLE_SIZE, VEHICLE_STEP,
};
pub use sink::{IncidentSink, SinkUpdate, SnapshotSink};
pub use timer::{TimerQueue, TimerToken};
pub use types::{
    clock_label, Axis, IncidentCategory, IncidentId, Position, Rgb, Severity, TrafficStatus,
    ALERT_DURATION, INCIDENT_TTL,
};
pub use vehicle::MovingObject;
