//! Map overlay: places incident markers in the scene from geo coordinates
//!
//! The projection is a plain linear scale around a fixed center, which is
//! accurate enough for a few city blocks.

use anyhow::{ensure, Result};
use log::warn;

use super::incident::Incident;
use super::types::{IncidentId, Position, Severity};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoord {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

pub const DEFAULT_MAP_CENTER: GeoCoord = GeoCoord {
    lat: 37.7749,
    lng: -122.4194,
};

/// Scene units per degree
pub const DEFAULT_MAP_SCALE: f64 = 1000.0;

/// Height markers float at above the road surface
pub const MARKER_HEIGHT: f32 = 1.5;

/// Linear degrees-to-scene transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub center: GeoCoord,
    pub scale: f64,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            scale: DEFAULT_MAP_SCALE,
        }
    }
}

impl MapProjection {
    pub fn new(center: GeoCoord, scale: f64) -> Result<Self> {
        ensure!(
            scale.is_finite() && scale != 0.0,
            "map scale must be finite and non-zero, got {}",
            scale
        );
        ensure!(
            center.lat.is_finite() && center.lng.is_finite(),
            "map center must be finite"
        );
        Ok(Self { center, scale })
    }

    /// `x = (lng - center.lng) * scale`, `z = -(lat - center.lat) * scale`
    pub fn project(&self, coord: GeoCoord) -> Position {
        let x = (coord.lng - self.center.lng) * self.scale;
        let z = -(coord.lat - self.center.lat) * self.scale;
        Position::new(x as f32, MARKER_HEIGHT, z as f32)
    }
}

/// A marker the renderer draws for one incident
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: IncidentId,
    pub position: Position,
    pub severity: Severity,
}

/// Projects the current incident set into marker positions
#[derive(Debug, Clone, Default)]
pub struct MapOverlay {
    pub projection: MapProjection,
}

impl MapOverlay {
    pub fn new(projection: MapProjection) -> Self {
        Self { projection }
    }

    /// Markers for every incident that carries a coordinate, in register order
    pub fn markers(&self, incidents: &[Incident]) -> Vec<MapMarker> {
        incidents
            .iter()
            .filter_map(|incident| {
                let coord = incident.coordinate?;
                let position = self.projection.project(coord);
                if !(position.x.is_finite() && position.z.is_finite()) {
                    warn!("Dropping marker for incident {}: projection overflow", incident.id);
                    return None;
                }
                Some(MapMarker {
                    id: incident.id,
                    position,
                    severity: incident.severity,
                })
            })
            .collect()
    }
}
