//! The dashboard world: scene, incident register and optional map overlay
//!
//! This is the entry point for running the dashboard without any Bevy
//! dependencies. A frame driver calls `frame` once per display refresh.

use anyhow::Result;
use std::time::Duration;

use super::incident::{Incident, IncidentSource};
use super::map_overlay::{MapMarker, MapOverlay};
use super::register::{IncidentRegister, RegisterConfig};
use super::scene::{SceneAnimator, ROAD_HALF_LENGTH};
use super::types::{clock_label, TrafficStatus};

/// Everything the dashboard shows, owned in one place
pub struct Dashboard {
    pub scene: SceneAnimator,
    pub register: IncidentRegister,
    /// Present when the map overlay is enabled
    pub overlay: Option<MapOverlay>,
}

impl Dashboard {
    pub fn new(scene: SceneAnimator, register: IncidentRegister) -> Self {
        Self {
            scene,
            register,
            overlay: None,
        }
    }

    /// The crossroads demo scene with a fresh register
    pub fn create_demo(config: RegisterConfig) -> Result<Self> {
        Ok(Self::new(SceneAnimator::demo()?, IncidentRegister::new(config)))
    }

    pub fn with_overlay(mut self, overlay: MapOverlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// One display frame: animate the scene, then let due timers fire
    pub fn frame(&mut self, delta: Duration) {
        self.scene.tick();
        self.register.advance(delta);
    }

    /// The "simulate incident" action
    pub fn simulate_incident(&mut self, source: &mut impl IncidentSource) -> Incident {
        let report = source.next_report();
        self.register.record_report(report)
    }

    /// The "alert" action
    pub fn acknowledge_alert(&mut self) {
        self.register.acknowledge_alert();
    }

    pub fn status(&self) -> TrafficStatus {
        self.register.displayed_status()
    }

    /// Map markers for the current incidents (empty without an overlay)
    pub fn markers(&self) -> Vec<MapMarker> {
        match &self.overlay {
            Some(overlay) => overlay.markers(self.register.incidents()),
            None => Vec::new(),
        }
    }

    /// Print a summary of the dashboard state
    pub fn print_summary(&self) {
        println!("=== Traffic Dashboard Summary ===");
        println!("Time: {}", clock_label(self.register.now()));
        println!("Frames: {}", self.scene.frames);
        println!("Status: {}", self.status());
        println!("Incidents: {}", self.register.len());

        println!("--- Vehicles ---");
        for (index, vehicle) in self.scene.vehicles.iter().enumerate() {
            println!(
                "  Vehicle {}: color={}, position=({:.2}, {:.2}), step={:+.2}",
                index,
                vehicle.color.hex(),
                vehicle.position.x,
                vehicle.position.z,
                vehicle.step
            );
        }

        if !self.register.is_empty() {
            println!("--- Incidents ---");
            let ttl = self.register.config().incident_ttl;
            for incident in self.register.incidents() {
                let remaining = (incident.created_at + ttl).saturating_sub(self.register.now());
                println!(
                    "  {} [{}] {} (expires in {:.1}s)",
                    incident.id,
                    incident.severity.band().hex(),
                    incident.summary(),
                    remaining.as_secs_f32()
                );
            }
        }

        let markers = self.markers();
        if !markers.is_empty() {
            println!("--- Map Markers ---");
            for marker in &markers {
                println!(
                    "  {}: ({:.1}, {:.1})",
                    marker.id, marker.position.x, marker.position.z
                );
            }
        }
    }

    /// Render a top-down map of the scene as text
    ///
    /// Legend: `#` road, `S` sensor, `1..9` vehicles, `!` incident markers.
    pub fn render_map(&self) -> String {
        const CELLS: i32 = 31;
        let half = ROAD_HALF_LENGTH;
        let to_cell = |v: f32| -> Option<usize> {
            let cell = ((v + half) / (2.0 * half) * (CELLS - 1) as f32).round() as i32;
            (0..CELLS).contains(&cell).then_some(cell as usize)
        };

        let mut grid = vec![vec![' '; CELLS as usize]; CELLS as usize];

        for road in &self.scene.roads {
            let (sx, _, sz) = road.size;
            for (row, line) in grid.iter_mut().enumerate() {
                for (col, cell) in line.iter_mut().enumerate() {
                    let x = col as f32 / (CELLS - 1) as f32 * 2.0 * half - half;
                    let z = row as f32 / (CELLS - 1) as f32 * 2.0 * half - half;
                    if (x - road.center.x).abs() <= sx / 2.0 && (z - road.center.z).abs() <= sz / 2.0 {
                        *cell = '#';
                    }
                }
            }
        }

        let mut place = |x: f32, z: f32, glyph: char| {
            if let (Some(col), Some(row)) = (to_cell(x), to_cell(z)) {
                grid[row][col] = glyph;
            }
        };

        for sensor in &self.scene.sensors {
            place(sensor.position.x, sensor.position.z, 'S');
        }
        for marker in self.markers() {
            place(marker.position.x, marker.position.z, '!');
        }
        for (index, vehicle) in self.scene.vehicles.iter().enumerate() {
            let glyph = char::from_digit((index % 9 + 1) as u32, 10).unwrap_or('*');
            place(vehicle.position.x, vehicle.position.z, glyph);
        }

        let border = format!("+{}+", "-".repeat(CELLS as usize));
        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        for line in grid {
            out.push('|');
            out.extend(line);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }

    /// Draw the map to stdout
    pub fn draw_map(&self) {
        println!("{}", self.render_map());
    }
}
