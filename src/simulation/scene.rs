//! The animated traffic scene: roads, sensors and looping vehicles
//!
//! Everything here is plain data. A renderer (the Bevy UI or the terminal map)
//! reads it after each `tick`.

use anyhow::Result;

use super::types::{Axis, Position, Rgb};
use super::vehicle::MovingObject;

/// Half-length of the demo roads; vehicles wrap at ±this value
pub const ROAD_HALF_LENGTH: f32 = 15.0;

/// Distance each demo vehicle moves per frame
pub const VEHICLE_STEP: f32 = 0.05;

/// Vehicle box dimensions (width, height, depth)
pub const VEHICLE_SIZE: (f32, f32, f32) = (1.0, 0.5, 0.8);

/// Sensor post dimensions (radius, height)
pub const SENSOR_SIZE: (f32, f32) = (0.2, 1.0);

pub const BACKGROUND_COLOR: Rgb = Rgb(0x111133);
pub const ROAD_COLOR: Rgb = Rgb(0x444444);
pub const SENSOR_COLOR: Rgb = Rgb(0x00ff00);

/// A flat slab of road centered on `center`
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSlab {
    pub center: Position,
    /// Extent along X, Y and Z
    pub size: (f32, f32, f32),
}

/// A static sensor post
#[derive(Debug, Clone, PartialEq)]
pub struct SensorMarker {
    pub position: Position,
}

/// Owns the moving objects and advances them once per display frame
#[derive(Debug, Clone, Default)]
pub struct SceneAnimator {
    pub roads: Vec<RoadSlab>,
    pub sensors: Vec<SensorMarker>,
    pub vehicles: Vec<MovingObject>,
    /// Number of frames applied so far
    pub frames: u64,
}

impl SceneAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every vehicle by one frame
    pub fn tick(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.update();
        }
        self.frames += 1;
    }

    pub fn add_road(&mut self, center: Position, size: (f32, f32, f32)) {
        self.roads.push(RoadSlab { center, size });
    }

    pub fn add_sensor(&mut self, position: Position) {
        self.sensors.push(SensorMarker { position });
    }

    /// Add a vehicle looping along `axis` within ±`ROAD_HALF_LENGTH`
    pub fn add_vehicle(
        &mut self,
        position: Position,
        axis: Axis,
        step: f32,
        color: Rgb,
    ) -> Result<usize> {
        let vehicle = MovingObject::new(
            position,
            axis,
            step,
            -ROAD_HALF_LENGTH,
            ROAD_HALF_LENGTH,
            color,
        )?;
        self.vehicles.push(vehicle);
        Ok(self.vehicles.len() - 1)
    }

    /// The crossroads scene: two roads, three vehicles and four sensors
    pub fn demo() -> Result<Self> {
        let mut scene = Self::new();
        let road_length = ROAD_HALF_LENGTH * 2.0;

        scene.add_road(Position::default(), (road_length, 0.1, 5.0));
        scene.add_road(Position::default(), (5.0, 0.1, road_length));

        scene.add_vehicle(Position::new(-10.0, 0.0, 1.0), Axis::X, VEHICLE_STEP, Rgb(0xff0000))?;
        scene.add_vehicle(Position::new(5.0, 0.0, -10.0), Axis::Z, VEHICLE_STEP, Rgb(0x0000ff))?;
        scene.add_vehicle(Position::new(-5.0, 0.0, 8.0), Axis::X, -VEHICLE_STEP, Rgb(0x00ff00))?;

        let sensor_y = SENSOR_SIZE.1 / 2.0;
        for (x, z) in [
            (ROAD_HALF_LENGTH, 0.0),
            (-ROAD_HALF_LENGTH, 0.0),
            (0.0, ROAD_HALF_LENGTH),
            (0.0, -ROAD_HALF_LENGTH),
        ] {
            scene.add_sensor(Position::new(x, sensor_y, z));
        }

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scene_layout() {
        let scene = SceneAnimator::demo().unwrap();
        assert_eq!(scene.roads.len(), 2);
        assert_eq!(scene.vehicles.len(), 3);
        assert_eq!(scene.sensors.len(), 4);
        assert!(scene.sensors.iter().all(|s| s.position.y == 0.5));
    }

    #[test]
    fn tick_moves_each_vehicle_along_its_own_axis() {
        let mut scene = SceneAnimator::demo().unwrap();
        let before: Vec<Position> = scene.vehicles.iter().map(|v| v.position).collect();

        scene.tick();

        assert_eq!(scene.frames, 1);
        let red = &scene.vehicles[0];
        assert!((red.position.x - (before[0].x + VEHICLE_STEP)).abs() < 1e-6);
        assert_eq!(red.position.z, before[0].z);

        let blue = &scene.vehicles[1];
        assert!((blue.position.z - (before[1].z + VEHICLE_STEP)).abs() < 1e-6);
        assert_eq!(blue.position.x, before[1].x);

        let green = &scene.vehicles[2];
        assert!((green.position.x - (before[2].x - VEHICLE_STEP)).abs() < 1e-6);
    }

    #[test]
    fn vehicles_loop_around_the_crossroads() {
        let mut scene = SceneAnimator::demo().unwrap();
        // Red car needs 25 units (500 frames) to reach +15, then wraps
        let mut wrapped = false;
        for _ in 0..700 {
            let previous = scene.vehicles[0].position.x;
            scene.tick();
            if scene.vehicles[0].position.x < previous {
                wrapped = true;
                assert_eq!(scene.vehicles[0].position.x, -ROAD_HALF_LENGTH);
            }
        }
        assert!(wrapped);
    }
}
