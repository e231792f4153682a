//! Vehicles that loop along a single axis of the scene

use anyhow::{ensure, Result};

use super::types::{Axis, Position, Rgb};

/// A box that drives along one axis and wraps around at its bounds
#[derive(Debug, Clone)]
pub struct MovingObject {
    pub position: Position,
    pub axis: Axis,
    /// Signed distance moved per frame
    pub step: f32,
    pub lower: f32,
    pub upper: f32,
    pub color: Rgb,
}

impl MovingObject {
    /// Create a vehicle; fails when the bounds are empty or the step isn't finite.
    ///
    /// A starting coordinate outside the bounds is wrapped immediately so the
    /// bounded coordinate is in range from the first frame on.
    pub fn new(
        position: Position,
        axis: Axis,
        step: f32,
        lower: f32,
        upper: f32,
        color: Rgb,
    ) -> Result<Self> {
        ensure!(
            lower.is_finite() && upper.is_finite() && lower < upper,
            "invalid bounds [{}, {}]",
            lower,
            upper
        );
        ensure!(step.is_finite(), "step must be finite, got {}", step);

        let mut object = Self {
            position,
            axis,
            step,
            lower,
            upper,
            color,
        };
        object.wrap();
        Ok(object)
    }

    /// Advance one frame
    pub fn update(&mut self) {
        *self.position.along_mut(self.axis) += self.step;
        self.wrap();
    }

    /// Coordinate along the axis of travel
    pub fn bounded_coordinate(&self) -> f32 {
        self.position.along(self.axis)
    }

    /// Yaw in radians that turns a +X-facing body toward the direction of travel
    pub fn heading(&self) -> f32 {
        match (self.axis, self.step < 0.0) {
            (Axis::X, false) => 0.0,
            (Axis::X, true) => std::f32::consts::PI,
            (Axis::Z, false) => -std::f32::consts::FRAC_PI_2,
            (Axis::Z, true) => std::f32::consts::FRAC_PI_2,
        }
    }

    fn wrap(&mut self) {
        let (lower, upper) = (self.lower, self.upper);
        let coord = self.position.along_mut(self.axis);
        if *coord > upper {
            *coord = lower;
        } else if *coord < lower {
            *coord = upper;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(x: f32, step: f32) -> MovingObject {
        MovingObject::new(
            Position::new(x, 0.0, 1.0),
            Axis::X,
            step,
            -15.0,
            15.0,
            Rgb(0xff0000),
        )
        .unwrap()
    }

    #[test]
    fn forward_step_wraps_to_lower() {
        let mut object = car(14.98, 0.05);
        object.update();
        assert_eq!(object.position.x, -15.0);
        // Other coordinates are untouched
        assert_eq!(object.position.z, 1.0);
    }

    #[test]
    fn backward_step_wraps_to_upper() {
        let mut object = car(-14.98, -0.05);
        object.update();
        assert_eq!(object.position.x, 15.0);
    }

    #[test]
    fn landing_exactly_on_bound_does_not_wrap() {
        let mut object = car(14.5, 0.5);
        object.update();
        assert_eq!(object.position.x, 15.0);
    }

    #[test]
    fn out_of_range_start_is_wrapped() {
        let object = car(40.0, 0.05);
        assert_eq!(object.position.x, -15.0);
    }

    #[test]
    fn heading_faces_direction_of_travel() {
        // Yaw θ turns +X into (cos θ, -sin θ) on the X/Z plane
        let facing = |object: &MovingObject| {
            let yaw = object.heading();
            (yaw.cos().round(), (-yaw.sin()).round())
        };
        assert_eq!(facing(&car(0.0, 0.05)), (1.0, 0.0));
        assert_eq!(facing(&car(0.0, -0.05)), (-1.0, 0.0));

        let north =
            MovingObject::new(Position::default(), Axis::Z, 0.05, -15.0, 15.0, Rgb(0)).unwrap();
        assert_eq!(facing(&north), (0.0, 1.0));
        let south =
            MovingObject::new(Position::default(), Axis::Z, -0.05, -15.0, 15.0, Rgb(0)).unwrap();
        assert_eq!(facing(&south), (0.0, -1.0));
    }

    #[test]
    fn empty_bounds_are_rejected() {
        let result = MovingObject::new(
            Position::default(),
            Axis::Z,
            0.05,
            5.0,
            5.0,
            Rgb(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn stays_in_bounds_over_many_frames() {
        for step in [0.05, -0.05, 0.7, -3.3, 29.0] {
            let mut object = car(0.0, step);
            for _ in 0..5000 {
                object.update();
                let c = object.bounded_coordinate();
                assert!((-15.0..=15.0).contains(&c), "step {step} escaped to {c}");
            }
        }
    }
}
