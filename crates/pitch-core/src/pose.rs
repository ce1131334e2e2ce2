use serde::{Deserialize, Serialize};

use crate::{Angle, Vector2};

/// A position and heading in the field frame. Millimetres and radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector2,
    pub heading: Angle,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: Angle) -> Self {
        Self {
            position: Vector2::new(x, y),
            heading,
        }
    }

    /// Transform a field-frame point into this pose's robot-relative frame.
    pub fn to_relative(&self, point: Vector2) -> Vector2 {
        (-self.heading).rotate_vector(&(point - self.position))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            heading: Angle::ZERO,
        }
    }
}
