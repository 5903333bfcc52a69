// core/localization.rs

// Pose and goal types as the controller sees them. The pose comes from an
// external localizer; only its planar position and yaw are used here.

use crate::navigation::geometry::yaw_from_quaternion;
use nalgebra::{Point2, Quaternion, UnitQuaternion};

/// Robot pose: planar position and full 3-D orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in the map frame (meters)
    pub position: Point2<f64>,
    /// Orientation as a quaternion, expected to be unit-norm
    pub orientation: Quaternion<f64>,
}

impl Pose {
    /// Create a pose from position and raw quaternion components
    pub fn new(x: f64, y: f64, orientation: Quaternion<f64>) -> Self {
        Pose {
            position: Point2::new(x, y),
            orientation,
        }
    }

    /// Create a level pose facing `yaw` radians
    pub fn from_yaw(position: Point2<f64>, yaw: f64) -> Self {
        Pose {
            position,
            orientation: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw).into_inner(),
        }
    }

    /// Heading about the vertical axis, in (-π, π]
    pub fn yaw(&self) -> f64 {
        yaw_from_quaternion(&self.orientation)
    }
}

/// Navigation goal: a target point in the map frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    /// Target position (meters)
    pub target: Point2<f64>,
}

impl Goal {
    /// Create a goal at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        Goal {
            target: Point2::new(x, y),
        }
    }

    /// Whether both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.target.x.is_finite() && self.target.y.is_finite()
    }
}
