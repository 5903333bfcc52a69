//! Navigation system for the pose controller
//!
//! This module holds the proportional control law, the planar geometry it
//! relies on, and the parameters that shape the resulting velocity commands.

pub mod controller;
pub mod geometry;

pub use controller::{ControlOutput, MotionController};
pub use geometry::{heading_to, normalize_angle, yaw_from_quaternion};

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// What the controller publishes on a tick without both a pose and a goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdlePolicy {
    /// Publish nothing; the last command stays in effect at the actuator
    #[default]
    Suppress,
    /// Publish an explicit zero command
    PublishZero,
}

/// Navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Proportional gain on distance (1/s)
    pub linear_gain: f64,
    /// Proportional gain on heading error (1/s)
    pub angular_gain: f64,
    /// Maximum linear velocity (m/s)
    pub max_linear_velocity: f64,
    /// Optional angular velocity clamp (rad/s), unbounded when `None`
    pub max_angular_velocity: Option<f64>,
    /// Motion is only commanded beyond this distance (m)
    pub deadband_distance: f64,
    /// Goal counts as reached below this distance (m)
    pub arrival_tolerance: f64,
    /// Log the current command every this many published commands
    pub diagnostic_interval: u32,
    /// Behavior on ticks without pose or goal
    pub idle_policy: IdlePolicy,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            linear_gain: 0.5,
            angular_gain: 1.5,
            max_linear_velocity: 0.5,
            max_angular_velocity: None,
            deadband_distance: 0.1,
            arrival_tolerance: 0.05,
            diagnostic_interval: 100,
            idle_policy: IdlePolicy::Suppress,
        }
    }
}

impl NavigationConfig {
    /// Check the control parameters are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("linear_gain", self.linear_gain),
            ("angular_gain", self.angular_gain),
            ("max_linear_velocity", self.max_linear_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "controller.{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if let Some(cap) = self.max_angular_velocity {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "controller.max_angular_velocity must be positive, got {}",
                    cap
                )));
            }
        }

        if !(self.arrival_tolerance > 0.0) || !(self.deadband_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "controller tolerances must be positive".to_string(),
            ));
        }
        if self.arrival_tolerance > self.deadband_distance {
            return Err(ConfigError::Invalid(format!(
                "controller.arrival_tolerance ({}) exceeds deadband_distance ({})",
                self.arrival_tolerance, self.deadband_distance
            )));
        }

        if self.diagnostic_interval == 0 {
            return Err(ConfigError::Invalid(
                "controller.diagnostic_interval must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Motion command for the robot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionCommand {
    /// Linear velocity along the forward axis (m/s)
    pub linear: f64,
    /// Angular velocity about the vertical axis (rad/s)
    pub angular: f64,
}

impl MotionCommand {
    /// Create a command from its two components
    pub fn new(linear: f64, angular: f64) -> Self {
        MotionCommand { linear, angular }
    }

    /// Zero velocity command
    pub fn stop() -> Self {
        MotionCommand::default()
    }

    /// Whether both components are exactly zero
    pub fn is_stop(&self) -> bool {
        self.linear == 0.0 && self.angular == 0.0
    }
}

impl std::fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "linear={:.3} m/s, angular={:.3} rad/s", self.linear, self.angular)
    }
}
