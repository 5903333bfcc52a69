// src/navigation/controller.rs
// Proportional control law turning pose error into a bounded velocity command.

use super::geometry::{heading_to, normalize_angle};
use super::{MotionCommand, NavigationConfig};
use crate::core::{Goal, Pose};
use log::debug;

/// Motion controller for driving the robot toward a goal point
#[derive(Debug, Clone)]
pub struct MotionController {
    config: NavigationConfig,
}

/// Result of one evaluation of the control law
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlOutput {
    /// Command to hand to the actuator
    pub command: MotionCommand,
    /// Euclidean distance from the robot to the goal (m)
    pub distance: f64,
    /// Heading error wrapped into (-π, π] (rad)
    pub heading_error: f64,
    /// The robot is within arrival tolerance; the goal should be dropped
    pub arrived: bool,
}

impl MotionController {
    /// Create a new motion controller
    pub fn new(config: &NavigationConfig) -> Self {
        MotionController {
            config: config.clone(),
        }
    }

    /// Parameters this controller was built with
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Evaluate the control law for the given pose and goal
    pub fn compute(&self, pose: &Pose, goal: &Goal) -> ControlOutput {
        let error = goal.target - pose.position;
        let distance = error.norm();

        let desired_heading = heading_to(&pose.position, &goal.target);
        let heading_error = normalize_angle(desired_heading - pose.yaw());

        let raw = self.proportional_command(distance, heading_error);
        let (command, arrived) = self.gate(distance, raw);

        debug!(
            "distance={:.3} heading_error={:.3} raw=({:.3}, {:.3}) arrived={}",
            distance, heading_error, raw.linear, raw.angular, arrived
        );

        ControlOutput {
            command,
            distance,
            heading_error,
            arrived,
        }
    }

    /// Apply gains and limits without any distance gating
    pub fn proportional_command(&self, distance: f64, heading_error: f64) -> MotionCommand {
        let linear = (self.config.linear_gain * distance).min(self.config.max_linear_velocity);
        let angular = self.limit_angular(self.config.angular_gain * heading_error);
        MotionCommand { linear, angular }
    }

    /// Suppress motion inside the deadband and flag arrival.
    ///
    /// The deadband (`distance <= deadband_distance`) and the arrival band
    /// (`distance < arrival_tolerance`) are separate thresholds.
    pub fn gate(&self, distance: f64, raw: MotionCommand) -> (MotionCommand, bool) {
        let arrived = distance < self.config.arrival_tolerance;
        if arrived || distance <= self.config.deadband_distance {
            (MotionCommand::stop(), arrived)
        } else {
            (raw, false)
        }
    }

    /// Clamp a yaw rate to the configured cap, if any
    fn limit_angular(&self, angular: f64) -> f64 {
        match self.config.max_angular_velocity {
            Some(cap) => angular.clamp(-cap, cap),
            None => angular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn controller() -> MotionController {
        MotionController::new(&NavigationConfig::default())
    }

    #[test]
    fn test_linear_saturates_at_max_velocity() {
        let cmd = controller().proportional_command(10.0, 0.0);
        assert_eq!(cmd.linear, 0.5);
    }

    #[test]
    fn test_linear_is_proportional_below_saturation() {
        let cmd = controller().proportional_command(0.6, 0.0);
        assert!((cmd.linear - 0.3).abs() < EPS);
    }

    #[test]
    fn test_angular_uncapped_by_default() {
        let cmd = controller().proportional_command(1.0, PI);
        assert!((cmd.angular - 1.5 * PI).abs() < EPS);
    }

    #[test]
    fn test_angular_cap_clamps_both_directions() {
        let config = NavigationConfig {
            max_angular_velocity: Some(1.0),
            ..NavigationConfig::default()
        };
        let controller = MotionController::new(&config);

        assert_eq!(controller.proportional_command(1.0, FRAC_PI_2).angular, 1.0);
        assert_eq!(controller.proportional_command(1.0, -FRAC_PI_2).angular, -1.0);
        assert!((controller.proportional_command(1.0, 0.5).angular - 0.75).abs() < EPS);
        // Linear side is untouched by the angular cap
        assert_eq!(controller.proportional_command(1.0, FRAC_PI_2).linear, 0.5);
    }

    #[test]
    fn test_goal_behind_turns_shortest_way() {
        let pose = Pose::from_yaw(Point2::new(0.0, 0.0), 3.0);
        let goal = Goal::new(-1.0, -0.1);
        let output = controller().compute(&pose, &goal);

        // Desired heading is just past -π; the short way round is a small left turn
        assert!(output.heading_error > 0.0);
        assert!(output.heading_error < 0.3);
    }

    #[test]
    fn test_deadband_edge_is_inclusive() {
        let raw = MotionCommand::new(0.05, 0.2);
        assert_eq!(controller().gate(0.1, raw), (MotionCommand::stop(), false));
        assert_eq!(controller().gate(0.1 + 1e-12, raw), (raw, false));
    }

    #[test]
    fn test_arrival_edge_is_exclusive() {
        let raw = MotionCommand::new(0.025, 0.0);
        assert_eq!(controller().gate(0.05, raw), (MotionCommand::stop(), false));
        assert_eq!(controller().gate(0.05 - 1e-12, raw), (MotionCommand::stop(), true));
    }

    #[test]
    fn test_compute_reports_error_terms() {
        let pose = Pose::from_yaw(Point2::new(1.0, 1.0), FRAC_PI_2);
        let output = controller().compute(&pose, &Goal::new(4.0, 5.0));

        assert!((output.distance - 5.0).abs() < EPS);
        let expected = 4.0_f64.atan2(3.0) - FRAC_PI_2;
        assert!((output.heading_error - expected).abs() < EPS);
        assert_eq!(output.command.linear, 0.5);
        assert!((output.command.angular - 1.5 * expected).abs() < EPS);
        assert!(!output.arrived);
    }
}
