//! Pose Controller - reactive point-to-point motion control for planar robots
//!
//! This library drives a mobile robot toward a goal point using a proportional
//! control law on distance and heading error. It consumes a pose estimate and a
//! goal point, and emits velocity commands on a fixed period.
//!
//! The control core ([`PoseController`]) has no I/O of its own. Commands leave it
//! through the [`CommandSink`] trait, implemented by the ROS 2 bridge (feature
//! `ros`) and by the kinematic simulator in [`simulation`].

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod cli;
pub mod core;
pub mod navigation;
pub mod ros_interface;
pub mod simulation;

// Re-export commonly used items for easier access
pub use crate::core::{ControllerState, Goal, Mode, Pose, PoseController, SharedController};
pub use navigation::{IdlePolicy, MotionCommand, MotionController, NavigationConfig};
pub use ros_interface::CommandSink;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the controller configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/pose_controller.yaml";

/// Main configuration structure for the pose controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseControllerConfig {
    /// Control law parameters
    pub controller: NavigationConfig,
    /// ROS 2 wiring
    pub ros: RosConfig,
}

/// ROS 2 specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosConfig {
    /// Node name
    pub node_name: String,
    /// Node namespace
    pub namespace: String,
    /// Topic carrying the localized pose
    pub pose_topic: String,
    /// Topic carrying goal points
    pub goal_topic: String,
    /// Topic velocity commands are published on
    pub cmd_vel_topic: String,
    /// QoS history depth
    pub qos_depth: usize,
    /// Control tick period in milliseconds
    pub control_period_ms: u64,
}

impl Default for RosConfig {
    fn default() -> Self {
        RosConfig {
            node_name: "pose_controller".to_string(),
            namespace: String::new(),
            pose_topic: "/amcl_pose".to_string(),
            goal_topic: "/clicked_point".to_string(),
            cmd_vel_topic: "/cmd_vel".to_string(),
            qos_depth: 10,
            control_period_ms: 100,
        }
    }
}

impl RosConfig {
    /// Control tick period
    pub fn control_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.control_period_ms)
    }
}

impl PoseControllerConfig {
    /// Load and validate a configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config: PoseControllerConfig =
            serde_yaml::from_reader(file).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load and validate a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: PoseControllerConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable by the controller and the ROS bridge
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controller.validate()?;

        if self.ros.control_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "ros.control_period_ms must be at least 1".to_string(),
            ));
        }
        if self.ros.qos_depth == 0 {
            return Err(ConfigError::Invalid(
                "ros.qos_depth must be at least 1".to_string(),
            ));
        }
        for (name, topic) in [
            ("pose_topic", &self.ros.pose_topic),
            ("goal_topic", &self.ros.goal_topic),
            ("cmd_vel_topic", &self.ros.cmd_vel_topic),
        ] {
            if topic.is_empty() {
                return Err(ConfigError::Invalid(format!("ros.{} is empty", name)));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration file could not be read
    Io(String),
    /// Configuration could not be parsed
    Parse(String),
    /// A value is out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Pose controller error types
#[derive(Debug)]
pub enum PoseControlError {
    /// Configuration error
    Config(ConfigError),
    /// ROS interface error
    #[cfg(feature = "ros")]
    Ros(ros_interface::RosError),
}

impl std::fmt::Display for PoseControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PoseControlError::Config(e) => write!(f, "{}", e),
            #[cfg(feature = "ros")]
            PoseControlError::Ros(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PoseControlError {}

impl From<ConfigError> for PoseControlError {
    fn from(e: ConfigError) -> Self {
        PoseControlError::Config(e)
    }
}

#[cfg(feature = "ros")]
impl From<ros_interface::RosError> for PoseControlError {
    fn from(e: ros_interface::RosError) -> Self {
        PoseControlError::Ros(e)
    }
}
