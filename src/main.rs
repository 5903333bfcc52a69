// src/main.rs
// Entry point for the pose controller node: loads configuration, wires the
// controller to ROS 2 topics and runs the 10 Hz control loop until Ctrl+C.

use clap::Parser;
use log::{info, warn};
use pose_controller::cli::NodeArgs;
use pose_controller::ros_interface::{RosInterface, RunFlag};
use pose_controller::{DEFAULT_CONFIG_PATH, PoseControlError, PoseController, PoseControllerConfig};
use std::path::Path;

/// Load the configuration named on the command line, or the default file if
/// present, or built-in defaults.
fn load_config(args: &NodeArgs) -> Result<PoseControllerConfig, PoseControlError> {
    if let Some(path) = &args.config {
        return Ok(PoseControllerConfig::from_yaml_file(path)?);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        Ok(PoseControllerConfig::from_yaml_file(DEFAULT_CONFIG_PATH)?)
    } else {
        warn!("No configuration file found, using defaults");
        Ok(PoseControllerConfig::default())
    }
}

fn main() -> Result<(), PoseControlError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = NodeArgs::parse();
    info!("Starting pose controller...");

    let config = load_config(&args)?;
    let controller = PoseController::new(&config.controller).into_shared();

    let running = RunFlag::new();
    let handle = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Ctrl+C received, shutting down");
        handle.stop();
    }) {
        warn!("Failed to set signal handler: {}", e);
    }

    let ros = RosInterface::new(&config.ros)?;
    ros.spin(controller, running)?;

    info!("Pose controller stopped");
    Ok(())
}
