//! Command line arguments for the `pose_controller` and `pose_sim` binaries

use clap::Parser;
use nalgebra::Point2;
use std::path::PathBuf;

use crate::Goal;

/// Pose controller ROS 2 node
#[derive(Parser, Debug)]
#[command(name = "pose_controller")]
#[command(about = "Drives a planar robot to clicked goal points", long_about = None)]
pub struct NodeArgs {
    /// YAML configuration file (defaults to config/pose_controller.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Closed-loop simulation against a unicycle robot
#[derive(Parser, Debug)]
#[command(name = "pose_sim")]
#[command(about = "Simulates the pose controller driving a unicycle robot", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct SimArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Goal x coordinate (m)
    pub goal_x: f64,

    /// Goal y coordinate (m)
    pub goal_y: f64,

    /// Start x coordinate (m)
    #[arg(requires_all = ["start_y", "start_yaw"])]
    pub start_x: Option<f64>,

    /// Start y coordinate (m)
    #[arg(requires_all = ["start_x", "start_yaw"])]
    pub start_y: Option<f64>,

    /// Start heading (rad)
    #[arg(requires_all = ["start_x", "start_y"])]
    pub start_yaw: Option<f64>,

    /// Give up after this many control periods
    #[arg(long, default_value_t = 1200)]
    pub max_ticks: usize,
}

impl SimArgs {
    /// Goal named on the command line
    pub fn goal(&self) -> Goal {
        Goal::new(self.goal_x, self.goal_y)
    }

    /// Start position and heading, the origin facing +x when omitted
    pub fn start(&self) -> (Point2<f64>, f64) {
        match (self.start_x, self.start_y, self.start_yaw) {
            (Some(x), Some(y), Some(yaw)) => (Point2::new(x, y), yaw),
            _ => (Point2::origin(), 0.0),
        }
    }
}
