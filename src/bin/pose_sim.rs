// src/bin/pose_sim.rs
// Runs the pose controller against a simulated unicycle robot, no ROS needed.

use clap::Parser;
use log::info;
use pose_controller::cli::SimArgs;
use pose_controller::simulation::UnicycleSim;
use pose_controller::{PoseControlError, PoseController, PoseControllerConfig};

fn main() -> Result<(), PoseControlError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = SimArgs::parse();
    let config = match &args.config {
        Some(path) => PoseControllerConfig::from_yaml_file(path)?,
        None => PoseControllerConfig::default(),
    };

    let goal = args.goal();
    let (start, yaw) = args.start();
    let dt = config.ros.control_period().as_secs_f64();
    let mut controller = PoseController::new(&config.controller);
    let mut sim = UnicycleSim::new(start, yaw, dt);

    info!(
        "Simulating from ({:.2}, {:.2}, yaw {:.2}) to ({:.2}, {:.2})",
        start.x, start.y, yaw, goal.target.x, goal.target.y
    );

    let outcome = sim.run_to_goal(&mut controller, goal, args.max_ticks);
    let end = outcome.final_pose.position;

    if outcome.arrived {
        info!("Arrived after {} ticks ({:.1} s)", outcome.ticks, outcome.ticks as f64 * dt);
    } else if outcome.settled {
        info!(
            "Stopped inside deadband after {} ticks, goal still pending",
            outcome.ticks
        );
    } else {
        info!("Tick limit reached without arriving");
    }
    info!(
        "Final pose ({:.3}, {:.3}, yaw {:.3}), {:.3} m from goal",
        end.x,
        end.y,
        outcome.final_pose.yaw(),
        outcome.final_distance
    );

    Ok(())
}
