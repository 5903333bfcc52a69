// core/mod.rs

// The controller core: the context object owning the latest pose, the pending
// goal and the control law. Pose and goal ingestion are plain state writes; all
// computation happens in `tick`, which runs once per control period.

pub mod localization;
pub mod state;

pub use localization::{Goal, Pose};
pub use state::{ControllerState, Mode};

use crate::navigation::{ControlOutput, IdlePolicy, MotionCommand, MotionController, NavigationConfig};
use crate::ros_interface::CommandSink;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

/// Controller shared between the pose, goal and timer entry points when they
/// can run on different threads. Each entry point holds the lock for its whole
/// read/modify/write.
pub type SharedController = Arc<Mutex<PoseController>>;

/// Point-to-point pose controller
#[derive(Debug, Clone)]
pub struct PoseController {
    motion_controller: MotionController,
    state: ControllerState,
    last_output: Option<ControlOutput>,
}

impl PoseController {
    /// Create a controller with no pose and no goal
    pub fn new(config: &NavigationConfig) -> Self {
        PoseController {
            motion_controller: MotionController::new(config),
            state: ControllerState::new(),
            last_output: None,
        }
    }

    /// Wrap the controller for use from several entry points
    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }

    /// Store the latest pose, replacing the previous one
    pub fn set_pose(&mut self, pose: Pose) {
        self.state.set_pose(pose);
    }

    /// Install a new goal, dropping whatever goal was pending
    pub fn set_goal(&mut self, goal: Goal) {
        if !goal.is_finite() {
            warn!("Goal has non-finite coordinates: {:?}", goal.target);
        }
        self.state.set_goal(goal);
        info!("New goal received: x={}, y={}", goal.target.x, goal.target.y);
    }

    /// Run one control period.
    ///
    /// With both a pose and a goal, evaluates the control law, drops the goal
    /// on arrival and publishes the command. Without them the configured
    /// [`IdlePolicy`] decides whether a zero command is published or nothing
    /// at all. Returns the published command, if any.
    pub fn tick<S: CommandSink + ?Sized>(&mut self, sink: &mut S) -> Option<MotionCommand> {
        let command = match (self.state.pose().copied(), self.state.goal().copied()) {
            (Some(pose), Some(goal)) => {
                let output = self.motion_controller.compute(&pose, &goal);
                if output.arrived {
                    self.state.clear_goal();
                    info!(
                        "Goal reached: x={}, y={} (distance {:.3} m)",
                        goal.target.x, goal.target.y, output.distance
                    );
                }
                self.last_output = Some(output);
                output.command
            }
            _ => match self.config().idle_policy {
                IdlePolicy::Suppress => {
                    debug!("No pose or goal, skipping control");
                    return None;
                }
                IdlePolicy::PublishZero => MotionCommand::stop(),
            },
        };

        sink.publish(&command);

        if self.state.record_tick(self.config().diagnostic_interval) {
            info!("Command: {}", command);
        }

        Some(command)
    }

    /// Current pursuit mode
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Latest pose and goal
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Control law evaluation from the most recent active tick
    pub fn last_output(&self) -> Option<&ControlOutput> {
        self.last_output.as_ref()
    }

    /// Parameters in use
    pub fn config(&self) -> &NavigationConfig {
        self.motion_controller.config()
    }
}
