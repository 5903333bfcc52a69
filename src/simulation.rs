//! Kinematic simulation for exercising the controller without ROS
//!
//! [`UnicycleSim`] stands in for both the robot and its localizer: it accepts
//! commands as a [`CommandSink`] and integrates the last one over a fixed time
//! step to produce the next [`Pose`].

use crate::core::{Goal, Mode, Pose, PoseController};
use crate::navigation::MotionCommand;
use crate::ros_interface::CommandSink;
use nalgebra::{Point2, Vector2};

/// Differential-drive robot modelled as a unicycle
#[derive(Debug, Clone)]
pub struct UnicycleSim {
    position: Point2<f64>,
    yaw: f64,
    dt: f64,
    command: MotionCommand,
    history: Vec<MotionCommand>,
}

/// How a simulated run ended
#[derive(Debug, Clone, PartialEq)]
pub struct SimOutcome {
    /// The controller dropped its goal within the tick budget
    pub arrived: bool,
    /// The robot came to rest inside the deadband with the goal still pending
    pub settled: bool,
    /// Ticks executed
    pub ticks: usize,
    /// Pose at the end of the run
    pub final_pose: Pose,
    /// Distance to the goal at the end of the run
    pub final_distance: f64,
}

impl UnicycleSim {
    /// Robot at `position` facing `yaw`, integrated every `dt` seconds
    pub fn new(position: Point2<f64>, yaw: f64, dt: f64) -> Self {
        UnicycleSim {
            position,
            yaw,
            dt,
            command: MotionCommand::stop(),
            history: Vec::new(),
        }
    }

    /// Current ground-truth pose
    pub fn pose(&self) -> Pose {
        Pose::from_yaw(self.position, self.yaw)
    }

    /// Command currently applied to the wheels
    pub fn command(&self) -> MotionCommand {
        self.command
    }

    /// Every command received, oldest first
    pub fn history(&self) -> &[MotionCommand] {
        &self.history
    }

    /// Advance one time step with the last received command.
    ///
    /// A tick that publishes nothing leaves the previous command applied, like
    /// a real base holding its last velocity setpoint.
    pub fn step(&mut self) {
        let heading = Vector2::new(self.yaw.cos(), self.yaw.sin());
        self.position += heading * (self.command.linear * self.dt);
        self.yaw = crate::navigation::normalize_angle(self.yaw + self.command.angular * self.dt);
    }

    /// Drive `controller` toward `goal` for at most `max_ticks` control periods.
    ///
    /// Stops early on arrival, or once the controller commands a full stop
    /// inside the deadband, where nothing would move the robot any further.
    pub fn run_to_goal(
        &mut self,
        controller: &mut PoseController,
        goal: Goal,
        max_ticks: usize,
    ) -> SimOutcome {
        controller.set_goal(goal);

        let mut ticks = 0;
        let mut settled = false;
        while ticks < max_ticks && controller.mode() == Mode::Pursuing {
            controller.set_pose(self.pose());
            let command = controller.tick(self);
            self.step();
            ticks += 1;

            let in_deadband = controller
                .last_output()
                .map(|o| o.distance <= controller.config().deadband_distance)
                .unwrap_or(false);
            if controller.mode() == Mode::Pursuing
                && in_deadband
                && command.map(|c| c.is_stop()).unwrap_or(false)
            {
                settled = true;
                break;
            }
        }

        let final_pose = self.pose();
        SimOutcome {
            arrived: controller.mode() == Mode::NoGoal,
            settled,
            ticks,
            final_pose,
            final_distance: (goal.target - final_pose.position).norm(),
        }
    }
}

impl CommandSink for UnicycleSim {
    fn publish(&mut self, command: &MotionCommand) {
        self.command = *command;
        self.history.push(*command);
    }
}
