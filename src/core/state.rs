// core/state.rs

// Holds everything the controller remembers between entry points: the latest
// pose, the pending goal and the diagnostic tick counter. Goal pursuit is a
// two-state machine derived from whether a goal is pending.

use super::localization::{Goal, Pose};

/// Goal pursuit modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Nothing to pursue until a goal arrives
    NoGoal,
    /// Driving toward the pending goal
    Pursuing,
}

/// Controller state: latest inputs and the diagnostic counter
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    pose: Option<Pose>,
    goal: Option<Goal>,
    tick_counter: u32,
}

impl ControllerState {
    /// Starts with no pose and no goal
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest pose, if one has been received
    pub fn pose(&self) -> Option<&Pose> {
        self.pose.as_ref()
    }

    /// Pending goal, if any
    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    /// Ticks counted since the last diagnostic record
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Replaces the stored pose
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = Some(pose);
    }

    /// Replaces any pending goal, reached or not
    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
    }

    /// Drops the pending goal
    pub fn clear_goal(&mut self) {
        self.goal = None;
    }

    /// Pursuit mode implied by the pending goal
    pub fn mode(&self) -> Mode {
        match self.goal {
            Some(_) => Mode::Pursuing,
            None => Mode::NoGoal,
        }
    }

    /// Count one published command. Returns true, and restarts the count, once
    /// `interval` commands have been counted.
    pub fn record_tick(&mut self, interval: u32) -> bool {
        self.tick_counter += 1;
        if self.tick_counter >= interval {
            self.tick_counter = 0;
            true
        } else {
            false
        }
    }
}
