//! ROS 2 interface for the pose controller
//!
//! This module handles the controller's outside world:
//! - The [`CommandSink`] seam every command leaves through
//! - Subscribing to pose and goal topics (feature `ros`)
//! - Publishing velocity commands and driving the control timer (feature `ros`)

#[cfg(feature = "ros")]
mod publisher;
#[cfg(feature = "ros")]
mod subscriber;

#[cfg(feature = "ros")]
pub use publisher::*;
#[cfg(feature = "ros")]
pub use subscriber::*;

use crate::navigation::MotionCommand;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Destination for velocity commands, invoked once per published tick.
///
/// Sinks are infallible from the controller's point of view; implementations
/// report their own transport failures.
pub trait CommandSink {
    /// Hand a command to the actuator
    fn publish(&mut self, command: &MotionCommand);
}

/// Records every command, mostly useful for tests and offline runs
impl CommandSink for Vec<MotionCommand> {
    fn publish(&mut self, command: &MotionCommand) {
        self.push(*command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn publish(&mut self, command: &MotionCommand) {
        (**self).publish(command);
    }
}

/// Cleared to ask a running control loop to stop. Clones share the flag.
#[derive(Debug, Clone)]
pub struct RunFlag {
    running: Arc<AtomicBool>,
}

impl RunFlag {
    /// New flag in the running state
    pub fn new() -> Self {
        RunFlag {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask every holder of this flag to stop
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ros")]
pub use bridge::*;

#[cfg(feature = "ros")]
mod bridge {
    use super::{CmdVelPublisher, RunFlag, goal_from_msg, pose_from_msg};
    use crate::{RosConfig, SharedController};
    use futures::executor::LocalPool;
    use futures::stream::{Stream, StreamExt};
    use futures::task::LocalSpawnExt;
    use r2r::geometry_msgs::msg::{PointStamped, PoseWithCovarianceStamped};
    use r2r::{Context, Node, QosProfile};
    use std::time::Duration;

    /// How long one `spin_once` waits for middleware events
    const SPIN_TIMEOUT: Duration = Duration::from_millis(10);

    /// ROS 2 interface manager
    pub struct RosInterface {
        node: Node,
        config: RosConfig,
    }

    impl RosInterface {
        /// Create the ROS context and node
        pub fn new(config: &RosConfig) -> Result<Self, RosError> {
            let context = Context::create()?;
            let node = Node::create(context, &config.node_name, &config.namespace)?;
            log::info!("ROS 2 node '{}' created", config.node_name);

            Ok(RosInterface {
                node,
                config: config.clone(),
            })
        }

        /// Wire the topics to `controller` and spin until `running` is stopped.
        ///
        /// Pose and goal messages are written into the controller as they
        /// arrive; a wall timer runs the control tick and publishes on
        /// `cmd_vel_topic`. All tasks run on one thread.
        pub fn spin(mut self, controller: SharedController, running: RunFlag) -> Result<(), RosError> {
            let qos = QosProfile::default().keep_last(self.config.qos_depth);

            let poses = self
                .node
                .subscribe::<PoseWithCovarianceStamped>(&self.config.pose_topic, qos.clone())?;
            log::info!("Subscribed to {}", self.config.pose_topic);

            let goals = self
                .node
                .subscribe::<PointStamped>(&self.config.goal_topic, qos.clone())?;
            log::info!("Subscribed to {}", self.config.goal_topic);

            let mut publisher = CmdVelPublisher::new(&mut self.node, &self.config.cmd_vel_topic, qos)?;
            log::info!("Publishing to {}", self.config.cmd_vel_topic);

            let mut timer = self.node.create_wall_timer(self.config.control_period())?;

            let mut pool = LocalPool::new();
            let spawner = pool.spawner();

            spawner.spawn_local(ingest_poses(poses, controller.clone()))?;
            spawner.spawn_local(ingest_goals(goals, controller.clone()))?;
            spawner.spawn_local(async move {
                loop {
                    if let Err(e) = timer.tick().await {
                        log::error!("Control timer failed: {}", e);
                        break;
                    }
                    match controller.lock() {
                        Ok(mut controller) => {
                            controller.tick(&mut publisher);
                        }
                        Err(_) => {
                            log::error!("Controller lock poisoned, stopping control loop");
                            break;
                        }
                    }
                }
            })?;

            log::info!(
                "Control loop running at {:.1} Hz",
                1.0 / self.config.control_period().as_secs_f64()
            );

            while running.is_running() {
                self.node.spin_once(SPIN_TIMEOUT);
                pool.run_until_stalled();
            }

            log::info!("Control loop stopped");
            Ok(())
        }
    }

    async fn ingest_poses<S>(mut poses: S, controller: SharedController)
    where
        S: Stream<Item = PoseWithCovarianceStamped> + Unpin,
    {
        while let Some(msg) = poses.next().await {
            let pose = pose_from_msg(&msg);
            match controller.lock() {
                Ok(mut controller) => controller.set_pose(pose),
                Err(_) => {
                    log::error!("Controller lock poisoned, dropping pose subscription");
                    break;
                }
            }
        }
    }

    async fn ingest_goals<S>(mut goals: S, controller: SharedController)
    where
        S: Stream<Item = PointStamped> + Unpin,
    {
        while let Some(msg) = goals.next().await {
            let goal = goal_from_msg(&msg);
            match controller.lock() {
                Ok(mut controller) => controller.set_goal(goal),
                Err(_) => {
                    log::error!("Controller lock poisoned, dropping goal subscription");
                    break;
                }
            }
        }
    }

    /// ROS error types
    #[derive(Debug)]
    pub enum RosError {
        /// Node or middleware error
        InitError(String),
        /// Publishing error
        PublishError(String),
        /// Task spawn error
        SpawnError(String),
    }

    impl std::fmt::Display for RosError {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            match self {
                RosError::InitError(msg) => write!(f, "ROS init error: {}", msg),
                RosError::PublishError(msg) => write!(f, "Publish error: {}", msg),
                RosError::SpawnError(msg) => write!(f, "Spawn error: {}", msg),
            }
        }
    }

    impl std::error::Error for RosError {}

    impl From<r2r::Error> for RosError {
        fn from(e: r2r::Error) -> Self {
            RosError::InitError(e.to_string())
        }
    }

    impl From<futures::task::SpawnError> for RosError {
        fn from(e: futures::task::SpawnError) -> Self {
            RosError::SpawnError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<MotionCommand> = Vec::new();
        sink.publish(&MotionCommand::new(0.5, 0.0));
        sink.publish(&MotionCommand::stop());
        assert_eq!(sink, vec![MotionCommand::new(0.5, 0.0), MotionCommand::stop()]);
    }

    #[test]
    fn test_run_flag_stop_is_shared_by_clones() {
        let flag = RunFlag::new();
        let handle = flag.clone();
        assert!(flag.is_running());

        std::thread::spawn(move || handle.stop()).join().unwrap();
        assert!(!flag.is_running());
    }

    #[test]
    fn test_run_flag_stops_a_polling_loop() {
        let flag = RunFlag::default();
        let mut spins = 0;
        while flag.is_running() {
            spins += 1;
            if spins == 3 {
                flag.stop();
            }
        }
        assert_eq!(spins, 3);
    }

    #[test]
    fn test_boxed_dyn_sink_forwards() {
        let mut sink: Box<Vec<MotionCommand>> = Box::default();
        {
            let dyn_sink: &mut dyn CommandSink = &mut sink;
            dyn_sink.publish(&MotionCommand::new(0.1, 0.2));
        }
        assert_eq!(sink.len(), 1);
    }
}
