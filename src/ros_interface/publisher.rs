// src/ros_interface/publisher.rs
// Publishes controller commands as geometry_msgs/Twist on the velocity topic.

use super::{CommandSink, RosError};
use crate::navigation::MotionCommand;
use r2r::QosProfile;
use r2r::geometry_msgs::msg::{Twist, Vector3};

/// Velocity command publisher
pub struct CmdVelPublisher {
    inner: r2r::Publisher<Twist>,
    topic: String,
}

impl CmdVelPublisher {
    /// Create a publisher on `topic`
    pub fn new(node: &mut r2r::Node, topic: &str, qos: QosProfile) -> Result<Self, RosError> {
        let inner = node.create_publisher::<Twist>(topic, qos)?;
        Ok(CmdVelPublisher {
            inner,
            topic: topic.to_string(),
        })
    }

    /// Publish one command, reporting transport failures
    pub fn try_publish(&self, command: &MotionCommand) -> Result<(), RosError> {
        self.inner
            .publish(&command.to_ros_message())
            .map_err(|e| RosError::PublishError(format!("{}: {}", self.topic, e)))
    }
}

impl CommandSink for CmdVelPublisher {
    fn publish(&mut self, command: &MotionCommand) {
        if let Err(e) = self.try_publish(command) {
            log::error!("Failed to publish command: {}", e);
        }
    }
}

impl MotionCommand {
    /// Convert to ROS Twist message
    pub fn to_ros_message(&self) -> Twist {
        Twist {
            linear: Vector3 {
                x: self.linear,
                y: 0.0,
                z: 0.0,
            },
            angular: Vector3 {
                x: 0.0,
                y: 0.0,
                z: self.angular,
            },
        }
    }
}
