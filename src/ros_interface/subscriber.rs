// src/ros_interface/subscriber.rs
// Converts incoming pose and goal messages into controller types.

use crate::core::{Goal, Pose};
use nalgebra::Quaternion;
use r2r::geometry_msgs::msg::{PointStamped, PoseWithCovarianceStamped};

/// Planar pose from a localizer estimate. Covariance and z are dropped.
pub fn pose_from_msg(msg: &PoseWithCovarianceStamped) -> Pose {
    let pose = &msg.pose.pose;
    let q = &pose.orientation;
    Pose::new(
        pose.position.x,
        pose.position.y,
        Quaternion::new(q.w, q.x, q.y, q.z),
    )
}

/// Goal from a clicked point. The z coordinate is ignored.
pub fn goal_from_msg(msg: &PointStamped) -> Goal {
    Goal::new(msg.point.x, msg.point.y)
}
