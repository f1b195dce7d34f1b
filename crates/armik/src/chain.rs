//! Forward kinematics of the 5-DOF arm.
//!
//! An [`ArmChain`] is the ordered list of the arm's revolute joints built
//! from an [`ArmGeometry`]. It stores the static transforms (origins), joint
//! axes and home offsets needed for forward kinematics and Jacobian
//! computation. Joint values are in joint space, so a joint contributes a
//! rotation of `q - home_offset` about its axis.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, UnitVector3, Vector3};

use armik_core::{ArmGeometry, DOF, JointVector, Pose};

/// A single joint in the kinematic chain.
#[derive(Debug, Clone)]
pub struct ChainJoint {
    /// Static transform from the previous joint frame to this joint frame.
    pub origin: Isometry3<f64>,
    /// Joint axis in the joint's local frame.
    pub axis: UnitVector3<f64>,
    /// Joint value at which this joint contributes no rotation.
    pub home_offset: f64,
}

/// The arm's joints from base to tool.
#[derive(Debug, Clone)]
pub struct ArmChain {
    joints: [ChainJoint; DOF],
    /// Transform from the joint-5 frame to the tool frame.
    tool_offset: Isometry3<f64>,
}

impl ArmChain {
    /// Build the chain for `geometry`.
    ///
    /// Joints 1 and 5 turn about the downward vertical and tool axes, which
    /// is how `q = offset - angle` comes out for them; joints 2 to 4 pitch
    /// about the arm plane normal.
    pub fn from_geometry(geometry: &ArmGeometry) -> Self {
        let [base_x, base_z] = geometry.base_offset;
        let [shoulder_x, shoulder_z] = geometry.shoulder_offset;
        let down = UnitVector3::new_unchecked(-Vector3::z());
        let pitch = Vector3::y_axis();
        let home = &geometry.home_offsets;

        let joint = |x: f64, z: f64, axis: UnitVector3<f64>, home_offset: f64| ChainJoint {
            origin: Isometry3::from_parts(Translation3::new(x, 0.0, z), UnitQuaternion::identity()),
            axis,
            home_offset,
        };

        Self {
            joints: [
                joint(base_x, base_z, down, home[0]),
                joint(shoulder_x, shoulder_z, pitch, home[1]),
                joint(0.0, geometry.upper_arm, pitch, home[2]),
                joint(0.0, geometry.forearm, pitch, home[3]),
                joint(0.0, 0.0, down, home[4]),
            ],
            tool_offset: Isometry3::translation(0.0, 0.0, geometry.wrist_to_tool),
        }
    }

    /// Compute forward kinematics: joint positions -> tool pose in the base frame.
    pub fn forward_kinematics(&self, q: &JointVector) -> Pose {
        let mut transform = Isometry3::identity();
        for (joint, &value) in self.joints.iter().zip(q.iter()) {
            transform *= joint.origin;
            transform *= joint_transform(joint, value);
        }
        transform * self.tool_offset
    }

    /// Compute per-joint frames for Jacobian computation.
    ///
    /// Returns (joint_origins_in_base, joint_axes_in_base, tool_position).
    pub fn joint_frames(&self, q: &JointVector) -> ([Vector3<f64>; DOF], [Vector3<f64>; DOF], Vector3<f64>) {
        let mut transform = Isometry3::identity();
        let mut origins = [Vector3::zeros(); DOF];
        let mut axes = [Vector3::zeros(); DOF];

        for (i, (joint, &value)) in self.joints.iter().zip(q.iter()).enumerate() {
            transform *= joint.origin;

            // Joint origin and axis in base frame BEFORE joint rotation
            origins[i] = transform.translation.vector;
            axes[i] = transform.rotation * joint.axis.into_inner();

            transform *= joint_transform(joint, value);
        }

        let tool = transform * self.tool_offset;
        (origins, axes, tool.translation.vector)
    }
}

/// Rotation contributed by one joint at joint-space value `value`.
fn joint_transform(joint: &ChainJoint, value: f64) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_axis_angle(&joint.axis, value - joint.home_offset),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
