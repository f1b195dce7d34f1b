//! Pose and joint-vector comparisons for kinematics tests.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;

use armik_core::{ArmGeometry, JointVector, Pose};

/// Absolute difference between two angles, modulo a full turn.
pub fn wrapped_angle_diff(a: f64, b: f64) -> f64 {
    ((a - b + PI).rem_euclid(TAU) - PI).abs()
}

/// Whether every joint of `a` and `b` agrees modulo a full turn.
pub fn equivalent_joint_vectors(a: &JointVector, b: &JointVector, tolerance: f64) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| wrapped_angle_diff(x, y) <= tolerance)
}

/// Tool Z axis in the base frame.
pub fn approach_axis(pose: &Pose) -> Vector3<f64> {
    pose.rotation * Vector3::z()
}

/// Horizontal distance of the pose from the joint-1 axis.
pub fn radial_distance(geometry: &ArmGeometry, pose: &Pose) -> f64 {
    let p = pose.translation.vector;
    (p.x - geometry.base_offset[0]).hypot(p.y)
}

/// Same approach axis, and tool X axes equal up to a half turn of roll.
pub fn same_roll_and_pitch(a: &Pose, b: &Pose, tolerance: f64) -> bool {
    let approach_ok = (approach_axis(a) - approach_axis(b)).norm() <= tolerance;
    let xa = a.rotation * Vector3::x();
    let xb = b.rotation * Vector3::x();
    let roll_ok = (xa - xb).norm() <= tolerance || (xa + xb).norm() <= tolerance;
    approach_ok && roll_ok
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
