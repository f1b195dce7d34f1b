//! Closed-form solution of one redundancy branch.
//!
//! The chain is split into independent sub-problems:
//!
//! ```text
//! joint 1        atan2 of the goal in the base X-Y plane
//! joints 2, 3    two-link planar reach to the wrist (law of cosines)
//! joint 4        residual pitch: (j2 + j3 + j4) is the tool pitch
//! joint 5        tool roll about the approach axis
//! ```
//!
//! All angles are first computed in the candle convention (arm straight up
//! is zero) and mapped to joint space through the geometry's home offsets.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{UnitQuaternion, Vector3};

use armik_core::{ArmGeometry, JointVector, Pose};

use crate::branch::Branch;
use crate::projection::base_heading;

/// Cosine arguments above this are treated as a fully extended elbow.
pub const ALMOST_PLUS_ONE: f64 = 0.999_999_9;

/// Cosine arguments below this are treated as a fully folded elbow.
pub const ALMOST_MINUS_ONE: f64 = -0.999_999_9;

/// Rotation entries smaller than this are snapped to exactly zero.
const ZERO_SNAP: f64 = 1e-9;

/// Solve one branch for a goal already projected with
/// [`project_goal`](crate::projection::project_goal).
///
/// Joint 1 comes from [`base_heading`], so the arm plane is the one the
/// projection used, including for goals on the joint-1 axis.
///
/// Returns `None` when the wrist lies outside the annulus the upper arm and
/// forearm can reach, beyond the near-one clamping band. Joint limits are
/// not checked here.
pub fn solve_branch(geometry: &ArmGeometry, pose: &Pose, branch: Branch) -> Option<JointVector> {
    let [base_x, base_z] = geometry.base_offset;
    let [shoulder_x, shoulder_z] = geometry.shoulder_offset;
    let (upper, fore) = (geometry.upper_arm, geometry.forearm);

    // Goal relative to the joint-1 axis.
    let from_base = pose.translation.vector - Vector3::new(base_x, 0.0, base_z);

    let mut j1 = base_heading(geometry, &pose.translation.vector);
    if branch.flip_base() {
        j1 = flip_half_turn(j1);
    }

    // Into the arm plane (X forward, Z up), origin on the joint-2 axis.
    let undo_base = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -j1);
    let planar = undo_base * from_base - Vector3::new(shoulder_x, 0.0, shoulder_z);
    let rotation = (undo_base * pose.rotation).to_rotation_matrix();
    let m = rotation.matrix();

    // Sum of joints 2 to 4 is the pitch of the approach axis from vertical.
    let j234 = snap(m[(0, 2)]).atan2(snap(m[(2, 2)]));

    // Wrist (joint 4) position in the arm plane.
    let wrist_x = planar.x - geometry.wrist_to_tool * j234.sin();
    let wrist_z = planar.z - geometry.wrist_to_tool * j234.cos();

    let reach_sq = wrist_x * wrist_x + wrist_z * wrist_z;
    let cos_j3 = (reach_sq - upper * upper - fore * fore) / (2.0 * upper * fore);
    let mut j3 = clamped_acos(cos_j3)?;
    if branch.elbow_down() {
        j3 = -j3;
    }

    let j2 = FRAC_PI_2 - wrist_z.atan2(wrist_x) - (fore * j3.sin()).atan2(upper + fore * j3.cos());
    let j4 = j234 - j2 - j3;

    // Roll about the approach axis. Row 1 of Ry(j234) * Rz(j5) is
    // (sin j5, cos j5, 0).
    let mut j5 = snap(m[(1, 0)]).atan2(snap(m[(1, 1)]));
    if branch.flip_wrist() {
        j5 = flip_half_turn(j5);
    }

    let home = &geometry.home_offsets;
    Some(JointVector::new([
        home[0] - j1,
        j2 + home[1],
        j3 + home[2],
        j4 + home[3],
        home[4] - j5,
    ]))
}

/// Angle whose cosine is `cosine`, tolerating rounding just outside [-1, 1].
///
/// Arguments within the band past +/-1 given by the near-one thresholds
/// yield exactly 0 or pi. Anything further out, or NaN, has no solution.
pub fn clamped_acos(cosine: f64) -> Option<f64> {
    if cosine.is_nan() {
        None
    } else if cosine > ALMOST_PLUS_ONE {
        (cosine <= 2.0 - ALMOST_PLUS_ONE).then_some(0.0)
    } else if cosine < ALMOST_MINUS_ONE {
        (cosine >= -2.0 - ALMOST_MINUS_ONE).then_some(PI)
    } else {
        Some((1.0 - cosine * cosine).sqrt().atan2(cosine))
    }
}

/// The other angle with the same axis line, kept within [-pi, pi].
fn flip_half_turn(angle: f64) -> f64 {
    if angle < 0.0 { angle + PI } else { angle - PI }
}

fn snap(value: f64) -> f64 {
    if value.abs() < ZERO_SNAP { 0.0 } else { value }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use armik_core::pose_from_xyz_rpy;

    use crate::chain::ArmChain;
    use crate::projection::project_goal;

    #[test]
    fn clamped_acos_inside_range() {
        assert_relative_eq!(clamped_acos(0.5).unwrap(), PI / 3.0, epsilon = 1e-12);
        assert_relative_eq!(clamped_acos(0.0).unwrap(), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(clamped_acos(-0.5).unwrap(), 2.0 * PI / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn clamped_acos_exact_boundaries() {
        assert_eq!(clamped_acos(1.0), Some(0.0));
        assert_eq!(clamped_acos(-1.0), Some(PI));
    }

    #[test]
    fn clamped_acos_rescues_rounding() {
        assert_eq!(clamped_acos(1.0 + 1e-12), Some(0.0));
        assert_eq!(clamped_acos(-1.0 - 1e-12), Some(PI));
        assert_eq!(clamped_acos(1.0 + 5e-8), Some(0.0));
    }

    #[test]
    fn clamped_acos_rejects_far_outside() {
        assert_eq!(clamped_acos(1.001), None);
        assert_eq!(clamped_acos(-1.5), None);
        assert_eq!(clamped_acos(f64::NAN), None);
    }

    #[test]
    fn flip_half_turn_stays_in_range() {
        assert_relative_eq!(flip_half_turn(0.0), -PI);
        assert_relative_eq!(flip_half_turn(0.5), 0.5 - PI);
        assert_relative_eq!(flip_half_turn(-0.5), PI - 0.5);
        assert_relative_eq!(flip_half_turn(PI), 0.0);
    }

    #[test]
    fn candle_pose_maps_to_home_offsets() {
        let geometry = ArmGeometry::default();
        let chain = ArmChain::from_geometry(&geometry);
        let home = JointVector::new(geometry.home_offsets);
        let candle = chain.forward_kinematics(&home);

        // Straight up: the planar solution is fully extended, cos(j3) = 1.
        let q = solve_branch(&geometry, &candle, Branch::PRIMARY).unwrap();
        for joint in 0..5 {
            assert_relative_eq!(q[joint], home[joint], epsilon = 1e-6);
        }
    }

    #[test]
    fn fully_extended_elbow_branches_coincide() {
        let geometry = ArmGeometry::default();
        let chain = ArmChain::from_geometry(&geometry);
        let candle = chain.forward_kinematics(&JointVector::new(geometry.home_offsets));

        let up = solve_branch(&geometry, &candle, Branch::new(false, false, false)).unwrap();
        let down = solve_branch(&geometry, &candle, Branch::new(false, true, false)).unwrap();
        assert_relative_eq!(up[2], down[2], epsilon = 1e-12);
    }

    #[test]
    fn primary_branch_reproduces_reachable_goal() {
        let geometry = ArmGeometry::default();
        let chain = ArmChain::from_geometry(&geometry);
        let goal = pose_from_xyz_rpy(0.3, 0.0, 0.2, 0.0, 0.0, 0.0);

        let q = solve_branch(&geometry, &project_goal(&geometry, &goal), Branch::PRIMARY).unwrap();
        let reached = chain.forward_kinematics(&q);
        assert_relative_eq!(
            reached.translation.vector,
            goal.translation.vector,
            epsilon = 1e-9
        );
        assert_relative_eq!(reached.rotation, goal.rotation, epsilon = 1e-9);
    }

    #[test]
    fn every_branch_reaches_the_same_point() {
        let geometry = ArmGeometry::default();
        let chain = ArmChain::from_geometry(&geometry);
        // Close to the base so the flipped-base branches can also reach.
        let goal = pose_from_xyz_rpy(0.05, 0.02, 0.35, 0.3, 0.0, 0.0);
        let projected = project_goal(&geometry, &goal);

        let mut solved = 0;
        for branch in Branch::ALL {
            let Some(q) = solve_branch(&geometry, &projected, branch) else {
                continue;
            };
            solved += 1;
            let reached = chain.forward_kinematics(&q);
            assert_relative_eq!(
                reached.translation.vector,
                projected.translation.vector,
                epsilon = 1e-9
            );
            let approach = reached.rotation * Vector3::z();
            assert_relative_eq!(approach, projected.rotation * Vector3::z(), epsilon = 1e-9);
        }
        assert_eq!(solved, 8, "all eight branches should be geometrically valid");
    }

    #[test]
    fn wrist_flip_differs_by_half_turn_only_on_joint_5() {
        let geometry = ArmGeometry::default();
        let goal = project_goal(&geometry, &pose_from_xyz_rpy(0.25, 0.05, 0.15, 0.4, 0.6, 0.0));

        let direct = solve_branch(&geometry, &goal, Branch::new(false, false, false)).unwrap();
        let flipped = solve_branch(&geometry, &goal, Branch::new(false, false, true)).unwrap();
        for joint in 0..4 {
            assert_relative_eq!(direct[joint], flipped[joint], epsilon = 1e-12);
        }
        assert_relative_eq!((direct[4] - flipped[4]).abs(), PI, epsilon = 1e-12);
    }

    #[test]
    fn elbow_branches_mirror_joint_3() {
        let geometry = ArmGeometry::default();
        let goal = project_goal(&geometry, &pose_from_xyz_rpy(0.25, 0.0, 0.1, 0.0, 0.5, 0.0));
        let home = geometry.home_offsets;

        let up = solve_branch(&geometry, &goal, Branch::new(false, false, false)).unwrap();
        let down = solve_branch(&geometry, &goal, Branch::new(false, true, false)).unwrap();
        assert_relative_eq!(up[2] - home[2], -(down[2] - home[2]), epsilon = 1e-12);
        assert!((up[1] - down[1]).abs() > 1e-3);
    }

    #[test]
    fn out_of_reach_yields_none() {
        let geometry = ArmGeometry::default();
        let goal = project_goal(&geometry, &pose_from_xyz_rpy(2.0, 0.0, 0.2, 0.0, 0.0, 0.0));
        for branch in Branch::ALL {
            assert!(solve_branch(&geometry, &goal, branch).is_none());
        }
    }

    #[test]
    fn wrist_too_close_to_shoulder_yields_none() {
        // Short forearm: the inner annulus radius is upper - forearm = 0.1 m.
        let geometry = ArmGeometry {
            forearm: 0.05,
            ..ArmGeometry::default()
        };
        let [bx, bz] = geometry.base_offset;
        let [sx, sz] = geometry.shoulder_offset;
        // Wrist exactly on the joint-2 axis, tool pointing up.
        let goal = pose_from_xyz_rpy(bx + sx, 0.0, bz + sz + geometry.wrist_to_tool, 0.0, 0.0, 0.0);
        assert!(solve_branch(&geometry, &goal, Branch::PRIMARY).is_none());
    }
}
