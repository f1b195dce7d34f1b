//! Projection of arbitrary goal poses onto the orientations the arm can
//! realise.
//!
//! Joints 2 to 4 all pitch inside one vertical plane through the joint-1
//! axis, so the tool approach axis (tool Z) must lie in that plane. The
//! remaining freedom is a roll about the approach axis (joint 5). Any yaw
//! out of the plane is unreachable and is removed here, before the
//! closed-form solve.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Unit, UnitQuaternion, Vector3};

use armik_core::{ArmGeometry, Pose};

/// Below this norm a direction is treated as undefined.
const DEGENERATE_NORM: f64 = 1e-12;

/// Horizontal direction from the joint-1 axis towards `position`.
///
/// `None` when `position` lies on the joint-1 axis.
pub fn radial_direction(
    geometry: &ArmGeometry,
    position: &Vector3<f64>,
) -> Option<Unit<Vector3<f64>>> {
    let radial = Vector3::new(position.x - geometry.base_offset[0], position.y, 0.0);
    Unit::try_new(radial, DEGENERATE_NORM)
}

/// Joint-1 angle that points the arm plane at `position`, 0 on the axis.
pub fn base_heading(geometry: &ArmGeometry, position: &Vector3<f64>) -> f64 {
    radial_direction(geometry, position).map_or(0.0, |radial| radial.y.atan2(radial.x))
}

/// Unit normal of the vertical plane through the joint-1 axis and `position`.
///
/// When `position` lies on the joint-1 axis the plane is the base X-Z plane,
/// the one [`base_heading`] selects there.
pub fn arm_plane_normal(geometry: &ArmGeometry, position: &Vector3<f64>) -> Unit<Vector3<f64>> {
    match radial_direction(geometry, position) {
        Some(radial) => Unit::new_unchecked(Vector3::new(-radial.y, radial.x, 0.0)),
        None => Vector3::y_axis(),
    }
}

/// Closest pose to `goal` whose approach axis lies in the arm plane.
///
/// Position is kept. The orientation is turned by the smallest rotation that
/// brings the approach axis into the plane, which keeps roll about the
/// approach axis and pitch within the plane and drops yaw. If the approach
/// axis is exactly normal to the plane, the frame is turned a quarter turn
/// about its own X axis instead.
pub fn project_goal(geometry: &ArmGeometry, goal: &Pose) -> Pose {
    let normal = arm_plane_normal(geometry, &goal.translation.vector).into_inner();
    let approach = goal.rotation * Vector3::z();
    let in_plane = approach - normal * approach.dot(&normal);

    let correction = if in_plane.norm() > DEGENERATE_NORM {
        let cross = approach.cross(&in_plane);
        let angle = cross.norm().atan2(approach.dot(&in_plane));
        match Unit::try_new(cross, 0.0) {
            Some(axis) => UnitQuaternion::from_axis_angle(&axis, angle),
            None => UnitQuaternion::identity(),
        }
    } else {
        let tool_x = goal.rotation * Vector3::x_axis();
        UnitQuaternion::from_axis_angle(&tool_x, FRAC_PI_2)
    };

    Isometry3::from_parts(goal.translation, correction * goal.rotation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
