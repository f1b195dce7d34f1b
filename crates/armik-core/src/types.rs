use std::f64::consts::TAU;

use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::error::LimitsError;

/// Number of actuated joints on the arm.
pub const DOF: usize = 5;

/// Rigid end-effector pose in the arm base frame (meters, radians).
pub type Pose = Isometry3<f64>;

/// Build a [`Pose`] from a position and roll/pitch/yaw (extrinsic X-Y-Z).
pub fn pose_from_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Pose {
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

// ---------------------------------------------------------------------------
// JointVector
// ---------------------------------------------------------------------------

/// One angle per joint in radians; index 0 is joint 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointVector([f64; DOF]);

impl JointVector {
    pub const fn new(angles: [f64; DOF]) -> Self {
        Self(angles)
    }

    pub const fn zeros() -> Self {
        Self([0.0; DOF])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Largest per-joint absolute difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl std::ops::Index<usize> for JointVector {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl std::ops::IndexMut<usize> for JointVector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl From<[f64; DOF]> for JointVector {
    fn from(angles: [f64; DOF]) -> Self {
        Self::new(angles)
    }
}

impl From<JointVector> for [f64; DOF] {
    fn from(q: JointVector) -> Self {
        q.0
    }
}

// ---------------------------------------------------------------------------
// JointLimits
// ---------------------------------------------------------------------------

/// Per-joint position bounds, fixed for the lifetime of a solver.
///
/// Invariant: `min[i] <= max[i]` for every joint. Infinite bounds are
/// allowed and mean the joint is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointLimits {
    min: [f64; DOF],
    max: [f64; DOF],
}

impl JointLimits {
    /// Build limits from two index-aligned slices.
    ///
    /// # Errors
    ///
    /// Fails if either slice does not hold exactly [`DOF`] values, if a
    /// bound is NaN, or if a minimum exceeds its maximum.
    pub fn new(min: &[f64], max: &[f64]) -> Result<Self, LimitsError> {
        if min.len() != DOF || max.len() != DOF {
            return Err(LimitsError::LengthMismatch {
                min: min.len(),
                max: max.len(),
            });
        }

        let mut limits = Self {
            min: [0.0; DOF],
            max: [0.0; DOF],
        };
        for joint in 0..DOF {
            let (lo, hi) = (min[joint], max[joint]);
            if lo.is_nan() || hi.is_nan() {
                return Err(LimitsError::NotANumber { joint });
            }
            if lo > hi {
                return Err(LimitsError::Inverted {
                    joint,
                    min: lo,
                    max: hi,
                });
            }
            limits.min[joint] = lo;
            limits.max[joint] = hi;
        }
        Ok(limits)
    }

    /// Same `[-bound, bound]` range on every joint.
    pub fn symmetric(bound: f64) -> Self {
        let bound = bound.abs();
        Self {
            min: [-bound; DOF],
            max: [bound; DOF],
        }
    }

    /// Published position limits of the KUKA youBot arm.
    pub const fn youbot() -> Self {
        Self {
            min: [0.010_069_2, 0.010_069_2, -5.026_55, 0.022_123_9, 0.110_619],
            max: [5.840_14, 2.617_99, -0.015_708, 3.429_2, 5.641_59],
        }
    }

    pub const fn min(&self) -> &[f64; DOF] {
        &self.min
    }

    pub const fn max(&self) -> &[f64; DOF] {
        &self.max
    }

    /// Whether every joint of `q` lies inside its closed `[min, max]` range.
    pub fn contains(&self, q: &JointVector) -> bool {
        q.iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(&angle, (&lo, &hi))| lo <= angle && angle <= hi)
    }

    /// `q` with each joint moved by whole turns into its range, if possible.
    ///
    /// Joints already inside their range are left as they are. Returns
    /// `None` if some joint has no representative within `[min, max]`.
    pub fn shift_into(&self, q: &JointVector) -> Option<JointVector> {
        let mut shifted = *q;
        for joint in 0..DOF {
            let (lo, hi) = (self.min[joint], self.max[joint]);
            let angle = q[joint];
            let candidate = if angle < lo {
                angle + TAU * ((lo - angle) / TAU).ceil()
            } else if angle > hi {
                angle - TAU * ((angle - hi) / TAU).ceil()
            } else {
                angle
            };
            if !(lo <= candidate && candidate <= hi) {
                return None;
            }
            shifted[joint] = candidate;
        }
        Some(shifted)
    }

    /// Clamp every joint of `q` into its range.
    pub fn clamp(&self, q: &mut JointVector) {
        for joint in 0..DOF {
            q[joint] = q[joint].clamp(self.min[joint], self.max[joint]);
        }
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::youbot()
    }
}

// ---------------------------------------------------------------------------
// SolutionSet
// ---------------------------------------------------------------------------

/// Ordered joint-space solutions for one goal. Empty means unreachable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionSet {
    solutions: Vec<JointVector>,
}

impl SolutionSet {
    pub const fn new() -> Self {
        Self {
            solutions: Vec::new(),
        }
    }

    pub fn push(&mut self, q: JointVector) {
        self.solutions.push(q);
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn first(&self) -> Option<&JointVector> {
        self.solutions.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JointVector> {
        self.solutions.iter()
    }

    pub fn as_slice(&self) -> &[JointVector] {
        &self.solutions
    }

    pub fn into_vec(self) -> Vec<JointVector> {
        self.solutions
    }

    /// The solution closest to `reference` by max-abs joint distance.
    ///
    /// Ties resolve to the earlier solution. The set itself is not reordered.
    pub fn nearest_to(&self, reference: &JointVector) -> Option<&JointVector> {
        self.solutions.iter().fold(None, |best, q| match best {
            Some(b) if b.max_abs_diff(reference) <= q.max_abs_diff(reference) => Some(b),
            _ => Some(q),
        })
    }
}

impl From<Vec<JointVector>> for SolutionSet {
    fn from(solutions: Vec<JointVector>) -> Self {
        Self { solutions }
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a JointVector;
    type IntoIter = std::slice::Iter<'a, JointVector>;
    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl IntoIterator for SolutionSet {
    type Item = JointVector;
    type IntoIter = std::vec::IntoIter<JointVector>;
    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

// ---------------------------------------------------------------------------
// SolverInfo
// ---------------------------------------------------------------------------

/// Introspection record for a solver.
///
/// Solvers only fill in `limits`. Names are owned by whoever knows the
/// robot description and are attached with the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverInfo {
    pub limits: JointLimits,
    pub joint_names: Vec<String>,
    pub link_names: Vec<String>,
}

impl SolverInfo {
    pub const fn new(limits: JointLimits) -> Self {
        Self {
            limits,
            joint_names: Vec::new(),
            link_names: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_joint_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.joint_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_link_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.link_names = names.into_iter().map(Into::into).collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
