//! Closed-form solver enumerating every redundancy branch.

use tracing::{debug, trace};

use armik_core::{
    ArmGeometry, InverseKinematics, JointLimits, JointVector, LimitsError, Pose, SolutionSet,
    SolverInfo,
};

use crate::branch::Branch;
use crate::geometric::solve_branch;
use crate::projection::project_goal;

/// Analytical inverse kinematics for the 5-DOF arm.
///
/// Stateless apart from its limits and geometry, which are fixed at
/// construction; a shared instance can be used from any number of threads.
#[derive(Debug, Clone)]
pub struct AnalyticalSolver {
    limits: JointLimits,
    geometry: ArmGeometry,
}

impl AnalyticalSolver {
    /// Create a solver for the default (youBot) geometry.
    ///
    /// # Errors
    ///
    /// Fails if `min` or `max` does not hold exactly five values, or if any
    /// joint's minimum exceeds its maximum.
    pub fn new(min: &[f64], max: &[f64]) -> Result<Self, LimitsError> {
        Ok(Self::from_limits(JointLimits::new(min, max)?))
    }

    /// Create a solver for the default (youBot) geometry from validated
    /// limits.
    pub fn from_limits(limits: JointLimits) -> Self {
        Self {
            limits,
            geometry: ArmGeometry::default(),
        }
    }

    /// Replace the arm geometry. The caller is expected to have validated it.
    #[must_use]
    pub fn with_geometry(mut self, geometry: ArmGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Joint limits fixed at construction.
    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    /// Arm geometry the branches are solved for.
    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    /// Whether `solution` lies within the configured joint limits.
    pub fn is_valid(&self, solution: &JointVector) -> bool {
        self.limits.contains(solution)
    }

    /// All joint vectors reaching `goal` within limits, in branch order.
    ///
    /// The goal's yaw out of the arm plane is dropped first. `initial` does
    /// not influence the result; every branch is always tried. A joint
    /// outside its range is moved by whole turns into it when it can be.
    pub fn solve_all(&self, _initial: &JointVector, goal: &Pose) -> SolutionSet {
        let projected = project_goal(&self.geometry, goal);

        let mut solutions = SolutionSet::new();
        for branch in Branch::ALL {
            let Some(q) = solve_branch(&self.geometry, &projected, branch) else {
                trace!(%branch, "goal out of reach");
                continue;
            };
            match self.limits.shift_into(&q) {
                Some(q) if self.is_valid(&q) => solutions.push(q),
                _ => trace!(%branch, ?q, "outside joint limits"),
            }
        }

        debug!(
            count = solutions.len(),
            x = goal.translation.x,
            y = goal.translation.y,
            z = goal.translation.z,
            "analytical IK finished"
        );
        solutions
    }
}

impl InverseKinematics for AnalyticalSolver {
    fn cart_to_jnt(&self, initial: &JointVector, goal: &Pose) -> SolutionSet {
        self.solve_all(initial, goal)
    }

    fn solver_info(&self) -> SolverInfo {
        SolverInfo::new(self.limits)
    }

    fn name(&self) -> &str {
        "analytical"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
