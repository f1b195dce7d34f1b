//! Damped Least Squares (Levenberg-Marquardt) IK solver.
//!
//! Iteratively solves for joint positions that place the tool at a target
//! pose, using the geometric Jacobian of [`ArmChain`] and the DLS
//! pseudoinverse. This is an alternative variant to the closed-form solver,
//! selected at configuration time; it is not used as a fallback.

use nalgebra::{DMatrix, DVector, UnitQuaternion, Vector3};
use tracing::{debug, warn};

use armik_core::{
    ArmGeometry, DOF, InverseKinematics, IterativeConfig, JointLimits, JointVector, Pose,
    SolutionSet, SolverInfo,
};

use crate::chain::ArmChain;
use crate::projection::project_goal;

/// Rows of the pose error: linear then angular.
const TASK_DIM: usize = 6;

/// Result of an IK solve.
#[derive(Debug, Clone)]
pub struct IkResult {
    /// Solved joint positions.
    pub joint_positions: JointVector,
    /// Whether the solver converged within tolerance.
    pub converged: bool,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final position error (meters).
    pub position_error: f64,
    /// Final orientation error (radians).
    pub orientation_error: f64,
}

/// Damped Least Squares IK solver.
#[derive(Debug, Clone)]
pub struct DlsSolver {
    config: IterativeConfig,
    limits: JointLimits,
    geometry: ArmGeometry,
    chain: ArmChain,
}

impl DlsSolver {
    /// Create a new solver for the default (youBot) geometry.
    pub fn new(limits: JointLimits, config: IterativeConfig) -> Self {
        let geometry = ArmGeometry::default();
        let chain = ArmChain::from_geometry(&geometry);
        Self {
            config,
            limits,
            geometry,
            chain,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults(limits: JointLimits) -> Self {
        Self::new(limits, IterativeConfig::default())
    }

    /// Replace the arm geometry and rebuild the chain.
    #[must_use]
    pub fn with_geometry(mut self, geometry: ArmGeometry) -> Self {
        self.chain = ArmChain::from_geometry(&geometry);
        self.geometry = geometry;
        self
    }

    pub fn chain(&self) -> &ArmChain {
        &self.chain
    }

    /// Solve IK for `goal`, starting from `initial`.
    ///
    /// The goal is projected onto the reachable orientations first, so a
    /// yawed goal can still converge.
    pub fn solve(&self, initial: &JointVector, goal: &Pose) -> IkResult {
        let target = project_goal(&self.geometry, goal);
        let mut q = *initial;

        for iteration in 0..self.config.max_iterations {
            let tool = self.chain.forward_kinematics(&q);
            let (pos_err, ori_err, error_vec) = compute_error(&tool, &target);

            if pos_err < self.config.position_tolerance && ori_err < self.config.angle_tolerance {
                return IkResult {
                    joint_positions: q,
                    converged: true,
                    iterations: iteration,
                    position_error: pos_err,
                    orientation_error: ori_err,
                };
            }

            let jacobian = compute_jacobian(&self.chain, &q);

            // DLS: dq = J^T (J J^T + lambda^2 I)^{-1} * error
            let jjt = &jacobian * jacobian.transpose();
            let damped = jjt
                + DMatrix::identity(TASK_DIM, TASK_DIM) * (self.config.damping * self.config.damping);
            let Some(damped_inv) = damped.try_inverse() else {
                warn!(iteration, "damped system is singular, giving up");
                return IkResult {
                    joint_positions: q,
                    converged: false,
                    iterations: iteration,
                    position_error: pos_err,
                    orientation_error: ori_err,
                };
            };

            let dq = jacobian.transpose() * damped_inv * error_vec;
            for joint in 0..DOF {
                q[joint] += dq[joint];
            }

            self.limits.clamp(&mut q);
        }

        // Didn't converge
        let tool = self.chain.forward_kinematics(&q);
        let (pos_err, ori_err, _) = compute_error(&tool, &target);

        IkResult {
            joint_positions: q,
            converged: false,
            iterations: self.config.max_iterations,
            position_error: pos_err,
            orientation_error: ori_err,
        }
    }
}

impl InverseKinematics for DlsSolver {
    fn cart_to_jnt(&self, initial: &JointVector, goal: &Pose) -> SolutionSet {
        let result = self.solve(initial, goal);
        debug!(
            converged = result.converged,
            iterations = result.iterations,
            position_error = result.position_error,
            orientation_error = result.orientation_error,
            "iterative IK finished"
        );

        let mut solutions = SolutionSet::new();
        if result.converged && self.limits.contains(&result.joint_positions) {
            solutions.push(result.joint_positions);
        }
        solutions
    }

    fn solver_info(&self) -> SolverInfo {
        SolverInfo::new(self.limits)
    }

    fn name(&self) -> &str {
        "iterative"
    }
}

/// Compute the error vector between current tool pose and target.
///
/// Returns (position_error_norm, orientation_error_norm, error_vector).
fn compute_error(tool: &Pose, target: &Pose) -> (f64, f64, DVector<f64>) {
    let pos_err = target.translation.vector - tool.translation.vector;

    // Orientation error as axis-angle
    let rot_err = target.rotation * tool.rotation.inverse();
    let ori_err = orientation_error(&rot_err);

    let error = DVector::from_column_slice(&[
        pos_err.x, pos_err.y, pos_err.z, ori_err.x, ori_err.y, ori_err.z,
    ]);
    (pos_err.norm(), ori_err.norm(), error)
}

/// Extract orientation error as a 3-vector (axis * angle) from a unit quaternion.
fn orientation_error(q: &UnitQuaternion<f64>) -> Vector3<f64> {
    q.scaled_axis()
}

/// Compute the 6x5 geometric Jacobian (linear rows, then angular rows).
fn compute_jacobian(chain: &ArmChain, q: &JointVector) -> DMatrix<f64> {
    let (origins, axes, tool) = chain.joint_frames(q);
    let mut jacobian = DMatrix::zeros(TASK_DIM, DOF);

    for i in 0..DOF {
        let z_i = &axes[i];
        // Linear velocity: z_i x (tool - o_i)
        let cross = z_i.cross(&(tool - origins[i]));
        jacobian[(0, i)] = cross.x;
        jacobian[(1, i)] = cross.y;
        jacobian[(2, i)] = cross.z;
        // Angular velocity: z_i
        jacobian[(3, i)] = z_i.x;
        jacobian[(4, i)] = z_i.y;
        jacobian[(5, i)] = z_i.z;
    }

    jacobian
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
