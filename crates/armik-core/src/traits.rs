use crate::types::{JointVector, Pose, SolutionSet, SolverInfo};

// ---------------------------------------------------------------------------
// InverseKinematics
// ---------------------------------------------------------------------------

/// Capability shared by every inverse kinematics variant.
///
/// A surrounding service picks one implementation at configuration time and
/// talks to it only through this trait.
pub trait InverseKinematics: Send + Sync {
    /// Compute joint vectors placing the tool at `goal`.
    ///
    /// `initial` is the caller's current configuration. Closed-form solvers
    /// may ignore it; iterative solvers use it as the starting point. An
    /// empty result means the goal is unreachable under the solver's limits.
    fn cart_to_jnt(&self, initial: &JointVector, goal: &Pose) -> SolutionSet;

    /// Numeric limits this solver was built with.
    fn solver_info(&self) -> SolverInfo;

    /// Human-readable name for this solver.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
