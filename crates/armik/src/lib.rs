//! Inverse kinematics for a 5-DOF youBot-style arm.
//!
//! The closed-form [`AnalyticalSolver`] decomposes the chain into a base
//! rotation, a two-link planar reach, a wrist pitch and a wrist roll, and
//! returns every redundant configuration that respects the joint limits.
//! [`DlsSolver`] is an iterative alternative behind the same
//! [`InverseKinematics`] trait.
//!
//! # Pipeline
//!
//! ```text
//! goal ──► project_goal ──► solve_branch x8 ──► JointLimits::contains ──► SolutionSet
//!          (drop yaw)       (Branch::ALL)       (filter)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use armik::prelude::*;
//!
//! let solver = AnalyticalSolver::new(&[-3.14; 5], &[3.14; 5]).unwrap();
//! let goal = pose_from_xyz_rpy(0.3, 0.0, 0.2, 0.0, 0.0, 0.0);
//! let solutions = solver.cart_to_jnt(&JointVector::zeros(), &goal);
//! assert!(!solutions.is_empty());
//! ```

pub mod analytical;
pub mod branch;
pub mod chain;
pub mod factory;
pub mod geometric;
pub mod iterative;
pub mod projection;

pub use analytical::AnalyticalSolver;
pub use armik_core::InverseKinematics;
pub use branch::Branch;
pub use chain::ArmChain;
pub use factory::build_solver;
pub use geometric::solve_branch;
pub use iterative::{DlsSolver, IkResult};
pub use projection::project_goal;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analytical::AnalyticalSolver;
    pub use crate::branch::Branch;
    pub use crate::chain::ArmChain;
    pub use crate::factory::build_solver;
    pub use crate::iterative::DlsSolver;
    pub use armik_core::{
        ArmGeometry, IkConfig, InverseKinematics, JointLimits, JointVector, Pose, SolutionSet,
        pose_from_xyz_rpy,
    };
}
