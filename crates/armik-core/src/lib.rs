//! Core types, configuration, errors and the solver trait for 5-DOF arm
//! inverse kinematics.
//!
//! Solver implementations live in the `armik` crate; this crate only holds
//! what every solver variant and its callers share.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{ArmGeometry, IkConfig, IterativeConfig, LimitsConfig, SolverKind};
pub use error::{ArmikError, ConfigError, LimitsError};
pub use traits::InverseKinematics;
pub use types::{
    DOF, JointLimits, JointVector, Pose, SolutionSet, SolverInfo, pose_from_xyz_rpy,
};
