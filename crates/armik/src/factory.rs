//! Configuration-time selection of a solver variant.

use tracing::debug;

use armik_core::{ArmikError, IkConfig, InverseKinematics, SolverKind};

use crate::analytical::AnalyticalSolver;
use crate::iterative::DlsSolver;

/// Validate `config` and build the solver it selects.
///
/// # Errors
///
/// Returns the first invalid configuration value, including joint limits of
/// the wrong size.
pub fn build_solver(config: &IkConfig) -> Result<Box<dyn InverseKinematics>, ArmikError> {
    config.validate()?;
    let limits = config.limits.to_limits()?;
    let geometry = config.geometry.clone();

    let solver: Box<dyn InverseKinematics> = match config.solver {
        SolverKind::Analytical => {
            Box::new(AnalyticalSolver::from_limits(limits).with_geometry(geometry))
        }
        SolverKind::Iterative => Box::new(
            DlsSolver::new(limits, config.iterative.clone()).with_geometry(geometry),
        ),
    };
    debug!(solver = solver.name(), "built inverse kinematics solver");
    Ok(solver)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
