//! Shared test fixtures and utilities for armik crates.
//!
//! Provides deterministic RNG setup, random arm configurations and pose
//! comparisons that respect the arm's roll ambiguity.

pub mod poses;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use poses::{
    approach_axis, equivalent_joint_vectors, radial_distance, same_roll_and_pitch,
    wrapped_angle_diff,
};
pub use rng::{random_configuration, seeded_rng};
