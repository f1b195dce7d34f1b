//! Deterministic RNG utilities for reproducible tests.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use armik_core::{ArmGeometry, JointVector};

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw a joint vector away from the arm's singular configurations.
///
/// Geometric angles are sampled first (joint 3 bent by at least 0.3 rad so
/// the elbow is never near full extension) and mapped to joint space with
/// the geometry's home offsets.
pub fn random_configuration(rng: &mut impl Rng, geometry: &ArmGeometry) -> JointVector {
    let j1 = rng.gen_range(-PI..PI);
    let j2 = rng.gen_range(-1.2..1.2);
    let bend = rng.gen_range(0.3..2.5);
    let j3 = if rng.gen_bool(0.5) { bend } else { -bend };
    let j4 = rng.gen_range(-1.5..1.5);
    let j5 = rng.gen_range(-PI..PI);

    let home = &geometry.home_offsets;
    JointVector::new([
        home[0] - j1,
        j2 + home[1],
        j3 + home[2],
        j4 + home[3],
        home[4] - j5,
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
