use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DOF, JointLimits};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_base_offset() -> [f64; 2] {
    [0.024, 0.096]
}
const fn default_shoulder_offset() -> [f64; 2] {
    [0.033, 0.019]
}
const fn default_upper_arm() -> f64 {
    0.155
}
const fn default_forearm() -> f64 {
    0.135
}
const fn default_wrist_to_tool() -> f64 {
    0.13
}
fn default_home_offsets() -> [f64; DOF] {
    [169.0_f64, 65.0, -146.0, 102.5, 167.5].map(f64::to_radians)
}
const fn default_max_iterations() -> u32 {
    200
}
const fn default_position_tolerance() -> f64 {
    1e-6
}
const fn default_angle_tolerance() -> f64 {
    1e-5
}
const fn default_damping() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// ArmGeometry
// ---------------------------------------------------------------------------

/// Link dimensions and home offsets of the 5-DOF arm.
///
/// The solver works with geometric angles measured from the "candle" pose
/// (arm pointing straight up). `home_offsets` maps those to joint space:
/// joints 1 and 5 turn against the geometric angle (`q = offset - angle`),
/// joints 2 to 4 with it (`q = angle + offset`). Defaults describe the
/// KUKA youBot arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmGeometry {
    /// Joint 1 axis position `[x, z]` in the base frame (meters).
    #[serde(default = "default_base_offset")]
    pub base_offset: [f64; 2],

    /// Joint 2 axis position `[x, z]` in the frame after joint 1 (meters).
    #[serde(default = "default_shoulder_offset")]
    pub shoulder_offset: [f64; 2],

    /// Joint 2 to joint 3 distance (meters).
    #[serde(default = "default_upper_arm")]
    pub upper_arm: f64,

    /// Joint 3 to joint 4 distance (meters).
    #[serde(default = "default_forearm")]
    pub forearm: f64,

    /// Joint 4 to tool frame distance along the approach axis (meters).
    #[serde(default = "default_wrist_to_tool")]
    pub wrist_to_tool: f64,

    /// Joint-space value of each joint in the candle pose (radians).
    #[serde(default = "default_home_offsets")]
    pub home_offsets: [f64; DOF],
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            base_offset: default_base_offset(),
            shoulder_offset: default_shoulder_offset(),
            upper_arm: default_upper_arm(),
            forearm: default_forearm(),
            wrist_to_tool: default_wrist_to_tool(),
            home_offsets: default_home_offsets(),
        }
    }
}

impl ArmGeometry {
    /// Validate link dimensions. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, length) in [
            ("geometry.upper_arm", self.upper_arm),
            ("geometry.forearm", self.forearm),
        ] {
            if !(length.is_finite() && length > 0.0) {
                return Err(invalid(field, format!("must be finite and > 0, got {length}")));
            }
        }
        if !(self.wrist_to_tool.is_finite() && self.wrist_to_tool >= 0.0) {
            return Err(invalid(
                "geometry.wrist_to_tool",
                format!("must be finite and >= 0, got {}", self.wrist_to_tool),
            ));
        }
        let offsets_finite = self
            .base_offset
            .iter()
            .chain(self.shoulder_offset.iter())
            .chain(self.home_offsets.iter())
            .all(|v| v.is_finite());
        if !offsets_finite {
            return Err(invalid("geometry", "offsets must be finite".into()));
        }
        Ok(())
    }

    /// Longest distance joint 2 can put joint 4 at.
    pub fn max_planar_reach(&self) -> f64 {
        self.upper_arm + self.forearm
    }
}

// ---------------------------------------------------------------------------
// LimitsConfig
// ---------------------------------------------------------------------------

/// Joint limits as read from a file, before length validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = JointLimits::youbot();
        Self {
            min: limits.min().to_vec(),
            max: limits.max().to_vec(),
        }
    }
}

impl LimitsConfig {
    pub fn to_limits(&self) -> Result<JointLimits, ConfigError> {
        Ok(JointLimits::new(&self.min, &self.max)?)
    }
}

impl From<&JointLimits> for LimitsConfig {
    fn from(limits: &JointLimits) -> Self {
        Self {
            min: limits.min().to_vec(),
            max: limits.max().to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// SolverKind / IterativeConfig
// ---------------------------------------------------------------------------

/// Which inverse kinematics variant a service should instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Closed-form geometric solver enumerating all redundant branches.
    #[default]
    Analytical,
    /// Damped least squares, warm-started from the initial joint vector.
    Iterative,
}

/// Configuration for the damped least squares solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeConfig {
    /// Maximum solver iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Position error tolerance (meters).
    #[serde(default = "default_position_tolerance")]
    pub position_tolerance: f64,

    /// Orientation error tolerance (radians).
    #[serde(default = "default_angle_tolerance")]
    pub angle_tolerance: f64,

    /// Damping factor (lambda). Higher = more robust near singularities,
    /// but slower convergence.
    #[serde(default = "default_damping")]
    pub damping: f64,
}

impl Default for IterativeConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            position_tolerance: default_position_tolerance(),
            angle_tolerance: default_angle_tolerance(),
            damping: default_damping(),
        }
    }
}

impl IterativeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(invalid("iterative.max_iterations", "must be > 0".into()));
        }
        for (field, value) in [
            ("iterative.position_tolerance", self.position_tolerance),
            ("iterative.angle_tolerance", self.angle_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be finite and > 0, got {value}")));
            }
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(invalid(
                "iterative.damping",
                format!("must be finite and >= 0, got {}", self.damping),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// IkConfig
// ---------------------------------------------------------------------------

/// Top-level solver configuration, usually loaded from TOML.
///
/// ```toml
/// solver = "analytical"
///
/// [limits]
/// min = [-3.14, -3.14, -3.14, -3.14, -3.14]
/// max = [3.14, 3.14, 3.14, 3.14, 3.14]
///
/// [geometry]
/// upper_arm = 0.155
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IkConfig {
    #[serde(default)]
    pub solver: SolverKind,

    #[serde(default)]
    pub geometry: ArmGeometry,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub iterative: IterativeConfig,
}

impl IkConfig {
    /// Validate every section. Returns Err on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.limits.to_limits()?;
        self.iterative.validate()?;
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
