use thiserror::Error;

/// Top-level error type for armik.
///
/// Only configuration problems surface as errors. An unreachable pose is
/// never an error: solvers report it as an empty solution set.
#[derive(Debug, Error)]
pub enum ArmikError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Joint limits error: {0}")]
    Limits(#[from] LimitsError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid joint limits: {0}")]
    Limits(#[from] LimitsError),
}

/// Joint limit construction errors.
///
/// Raised once, when a solver is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LimitsError {
    #[error("Joint limit length mismatch: expected 5, got min={min}, max={max}")]
    LengthMismatch { min: usize, max: usize },

    #[error("Joint limit for joint {joint} is not a number")]
    NotANumber { joint: usize },

    #[error("Joint limit for joint {joint} is inverted: min={min} > max={max}")]
    Inverted { joint: usize, min: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armik_error_from_config_error() {
        let err = ConfigError::InvalidValue {
            field: "geometry.upper_arm".into(),
            message: "must be > 0".into(),
        };
        let armik_err: ArmikError = err.into();
        assert!(matches!(armik_err, ArmikError::Config(_)));
        assert!(armik_err.to_string().contains("upper_arm"));
    }

    #[test]
    fn armik_error_from_limits_error() {
        let err = LimitsError::LengthMismatch { min: 4, max: 5 };
        let armik_err: ArmikError = err.into();
        assert!(matches!(armik_err, ArmikError::Limits(_)));
        assert!(armik_err.to_string().contains("min=4"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn config_error_wraps_limits_error() {
        let config_err: ConfigError = LimitsError::NotANumber { joint: 2 }.into();
        assert!(matches!(
            config_err,
            ConfigError::Limits(LimitsError::NotANumber { joint: 2 })
        ));
    }

    #[test]
    fn limits_error_is_copy() {
        let err = LimitsError::NotANumber { joint: 0 };
        let err2 = err;
        assert_eq!(err, err2);
    }

    #[test]
    fn limits_error_display_messages() {
        assert_eq!(
            LimitsError::LengthMismatch { min: 6, max: 5 }.to_string(),
            "Joint limit length mismatch: expected 5, got min=6, max=5"
        );
        assert_eq!(
            LimitsError::NotANumber { joint: 3 }.to_string(),
            "Joint limit for joint 3 is not a number"
        );
        assert_eq!(
            LimitsError::Inverted {
                joint: 1,
                min: 2.0,
                max: 1.0
            }
            .to_string(),
            "Joint limit for joint 1 is inverted: min=2 > max=1"
        );
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::InvalidValue {
                field: "iterative.damping".into(),
                message: "must be >= 0".into()
            }
            .to_string(),
            "Invalid value for iterative.damping: must be >= 0"
        );
        assert_eq!(
            ConfigError::Limits(LimitsError::LengthMismatch { min: 5, max: 3 }).to_string(),
            "Invalid joint limits: Joint limit length mismatch: expected 5, got min=5, max=3"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<ArmikError>();
    }
}
