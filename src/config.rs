// src/config.rs - planner parameter file loading

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid parameter value: {0}")]
    Invalid(String),
}

/// Boundary states, limits and sampling settings for one planning run.
///
/// `p0`, `pe`, `amax` and `vmax` are required; everything else has a
/// default. `jmax` must be present to run the jerk planner.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Start position (m)
    pub p0: f64,

    /// End position (m)
    pub pe: f64,

    /// Start velocity (m/s)
    #[serde(default)]
    pub v0: f64,

    /// End velocity (m/s)
    #[serde(default)]
    pub ve: f64,

    /// Acceleration limit (m/s²)
    pub amax: f64,

    /// Velocity limit (m/s)
    pub vmax: f64,

    /// Deceleration limit (m/s²), defaults to `amax` when absent
    #[serde(default)]
    pub dmax: Option<f64>,

    /// Jerk limit (m/s³), required by the jerk planner only
    #[serde(default)]
    pub jmax: Option<f64>,

    /// Start time (s)
    #[serde(default)]
    pub t0: f64,

    /// Sampling step for data export (s)
    #[serde(default = "default_dt")]
    pub dt: f64,

    #[serde(default)]
    pub verbose: bool,
}

fn default_dt() -> f64 {
    0.01
}

impl PlanConfig {
    /// Load and validate a parameter file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: PlanConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Only the sampling step is checked here; limit positivity is
    /// enforced by the planners themselves at assignment time.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_file_with_defaults() {
        let config = PlanConfig::parse(
            r#"
            p0 = 0.0
            pe = 10.0
            amax = 2.0
            vmax = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.p0, 0.0);
        assert_eq!(config.pe, 10.0);
        assert_eq!(config.v0, 0.0);
        assert_eq!(config.ve, 0.0);
        assert_eq!(config.t0, 0.0);
        assert_eq!(config.dt, 0.01);
        assert_eq!(config.dmax, None);
        assert_eq!(config.jmax, None);
        assert!(!config.verbose);
    }

    #[test]
    fn parses_full_file() {
        let config = PlanConfig::parse(
            r#"
            p0 = 1.0
            pe = -4.0
            v0 = 0.5
            ve = 0.1
            amax = 2.0
            dmax = 3.0
            vmax = 5.0
            jmax = 1.0
            t0 = 2.0
            dt = 0.001
            verbose = true
            "#,
        )
        .unwrap();
        assert_eq!(config.dmax, Some(3.0));
        assert_eq!(config.jmax, Some(1.0));
        assert_eq!(config.dt, 0.001);
        assert!(config.verbose);
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = PlanConfig::parse("p0 = 0.0\npe = 1.0\namax = 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let err = PlanConfig::parse("p0 = 0.0\npe = 1.0\namax = 2.0\nvmax = 5.0\ndt = 0.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
