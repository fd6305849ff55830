//! Model configuration.

use serde::Deserialize;

use crate::error::{ModelError, ModelResult};

/// Configuration for a model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Residual above which a constraint counts as violated.
    pub feasibility_tolerance: f64,
    /// Validate values against domain and bounds when they are assigned.
    pub validate_values: bool,
    /// Include deactivated constraints when checking feasibility.
    pub check_inactive: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            feasibility_tolerance: 1e-6,
            validate_values: true,
            check_inactive: false,
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_feasibility_tolerance(mut self, tolerance: f64) -> Self {
        self.feasibility_tolerance = tolerance;
        self
    }

    pub fn with_validate_values(mut self, validate: bool) -> Self {
        self.validate_values = validate;
        self
    }

    pub fn with_check_inactive(mut self, check: bool) -> Self {
        self.check_inactive = check;
        self
    }

    /// Exact checking: any positive residual is an error.
    pub fn strict() -> Self {
        Self {
            feasibility_tolerance: 0.0,
            validate_values: true,
            check_inactive: false,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        if !self.feasibility_tolerance.is_finite() || self.feasibility_tolerance < 0.0 {
            return Err(ModelError::InvalidConfig(format!(
                "feasibility_tolerance must be a finite non-negative number, got {}",
                self.feasibility_tolerance
            )));
        }
        Ok(())
    }
}
