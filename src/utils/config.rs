use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Levenberg-Marquardt settings for the femoral head sphere fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Hard upper bound on solver iterations
    pub max_iterations: usize,
    /// Relative cost reduction below which the fit is considered converged
    pub function_tolerance: f64,
    /// Relative step size below which the fit is considered converged
    pub parameter_tolerance: f64,
    /// Gradient max-norm below which the fit is considered converged
    pub gradient_tolerance: f64,
    /// Initial damping factor, scaled by the largest diagonal entry of JᵀJ
    pub initial_damping: f64,
}

/// Result presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places for angles in text output
    pub decimals: usize,
    /// Pretty-print JSON reports
    pub pretty_json: bool,
}

/// Complete measurement configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parameter '{parameter}' = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("config file I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no file path set for saving configuration")]
    NoPath,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            function_tolerance: 1e-8,
            parameter_tolerance: 1e-8,
            gradient_tolerance: 1e-8,
            initial_damping: 1e-3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            pretty_json: true,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(invalid("solver.max_iterations", self.max_iterations, "must be at least 1"));
        }
        let tolerances = [
            ("solver.function_tolerance", self.function_tolerance),
            ("solver.parameter_tolerance", self.parameter_tolerance),
            ("solver.gradient_tolerance", self.gradient_tolerance),
            ("solver.initial_damping", self.initial_damping),
        ];
        for (parameter, value) in tolerances {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(parameter, value, "must be positive and finite"));
            }
        }
        Ok(())
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > 10 {
            return Err(invalid("output.decimals", self.decimals, "must be at most 10"));
        }
        Ok(())
    }
}

impl MeterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate()?;
        self.output.validate()
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Loads, validates and persists a [`MeterConfig`]
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: MeterConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: MeterConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let config: MeterConfig = serde_json::from_str(&content)?;

        // Validate before applying
        config.validate()?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let content = serde_json::to_string_pretty(&self.config)?;

        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::NoPath),
        }
    }

    /// Check if configuration has been modified since last load or save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }
}
