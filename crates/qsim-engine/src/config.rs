//! Engine configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QSIM_` prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use qsim_ir::{DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS};

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Admission limits on circuit size.
    #[serde(default)]
    pub limits: Limits,

    /// Floating-point tolerances.
    #[serde(default)]
    pub numerics: Numerics,

    /// Parallel kernel settings.
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Logging settings for front ends.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Circuit size limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Largest qubit count accepted when a circuit is created.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Largest state vector the evolution engine will allocate.
    #[serde(default = "default_max_amplitudes")]
    pub max_amplitudes: u64,
}

/// Numeric tolerances for evolution and measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Numerics {
    /// Norm drift above which the state is renormalized.
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,

    /// Norm drift above which a numeric-instability warning is raised.
    #[serde(default = "default_instability_threshold")]
    pub instability_threshold: f64,

    /// Outcome probability treated as zero by the sampler.
    #[serde(default = "default_degenerate_epsilon")]
    pub degenerate_epsilon: f64,
}

/// Parallel execution of gate kernels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Use parallel kernels (needs the `parallel` feature).
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum amplitude count before kernels go parallel.
    #[serde(default = "default_parallel_threshold")]
    pub threshold: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_max_qubits() -> u32 {
    DEFAULT_MAX_QUBITS
}

fn default_max_amplitudes() -> u64 {
    1 << DEFAULT_MAX_QUBITS
}

fn default_drift_tolerance() -> f64 {
    1e-10
}

fn default_instability_threshold() -> f64 {
    1e-6
}

fn default_degenerate_epsilon() -> f64 {
    1e-12
}

fn default_true() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    1 << 14
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_qubits: default_max_qubits(),
            max_amplitudes: default_max_amplitudes(),
        }
    }
}

impl Default for Numerics {
    fn default() -> Self {
        Numerics {
            drift_tolerance: default_drift_tolerance(),
            instability_threshold: default_instability_threshold(),
            degenerate_epsilon: default_degenerate_epsilon(),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            enabled: default_true(),
            threshold: default_parallel_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load .env file if it exists
    /// 2. Load from file if provided, defaults otherwise
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => EngineConfig::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Only variables that are set (and parse) override the current values.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }

        // Limits
        if let Some(v) = parsed(&lookup, "QSIM_MAX_QUBITS") {
            self.limits.max_qubits = v;
        }
        if let Some(v) = parsed(&lookup, "QSIM_MAX_AMPLITUDES") {
            self.limits.max_amplitudes = v;
        }

        // Numerics
        if let Some(v) = parsed(&lookup, "QSIM_DRIFT_TOLERANCE") {
            self.numerics.drift_tolerance = v;
        }
        if let Some(v) = parsed(&lookup, "QSIM_INSTABILITY_THRESHOLD") {
            self.numerics.instability_threshold = v;
        }

        // Parallel kernels
        if let Some(v) = parsed(&lookup, "QSIM_PARALLEL") {
            self.parallel.enabled = v;
        }
        if let Some(v) = parsed(&lookup, "QSIM_PARALLEL_THRESHOLD") {
            self.parallel.threshold = v;
        }

        // Logging
        if let Some(v) = lookup("QSIM_LOG_LEVEL") {
            self.logging.level = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_qubits < 1 || self.limits.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(ConfigError::ValidationError(format!(
                "limits.max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                self.limits.max_qubits
            )));
        }
        if self.limits.max_amplitudes < 2 {
            return Err(ConfigError::ValidationError(
                "limits.max_amplitudes must be at least 2".to_string(),
            ));
        }

        let n = &self.numerics;
        for (name, value) in [
            ("numerics.drift_tolerance", n.drift_tolerance),
            ("numerics.instability_threshold", n.instability_threshold),
            ("numerics.degenerate_epsilon", n.degenerate_epsilon),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if n.instability_threshold < n.drift_tolerance {
            return Err(ConfigError::ValidationError(
                "numerics.instability_threshold must not be below numerics.drift_tolerance"
                    .to_string(),
            ));
        }

        if self.parallel.threshold < 2 {
            return Err(ConfigError::ValidationError(
                "parallel.threshold must be at least 2".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.limits.max_qubits, 20);
        assert_eq!(config.limits.max_amplitudes, 1 << 20);
        assert!(config.parallel.enabled);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EngineConfig::from_yaml("limits:\n  max_qubits: 8\n").unwrap();
        assert_eq!(config.limits.max_qubits, 8);
        assert_eq!(config.limits.max_amplitudes, 1 << 20);
        assert_eq!(config.numerics, Numerics::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
limits:
  max_qubits: 12
  max_amplitudes: 4096
numerics:
  drift_tolerance: 1.0e-9
  instability_threshold: 1.0e-5
  degenerate_epsilon: 1.0e-14
parallel:
  enabled: false
  threshold: 1024
logging:
  level: debug
";
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.limits.max_amplitudes, 4096);
        assert!(!config.parallel.enabled);
        assert_eq!(config.parallel.threshold, 1024);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_yaml_validation_rejects_bad_limits() {
        assert!(matches!(
            EngineConfig::from_yaml("limits:\n  max_qubits: 0\n"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("limits:\n  max_qubits: 40\n"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("numerics:\n  instability_threshold: 1.0e-12\n"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("limits: 7"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QSIM_MAX_QUBITS", "6"),
            ("QSIM_PARALLEL", "false"),
            ("QSIM_PARALLEL_THRESHOLD", "not-a-number"),
            ("QSIM_LOG_LEVEL", "trace"),
        ]
        .into_iter()
        .collect();

        let config = EngineConfig::default().merge_env(|k| vars.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.limits.max_qubits, 6);
        assert!(!config.parallel.enabled);
        assert_eq!(config.parallel.threshold, 1 << 14);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qsim.yaml");
        std::fs::write(&path, "limits:\n  max_qubits: 4\n  max_amplitudes: 16\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.limits.max_qubits, 4);

        assert!(matches!(
            EngineConfig::from_file(dir.path().join("missing.yaml")),
            Err(ConfigError::IoError(_))
        ));
    }
}
