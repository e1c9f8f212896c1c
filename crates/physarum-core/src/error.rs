//! Error types for physarum simulations.
//!
//! Every failure is a caller error or a degenerate numerical state; the
//! simulation loop itself has no transient failure mode to retry.

use std::error::Error;
use std::fmt;

/// Result type for physarum operations.
pub type Result<T> = std::result::Result<T, PhysarumError>;

/// Errors that can occur while configuring, running or summarizing a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysarumError {
    /// Configuration errors, raised before any step runs.
    Config(ConfigError),
    /// Metric computation errors.
    Metric(MetricError),
    /// Cross-trial aggregation errors.
    Aggregation(AggregationError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for PhysarumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysarumError::Config(e) => write!(f, "Config error: {}", e),
            PhysarumError::Metric(e) => write!(f, "Metric error: {}", e),
            PhysarumError::Aggregation(e) => write!(f, "Aggregation error: {}", e),
            PhysarumError::Io(msg) => write!(f, "I/O error: {}", msg),
            PhysarumError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for PhysarumError {}

impl From<std::io::Error> for PhysarumError {
    fn from(e: std::io::Error) -> Self {
        PhysarumError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PhysarumError {
    fn from(e: serde_json::Error) -> Self {
        PhysarumError::Serialization(e.to_string())
    }
}

impl From<ConfigError> for PhysarumError {
    fn from(e: ConfigError) -> Self {
        PhysarumError::Config(e)
    }
}

impl From<MetricError> for PhysarumError {
    fn from(e: MetricError) -> Self {
        PhysarumError::Metric(e)
    }
}

impl From<AggregationError> for PhysarumError {
    fn from(e: AggregationError) -> Self {
        PhysarumError::Aggregation(e)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

/// Metric computation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricError {
    /// The field has no mass to normalize (all cells zero, or the total is not finite).
    DegenerateField { total: f64 },
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::DegenerateField { total } => write!(
                f,
                "Entropy is undefined for a field with total intensity {}",
                total
            ),
        }
    }
}

/// Cross-trial aggregation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// No trial has been archived yet.
    NoTrials,
    /// A trial's metric sequence differs in length from the first trial's.
    LengthMismatch {
        trial: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationError::NoTrials => write!(f, "No trials have been archived"),
            AggregationError::LengthMismatch {
                trial,
                expected,
                found,
            } => write!(
                f,
                "Trial {} recorded {} samples, expected {}",
                trial, found, expected
            ),
        }
    }
}

// Convenience constructors
impl PhysarumError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PhysarumError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        PhysarumError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn degenerate_field(total: f64) -> Self {
        PhysarumError::Metric(MetricError::DegenerateField { total })
    }

    /// Whether this error was raised by configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(self, PhysarumError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_field_name() {
        let err = PhysarumError::invalid_config("width", "0", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Config error: Invalid value for width: 0 (must be at least 1)"
        );
        assert!(err.is_config());
    }

    #[test]
    fn length_mismatch_reports_trial() {
        let err: PhysarumError = AggregationError::LengthMismatch {
            trial: 2,
            expected: 10,
            found: 7,
        }
        .into();
        assert!(err.to_string().contains("Trial 2 recorded 7 samples, expected 10"));
        assert!(!err.is_config());
    }
}
