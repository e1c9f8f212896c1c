//! Physarum Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use physarum_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{Position, Tick};

// Re-export the Agent trait
pub use crate::agent::Agent;

// Re-export the field
pub use crate::field::{Deposit, FieldSnapshot, TrailField};

// Re-export configuration
pub use crate::config::{FieldConfig, ParticleConfig, RunConfig, SimulationConfig};

// Re-export error types
pub use crate::error::{AggregationError, ConfigError, MetricError, PhysarumError, Result};
