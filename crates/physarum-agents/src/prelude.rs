//! Physarum Agents Prelude — convenient imports for common usage.
//!
//! ```rust
//! use physarum_agents::prelude::*;
//! ```

// Re-export agent types
pub use crate::particle::{
    steering_decision, Particle, ParticleSnapshot, SensorReading, SteeringDecision,
};
pub use crate::spawn::spawn_particles;

// Re-export from core
pub use physarum_core::prelude::*;
