//! # Physarum
//!
//! Emergent trail networks from many simple particles.
//!
//! Particles sense a diffusing scalar field on a toroidal grid, turn toward
//! the strongest reading, move, and deposit trail. The field decays and
//! diffuses once per step. Over many steps the trail condenses into a
//! network, which shows up as falling field entropy and settling particle
//! displacement.
//!
//! ## Quick Start
//!
//! ```rust
//! use physarum::prelude::*;
//!
//! let mut config = SimulationConfig::default();
//! config.field.width = 32;
//! config.field.height = 32;
//! config.particles.count = 50;
//! config.run.steps = 20;
//! config.run.trials = 2;
//! config.run.seed = Some(42);
//!
//! let mut runner = TrialRunner::new(config).unwrap();
//! let report = runner.run().unwrap();
//!
//! for row in report.aggregate.rows().iter().step_by(5) {
//!     println!(
//!         "step {:>3}: entropy {:.4} ± {:.4}, displacement {:.3}",
//!         row.step, row.entropy_mean, row.entropy_std, row.displacement_mean
//!     );
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`physarum_core`] - Trail field, `Agent` trait, configuration and errors
//! - [`physarum_agents`] - The sensing/steering `Particle` and spawning
//! - [`physarum_runtime`] - Step engine, metric collection, trial runner
//!
//! ## The Step
//!
//! 1. Every particle reads three sensors (left, forward, right) and steers:
//!    straight if forward beats both sides, otherwise toward the stronger
//!    side, or a random turn in `[-turn_angle, turn_angle)` when the sides tie
//! 2. Particles move `speed` along their heading and wrap around the edges
//! 3. Deposits land in the cell under each particle
//! 4. The field decays, then diffuses with a 4-neighbour Laplacian
//!
//! Sensing happens before any deposit of the same step, so results do not
//! depend on particle order. With the `parallel` feature steps 1 and 2 run
//! on rayon.
//!
//! ## Driving the Engine Directly
//!
//! ```rust
//! use physarum::prelude::*;
//!
//! let field = TrailField::from_config(&FieldConfig::new(20, 20)).unwrap();
//! let particles = vec![
//!     Particle::with_seed(Position::new(5.0, 5.0), 0.0, 1),
//!     Particle::with_seed(Position::new(15.0, 5.0), 3.0, 2),
//! ];
//! let mut engine = StepEngine::new(field, particles);
//! let mut collector = MetricCollector::new();
//!
//! for _ in 0..10 {
//!     let sample = engine.step_and_record(&mut collector).unwrap();
//!     assert!(sample.entropy > 0.0);
//! }
//! assert_eq!(engine.tick(), 10);
//! ```

// Re-export all subcrates
pub use physarum_core as core;
pub use physarum_runtime as runtime;
pub use physarum_agents as agents;

/// Prelude module for convenient imports.
///
/// ```rust
/// use physarum::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use physarum_core::types::{Position, Tick};
    pub use physarum_core::field::{Deposit, FieldSnapshot, TrailField};
    pub use physarum_core::config::{FieldConfig, ParticleConfig, RunConfig, SimulationConfig};

    // Core traits
    pub use physarum_core::agent::Agent;

    // Error types
    pub use physarum_core::error::{PhysarumError, Result};

    // Agents
    pub use physarum_agents::particle::{Particle, SteeringDecision};
    pub use physarum_agents::spawn::spawn_particles;

    // Runtime
    pub use physarum_runtime::engine::{EngineStats, StepEngine};
    pub use physarum_runtime::metrics::{MetricCollector, MetricSample, TrialAggregate};
    pub use physarum_runtime::trial::{StepProgress, TrialRunner};
    pub use physarum_runtime::report::{RunReport, TrialRecord};
}
