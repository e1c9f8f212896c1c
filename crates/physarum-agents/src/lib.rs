//! # Physarum Agents
//!
//! Reference agent implementations for physarum trail simulations.
//!
//! - **Particle** — senses forward/left/right, steers toward the strongest
//!   trail, moves on a torus and deposits a fixed amount each step
//! - **spawn** — seeded placement of a fresh particle population

pub mod particle;
pub mod spawn;
pub mod prelude;
