//! # Physarum Core
//!
//! Shared types for physarum trail-following simulations.
//!
//! This crate holds the pieces every other crate builds on:
//!
//! - **TrailField** — the toroidal scalar grid with decay and diffusion
//! - **Agent** — the trait a particle implements to sense and deposit
//! - **SimulationConfig** — validated construction-time parameters
//! - **PhysarumError** — the error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use physarum_core::prelude::*;
//!
//! let mut field = TrailField::new(16, 16).unwrap();
//! field.deposit_at(3.7, 4.2, 5.0);
//! field.decay_and_diffuse();
//! assert!(field.get(3, 4).unwrap() > 0.1);
//! ```

pub mod types;
pub mod agent;
pub mod field;
pub mod config;
pub mod error;
pub mod prelude;
