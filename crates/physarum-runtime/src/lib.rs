//! # Physarum Runtime
//!
//! Step engine, metrics and trial orchestration.
//!
//! The runtime owns the per-step loop: every agent senses and moves
//! against the same field, the deferred deposits land, the field decays
//! and diffuses, and a metric sample is taken at the step boundary.
//! [`trial::TrialRunner`] repeats that over independent, seeded trials and
//! reduces the per-trial sequences into a [`metrics::TrialAggregate`].

pub mod engine;
pub mod metrics;
pub mod trial;
pub mod report;
pub mod prelude;
