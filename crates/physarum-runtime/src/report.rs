//! Serializable results of a run.
//!
//! The runtime performs no file I/O; callers decide where the JSON goes.

use crate::engine::EngineStats;
use crate::metrics::TrialAggregate;
use physarum_core::config::SimulationConfig;
use physarum_core::error::Result;
use serde::Serialize;

/// Everything recorded for one completed trial.
#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub seed: u64,
    pub steps: u64,
    pub entropy: Vec<f64>,
    pub displacement: Vec<f64>,
    pub final_stats: EngineStats,
    pub wall_time_ms: u64,
}

impl TrialRecord {
    pub fn final_entropy(&self) -> Option<f64> {
        self.entropy.last().copied()
    }
}

/// A full multi-trial run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: SimulationConfig,
    /// Base seed; trial `i` ran with `seed + i`.
    pub seed: u64,
    pub trials: Vec<TrialRecord>,
    pub aggregate: TrialAggregate,
    pub wall_time_ms: u64,
}

impl RunReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Mean entropy over trials at the final step.
    pub fn final_entropy_mean(&self) -> Option<f64> {
        self.aggregate.entropy_mean.last().copied()
    }

    /// Mean displacement over trials at the final step.
    pub fn final_displacement_mean(&self) -> Option<f64> {
        self.aggregate.displacement_mean.last().copied()
    }
}
