//! Physarum Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use physarum_runtime::prelude::*;
//! ```

// Re-export the engine
pub use crate::engine::{EngineStats, StepEngine};

// Re-export metrics
pub use crate::metrics::{
    field_entropy, shannon_entropy, AggregateRow, MetricCollector, MetricSample, TrialAggregate,
};

// Re-export trial orchestration and reporting
pub use crate::trial::{StepProgress, TrialRunner};
pub use crate::report::{RunReport, TrialRecord};

// Re-export from agents
pub use physarum_agents::prelude::*;
