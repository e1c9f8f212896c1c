//! Convergence metrics for trail simulations.
//!
//! Two scalars are sampled once per step:
//! - Entropy: Shannon entropy of the normalized field (how spread out the trail is)
//! - Mean displacement: average distance each agent moved since the last sample
//!
//! The collector keeps the current trial's sequences, archives them when
//! the trial ends, and reduces the archive into per-step means and
//! standard deviations.

use physarum_core::agent::Agent;
use physarum_core::error::{AggregationError, PhysarumError, Result};
use physarum_core::field::TrailField;
use physarum_core::types::Position;
use serde::Serialize;

/// One step's worth of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSample {
    pub entropy: f64,
    pub mean_displacement: f64,
}

/// Shannon entropy `-sum(p ln p)` of a set of non-negative cells.
///
/// Zero cells are skipped (`0 ln 0` counts as zero). A field with no mass
/// has no distribution to measure and returns
/// [`MetricError::DegenerateField`](physarum_core::error::MetricError::DegenerateField).
pub fn shannon_entropy(cells: &[f64]) -> Result<f64> {
    let total: f64 = cells.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(PhysarumError::degenerate_field(total));
    }

    let entropy = cells
        .iter()
        .map(|&v| v / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum::<f64>();

    // A single occupied cell can round to -0.0.
    Ok(entropy.max(0.0))
}

/// Entropy of the whole field.
pub fn field_entropy(field: &TrailField) -> Result<f64> {
    shannon_entropy(field.grid())
}

/// Cross-trial mean and standard deviation per step.
#[derive(Debug, Clone, Serialize)]
pub struct TrialAggregate {
    pub trials: usize,
    pub steps: usize,
    pub entropy_mean: Vec<f64>,
    pub entropy_std: Vec<f64>,
    pub displacement_mean: Vec<f64>,
    pub displacement_std: Vec<f64>,
}

/// One step of a [`TrialAggregate`], flattened for tabular output.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateRow {
    pub step: usize,
    pub entropy_mean: f64,
    pub entropy_std: f64,
    pub displacement_mean: f64,
    pub displacement_std: f64,
}

impl TrialAggregate {
    /// The aggregate as one row per step.
    pub fn rows(&self) -> Vec<AggregateRow> {
        (0..self.steps)
            .map(|step| AggregateRow {
                step,
                entropy_mean: self.entropy_mean[step],
                entropy_std: self.entropy_std[step],
                displacement_mean: self.displacement_mean[step],
                displacement_std: self.displacement_std[step],
            })
            .collect()
    }

    /// The last step's row, if any steps were recorded.
    pub fn last(&self) -> Option<AggregateRow> {
        self.rows().pop()
    }
}

/// Population mean and standard deviation of each column across `series`.
///
/// All series must already have the same length.
fn column_stats(series: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let n = series.len() as f64;
    let len = series.first().map_or(0, |s| s.len());
    let mut means = Vec::with_capacity(len);
    let mut stds = Vec::with_capacity(len);

    for step in 0..len {
        let mean = series.iter().map(|s| s[step]).sum::<f64>() / n;
        let variance = series
            .iter()
            .map(|s| (s[step] - mean).powi(2))
            .sum::<f64>()
            / n;
        means.push(mean);
        stds.push(variance.sqrt());
    }

    (means, stds)
}

/// Records per-step metrics for the current trial and archives finished trials.
#[derive(Debug, Clone, Default)]
pub struct MetricCollector {
    entropy_log: Vec<f64>,
    displacement_log: Vec<f64>,
    /// Positions at the previous sample. `None` until the first sample of a trial.
    previous_positions: Option<Vec<Position>>,
    entropy_trials: Vec<Vec<f64>>,
    displacement_trials: Vec<Vec<f64>>,
}

impl MetricCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entropy of the field; see [`shannon_entropy`].
    pub fn entropy(&self, field: &TrailField) -> Result<f64> {
        field_entropy(field)
    }

    /// Mean Euclidean distance each agent moved since the previous call.
    ///
    /// The first call of a trial returns 0.0 and only stores the baseline.
    /// Distances ignore the torus, so an agent that wrapped across an edge
    /// reports the long way round.
    pub fn mean_displacement<A: Agent>(&mut self, agents: &[A]) -> f64 {
        let positions: Vec<Position> = agents.iter().map(|a| a.position()).collect();
        self.mean_displacement_of(positions)
    }

    /// [`Self::mean_displacement`] over raw positions.
    pub fn mean_displacement_of(&mut self, positions: Vec<Position>) -> f64 {
        let displacement = match &self.previous_positions {
            Some(previous) if previous.len() == positions.len() && !positions.is_empty() => {
                let total: f64 = previous
                    .iter()
                    .zip(&positions)
                    .map(|(before, after)| before.distance_to(after))
                    .sum();
                total / positions.len() as f64
            }
            // First sample, no agents, or a population change: nothing to compare.
            _ => 0.0,
        };
        self.previous_positions = Some(positions);
        displacement
    }

    /// Measure both metrics and append them to the current trial.
    ///
    /// Nothing is appended (and the displacement baseline is left alone)
    /// when the entropy is undefined.
    pub fn record_sample<A: Agent>(&mut self, field: &TrailField, agents: &[A]) -> Result<MetricSample> {
        let entropy = self.entropy(field)?;
        let mean_displacement = self.mean_displacement(agents);
        self.entropy_log.push(entropy);
        self.displacement_log.push(mean_displacement);
        Ok(MetricSample {
            entropy,
            mean_displacement,
        })
    }

    /// Clear the current trial's logs and displacement baseline.
    pub fn start_new_trial(&mut self) {
        self.entropy_log.clear();
        self.displacement_log.clear();
        self.previous_positions = None;
    }

    /// Archive the current trial's sequences.
    ///
    /// The current logs stay readable until [`Self::start_new_trial`]; the
    /// displacement baseline is dropped immediately.
    pub fn finalize_trial(&mut self) {
        self.entropy_trials.push(self.entropy_log.clone());
        self.displacement_trials.push(self.displacement_log.clone());
        self.previous_positions = None;
    }

    /// Entropy sequence of the current (or just-finalized) trial.
    pub fn current_entropy(&self) -> &[f64] {
        &self.entropy_log
    }

    /// Displacement sequence of the current (or just-finalized) trial.
    pub fn current_displacement(&self) -> &[f64] {
        &self.displacement_log
    }

    pub fn entropy_trials(&self) -> &[Vec<f64>] {
        &self.entropy_trials
    }

    pub fn displacement_trials(&self) -> &[Vec<f64>] {
        &self.displacement_trials
    }

    /// Number of archived trials.
    pub fn trial_count(&self) -> usize {
        self.entropy_trials.len()
    }

    /// Per-step mean and population standard deviation across archived trials.
    ///
    /// Every archived sequence must have the same length as the first
    /// trial's; mismatches are reported, never truncated or padded.
    pub fn aggregate(&self) -> Result<TrialAggregate> {
        let expected = match self.entropy_trials.first() {
            Some(first) => first.len(),
            None => return Err(AggregationError::NoTrials.into()),
        };

        for (trial, (entropy, displacement)) in self
            .entropy_trials
            .iter()
            .zip(&self.displacement_trials)
            .enumerate()
        {
            for found in [entropy.len(), displacement.len()] {
                if found != expected {
                    return Err(AggregationError::LengthMismatch {
                        trial,
                        expected,
                        found,
                    }
                    .into());
                }
            }
        }

        let (entropy_mean, entropy_std) = column_stats(&self.entropy_trials);
        let (displacement_mean, displacement_std) = column_stats(&self.displacement_trials);

        Ok(TrialAggregate {
            trials: self.entropy_trials.len(),
            steps: expected,
            entropy_mean,
            entropy_std,
            displacement_mean,
            displacement_std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physarum_core::config::FieldConfig;
    use physarum_core::error::MetricError;

    fn field(width: usize, height: usize) -> TrailField {
        TrailField::from_config(&FieldConfig::new(width, height)).unwrap()
    }

    #[test]
    fn uniform_field_has_maximal_entropy() {
        let f = field(10, 20);
        let entropy = field_entropy(&f).unwrap();
        assert!((entropy - (200.0f64).ln()).abs() < 1e-9);
    }

    #[test]
    fn concentrating_mass_lowers_entropy() {
        let mut f = field(8, 8);
        let uniform = field_entropy(&f).unwrap();
        f.deposit_at(2.0, 2.0, 50.0);
        let one_peak = field_entropy(&f).unwrap();
        f.deposit_at(2.0, 2.0, 500.0);
        let sharper = field_entropy(&f).unwrap();
        assert!(one_peak < uniform);
        assert!(sharper < one_peak);
        assert!(sharper >= 0.0);
    }

    #[test]
    fn single_cell_entropy_is_zero() {
        assert_eq!(shannon_entropy(&[0.0, 0.0, 4.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn empty_field_is_degenerate() {
        let mut f = field(3, 3);
        f.fill(0.0);
        let err = field_entropy(&f).unwrap_err();
        assert_eq!(err, PhysarumError::Metric(MetricError::DegenerateField { total: 0.0 }));
    }

    #[test]
    fn overflowed_field_is_degenerate() {
        let mut f = field(4, 4);
        f.deposit_at(1.0, 1.0, f64::INFINITY);
        f.decay_and_diffuse();
        let err = field_entropy(&f).unwrap_err();
        assert!(matches!(err, PhysarumError::Metric(MetricError::DegenerateField { .. })));
    }

    #[test]
    fn first_displacement_is_zero() {
        let mut c = MetricCollector::new();
        let d = c.mean_displacement_of(vec![Position::new(1.0, 1.0), Position::new(5.0, 5.0)]);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn displacement_of_uniform_translation() {
        let mut c = MetricCollector::new();
        c.mean_displacement_of(vec![Position::new(1.0, 1.0), Position::new(5.0, 2.0)]);
        let d = c.mean_displacement_of(vec![Position::new(4.0, 5.0), Position::new(8.0, 6.0)]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn displacement_does_not_unwrap_edges() {
        let mut c = MetricCollector::new();
        c.mean_displacement_of(vec![Position::new(9.5, 0.0)]);
        // Moved one cell right on a width-10 torus, but measured straight.
        let d = c.mean_displacement_of(vec![Position::new(0.5, 0.0)]);
        assert!((d - 9.0).abs() < 1e-12);
    }

    #[test]
    fn no_agents_means_no_displacement() {
        let mut c = MetricCollector::new();
        assert_eq!(c.mean_displacement_of(Vec::new()), 0.0);
        assert_eq!(c.mean_displacement_of(Vec::new()), 0.0);
    }

    #[test]
    fn new_trial_resets_baseline() {
        let mut c = MetricCollector::new();
        c.mean_displacement_of(vec![Position::new(0.0, 0.0)]);
        c.finalize_trial();
        c.start_new_trial();
        assert_eq!(c.mean_displacement_of(vec![Position::new(3.0, 4.0)]), 0.0);
    }

    #[test]
    fn aggregate_of_identical_trials_has_zero_std() {
        let mut c = MetricCollector::new();
        for _ in 0..2 {
            c.start_new_trial();
            c.entropy_log = vec![3.0, 2.5, 2.0];
            c.displacement_log = vec![0.0, 1.0, 1.5];
            c.finalize_trial();
        }
        let agg = c.aggregate().unwrap();
        assert_eq!(agg.trials, 2);
        assert_eq!(agg.steps, 3);
        assert_eq!(agg.entropy_mean, vec![3.0, 2.5, 2.0]);
        assert_eq!(agg.displacement_mean, vec![0.0, 1.0, 1.5]);
        assert!(agg.entropy_std.iter().all(|&s| s == 0.0));
        assert!(agg.displacement_std.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn aggregate_uses_population_std() {
        let mut c = MetricCollector::new();
        for value in [1.0, 3.0] {
            c.start_new_trial();
            c.entropy_log = vec![value];
            c.displacement_log = vec![value * 2.0];
            c.finalize_trial();
        }
        let agg = c.aggregate().unwrap();
        assert_eq!(agg.entropy_mean, vec![2.0]);
        assert_eq!(agg.entropy_std, vec![1.0]);
        assert_eq!(agg.displacement_std, vec![2.0]);
        let last = agg.last().unwrap();
        assert_eq!(last.step, 0);
        assert_eq!(last.displacement_mean, 4.0);
    }

    #[test]
    fn aggregate_rejects_mismatched_lengths() {
        let mut c = MetricCollector::new();
        c.entropy_log = vec![1.0, 2.0];
        c.displacement_log = vec![0.0, 0.5];
        c.finalize_trial();
        c.start_new_trial();
        c.entropy_log = vec![1.0];
        c.displacement_log = vec![0.0];
        c.finalize_trial();

        let err = c.aggregate().unwrap_err();
        assert_eq!(
            err,
            PhysarumError::Aggregation(AggregationError::LengthMismatch {
                trial: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn aggregate_without_trials_fails() {
        let c = MetricCollector::new();
        assert_eq!(
            c.aggregate().unwrap_err(),
            PhysarumError::Aggregation(AggregationError::NoTrials)
        );
    }
}
