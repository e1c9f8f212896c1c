//! Trial runner — repeats the step engine over independent trials.
//!
//! Each trial gets a fresh field, a freshly spawned population and an
//! empty metric log. Trial `i` is seeded with `base_seed + i`, so a run is
//! reproducible from the base seed alone and any single trial can be
//! replayed on its own.

use crate::engine::StepEngine;
use crate::metrics::{MetricCollector, MetricSample, TrialAggregate};
use crate::report::{RunReport, TrialRecord};
use physarum_core::config::SimulationConfig;
use physarum_core::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Passed to the observer after every step.
pub struct StepProgress<'a> {
    pub trial: usize,
    /// Steps completed in this trial, starting at 1.
    pub step: u64,
    pub sample: MetricSample,
    pub engine: &'a StepEngine,
}

/// Drives `config.run.trials` trials of `config.run.steps` steps each.
pub struct TrialRunner {
    config: SimulationConfig,
    seed: u64,
    collector: MetricCollector,
}

impl TrialRunner {
    /// Validate the configuration and fix the base seed.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.run.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            seed,
            collector: MetricCollector::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Base seed of the run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn trial_seed(&self, trial: usize) -> u64 {
        self.seed.wrapping_add(trial as u64)
    }

    /// Metrics recorded so far.
    pub fn collector(&self) -> &MetricCollector {
        &self.collector
    }

    /// Fresh engine for `trial`, spawned from that trial's seed.
    pub fn build_engine(&self, trial: usize) -> Result<StepEngine> {
        let mut rng = StdRng::seed_from_u64(self.trial_seed(trial));
        StepEngine::from_config(&self.config, &mut rng)
    }

    /// Run every trial and aggregate the results.
    pub fn run(&mut self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Like [`Self::run`], calling `observer` after every step of every trial.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<RunReport>
    where
        F: FnMut(&StepProgress<'_>),
    {
        let start = Instant::now();
        self.collector = MetricCollector::new();

        let mut trials = Vec::with_capacity(self.config.run.trials);
        for trial in 0..self.config.run.trials {
            trials.push(self.run_trial(trial, &mut observer)?);
        }

        let aggregate = self.collector.aggregate()?;
        let wall_time_ms = start.elapsed().as_millis() as u64;
        log_summary(&aggregate, wall_time_ms);

        Ok(RunReport {
            config: self.config.clone(),
            seed: self.seed,
            trials,
            aggregate,
            wall_time_ms,
        })
    }

    /// Run one trial, archiving its metric sequences in the collector.
    pub fn run_trial<F>(&mut self, trial: usize, observer: &mut F) -> Result<TrialRecord>
    where
        F: FnMut(&StepProgress<'_>),
    {
        let seed = self.trial_seed(trial);
        let start = Instant::now();
        let mut engine = self.build_engine(trial)?;
        self.collector.start_new_trial();
        debug!(
            trial,
            seed,
            agents = engine.agents().len(),
            steps = self.config.run.steps,
            "trial started"
        );

        for step in 1..=self.config.run.steps {
            let sample = match engine.step_and_record(&mut self.collector) {
                Ok(sample) => sample,
                Err(err) => {
                    warn!(trial, step, error = %err, "trial aborted");
                    return Err(err);
                }
            };
            observer(&StepProgress {
                trial,
                step,
                sample,
                engine: &engine,
            });
        }

        self.collector.finalize_trial();
        let wall_time_ms = start.elapsed().as_millis() as u64;
        let record = TrialRecord {
            trial,
            seed,
            steps: self.config.run.steps,
            entropy: self.collector.current_entropy().to_vec(),
            displacement: self.collector.current_displacement().to_vec(),
            final_stats: engine.stats(),
            wall_time_ms,
        };
        debug!(
            trial,
            final_entropy = record.final_entropy(),
            wall_time_ms,
            "trial finished"
        );
        Ok(record)
    }
}

fn log_summary(aggregate: &TrialAggregate, wall_time_ms: u64) {
    let last = aggregate.last();
    info!(
        trials = aggregate.trials,
        steps = aggregate.steps,
        entropy = last.as_ref().map(|r| r.entropy_mean),
        displacement = last.as_ref().map(|r| r.displacement_mean),
        wall_time_ms,
        "run complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use physarum_core::error::PhysarumError;

    fn small_config(seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.field.width = 24;
        config.field.height = 24;
        config.particles.count = 30;
        config.run.steps = 12;
        config.run.trials = 3;
        config.run.seed = Some(seed);
        config
    }

    #[test]
    fn rejects_invalid_config_before_running() {
        let mut config = small_config(1);
        config.run.trials = 0;
        let err = TrialRunner::new(config).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn trial_seeds_offset_from_base() {
        let runner = TrialRunner::new(small_config(100)).unwrap();
        assert_eq!(runner.seed(), 100);
        assert_eq!(runner.trial_seed(0), 100);
        assert_eq!(runner.trial_seed(4), 104);
    }

    #[test]
    fn run_records_every_step_of_every_trial() {
        let mut runner = TrialRunner::new(small_config(7)).unwrap();
        let report = runner.run().unwrap();

        assert_eq!(report.trials.len(), 3);
        assert_eq!(report.aggregate.trials, 3);
        assert_eq!(report.aggregate.steps, 12);
        for (i, record) in report.trials.iter().enumerate() {
            assert_eq!(record.trial, i);
            assert_eq!(record.seed, 7 + i as u64);
            assert_eq!(record.entropy.len(), 12);
            assert_eq!(record.displacement.len(), 12);
            assert_eq!(record.displacement[0], 0.0);
            assert_eq!(record.final_stats.tick, 12);
        }
        assert_eq!(runner.collector().trial_count(), 3);
    }

    #[test]
    fn observer_sees_each_step() {
        let mut runner = TrialRunner::new(small_config(3)).unwrap();
        let mut seen = Vec::new();
        runner
            .run_with(|progress| {
                assert_eq!(progress.engine.tick(), progress.step);
                seen.push((progress.trial, progress.step));
            })
            .unwrap();
        assert_eq!(seen.len(), 36);
        assert_eq!(seen[0], (0, 1));
        assert_eq!(seen[35], (2, 12));
    }

    #[test]
    fn rerunning_does_not_accumulate_trials() {
        let mut runner = TrialRunner::new(small_config(5)).unwrap();
        runner.run().unwrap();
        let report = runner.run().unwrap();
        assert_eq!(report.aggregate.trials, 3);
    }

    #[test]
    fn degenerate_field_aborts_the_run() {
        let mut config = small_config(2);
        config.field.baseline = 0.0;
        config.particles.count = 0;
        let mut runner = TrialRunner::new(config).unwrap();
        let err = runner.run().unwrap_err();
        assert!(matches!(err, PhysarumError::Metric(_)));
    }
}
