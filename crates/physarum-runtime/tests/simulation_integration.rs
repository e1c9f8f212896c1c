//! End-to-end simulation tests — engine, metrics and trial runner together.

use physarum_agents::particle::Particle;
use physarum_core::config::{FieldConfig, SimulationConfig};
use physarum_core::field::TrailField;
use physarum_core::types::Position;
use physarum_runtime::engine::StepEngine;
use physarum_runtime::metrics::MetricCollector;
use physarum_runtime::trial::TrialRunner;

fn config(width: usize, height: usize, particles: usize, steps: u64, trials: usize) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.field.width = width;
    config.field.height = height;
    config.particles.count = particles;
    config.run.steps = steps;
    config.run.trials = trials;
    config.run.seed = Some(2024);
    config
}

#[test]
fn one_agent_one_step_without_decay_or_diffusion() {
    let field = TrailField::from_config(
        &FieldConfig::new(10, 10)
            .with_decay(1.0)
            .with_diffusion_rate(0.0),
    )
    .unwrap();
    let particle = Particle::with_seed(Position::new(4.0, 6.0), 0.0, 11);
    let mut engine = StepEngine::new(field, vec![particle]);
    let mut collector = MetricCollector::new();

    let sample = engine.step_and_record(&mut collector).unwrap();
    assert_eq!(sample.mean_displacement, 0.0);

    let after = engine.positions()[0];
    let occupied = (after.x as usize, after.y as usize);
    let mut raised = 0;
    for y in 0..10 {
        for x in 0..10 {
            let value = engine.field().get(x, y).unwrap();
            if (x, y) == occupied {
                assert!((value - 5.1).abs() < 1e-12);
                raised += 1;
            } else {
                assert_eq!(value, 0.1);
            }
        }
    }
    assert_eq!(raised, 1);
    assert!((engine.field().total() - (100.0 * 0.1 + 5.0)).abs() < 1e-9);
}

#[test]
fn empty_population_keeps_uniform_entropy() {
    let mut runner = TrialRunner::new(config(10, 10, 0, 25, 2)).unwrap();
    let report = runner.run().unwrap();

    let expected = (100.0f64).ln();
    for record in &report.trials {
        assert!(record.displacement.iter().all(|&d| d == 0.0));
        for &entropy in &record.entropy {
            assert!((entropy - expected).abs() < 1e-9, "entropy {}", entropy);
        }
    }
    assert!(report.aggregate.entropy_std.iter().all(|&s| s < 1e-12));
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = TrialRunner::new(config(32, 32, 80, 30, 2)).unwrap().run().unwrap();
    let second = TrialRunner::new(config(32, 32, 80, 30, 2)).unwrap().run().unwrap();

    for (a, b) in first.trials.iter().zip(&second.trials) {
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.entropy, b.entropy);
        assert_eq!(a.displacement, b.displacement);
    }
    assert_eq!(first.aggregate.entropy_mean, second.aggregate.entropy_mean);
}

#[test]
fn different_trials_diverge() {
    let report = TrialRunner::new(config(32, 32, 80, 20, 2)).unwrap().run().unwrap();
    assert_ne!(report.trials[0].entropy, report.trials[1].entropy);
    assert!(report.aggregate.entropy_std.iter().any(|&s| s > 0.0));
}

#[test]
fn aggregate_spans_every_step() {
    let report = TrialRunner::new(config(20, 20, 40, 15, 4)).unwrap().run().unwrap();
    let agg = &report.aggregate;
    assert_eq!(agg.trials, 4);
    assert_eq!(agg.steps, 15);
    assert_eq!(agg.entropy_mean.len(), 15);
    assert_eq!(agg.entropy_std.len(), 15);
    assert_eq!(agg.displacement_mean.len(), 15);
    assert_eq!(agg.displacement_std.len(), 15);
    assert_eq!(agg.rows().len(), 15);

    // First sample of every trial has no baseline.
    assert_eq!(agg.displacement_mean[0], 0.0);
    assert_eq!(agg.displacement_std[0], 0.0);
}

#[test]
fn entropy_never_exceeds_uniform_bound() {
    let report = TrialRunner::new(config(16, 16, 60, 40, 1)).unwrap().run().unwrap();
    let bound = (256.0f64).ln();
    for &entropy in &report.trials[0].entropy {
        assert!(entropy > 0.0 && entropy <= bound + 1e-9);
    }
}

#[test]
fn report_serializes_to_json() {
    let report = TrialRunner::new(config(8, 8, 5, 4, 2)).unwrap().run().unwrap();
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["seed"], 2024);
    assert_eq!(value["trials"].as_array().unwrap().len(), 2);
    assert_eq!(value["aggregate"]["steps"], 4);
    assert_eq!(value["config"]["field"]["width"], 8);
}
