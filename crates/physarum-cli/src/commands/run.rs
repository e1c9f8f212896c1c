//! Run the configured trials.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use physarum::prelude::*;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{Config, Overrides};

pub fn run(overrides: &Overrides, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let mut config = Config::load()?;
    debug!(?overrides, "applying command-line overrides");
    config.apply(overrides);
    config.validate()?;

    let simulation = config.simulation();
    let steps = simulation.run.steps;
    let trials = simulation.run.trials;
    let mut runner = TrialRunner::new(simulation)?;

    println!(
        "{} Running {} trials x {} steps ({} particles on {}x{}, seed {})",
        "→".blue(),
        trials.to_string().cyan(),
        steps.to_string().cyan(),
        config.particles.count.to_string().cyan(),
        config.field.width,
        config.field.height,
        runner.seed().to_string().cyan()
    );

    let pb = ProgressBar::new(steps * trials as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} steps {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let report = runner.run_with(|progress| {
        if progress.step == 1 {
            pb.set_message(format!("(trial {})", progress.trial + 1));
        }
        if verbose && progress.step == steps {
            pb.println(format!(
                "  trial {}: entropy {:.4}, displacement {:.4}",
                progress.trial + 1,
                progress.sample.entropy,
                progress.sample.mean_displacement
            ));
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "{} Simulation complete in {} ms",
        "✓".green().bold(),
        report.wall_time_ms
    );
    println!();
    print_summary(&report.aggregate, config.output.summary_rows);

    if let Some(path) = output.or(config.output.report) {
        let json = report.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!();
        println!("  {} Report written to {}", "✓".green(), path.display());
    }

    Ok(())
}

fn print_summary(aggregate: &TrialAggregate, rows: usize) {
    println!(
        "{}",
        format!(
            "{:>8}  {:>12}  {:>10}  {:>12}  {:>10}",
            "step", "entropy", "± std", "displacement", "± std"
        )
        .white()
        .bold()
    );
    println!("{}", "─".repeat(60).dimmed());
    for index in summary_steps(aggregate.steps, rows) {
        println!(
            "{:>8}  {:>12.5}  {:>10.5}  {:>12.5}  {:>10.5}",
            index + 1,
            aggregate.entropy_mean[index],
            aggregate.entropy_std[index],
            aggregate.displacement_mean[index],
            aggregate.displacement_std[index]
        );
    }
}

/// Up to `rows` evenly spaced step indices, always ending on the last step.
fn summary_steps(steps: usize, rows: usize) -> Vec<usize> {
    if steps == 0 || rows == 0 {
        return Vec::new();
    }
    if rows >= steps {
        return (0..steps).collect();
    }
    let mut indices: Vec<usize> = (1..=rows).map(|i| i * steps / rows - 1).collect();
    indices.dedup();
    indices
}
