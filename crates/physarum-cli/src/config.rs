//! Configuration management for the physarum CLI.

use anyhow::{Context, Result};
use physarum::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "physarum.toml";

/// Project configuration as stored in `physarum.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where `run` writes the JSON report when `--output` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    /// Number of evenly spaced steps printed in the summary table.
    #[serde(default = "default_summary_rows")]
    pub summary_rows: usize,
}

fn default_summary_rows() -> usize { 10 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: None,
            summary_rows: default_summary_rows(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub steps: Option<u64>,
    pub trials: Option<usize>,
    pub particles: Option<usize>,
    pub seed: Option<u64>,
}

impl Config {
    /// Load config from physarum.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        match find_config_file(&cwd) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(steps) = overrides.steps {
            self.run.steps = steps;
        }
        if let Some(trials) = overrides.trials {
            self.run.trials = trials;
        }
        if let Some(count) = overrides.particles {
            self.particles.count = count;
        }
        if let Some(seed) = overrides.seed {
            self.run.seed = Some(seed);
        }
    }

    /// The simulation part of the config.
    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig {
            field: self.field.clone(),
            particles: self.particles.clone(),
            run: self.run.clone(),
        }
    }

    /// Validate the simulation parameters.
    pub fn validate(&self) -> Result<()> {
        self.simulation()
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))
    }
}

/// Find physarum.toml in `start` or one of its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
