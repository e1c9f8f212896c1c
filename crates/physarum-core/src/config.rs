//! Simulation configuration.
//!
//! All parameters are consumed at construction time; nothing is
//! reconfigured mid-run. Each section validates itself so that bad input
//! fails before any simulation step executes.

use crate::error::{PhysarumError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Trail field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Multiplicative decay per step, in `(0, 1]`.
    #[serde(default = "default_decay")]
    pub decay: f64,
    /// Laplacian diffusion rate; `1 - 4r` must stay non-negative.
    #[serde(default = "default_diffusion_rate")]
    pub diffusion_rate: f64,
    /// Uniform intensity every cell starts a trial with.
    #[serde(default = "default_baseline")]
    pub baseline: f64,
}

/// Particle parameters, shared by every particle in a trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Sensor reach in cells.
    #[serde(default = "default_sensor_distance")]
    pub sensor_distance: f64,
    /// Left/right sensor offset in radians.
    #[serde(default = "default_sensor_angle")]
    pub sensor_angle: f64,
    /// Heading change per steering decision in radians.
    #[serde(default = "default_turn_angle")]
    pub turn_angle: f64,
    #[serde(default = "default_deposit_amount")]
    pub deposit_amount: f64,
}

/// Run length and seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_steps")]
    pub steps: u64,
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Seed for the trial RNG. `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub run: RunConfig,
}

// Default value functions
fn default_width() -> usize { 200 }
fn default_height() -> usize { 200 }
fn default_decay() -> f64 { 0.95 }
fn default_diffusion_rate() -> f64 { 0.1 }
fn default_baseline() -> f64 { 0.1 }
fn default_count() -> usize { 1000 }
fn default_speed() -> f64 { 1.0 }
fn default_sensor_distance() -> f64 { 5.0 }
fn default_sensor_angle() -> f64 { PI / 4.0 }
fn default_turn_angle() -> f64 { 0.3 }
fn default_deposit_amount() -> f64 { 5.0 }
fn default_steps() -> u64 { 1000 }
fn default_trials() -> usize { 10 }

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            decay: default_decay(),
            diffusion_rate: default_diffusion_rate(),
            baseline: default_baseline(),
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            speed: default_speed(),
            sensor_distance: default_sensor_distance(),
            sensor_angle: default_sensor_angle(),
            turn_angle: default_turn_angle(),
            deposit_amount: default_deposit_amount(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            trials: default_trials(),
            seed: None,
        }
    }
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PhysarumError::invalid_config(field, value.to_string(), "must be finite"))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(PhysarumError::invalid_config(
            field,
            value.to_string(),
            "must not be negative",
        ));
    }
    Ok(())
}

impl FieldConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_diffusion_rate(mut self, rate: f64) -> Self {
        self.diffusion_rate = rate;
        self
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(PhysarumError::invalid_config("field.width", "0", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(PhysarumError::invalid_config("field.height", "0", "must be at least 1"));
        }
        let fits = self
            .width
            .checked_mul(self.height)
            .map_or(false, |cells| cells <= isize::MAX as usize / std::mem::size_of::<f64>());
        if !fits {
            return Err(PhysarumError::invalid_config(
                "field.width",
                format!("{}x{}", self.width, self.height),
                "width x height overflows",
            ));
        }
        require_finite("field.decay", self.decay)?;
        if self.decay <= 0.0 || self.decay > 1.0 {
            return Err(PhysarumError::out_of_range("field.decay", 0.0, 1.0, self.decay));
        }
        require_non_negative("field.diffusion_rate", self.diffusion_rate)?;
        // Above 0.25 the centre weight of the Laplacian stencil goes negative.
        if 1.0 - 4.0 * self.diffusion_rate < 0.0 {
            return Err(PhysarumError::out_of_range(
                "field.diffusion_rate",
                0.0,
                0.25,
                self.diffusion_rate,
            ));
        }
        require_non_negative("field.baseline", self.baseline)?;
        Ok(())
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("particles.speed", self.speed)?;
        require_non_negative("particles.sensor_distance", self.sensor_distance)?;
        require_non_negative("particles.sensor_angle", self.sensor_angle)?;
        require_non_negative("particles.turn_angle", self.turn_angle)?;
        require_non_negative("particles.deposit_amount", self.deposit_amount)?;
        Ok(())
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(PhysarumError::invalid_config("run.steps", "0", "must be at least 1"));
        }
        if self.trials == 0 {
            return Err(PhysarumError::invalid_config("run.trials", "0", "must be at least 1"));
        }
        Ok(())
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.particles.validate()?;
        self.run.validate()?;
        Ok(())
    }
}
