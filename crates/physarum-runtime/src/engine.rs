//! Step engine — drives one trial's field and particles forward.
//!
//! Each step:
//! 1. Every agent senses the field and moves (reads only)
//! 2. The deposits collected in phase 1 are reduced into the field
//! 3. The field decays and diffuses once
//! 4. The tick counter advances
//!
//! Because deposits are deferred, every agent senses the field exactly as
//! it stood after the previous step's diffusion, whatever the traversal
//! order. With the `parallel` feature phase 1 runs on rayon.

use crate::metrics::{MetricCollector, MetricSample};
use physarum_agents::particle::Particle;
use physarum_agents::spawn::spawn_particles;
use physarum_core::agent::Agent;
use physarum_core::config::SimulationConfig;
use physarum_core::error::Result;
use physarum_core::field::{Deposit, FieldSnapshot, TrailField};
use physarum_core::types::{Position, Tick};
use rand::Rng;
use serde::Serialize;
use tracing::trace;

/// Statistics about the engine at a step boundary.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub tick: Tick,
    pub agents: usize,
    pub total_intensity: f64,
    pub max_intensity: f64,
}

/// Owns one trial's field and agent population.
pub struct StepEngine<A = Particle> {
    field: TrailField,
    agents: Vec<A>,
    /// Deposits gathered during the current step; reused across steps.
    pending: Vec<Deposit>,
    tick: Tick,
}

impl StepEngine<Particle> {
    /// Build a fresh field and a freshly spawned particle population.
    pub fn from_config<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let field = TrailField::from_config(&config.field)?;
        let particles = spawn_particles(
            &config.particles,
            config.field.width,
            config.field.height,
            rng,
        );
        Ok(Self::new(field, particles))
    }
}

impl<A: Agent + Send> StepEngine<A> {
    pub fn new(field: TrailField, agents: Vec<A>) -> Self {
        let capacity = agents.len();
        Self {
            field,
            agents,
            pending: Vec::with_capacity(capacity),
            tick: 0,
        }
    }

    /// Run one full step.
    pub fn step(&mut self) {
        self.sense_and_move();
        self.field.apply_deposits(&self.pending);
        self.field.decay_and_diffuse();
        self.tick += 1;
        trace!(tick = self.tick, total = self.field.total(), "step complete");
    }

    /// Run one step, then capture a metric sample from the result.
    pub fn step_and_record(&mut self, collector: &mut MetricCollector) -> Result<MetricSample> {
        self.step();
        collector.record_sample(&self.field, &self.agents)
    }

    /// Run `steps` steps without recording metrics.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sense_and_move(&mut self) {
        let field = &self.field;
        self.pending.clear();
        for agent in self.agents.iter_mut() {
            agent.step(field);
            self.pending.push(agent.deposit_request(field));
        }
    }

    #[cfg(feature = "parallel")]
    fn sense_and_move(&mut self) {
        use rayon::prelude::*;

        let field = &self.field;
        self.pending.clear();
        self.pending.par_extend(self.agents.par_iter_mut().map(|agent| {
            agent.step(field);
            agent.deposit_request(field)
        }));
    }

    pub fn field(&self) -> &TrailField {
        &self.field
    }

    pub fn agents(&self) -> &[A] {
        &self.agents
    }

    /// Number of completed steps.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn positions(&self) -> Vec<Position> {
        self.agents.iter().map(|a| a.position()).collect()
    }

    /// Copy of the field for rendering.
    pub fn field_snapshot(&self) -> FieldSnapshot {
        self.field.snapshot()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            tick: self.tick,
            agents: self.agents.len(),
            total_intensity: self.field.total(),
            max_intensity: self.field.max(),
        }
    }
}
