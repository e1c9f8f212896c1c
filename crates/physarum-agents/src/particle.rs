//! Particle — the trail-following cell.
//!
//! A particle carries three sensors (forward, left, right) a fixed
//! distance ahead. Each step it turns toward the strongest reading, moves
//! forward at constant speed on a toroidal field, and marks the cell it
//! lands on.
//!
//! Biological analog: a single foraging pseudopod of *Physarum
//! polycephalum* following and reinforcing its own chemical trail.

use physarum_core::agent::Agent;
use physarum_core::config::ParticleConfig;
use physarum_core::field::{Deposit, TrailField};
use physarum_core::types::{Position, Tick};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// The outcome of comparing the three sensor readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SteeringDecision {
    /// Forward reading strictly beats both sides.
    Straight,
    /// Left strictly beats right.
    TurnLeft,
    /// Right strictly beats left.
    TurnRight,
    /// No strict winner; turn by a random amount.
    Wander,
}

/// Decide how to steer from the forward, left and right readings.
///
/// Comparisons are strict with no tolerance. A three-way tie, including
/// the all-zero case, falls through to [`SteeringDecision::Wander`].
pub fn steering_decision(forward: f64, left: f64, right: f64) -> SteeringDecision {
    if forward > left && forward > right {
        SteeringDecision::Straight
    } else if left > right {
        SteeringDecision::TurnLeft
    } else if right > left {
        SteeringDecision::TurnRight
    } else {
        SteeringDecision::Wander
    }
}

/// Sensor readings taken during one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    pub forward: f64,
    pub left: f64,
    pub right: f64,
}

/// A serializable snapshot of a particle's state.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleSnapshot {
    pub position: Position,
    pub heading: f64,
    pub age: Tick,
}

/// A trail-following particle.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Position,
    /// Heading in radians. Never normalized.
    heading: f64,
    age_ticks: Tick,

    // Configuration
    speed: f64,
    /// Sensor reach in cells.
    sensor_distance: f64,
    /// Left/right sensor offset in radians.
    sensor_angle: f64,
    /// Heading change per steering decision in radians.
    turn_angle: f64,
    deposit_amount: f64,

    /// Private random source for wander turns.
    rng: StdRng,
}

impl Particle {
    /// Create a particle with default parameters and an entropy-seeded RNG.
    pub fn new(position: Position, heading: f64) -> Self {
        Self::from_config(position, heading, &ParticleConfig::default(), StdRng::from_entropy())
    }

    /// Create a particle with default parameters and a deterministic RNG (for testing).
    pub fn with_seed(position: Position, heading: f64, seed: u64) -> Self {
        Self::from_config(
            position,
            heading,
            &ParticleConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Create a particle from shared configuration and its own RNG.
    pub fn from_config(
        position: Position,
        heading: f64,
        config: &ParticleConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            position,
            heading,
            age_ticks: 0,
            speed: config.speed,
            sensor_distance: config.sensor_distance,
            sensor_angle: config.sensor_angle,
            turn_angle: config.turn_angle,
            deposit_amount: config.deposit_amount,
            rng,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sensors(mut self, distance: f64, angle: f64) -> Self {
        self.sensor_distance = distance;
        self.sensor_angle = angle;
        self
    }

    pub fn with_turn_angle(mut self, turn_angle: f64) -> Self {
        self.turn_angle = turn_angle;
        self
    }

    pub fn with_deposit_amount(mut self, amount: f64) -> Self {
        self.deposit_amount = amount;
        self
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn turn_angle(&self) -> f64 {
        self.turn_angle
    }

    pub fn deposit_amount(&self) -> f64 {
        self.deposit_amount
    }

    /// How many steps this particle has taken.
    pub fn age(&self) -> Tick {
        self.age_ticks
    }

    /// Read the field one sensor distance away along `heading + offset`.
    ///
    /// The offset vector is truncated to whole cells before it is added to
    /// the continuous position, and the field clamps the result to its
    /// edges rather than wrapping.
    pub fn sense(&self, field: &TrailField, offset: f64) -> f64 {
        let angle = self.heading + offset;
        let dx = (angle.cos() * self.sensor_distance).trunc();
        let dy = (angle.sin() * self.sensor_distance).trunc();
        field.sample_at(self.position.x + dx, self.position.y + dy)
    }

    /// Take all three sensor readings.
    pub fn read_sensors(&self, field: &TrailField) -> SensorReading {
        SensorReading {
            forward: self.sense(field, 0.0),
            left: self.sense(field, -self.sensor_angle),
            right: self.sense(field, self.sensor_angle),
        }
    }

    /// Apply a steering decision to the heading.
    pub fn steer(&mut self, decision: SteeringDecision) {
        match decision {
            SteeringDecision::Straight => {}
            SteeringDecision::TurnLeft => self.heading -= self.turn_angle,
            SteeringDecision::TurnRight => self.heading += self.turn_angle,
            SteeringDecision::Wander => self.heading += self.wander_turn(),
        }
    }

    /// Uniform turn in `[-turn_angle, turn_angle)`.
    fn wander_turn(&mut self) -> f64 {
        if self.turn_angle > 0.0 {
            self.rng.gen_range(-self.turn_angle..self.turn_angle)
        } else {
            0.0
        }
    }

    /// Advance along the heading and wrap onto the field.
    fn advance(&mut self, width: usize, height: usize) {
        self.position = self
            .position
            .advanced(self.heading, self.speed)
            .wrapped(width, height);
    }

    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot {
            position: self.position,
            heading: self.heading,
            age: self.age_ticks,
        }
    }
}

impl Agent for Particle {
    fn position(&self) -> Position {
        self.position
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn step(&mut self, field: &TrailField) {
        let reading = self.read_sensors(field);
        let decision = steering_decision(reading.forward, reading.left, reading.right);
        self.steer(decision);
        self.advance(field.width(), field.height());
        self.age_ticks += 1;
    }

    fn deposit_request(&self, field: &TrailField) -> Deposit {
        field.deposit_for(&self.position, self.deposit_amount)
    }
}
