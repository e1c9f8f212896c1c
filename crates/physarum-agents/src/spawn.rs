//! Spawning particles for a fresh trial.
//!
//! Every particle receives its own RNG, seeded from the trial's RNG, so a
//! trial is reproducible from one seed no matter how the runtime schedules
//! particle updates.

use crate::particle::Particle;
use physarum_core::config::ParticleConfig;
use physarum_core::types::Position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Spawn `config.count` particles on integer cells of a `width x height`
/// field, with headings drawn uniformly from `[0, 2pi)`.
pub fn spawn_particles<R: Rng + ?Sized>(
    config: &ParticleConfig,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..config.count)
        .map(|_| spawn_one(config, width, height, rng))
        .collect()
}

fn spawn_one<R: Rng + ?Sized>(
    config: &ParticleConfig,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Particle {
    let x = rng.gen_range(0..width) as f64;
    let y = rng.gen_range(0..height) as f64;
    let heading = rng.gen_range(0.0..TAU);
    let particle_rng = StdRng::seed_from_u64(rng.gen());
    Particle::from_config(Position::new(x, y), heading, config, particle_rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use physarum_core::agent::Agent;

    fn config(count: usize) -> ParticleConfig {
        ParticleConfig {
            count,
            ..Default::default()
        }
    }

    #[test]
    fn spawns_requested_count_inside_field() {
        let mut rng = StdRng::seed_from_u64(42);
        let particles = spawn_particles(&config(200), 13, 7, &mut rng);
        assert_eq!(particles.len(), 200);
        for p in &particles {
            let pos = p.position();
            assert!(pos.x >= 0.0 && pos.x < 13.0 && pos.x.fract() == 0.0);
            assert!(pos.y >= 0.0 && pos.y < 7.0 && pos.y.fract() == 0.0);
            assert!(p.heading() >= 0.0 && p.heading() < TAU);
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let a = spawn_particles(&config(20), 50, 50, &mut StdRng::seed_from_u64(9));
        let b = spawn_particles(&config(20), 50, 50, &mut StdRng::seed_from_u64(9));
        let pa: Vec<_> = a.iter().map(|p| (p.position(), p.heading())).collect();
        let pb: Vec<_> = b.iter().map(|p| (p.position(), p.heading())).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn zero_count_spawns_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(spawn_particles(&config(0), 10, 10, &mut rng).is_empty());
    }
}
