//! Cosmetic feedback: particles and screen shake
//!
//! Nothing in here feeds back into gameplay. It is still stepped inside the
//! tick so effects stay locked to simulation time.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Particle;
use crate::consts::*;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Burst colors
pub const JUMP_DUST_COLOR: u32 = 0xFFFFFF;
pub const HIT_COLOR: u32 = 0xFF0000;

/// Emit a burst of `count` particles at `origin`
///
/// Velocities are uniform in [-speed/2, speed/2] on both axes, sizes uniform
/// in [2, 6]. Emission stops early once the particle cap is reached.
pub fn emit_particles<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: u32,
    count: usize,
    speed: f32,
) {
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * speed,
            (rng.random::<f32>() - 0.5) * speed,
        );
        particles.push(Particle {
            pos: origin,
            vel,
            life: 1.0,
            color,
            size: rng.random::<f32>() * 4.0 + 2.0,
        });
    }
}

/// Move particles and age them, dropping the dead ones
pub fn integrate_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Camera shake magnitude
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    magnitude: f32,
}

impl ScreenShake {
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Set the shake to `magnitude` (replaces, does not add)
    pub fn trigger(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
    }

    /// Geometric decay with a snap to zero below the visible threshold
    pub fn decay(&mut self) {
        if self.magnitude > 0.0 {
            self.magnitude *= SHAKE_DECAY;
        }
        if self.magnitude < SHAKE_SNAP {
            self.magnitude = 0.0;
        }
    }

    /// Random camera offset for this frame, uniform in [-m/2, m/2]
    pub fn offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        if self.magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (rng.random::<f32>() - 0.5) * self.magnitude,
            (rng.random::<f32>() - 0.5) * self.magnitude,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emission_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut particles = Vec::new();
        emit_particles(&mut particles, &mut rng, Vec2::new(10.0, 20.0), 0xFF0000, 30, 15.0);

        assert_eq!(particles.len(), 30);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, 0xFF0000);
            assert!(p.vel.x.abs() <= 7.5 && p.vel.y.abs() <= 7.5);
            assert!((2.0..=6.0).contains(&p.size));
        }
    }

    #[test]
    fn test_particle_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        for _ in 0..20 {
            emit_particles(&mut particles, &mut rng, Vec2::ZERO, 0xFFFFFF, 30, 5.0);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_particle_dies_at_tick_20() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            life: 1.0,
            color: 0xFFFFFF,
            size: 3.0,
        }];

        for tick in 1..=19 {
            integrate_particles(&mut particles);
            assert_eq!(particles.len(), 1, "removed early at tick {}", tick);
        }
        assert_eq!(particles[0].pos, Vec2::new(19.0, -19.0));

        integrate_particles(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_shake_snaps_to_zero() {
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_HIT);

        let bound = ((SHAKE_SNAP / SHAKE_HIT).ln() / SHAKE_DECAY.ln()).ceil() as u32;
        assert_eq!(bound, 33);

        for _ in 0..bound - 1 {
            shake.decay();
            assert!(shake.magnitude() > 0.0);
        }
        shake.decay();
        assert_eq!(shake.magnitude(), 0.0);

        for _ in 0..10 {
            shake.decay();
            assert_eq!(shake.magnitude(), 0.0);
        }
    }

    #[test]
    fn test_trigger_replaces_magnitude() {
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_HIT);
        shake.trigger(SHAKE_SWITCH);
        assert_eq!(shake.magnitude(), SHAKE_SWITCH);
    }

    #[test]
    fn test_offset_bounded() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut shake = ScreenShake::default();
        assert_eq!(shake.offset(&mut rng), Vec2::ZERO);

        shake.trigger(10.0);
        for _ in 0..100 {
            let o = shake.offset(&mut rng);
            assert!(o.x.abs() <= 5.0 && o.y.abs() <= 5.0);
        }
    }
}
