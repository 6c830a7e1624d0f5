//! Short-lived visual particles (dust puffs and landing debris)
//!
//! Particles never affect gameplay. They fall at half gravity and come to
//! rest on the ground until their life runs out.

use glam::Vec3;
use rand::Rng;

use crate::Size3;
use crate::consts::{GRAVITY, GROUND_Z};
use crate::renderer::color::{Color, palette};

/// Default cap on live particles
pub const DEFAULT_MAX_PARTICLES: usize = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Remaining ticks
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Color,
}

impl Particle {
    pub fn box_size(&self) -> Size3 {
        Size3::cube(self.size)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn with_capacity(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(1024)),
            max_particles,
        }
    }

    pub fn set_max_particles(&mut self, max_particles: usize) {
        self.max_particles = max_particles;
        self.particles.truncate(max_particles);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Kick up `count` dust motes around (x, y), drifting backward
    pub fn spawn_dust(&mut self, x: f32, y: f32, count: u32, rng: &mut impl Rng) {
        for _ in 0..count {
            self.push(Particle {
                pos: Vec3::new(
                    x + rng.random_range(-4.0..4.0),
                    y + rng.random_range(-4.0..4.0),
                    GROUND_Z,
                ),
                vel: Vec3::new(
                    -rng.random::<f32>() * 4.0,
                    rng.random_range(-1.5..1.5),
                    rng.random::<f32>() * 3.0,
                ),
                life: 15.0 + rng.random::<f32>() * 15.0,
                max_life: 30.0,
                size: 1.0 + rng.random::<f32>() * 2.0,
                color: palette::SAND_DETAIL,
            });
        }
    }

    /// Ground debris thrown out by a hard landing
    pub fn spawn_stomp(&mut self, x: f32, y: f32, count: u32, rng: &mut impl Rng) {
        for _ in 0..count {
            self.push(Particle {
                pos: Vec3::new(
                    x + rng.random_range(-5.0..5.0),
                    y + rng.random_range(-5.0..5.0),
                    GROUND_Z,
                ),
                vel: Vec3::new(
                    rng.random_range(-2.5..2.5),
                    rng.random_range(-2.5..2.5),
                    rng.random::<f32>() * 2.0,
                ),
                life: 10.0 + rng.random::<f32>() * 10.0,
                max_life: 20.0,
                size: 2.0 + rng.random::<f32>() * 2.0,
                color: palette::GROUND_BASE,
            });
        }
    }

    /// Advance one tick and drop expired particles
    pub fn tick(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.z -= GRAVITY * 0.5;

            if p.pos.z < GROUND_Z {
                p.pos.z = GROUND_Z;
                p.vel.z = p.vel.z.max(0.0);
            }

            p.life -= 1.0;
        }

        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_dust_spawns_near_origin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::default();
        system.spawn_dust(100.0, 0.0, 8, &mut rng);

        assert_eq!(system.len(), 8);
        for p in system.particles() {
            assert!((p.pos.x - 100.0).abs() <= 4.0);
            assert!(p.pos.y.abs() <= 4.0);
            assert!(p.vel.x <= 0.0);
            assert!(p.life >= 15.0 && p.life < 30.0);
        }
    }

    #[test]
    fn test_particles_never_sink() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ParticleSystem::default();
        system.spawn_stomp(0.0, 0.0, 20, &mut rng);

        for _ in 0..12 {
            system.tick();
            for p in system.particles() {
                assert!(p.pos.z >= GROUND_Z);
            }
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut system = ParticleSystem::default();
        system.spawn_dust(0.0, 0.0, 10, &mut rng);
        system.spawn_stomp(0.0, 0.0, 10, &mut rng);

        // Longest possible life is under 30 ticks
        for _ in 0..30 {
            system.tick();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_cap_is_enforced() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::with_capacity(5);
        system.spawn_dust(0.0, 0.0, 20, &mut rng);
        assert_eq!(system.len(), 5);

        system.set_max_particles(2);
        assert_eq!(system.len(), 2);
    }
}
