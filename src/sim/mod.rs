//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles by spawn x)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{HitBox, collides};
pub use particles::{Particle, ParticleSystem};
pub use spawner::{Pattern, choose_pattern, min_gap, schedule, spawn_next};
pub use state::{Cloud, GameEvent, GameState, Obstacle, ObstacleKind, Player, RunPhase};
pub use tick::{TickInput, tick};
