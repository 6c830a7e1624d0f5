//! Iso Runner - an endless runner drawn as axonometric voxels
//!
//! Core modules:
//! - `sim`: Simulation (player physics, spawning, collisions, run state)
//! - `terrain`: Deterministic procedural ground decoration
//! - `renderer`: Projection, box rasterizer, scene compositor, WebGPU presentation
//! - `game`: Host-facing facade (inputs, fixed-step driver, HUD snapshot)
//! - `settings` / `highscores`: Persisted preferences and best score

pub mod game;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod terrain;

pub use game::{Game, HudSnapshot};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

use serde::{Deserialize, Serialize};

/// Game configuration constants
///
/// Physics values are per simulation tick (one tick = `SIM_DT`).
pub mod consts {
    use super::Size3;

    /// Fixed simulation timestep (60 Hz, physics constants are tuned per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration applied to the player each tick
    pub const GRAVITY: f32 = 0.6;
    /// Upward velocity set by a jump
    pub const JUMP_FORCE: f32 = 11.0;
    pub const INITIAL_SPEED: f32 = 1.5;
    pub const MAX_SPEED: f32 = 2.0;
    pub const SPEED_INCREMENT: f32 = 0.005;
    /// Autopilot raises the speed ceiling and ramps faster
    pub const AUTOPILOT_SPEED_MULTIPLIER: f32 = 8.0;
    pub const AUTOPILOT_INCREMENT_MULTIPLIER: f32 = 10.0;

    /// Top of the ground slab; physics ground
    pub const GROUND_Z: f32 = 0.0;
    pub const LANE_WIDTH: f32 = 40.0;

    /// World units of distance per score point
    pub const DISTANCE_PER_POINT: f32 = 30.0;
    /// Score span of one day or one night
    pub const DAY_NIGHT_PERIOD: u64 = 700;

    /// Obstacles this far behind the player are discarded
    pub const TRAILING_CULL_DISTANCE: f32 = 250.0;
    /// How far ahead of the player obstacles are kept scheduled
    pub const SPAWN_LOOKAHEAD: f32 = 1200.0;
    /// Fixed part of the gap between obstacle groups
    pub const SPAWN_GAP_BASE: f32 = 80.0;
    /// Random part of the gap between obstacle groups (0..this)
    pub const SPAWN_GAP_JITTER: f32 = 80.0;

    /// Collision box shrink per side
    pub const COLLISION_PAD_X: f32 = 4.0;
    pub const COLLISION_PAD_Y: f32 = 0.0;
    pub const COLLISION_PAD_Z: f32 = 3.0;

    /// Screen pixels per world unit
    pub const VOXEL_SIZE: f32 = 4.0;
    /// Negative angle creates a chase view where +X moves up-right on screen
    pub const VIEW_ANGLE: f32 = -30.0 * (std::f32::consts::PI / 180.0);

    pub const DINO_SIZE: Size3 = Size3::new(10.0, 6.0, 10.0);
    pub const CACTUS_SMALL_SIZE: Size3 = Size3::new(8.0, 4.0, 15.0);
    pub const CACTUS_LARGE_SIZE: Size3 = Size3::new(12.0, 6.0, 20.0);
    pub const BIRD_SIZE: Size3 = Size3::new(8.0, 6.0, 4.0);
    pub const ROCK_SIZE: Size3 = Size3::new(6.0, 5.0, 4.0);
}

/// Box extents along x (w), y (d) and z (h)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size3 {
    pub w: f32,
    pub d: f32,
    pub h: f32,
}

impl Size3 {
    pub const fn new(w: f32, d: f32, h: f32) -> Self {
        Self { w, d, h }
    }

    /// Same extent on every axis
    pub const fn cube(s: f32) -> Self {
        Self { w: s, d: s, h: s }
    }

    pub fn with_h(self, h: f32) -> Self {
        Self { h, ..self }
    }
}

/// Ticks spent airborne by a jump from the ground
#[inline]
pub fn air_time() -> f32 {
    2.0 * consts::JUMP_FORCE / consts::GRAVITY
}
