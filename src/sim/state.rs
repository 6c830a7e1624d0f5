//! Run state and entity types
//!
//! Everything the simulation mutates lives in one owned `GameState`.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use crate::Size3;
use crate::consts::*;
use crate::renderer::color::{Color, palette};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Title screen, nothing advances
    Start,
    /// Active gameplay
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RunStarted,
    Reset,
    Jumped,
    Landed,
    Crashed { score: u64 },
    NewHighScore(u64),
    NightChanged(bool),
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    CactusSmall,
    CactusLarge,
    Bird,
    Rock,
}

impl ObstacleKind {
    pub fn size(&self) -> Size3 {
        match self {
            ObstacleKind::CactusSmall => CACTUS_SMALL_SIZE,
            ObstacleKind::CactusLarge => CACTUS_LARGE_SIZE,
            ObstacleKind::Bird => BIRD_SIZE,
            ObstacleKind::Rock => ROCK_SIZE,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ObstacleKind::CactusSmall | ObstacleKind::CactusLarge => palette::CACTUS_MAIN,
            ObstacleKind::Bird => palette::BIRD_BODY,
            ObstacleKind::Rock => palette::ROCK_DARK,
        }
    }
}

/// An obstacle in the running lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Spawn group; obstacles of one pattern share it
    pub group: u32,
    pub kind: ObstacleKind,
    pub pos: Vec3,
    pub size: Size3,
    pub color: Color,
}

impl Obstacle {
    /// Create an obstacle in the lane at `x`, raised by `z_offset` (birds only)
    pub fn new(id: u32, group: u32, kind: ObstacleKind, x: f32, z_offset: f32) -> Self {
        let z = match kind {
            ObstacleKind::Bird => GROUND_Z + z_offset,
            _ => GROUND_Z,
        };
        Self {
            id,
            group,
            kind,
            pos: Vec3::new(x, 0.0, z),
            size: kind.size(),
            color: kind.color(),
        }
    }

    /// Birds flying high enough to run under while ducking
    pub fn is_high_bird(&self) -> bool {
        self.kind == ObstacleKind::Bird && self.pos.z > GROUND_Z + 8.0
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    pub size: Size3,
    /// Positive squashes (landing), negative stretches (jump); decays to 0
    pub squash: f32,
    /// Grounded at the end of the previous tick
    pub was_grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, 0.0, GROUND_Z),
            vel: Vec3::ZERO,
            size: DINO_SIZE,
            squash: 0.0,
            was_grounded: true,
        }
    }
}

impl Player {
    pub fn is_grounded(&self) -> bool {
        self.pos.z <= GROUND_Z
    }

    pub fn is_ducking(&self) -> bool {
        self.size.h < DINO_SIZE.h
    }

    /// Ducking halves the height, which is also the collision box
    pub fn set_ducking(&mut self, ducking: bool) {
        self.size = if ducking {
            DINO_SIZE.with_h(DINO_SIZE.h / 2.0)
        } else {
            DINO_SIZE
        };
    }
}

/// Background cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub id: u32,
    pub pos: Vec3,
    pub size: Size3,
}

pub const CLOUD_COUNT: u32 = 8;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RunPhase,
    /// World units travelled this run
    pub distance: f32,
    pub score: u64,
    pub speed: f32,
    /// Seconds since the run (or the title screen) began
    pub elapsed_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub is_night: bool,
    pub autopilot: bool,
    /// Best score outside autopilot, seeded from storage at startup
    pub high_score: u64,
    pub player: Player,
    /// Live obstacles, ordered by spawn x
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
    next_group: u32,
}

impl GameState {
    /// Create a title-screen state
    pub fn new(seed: u64, high_score: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Start,
            distance: 0.0,
            score: 0,
            speed: INITIAL_SPEED,
            elapsed_time: 0.0,
            time_ticks: 0,
            is_night: false,
            autopilot: false,
            high_score,
            player: Player::default(),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            particles: ParticleSystem::default(),
            events: Vec::new(),
            next_id: 1,
            next_group: 1,
        };

        state.init_clouds();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate a new spawn group ID
    pub fn next_group_id(&mut self) -> u32 {
        let id = self.next_group;
        self.next_group += 1;
        id
    }

    /// Scatter the background clouds
    pub fn init_clouds(&mut self) {
        self.clouds = (0..CLOUD_COUNT)
            .map(|id| Cloud {
                id,
                pos: Vec3::new(
                    self.rng.random_range(0.0..2000.0),
                    self.rng.random_range(-400.0..400.0),
                    self.rng.random_range(150.0..200.0),
                ),
                size: Size3::new(
                    self.rng.random_range(60.0..100.0),
                    self.rng.random_range(30.0..50.0),
                    5.0,
                ),
            })
            .collect();
    }

    /// Zero the run counters and entities, keeping mode, high score and RNG
    fn clear_run(&mut self) {
        self.distance = 0.0;
        self.score = 0;
        self.speed = INITIAL_SPEED;
        self.elapsed_time = 0.0;
        self.is_night = false;
        self.player = Player::default();
        self.obstacles.clear();
        self.particles.clear();
    }

    /// Begin a fresh run (from the title screen or after a game over)
    pub fn start_run(&mut self) {
        self.clear_run();
        self.init_clouds();
        self.phase = RunPhase::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (autopilot: {})", self.autopilot);
    }

    /// Drop back to the title screen
    pub fn hard_reset(&mut self) {
        self.clear_run();
        self.phase = RunPhase::Start;
        self.events.push(GameEvent::Reset);
        log::info!("Run reset to title screen");
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        log::info!("Autopilot {}", if self.autopilot { "on" } else { "off" });
    }

    /// Jump if playing and on the ground. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.phase != RunPhase::Playing || !self.player.is_grounded() {
            return false;
        }

        self.player.vel.z = JUMP_FORCE;
        // Stretch on takeoff
        self.player.squash = -0.3;
        let (x, y) = (self.player.pos.x, self.player.pos.y);
        self.particles.spawn_dust(x, y, 8, &mut self.rng);
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Hold or release duck. Ignored outside a run; repeated calls are no-ops.
    pub fn set_ducking(&mut self, ducking: bool) {
        if self.phase == RunPhase::Playing {
            self.player.set_ducking(ducking);
        }
    }

    /// Ceiling the speed ramps toward in the current mode
    pub fn effective_max_speed(&self) -> f32 {
        if self.autopilot {
            MAX_SPEED * AUTOPILOT_SPEED_MULTIPLIER
        } else {
            MAX_SPEED
        }
    }

    /// Per-tick speed change in the current mode
    pub fn effective_increment(&self) -> f32 {
        if self.autopilot {
            SPEED_INCREMENT * AUTOPILOT_INCREMENT_MULTIPLIER
        } else {
            SPEED_INCREMENT
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_title_screen() {
        let state = GameState::new(7, 42);
        assert_eq!(state.phase, RunPhase::Start);
        assert_eq!(state.high_score, 42);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert_eq!(state.clouds.len(), CLOUD_COUNT as usize);
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut state = GameState::new(7, 0);
        assert!(!state.jump());
        assert_eq!(state.player.vel.z, 0.0);

        state.start_run();
        assert!(state.jump());
        assert_eq!(state.player.vel.z, JUMP_FORCE);
        assert!(state.player.squash < 0.0);
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_duck_release_is_idempotent() {
        let mut state = GameState::new(7, 0);
        state.start_run();

        state.set_ducking(false);
        state.set_ducking(false);
        assert_eq!(state.player.size, DINO_SIZE);

        state.set_ducking(true);
        assert!(state.player.is_ducking());
        assert_eq!(state.player.size.h, DINO_SIZE.h / 2.0);

        state.set_ducking(false);
        state.set_ducking(false);
        assert_eq!(state.player.size, DINO_SIZE);
    }

    #[test]
    fn test_duck_ignored_on_title_screen() {
        let mut state = GameState::new(7, 0);
        state.set_ducking(true);
        assert!(!state.player.is_ducking());
    }

    #[test]
    fn test_high_bird() {
        let low = Obstacle::new(1, 1, ObstacleKind::Bird, 0.0, 6.0);
        let high = Obstacle::new(2, 1, ObstacleKind::Bird, 0.0, 16.0);
        let cactus = Obstacle::new(3, 1, ObstacleKind::CactusLarge, 0.0, 16.0);
        assert!(!low.is_high_bird());
        assert!(high.is_high_bird());
        assert!(!cactus.is_high_bird());
        assert_eq!(cactus.pos.z, GROUND_Z);
    }

    #[test]
    fn test_start_and_reset_events() {
        let mut state = GameState::new(7, 0);
        state.start_run();
        state.hard_reset();
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RunStarted, GameEvent::Reset]
        );
        assert!(state.events.is_empty());
        assert_eq!(state.phase, RunPhase::Start);
    }

    #[test]
    fn test_obstacle_json_keeps_position_and_kind() {
        let bird = Obstacle::new(3, 2, ObstacleKind::Bird, 120.0, 12.0);
        let json = serde_json::to_string(&bird).unwrap();
        let back: Obstacle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bird);
        assert_eq!(back.pos.z, GROUND_Z + 12.0);
        assert!(back.is_high_bird());
    }
}
