//! Host-facing game facade
//!
//! Buffers input between frames, drives the simulation at a fixed timestep,
//! paints frames through the scene compositor and keeps the best score
//! persisted. The host owns the frame loop and the drawing surface.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::renderer::{Surface, render_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RunPhase, TickInput, tick};
use crate::terrain::TerrainConfig;

/// What the HUD needs each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub phase: RunPhase,
    pub score: u64,
    pub high_score: u64,
    pub is_night: bool,
    pub autopilot: bool,
}

pub struct Game {
    state: GameState,
    settings: Settings,
    high_score: HighScore,
    terrain: TerrainConfig,
    accumulator: f32,
    /// Input collected since the last tick
    input: TickInput,
    /// Events waiting for the host
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(seed: u64, settings: Settings, high_score: HighScore) -> Self {
        let mut state = GameState::new(seed, high_score.best);
        state.particles.set_max_particles(settings.max_particles());

        Self {
            state,
            terrain: TerrainConfig::from_settings(&settings),
            settings,
            high_score,
            accumulator: 0.0,
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    /// Game with settings and best score restored from storage
    pub fn load(seed: u64) -> Self {
        Self::new(seed, Settings::load(), HighScore::load())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist the settings
    pub fn set_settings(&mut self, settings: Settings) {
        self.state
            .particles
            .set_max_particles(settings.max_particles());
        self.terrain = TerrainConfig::from_settings(&settings);
        settings.save();
        self.settings = settings;
    }

    // === Input ===

    /// Jump while running; from the title or game-over screen this starts a run
    pub fn jump_pressed(&mut self) {
        if self.state.phase == RunPhase::Playing {
            self.input.jump = true;
        } else {
            self.input.start = true;
        }
    }

    pub fn duck_pressed(&mut self, down: bool) {
        self.input.duck = Some(down);
    }

    pub fn start_or_restart(&mut self) {
        self.input.start = true;
    }

    pub fn hard_reset(&mut self) {
        self.input.reset = true;
    }

    pub fn toggle_autopilot(&mut self) {
        self.input.toggle_autopilot = true;
    }

    // === Frame ===

    /// Advance by a frame delta in seconds
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input = TickInput::default();
        }

        // Drop backlog the substep cap could not absorb
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        for event in self.state.drain_events() {
            if let GameEvent::NewHighScore(score) = event {
                if self.high_score.submit(score) {
                    self.high_score.save();
                }
            }
            self.events.push(event);
        }
    }

    /// Paint the current state onto `surface`
    pub fn render_frame(&self, width: f32, height: f32, surface: &mut impl Surface) {
        render_scene(
            surface,
            &self.state,
            &self.settings,
            &self.terrain,
            width,
            height,
        );
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.state.phase,
            score: self.state.score,
            high_score: self.high_score.best.max(self.state.high_score),
            is_night: self.state.is_night,
            autopilot: self.state.autopilot,
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
