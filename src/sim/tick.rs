//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run deterministically. Physics constants
//! are per tick; `dt` only feeds the cosmetic clock.

use rand::Rng;

use super::collision::collides;
use super::spawner;
use super::state::{GameEvent, GameState, RunPhase};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (ignored unless playing and grounded)
    pub jump: bool,
    /// Hold (`Some(true)`) or release (`Some(false)`) duck
    pub duck: Option<bool>,
    /// Start a run from the title screen or after a crash
    pub start: bool,
    /// Return to the title screen
    pub reset: bool,
    pub toggle_autopilot: bool,
}

/// Chance per grounded tick of a small dust puff at the feet
const RUNNING_DUST_CHANCE: f64 = 0.15;
/// Squash below this magnitude snaps to zero
const SQUASH_EPSILON: f32 = 0.01;
const SQUASH_DECAY: f32 = 0.85;
/// Squash applied on landing
const LANDING_SQUASH: f32 = 0.4;

/// Cloud drift per tick along x
const CLOUD_DRIFT: f32 = 0.2;
/// Clouds further ahead than this wrap around behind the player
const CLOUD_WRAP_AHEAD: f32 = 2000.0;
const CLOUD_WRAP_BEHIND: f32 = 1000.0;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.reset {
        state.hard_reset();
    }

    if input.toggle_autopilot {
        state.toggle_autopilot();
    }

    if input.start && state.phase != RunPhase::Playing {
        state.start_run();
    }

    if input.jump {
        state.jump();
    }

    if let Some(ducking) = input.duck {
        state.set_ducking(ducking);
    }

    state.time_ticks += 1;
    state.elapsed_time += dt;

    update_clouds(state);

    if state.phase == RunPhase::Playing {
        advance_run(state);
    }

    // Runs in every phase so bursts from the last run step play out after a crash
    state.particles.tick();
}

/// Gameplay for one tick of an active run
fn advance_run(state: &mut GameState) {
    update_speed(state);

    state.distance += state.speed;
    state.score = (state.distance / DISTANCE_PER_POINT) as u64;

    let is_night = (state.score / DAY_NIGHT_PERIOD) % 2 == 1;
    if is_night != state.is_night {
        state.is_night = is_night;
        state.events.push(GameEvent::NightChanged(is_night));
        log::debug!("Night {} at score {}", is_night, state.score);
    }

    update_player(state);

    spawner::schedule(state);

    let cull_x = state.distance - TRAILING_CULL_DISTANCE;
    state.obstacles.retain(|o| o.pos.x > cull_x);

    if check_collisions(state) {
        end_run(state);
        return;
    }

    if state.autopilot {
        run_autopilot(state);
    }
}

/// Ramp toward the mode's ceiling; ease back down if the ceiling dropped
fn update_speed(state: &mut GameState) {
    let max = state.effective_max_speed();
    let inc = state.effective_increment();

    if state.speed < max {
        state.speed = (state.speed + inc).min(max);
    } else if state.speed > max {
        state.speed = (state.speed - 2.0 * inc).max(max);
    }
}

fn update_player(state: &mut GameState) {
    let player = &mut state.player;

    if player.squash.abs() > SQUASH_EPSILON {
        player.squash *= SQUASH_DECAY;
    } else {
        player.squash = 0.0;
    }

    player.vel.z -= GRAVITY;
    player.pos.z += player.vel.z;

    if player.pos.z <= GROUND_Z {
        player.pos.z = GROUND_Z;
        player.vel.z = 0.0;

        if !player.was_grounded {
            player.squash = LANDING_SQUASH;
            let (x, y) = (player.pos.x, player.pos.y);
            state.particles.spawn_dust(x + 5.0, y, 6, &mut state.rng);
            state.particles.spawn_stomp(x, y, 5, &mut state.rng);
            state.events.push(GameEvent::Landed);
        }

        if state.rng.random_bool(RUNNING_DUST_CHANCE) {
            let (x, y) = (state.player.pos.x, state.player.pos.y);
            state.particles.spawn_dust(x, y, 1, &mut state.rng);
        }

        state.player.was_grounded = true;
    } else {
        player.was_grounded = false;
    }

    state.player.pos.x = state.distance;
}

fn update_clouds(state: &mut GameState) {
    let time = state.elapsed_time;
    for cloud in &mut state.clouds {
        cloud.pos.x += CLOUD_DRIFT;
        if cloud.pos.x > state.distance + CLOUD_WRAP_AHEAD {
            cloud.pos.x = state.distance - CLOUD_WRAP_BEHIND;
        }
        cloud.pos.z += (time + cloud.id as f32).sin() * 0.05;
    }
}

fn check_collisions(state: &GameState) -> bool {
    let player = &state.player;
    state
        .obstacles
        .iter()
        .any(|o| collides(player.pos, player.size, o.pos, o.size))
}

fn end_run(state: &mut GameState) {
    state.phase = RunPhase::GameOver;
    state.events.push(GameEvent::Crashed { score: state.score });
    log::info!(
        "Run over at score {} (distance {:.0}, speed {:.2})",
        state.score,
        state.distance,
        state.speed
    );

    if !state.autopilot && state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
        log::info!("New high score: {}", state.score);
    }
}

/// Jump or duck for the nearest obstacle ahead
fn run_autopilot(state: &mut GameState) {
    let player_x = state.player.pos.x;
    let next = state
        .obstacles
        .iter()
        .find(|o| o.pos.x > player_x)
        .map(|o| (o.pos.x - player_x, o.is_high_bird()));

    let Some((dist, high_bird)) = next else {
        state.set_ducking(false);
        return;
    };

    let jump_threshold = state.speed * 20.0;
    let duck_threshold = state.speed * 24.0;

    if dist >= jump_threshold {
        state.set_ducking(false);
    } else if !high_bird {
        state.jump();
    } else if dist < duck_threshold {
        state.set_ducking(true);
    }
}
