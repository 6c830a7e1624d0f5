//! Obstacle spawning
//!
//! Obstacles arrive in groups ("patterns"). Harder patterns unlock as the
//! score grows. Groups are spaced so that a jump at the current speed always
//! fits between them.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};
use crate::air_time;
use crate::consts::*;

pub const ROCK_UNLOCK_SCORE: u64 = 100;
pub const DOUBLE_UNLOCK_SCORE: u64 = 200;
pub const BIRD_UNLOCK_SCORE: u64 = 300;
pub const TRIPLE_UNLOCK_SCORE: u64 = 500;

/// Bird altitudes above ground
pub const BIRD_HIGH_Z: f32 = 16.0;
pub const BIRD_LOW_Z: f32 = 6.0;

/// Obstacle group layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// One cactus, large or small
    Single,
    /// Two small cacti or two rocks
    Double,
    /// Three small cacti in a row
    Triple,
    /// A bird, flying high or low
    Bird,
    Rock,
}

/// Pick the next pattern for the given score
pub fn choose_pattern(score: u64, rng: &mut impl Rng) -> Pattern {
    if score > TRIPLE_UNLOCK_SCORE && rng.random::<f32>() > 0.6 {
        Pattern::Triple
    } else if score > DOUBLE_UNLOCK_SCORE && rng.random::<f32>() > 0.7 {
        Pattern::Double
    } else if score > BIRD_UNLOCK_SCORE && rng.random::<f32>() > 0.7 {
        Pattern::Bird
    } else if score > ROCK_UNLOCK_SCORE && rng.random::<f32>() > 0.7 {
        Pattern::Rock
    } else {
        Pattern::Single
    }
}

/// Smallest gap between groups at `speed`: a full jump plus a margin
pub fn min_gap(speed: f32) -> f32 {
    air_time() * speed + SPAWN_GAP_BASE
}

/// Gap to the next group, including random slack
pub fn spawn_gap(speed: f32, rng: &mut impl Rng) -> f32 {
    min_gap(speed) + rng.random::<f32>() * SPAWN_GAP_JITTER
}

/// Lay out `pattern` starting at `start_x` as (kind, x, altitude) triples
pub fn layout(pattern: Pattern, start_x: f32, rng: &mut impl Rng) -> Vec<(ObstacleKind, f32, f32)> {
    match pattern {
        Pattern::Triple => (0..3)
            .map(|i| (ObstacleKind::CactusSmall, start_x + i as f32 * 25.0, 0.0))
            .collect(),
        Pattern::Double => {
            if rng.random_bool(0.5) {
                vec![
                    (ObstacleKind::CactusSmall, start_x, 0.0),
                    (ObstacleKind::CactusSmall, start_x + 25.0, 0.0),
                ]
            } else {
                vec![
                    (ObstacleKind::Rock, start_x, 0.0),
                    (ObstacleKind::Rock, start_x + 35.0, 0.0),
                ]
            }
        }
        Pattern::Bird => {
            let z = if rng.random_bool(0.5) {
                BIRD_HIGH_Z
            } else {
                BIRD_LOW_Z
            };
            vec![(ObstacleKind::Bird, start_x, z)]
        }
        Pattern::Rock => vec![(ObstacleKind::Rock, start_x, 0.0)],
        Pattern::Single => {
            let kind = if rng.random::<f32>() > 0.6 {
                ObstacleKind::CactusLarge
            } else {
                ObstacleKind::CactusSmall
            };
            vec![(kind, start_x, 0.0)]
        }
    }
}

/// Build the next group beyond `after_x`. The group is returned, not stored.
pub fn spawn_next(state: &mut GameState, after_x: f32) -> Vec<Obstacle> {
    let start_x = after_x + spawn_gap(state.speed, &mut state.rng);
    let pattern = choose_pattern(state.score, &mut state.rng);
    let group = state.next_group_id();

    layout(pattern, start_x, &mut state.rng)
        .into_iter()
        .map(|(kind, x, z)| {
            let id = state.next_entity_id();
            Obstacle::new(id, group, kind, x, z)
        })
        .collect()
}

/// Keep obstacles scheduled ahead of the player. Adds at most one group.
pub fn schedule(state: &mut GameState) -> bool {
    let last_x = state
        .obstacles
        .last()
        .map_or(state.distance, |o| o.pos.x);

    // Only check against the smallest possible gap; the jitter is drawn on spawn
    if state.distance + SPAWN_LOOKAHEAD <= last_x + min_gap(state.speed) {
        return false;
    }

    let group = spawn_next(state, last_x);
    log::debug!(
        "Spawned {} obstacle(s) at x={:.0} (score {})",
        group.len(),
        group.first().map_or(0.0, |o| o.pos.x),
        state.score
    );
    state.obstacles.extend(group);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_only_singles_at_low_score() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            assert_eq!(choose_pattern(50, &mut rng), Pattern::Single);
        }
    }

    #[test]
    fn test_high_score_unlocks_everything() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(choose_pattern(1000, &mut rng));
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_triple_layout_spacing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let group = layout(Pattern::Triple, 500.0, &mut rng);
        let xs: Vec<f32> = group.iter().map(|(_, x, _)| *x).collect();
        assert_eq!(xs, vec![500.0, 525.0, 550.0]);
        assert!(group.iter().all(|(k, _, _)| *k == ObstacleKind::CactusSmall));
    }

    #[test]
    fn test_bird_altitudes() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..50 {
            let group = layout(Pattern::Bird, 0.0, &mut rng);
            assert_eq!(group.len(), 1);
            assert!(group[0].2 == BIRD_HIGH_Z || group[0].2 == BIRD_LOW_Z);
        }
    }

    #[test]
    fn test_min_gap_covers_air_time() {
        // 2 * 11 / 0.6 ticks at speed 1.5, plus the base margin
        let expected = (22.0 / 0.6) * 1.5 + 80.0;
        assert!((min_gap(1.5) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_schedule_respects_gap() {
        let mut state = GameState::new(21, 0);
        state.start_run();
        state.score = 1000;

        for _ in 0..50 {
            let prev_last = state.obstacles.last().map(|o| o.pos.x);
            let before = state.obstacles.len();
            if schedule(&mut state) {
                let first_new = &state.obstacles[before];
                if let Some(prev) = prev_last {
                    assert!(first_new.pos.x - prev >= min_gap(state.speed));
                }
            }
            state.distance += 30.0;
        }
        assert!(!state.obstacles.is_empty());
    }

    #[test]
    fn test_schedule_stops_at_lookahead() {
        let mut state = GameState::new(21, 0);
        state.start_run();
        while schedule(&mut state) {}
        let last_x = state.obstacles.last().map_or(0.0, |o| o.pos.x);
        assert!(state.distance + SPAWN_LOOKAHEAD <= last_x + min_gap(state.speed));
    }

    #[test]
    fn test_groups_share_id() {
        let mut state = GameState::new(5, 0);
        state.start_run();
        state.score = 600;
        let a = spawn_next(&mut state, 0.0);
        let b = spawn_next(&mut state, 1000.0);
        assert!(a.iter().all(|o| o.group == a[0].group));
        assert_ne!(a[0].group, b[0].group);
    }
}
