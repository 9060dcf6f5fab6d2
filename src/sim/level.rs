//! Level and session orchestration
//!
//! The level manager exclusively owns the obstacle working set: it populates
//! it at session start, replaces pieces of it at level boundaries, and
//! regenerates it wholesale on resets. Everything else borrows the set for
//! the duration of a tick.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ShapeKind};
use crate::consts::*;

/// Fill the working set for the current level: obstacle count escalates with
/// the level, and each level rolls one chance at a power-bearing obstacle.
pub fn populate(state: &mut GameState) {
    state.obstacles.clear();
    let count = state.tuning.initial_obstacles + (state.level - 1);
    for _ in 0..count {
        let kind = ShapeKind::random_regular(&mut state.rng);
        spawn_obstacle(state, kind);
    }
    if state.rng.random::<f32>() < state.tuning.power_spawn_chance {
        spawn_obstacle(state, ShapeKind::Power);
    }
    state.normalize_order();
}

/// Spawn one obstacle with randomized size, spin, and behavior parameters.
/// The spawn band starts past midfield, which keeps new obstacles clear of
/// the entrance protection circle.
pub fn spawn_obstacle(state: &mut GameState, kind: ShapeKind) {
    let id = state.next_entity_id();
    let x = state.rng.random_range(state.width * 0.4..state.width - 60.0);
    let y = state.rng.random_range(40.0..state.height - 40.0);
    let size = state.rng.random_range(SPAWN_SIZE_MIN..=SPAWN_SIZE_MAX);
    let blind_min = state.rng.random_range(30..60);
    let blind_max = blind_min + state.rng.random_range(60..120);

    let ob = Obstacle {
        id,
        kind,
        pos: Vec2::new(x, y),
        size,
        vel: Vec2::ZERO,
        rotation: 0.0,
        rotation_rate: state.rng.random_range(-0.05..0.05),
        blind: false,
        blind_elapsed: 0,
        blind_duration: 0,
        blind_range: (blind_min, blind_max),
        blind_chance: state.rng.random_range(0.001..0.008),
        last_blind_end: 0,
        chase_accuracy: state.rng.random_range(0.3..1.0),
    };
    state.obstacles.push(ob);
}

/// Level transition, fired when the player reaches the exit: bump the level,
/// notify the UI, drop leftover power obstacles, grow the working set by one
/// regular obstacle (plus a chance at a fresh power one), and send the player
/// back to spawn. The level counter survives.
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    log::debug!("level advanced to {}", state.level);
    state.push_event(GameEvent::LevelChanged(state.level));

    state.obstacles.retain(|o| !o.kind.is_power());
    let kind = ShapeKind::random_regular(&mut state.rng);
    spawn_obstacle(state, kind);
    if state.rng.random::<f32>() < state.tuning.power_spawn_chance {
        spawn_obstacle(state, ShapeKind::Power);
    }
    state.normalize_order();

    reset_player(state);
}

/// Player-only reset (post-collision): position, infection, power, trail,
/// and particles go back to spawn state. Level number and obstacles stay.
pub fn reset_player(state: &mut GameState) {
    let spawn = state.spawn_point();
    state.player.respawn(spawn);
    state.power.clear();
    state.particles.clear();
}

/// Regenerate the current level from scratch: fresh working set, fresh
/// player. Used by the stuck-at-entrance safety valve.
pub fn reset_level(state: &mut GameState) {
    populate(state);
    reset_player(state);
    state.game_over = false;
    state.game_over_ticks = 0;
}

/// Full reset: back to level 1 with a regenerated initial set
pub fn reset_session(state: &mut GameState) {
    state.level = 1;
    reset_level(state);
    state.push_event(GameEvent::LevelChanged(1));
}
