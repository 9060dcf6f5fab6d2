//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the whole world by exactly one step, in a
//! fixed order: timers, player motion, exit/stuck checks, obstacle behavior,
//! pairwise resolution, power expiry, player-obstacle contacts, particles.
//! Every update runs to completion; nothing here suspends or reorders work
//! across obstacles mid-tick.

use glam::Vec2;

use super::collision::{self, PlayerContact, classify_player_contact};
use super::level;
use super::obstacle::update_obstacle;
use super::player;
use super::power::{self, PowerAction, PowerKind};
use super::state::{GameEvent, GameState, ShapeKind};
use crate::consts::INFECTION_RATE;

/// Input snapshot for a single tick. The input collaborator fills this from
/// whatever raw events it listens to; the sim never sees those.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer/touch steering target in canvas coordinates
    pub touch_target: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    state.success = false;

    // Game-over overlay countdown. The sim keeps running while it fades;
    // the player was already respawned on the tick that detected the hit.
    if state.game_over {
        state.game_over_ticks = state.game_over_ticks.saturating_sub(1);
        if state.game_over_ticks == 0 {
            state.game_over = false;
            state.player.infected = false;
            state.player.infection_progress = 0.0;
        }
    }

    // Infection tint ramps while the overlay is up
    if state.player.infected {
        state.player.infection_progress =
            (state.player.infection_progress + INFECTION_RATE).min(1.0);
    }

    let bounds = Vec2::new(state.width, state.height);
    let entrance_mid = state.entrance.midpoint();

    player::update_player(&mut state.player, input, bounds);

    if player::reached_exit(&state.player, &state.exit) {
        state.success = true;
        state.push_event(GameEvent::Success);
        level::advance_level(state);
    } else if player::update_stuck(&mut state.player, entrance_mid, &state.tuning) {
        // Obstacles have the player pinned at spawn; regenerate the level
        log::debug!("player stuck at entrance, forcing level reset");
        level::reset_level(state);
    }

    // Obstacle behavior. Pairwise resolution waits until every obstacle has
    // its post-chase state for this tick.
    let player_pos = state.player.pos;
    let now = state.time_ticks;
    for ob in state.obstacles.iter_mut() {
        update_obstacle(
            ob,
            player_pos,
            entrance_mid,
            bounds,
            now,
            &state.tuning,
            &mut state.rng,
        );
    }
    collision::resolve_obstacle_pairs(&mut state.obstacles, state.tuning.elasticity);

    // Pair separation can shove an obstacle past a wall; clamp, never report
    for ob in state.obstacles.iter_mut() {
        ob.pos.x = ob.pos.x.clamp(ob.size, bounds.x - ob.size);
        ob.pos.y = ob.pos.y.clamp(ob.size, bounds.y - ob.size);
    }

    state.power.expire_if_due(now);

    handle_player_contacts(state, now);

    // Particles (render hints) drift and die
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= 0.95;
        p.life -= 0.02;
        p.size *= 0.99;
    }
    state.particles.retain(|p| p.life > 0.0);

    state.normalize_order();
}

/// Check the player against every obstacle and carry out the outcome:
/// power steal, power effect, or infection.
fn handle_player_contacts(state: &mut GameState, now: u64) {
    let entrance_mid = state.entrance.midpoint();
    let protection_radius = state.tuning.entrance_protection_radius;

    let mut idx = 0;
    while idx < state.obstacles.len() {
        let contact = classify_player_contact(
            &state.player,
            &state.obstacles[idx],
            &state.power,
            entrance_mid,
            protection_radius,
        );

        match contact {
            None | Some(PlayerContact::Protected) => {}

            Some(PlayerContact::StealPower) => {
                let kind = PowerKind::random(&mut state.rng);
                state.power.activate(kind, now);
                log::debug!("player stole power {kind:?}");
                // The power leaves this obstacle for good
                state.obstacles[idx].kind = ShapeKind::random_regular(&mut state.rng);
            }

            Some(PlayerContact::PowerEffect) => {
                let action = power::apply(
                    &state.power,
                    &state.obstacles[idx],
                    now,
                    &state.tuning,
                    &mut state.rng,
                );
                match action {
                    Some(PowerAction::Reshape(kind)) => {
                        state.obstacles[idx].kind = kind;
                        state.power.last_shift_tick = now;
                    }
                    Some(PowerAction::Shrink(factor)) => {
                        state.obstacles[idx].shrink(factor);
                    }
                    Some(PowerAction::Eliminate) => {
                        state.obstacles.remove(idx);
                        continue; // same index now holds the next obstacle
                    }
                    None => {}
                }
            }

            Some(PlayerContact::Infection) => {
                if !state.game_over {
                    infect_player(state);
                    // Player is back at spawn; remaining contacts are moot
                    break;
                }
            }
        }

        idx += 1;
    }
}

/// Lethal contact: flag game over, flash particles, and send the player
/// straight back to spawn. The infection flag stays set so the render
/// collaborator can drive the fade; it clears when the overlay dismisses.
fn infect_player(state: &mut GameState) {
    state.player.infected = true;
    state.player.infection_progress = 0.0;
    let hit_pos = state.player.pos;
    state.emit_burst(hit_pos, 24);

    state.game_over = true;
    state.game_over_ticks = state.tuning.game_over_display_ticks;
    state.push_event(GameEvent::GameOver);

    let spawn = state.spawn_point();
    state.player.pos = spawn;
    state.player.prev_pos = spawn;
    state.player.trail.clear();
    state.player.stuck_ticks = 0;
    state.power.clear();
}
