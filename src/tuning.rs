//! Data-driven game balance
//!
//! Every gameplay knob that is worth adjusting without a recompile lives in
//! [`Tuning`]. The defaults are the shipped balance; a host can deserialize a
//! partial JSON document over them to experiment.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session-level gameplay balance knobs.
///
/// Structural constants (timestep, canvas size, trail length) stay in
/// [`crate::consts`]; this struct only carries values that change how the
/// game feels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player displacement per tick
    pub player_speed: f32,
    /// Velocity damping applied to every obstacle each tick
    pub friction: f32,
    /// Energy retained on bounce and in obstacle-obstacle impulses
    pub elasticity: f32,
    /// Radius of the spawn-safety circle around the entrance midpoint
    pub entrance_protection_radius: f32,
    /// Peak velocity nudge pushing obstacles out of the protection circle
    pub entrance_protection_force: f32,
    /// Speed cap while blind, as a fraction of base speed
    pub blind_speed_factor: f32,
    /// Obstacles in the level-1 working set
    pub initial_obstacles: u32,
    /// Chance that a level transition spawns a power-bearing obstacle
    pub power_spawn_chance: f32,
    /// Size multiplier per reducer application
    pub reducer_factor: f32,
    /// Minimum ticks between shape-shifter reassignments
    pub shapeshift_cooldown_ticks: u64,
    /// Ticks of near-zero movement at the entrance before a forced reset
    pub stuck_ticks: u32,
    /// Distance from the entrance midpoint that counts as "at the entrance"
    pub stuck_distance: f32,
    /// Movement below this per tick counts as not moving
    pub stuck_move_epsilon: f32,
    /// How long the game-over overlay stays up before auto-dismissing
    pub game_over_display_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            friction: 0.99,
            elasticity: 0.7,
            entrance_protection_radius: 120.0,
            entrance_protection_force: 0.8,
            blind_speed_factor: 0.5,
            initial_obstacles: 4,
            power_spawn_chance: 0.3,
            reducer_factor: 0.9,
            shapeshift_cooldown_ticks: 30,
            stuck_ticks: 120,
            stuck_distance: 60.0,
            stuck_move_epsilon: 0.75,
            game_over_display_ticks: 180,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
