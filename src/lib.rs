//! Shape Runner - an entrance-to-exit pursuit arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pursuit AI, collisions, power-ups, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input capture, and UI chrome are external collaborators: they
//! feed a [`sim::TickInput`] snapshot in and read the resulting state back out
//! each frame. Nothing in this crate draws or listens for events.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas dimensions (fixed at session start)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Infection ramp per tick once infected (full in ~2.5 seconds)
    pub const INFECTION_RATE: f32 = 1.0 / 150.0;
    /// Touch steering deadzone in pixels
    pub const TOUCH_DEADZONE: f32 = 4.0;

    /// Obstacle size bounds. Spawned sizes land in [SPAWN_SIZE_MIN, SPAWN_SIZE_MAX];
    /// shrink effects floor at MIN_SHAPE_SIZE and never destroy the obstacle.
    pub const MIN_SHAPE_SIZE: f32 = 15.0;
    pub const SPAWN_SIZE_MIN: f32 = 30.0;
    pub const SPAWN_SIZE_MAX: f32 = 90.0;

    /// Size-to-speed mapping endpoints (larger shapes move slower)
    pub const SPEED_AT_MIN_SIZE: f32 = 2.0;
    pub const SPEED_AT_MAX_SIZE: f32 = 0.5;

    /// Trail history length (render only)
    pub const TRAIL_LENGTH: usize = 10;

    /// Maximum particles (render hints)
    pub const MAX_PARTICLES: usize = 256;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
