//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod geometry;
pub mod level;
pub mod obstacle;
pub mod player;
pub mod power;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use collision::{
    PlayerContact, classify_player_contact, resolve_obstacle_pair, resolve_obstacle_pairs,
};
pub use geometry::{circles_overlap, distance, effective_radius};
pub use level::{advance_level, reset_level, reset_player, reset_session};
pub use power::{PowerAction, PowerKind, PowerState};
pub use state::{GameEvent, GameState, Obstacle, Particle, Player, ShapeKind, Zone};
pub use tick::{TickInput, tick};
