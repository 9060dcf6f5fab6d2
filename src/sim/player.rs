//! Player motion: intent integration, bounds clamp, exit and stuck detection
//!
//! Input arrives as a per-tick snapshot ([`super::tick::TickInput`]); this
//! module never sees raw keyboard or touch events. Canvas coordinates are
//! y-down.

use glam::Vec2;

use super::state::{Player, Zone};
use super::tick::TickInput;
use crate::Tuning;
use crate::consts::TOUCH_DEADZONE;

/// Advance the player by one tick: combine intent into a displacement of
/// magnitude `speed`, then clamp the circle fully inside the canvas.
pub fn update_player(player: &mut Player, input: &TickInput, bounds: Vec2) {
    player.prev_pos = player.pos;

    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }

    // Touch steering overrides the key intents; ignored inside the deadzone
    // so the player does not vibrate around the touch point.
    if let Some(target) = input.touch_target {
        let to_target = target - player.pos;
        let dist = to_target.length();
        dir = if dist > TOUCH_DEADZONE {
            to_target / dist
        } else {
            Vec2::ZERO
        };
    }

    let len = dir.length();
    if len > 0.0 {
        player.pos += dir / len * player.speed;
    }

    player.pos.x = player.pos.x.clamp(player.radius, bounds.x - player.radius);
    player.pos.y = player.pos.y.clamp(player.radius, bounds.y - player.radius);

    player.record_trail();
}

/// Exit arrival: bounding circle against the exit rectangle
pub fn reached_exit(player: &Player, exit: &Zone) -> bool {
    exit.overlaps_circle(player.pos, player.radius)
}

/// Stuck detection: barely moving within reach of the entrance accumulates a
/// timer; crossing the threshold demands a forced level reset (obstacles can
/// otherwise pin the player at spawn forever). Returns true when the reset
/// is due; the caller performs it.
pub fn update_stuck(player: &mut Player, entrance_mid: Vec2, tuning: &Tuning) -> bool {
    let near_entrance = (player.pos - entrance_mid).length() < tuning.stuck_distance;
    let moved = (player.pos - player.prev_pos).length();
    if near_entrance && moved < tuning.stuck_move_epsilon {
        player.stuck_ticks += 1;
    } else {
        player.stuck_ticks = 0;
    }
    player.stuck_ticks >= tuning.stuck_ticks
}
