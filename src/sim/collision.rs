//! Collision detection and response
//!
//! Two concerns live here: pairwise obstacle-obstacle impulse resolution
//! (equal masses, elastic with energy loss, plus positional separation so
//! overlapping pairs never sink into each other), and classification of
//! player-obstacle contact into its gameplay outcome. The tick loop carries
//! the outcome out; classification itself mutates nothing.

use glam::Vec2;

use super::geometry::{circles_overlap, effective_radius};
use super::power::PowerState;
use super::state::{Obstacle, Player};

/// Gameplay outcome of a player-obstacle overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerContact {
    /// Inside the entrance protection circle: no consequence
    Protected,
    /// Power-bearing obstacle, player unarmed: player steals the power
    StealPower,
    /// Player's active power hits a regular obstacle
    PowerEffect,
    /// Unarmed player, hostile obstacle: infection
    Infection,
}

/// Classify an overlap, or `None` when the circles do not touch (or the
/// contact has no consequence, e.g. an armed player brushing a power
/// obstacle it cannot steal from).
pub fn classify_player_contact(
    player: &Player,
    ob: &Obstacle,
    power: &PowerState,
    entrance_mid: Vec2,
    protection_radius: f32,
) -> Option<PlayerContact> {
    let ob_radius = effective_radius(ob.kind, ob.size);
    if !circles_overlap(player.pos, player.radius, ob.pos, ob_radius) {
        return None;
    }

    if (player.pos - entrance_mid).length() < protection_radius {
        return Some(PlayerContact::Protected);
    }

    if ob.kind.is_power() {
        if !power.active {
            return Some(PlayerContact::StealPower);
        }
        // Already armed: power obstacles neither harm nor re-arm
        return None;
    }

    if power.active {
        Some(PlayerContact::PowerEffect)
    } else {
        Some(PlayerContact::Infection)
    }
}

/// Resolve one obstacle-obstacle contact.
///
/// If the pair overlaps (distance under the sum of sizes), applies an
/// equal-mass elastic impulse along the collision normal when the pair is
/// approaching, then separates both by half the overlap so the contact ends
/// exactly at touching distance. Returns whether a contact was resolved.
pub fn resolve_obstacle_pair(a: &mut Obstacle, b: &mut Obstacle, elasticity: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.size + b.size;
    if dist >= min_dist || dist <= 0.0 {
        // Coincident centers have no usable normal; the next tick's motion
        // will split them.
        return false;
    }

    let normal = delta / dist;

    // Impulse only when approaching, so a separating pair is not re-glued
    let rel_vel = (b.vel - a.vel).dot(normal);
    if rel_vel < 0.0 {
        let impulse = -(1.0 + elasticity) * rel_vel / 2.0;
        a.vel -= normal * impulse;
        b.vel += normal * impulse;
    }

    // Positional separation prevents persistent overlap ("sinking")
    let overlap = min_dist - dist;
    a.pos -= normal * (overlap * 0.5);
    b.pos += normal * (overlap * 0.5);
    true
}

/// Resolve every unordered obstacle pair once. Each pairwise resolution is
/// independent; no rollback is needed even in collision storms.
pub fn resolve_obstacle_pairs(obstacles: &mut [Obstacle], elasticity: f32) {
    for i in 0..obstacles.len() {
        let (head, tail) = obstacles.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            resolve_obstacle_pair(a, b, elasticity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ShapeKind, test_obstacle};
    use glam::Vec2;

    #[test]
    fn test_pair_separates_to_exact_contact() {
        let mut a = test_obstacle();
        let mut b = test_obstacle();
        b.id = 2;
        a.pos = Vec2::new(400.0, 300.0);
        b.pos = Vec2::new(430.0, 300.0); // overlap: sizes 40 + 40 vs dist 30
        a.vel = Vec2::new(1.0, 0.0);
        b.vel = Vec2::new(-1.0, 0.0);

        assert!(resolve_obstacle_pair(&mut a, &mut b, 0.7));
        let dist = (b.pos - a.pos).length();
        assert!((dist - (a.size + b.size)).abs() < 1e-3);
    }

    #[test]
    fn test_impulse_is_symmetric() {
        let mut a = test_obstacle();
        let mut b = test_obstacle();
        b.id = 2;
        a.pos = Vec2::new(400.0, 300.0);
        b.pos = Vec2::new(450.0, 300.0);
        a.vel = Vec2::new(2.0, 0.0);
        b.vel = Vec2::new(-1.0, 0.0);
        let before_a = a.vel;
        let before_b = b.vel;

        resolve_obstacle_pair(&mut a, &mut b, 0.7);

        let da = a.vel - before_a;
        let db = b.vel - before_b;
        // Equal magnitude, opposite direction on the normal axis
        assert!((da + db).length() < 1e-5);
        assert!(da.length() > 0.0);
    }

    #[test]
    fn test_separating_pair_gets_no_impulse() {
        let mut a = test_obstacle();
        let mut b = test_obstacle();
        b.id = 2;
        a.pos = Vec2::new(400.0, 300.0);
        b.pos = Vec2::new(450.0, 300.0);
        // Already moving apart
        a.vel = Vec2::new(-1.0, 0.0);
        b.vel = Vec2::new(1.0, 0.0);

        resolve_obstacle_pair(&mut a, &mut b, 0.7);
        assert_eq!(a.vel, Vec2::new(-1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
        // But the overlap is still separated
        assert!(((b.pos - a.pos).length() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_distant_pair_untouched() {
        let mut a = test_obstacle();
        let mut b = test_obstacle();
        b.id = 2;
        b.pos = Vec2::new(700.0, 300.0);
        let (pa, pb) = (a.pos, b.pos);
        assert!(!resolve_obstacle_pair(&mut a, &mut b, 0.7));
        assert_eq!(a.pos, pa);
        assert_eq!(b.pos, pb);
    }

    #[test]
    fn test_contact_classification() {
        use crate::Tuning;
        let tuning = Tuning::default();
        let entrance_mid = Vec2::new(12.0, 300.0);

        let mut player = crate::sim::Player::new(Vec2::new(400.0, 300.0), 3.0);
        let mut ob = test_obstacle();
        ob.pos = player.pos; // dead overlap
        let mut power = PowerState::default();

        // Unarmed vs regular shape: infection
        assert_eq!(
            classify_player_contact(&player, &ob, &power, entrance_mid, tuning.entrance_protection_radius),
            Some(PlayerContact::Infection)
        );

        // Unarmed vs power shape: steal
        ob.kind = ShapeKind::Power;
        assert_eq!(
            classify_player_contact(&player, &ob, &power, entrance_mid, tuning.entrance_protection_radius),
            Some(PlayerContact::StealPower)
        );

        // Armed vs power shape: nothing
        power.activate(super::super::power::PowerKind::Reducer, 0);
        assert_eq!(
            classify_player_contact(&player, &ob, &power, entrance_mid, tuning.entrance_protection_radius),
            None
        );

        // Armed vs regular shape: effect
        ob.kind = ShapeKind::Hexagon;
        assert_eq!(
            classify_player_contact(&player, &ob, &power, entrance_mid, tuning.entrance_protection_radius),
            Some(PlayerContact::PowerEffect)
        );

        // Inside the protection circle nothing ever bites
        power.clear();
        player.pos = Vec2::new(30.0, 300.0);
        ob.pos = player.pos;
        assert_eq!(
            classify_player_contact(&player, &ob, &power, entrance_mid, tuning.entrance_protection_radius),
            Some(PlayerContact::Protected)
        );
    }

    #[test]
    fn test_no_overlap_no_contact() {
        use crate::Tuning;
        let tuning = Tuning::default();
        let player = crate::sim::Player::new(Vec2::new(400.0, 300.0), 3.0);
        let mut ob = test_obstacle();
        ob.pos = Vec2::new(700.0, 300.0);
        assert_eq!(
            classify_player_contact(
                &player,
                &ob,
                &PowerState::default(),
                Vec2::new(12.0, 300.0),
                tuning.entrance_protection_radius
            ),
            None
        );
    }
}
