//! Per-obstacle behavior: pursuit, blindness, entrance repulsion, physics
//!
//! One call to [`update_obstacle`] advances a single obstacle by one tick.
//! The update only reads the player position and entrance midpoint; it never
//! touches other obstacles (pairwise resolution happens afterwards in the
//! tick loop, once every obstacle's post-chase state is stable).

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::Tuning;

/// Minimum ticks between blind spells, so an unlucky obstacle does not
/// chain-roll straight back into wandering.
const BLIND_RETRIGGER_LOCKOUT: u64 = 60;

/// Velocity jitter applied each tick while blind
const BLIND_JITTER: f32 = 0.3;

pub fn update_obstacle(
    ob: &mut Obstacle,
    player_pos: Vec2,
    entrance_mid: Vec2,
    bounds: Vec2,
    now: u64,
    tuning: &Tuning,
    rng: &mut Pcg32,
) {
    // Cosmetic spin
    ob.rotation += ob.rotation_rate;

    update_blind_state(ob, now, rng);

    let base_speed = ob.base_speed();

    if ob.blind {
        // Blind: small random perturbations, capped well below chase speed
        ob.vel += Vec2::new(
            rng.random_range(-BLIND_JITTER..BLIND_JITTER),
            rng.random_range(-BLIND_JITTER..BLIND_JITTER),
        );
        let max = tuning.blind_speed_factor * base_speed;
        if ob.vel.length() > max {
            ob.vel = ob.vel.normalize() * max;
        }
    } else {
        // Pursuit: inaccuracy dampens speed rather than skewing the heading
        let to_player = player_pos - ob.pos;
        let dist = to_player.length();
        if dist > 0.0 {
            ob.vel = to_player / dist * (base_speed * ob.chase_accuracy);
        }
    }

    // Entrance repulsion: a direct velocity nudge away from the entrance
    // midpoint, strongest at the midpoint and fading to zero at the edge of
    // the protection circle. Applied after the heading is set (pursuit
    // assigns velocity outright) so chasers cannot camp the spawn.
    let from_entrance = ob.pos - entrance_mid;
    let dist = from_entrance.length();
    if dist < tuning.entrance_protection_radius && dist > 0.0 {
        let strength =
            (1.0 - dist / tuning.entrance_protection_radius) * tuning.entrance_protection_force;
        ob.vel += from_entrance / dist * strength;
    }

    ob.vel *= tuning.friction;
    ob.pos += ob.vel;

    bounce_at_bounds(ob, bounds, tuning.elasticity);
}

/// Roll into/out of the blind state. Duration is sampled per spell from the
/// obstacle's own range; the end tick is recorded for the re-trigger lockout.
fn update_blind_state(ob: &mut Obstacle, now: u64, rng: &mut Pcg32) {
    if ob.blind {
        ob.blind_elapsed += 1;
        if ob.blind_elapsed >= ob.blind_duration {
            ob.blind = false;
            ob.last_blind_end = now;
        }
    } else if now.saturating_sub(ob.last_blind_end) >= BLIND_RETRIGGER_LOCKOUT
        && rng.random::<f32>() < ob.blind_chance
    {
        ob.blind = true;
        ob.blind_elapsed = 0;
        let (lo, hi) = ob.blind_range;
        ob.blind_duration = rng.random_range(lo..=hi);
    }
}

/// Clamp to the canvas and invert the offending velocity component, scaled by
/// elasticity so every bounce bleeds energy.
fn bounce_at_bounds(ob: &mut Obstacle, bounds: Vec2, elasticity: f32) {
    if ob.pos.x - ob.size < 0.0 {
        ob.pos.x = ob.size;
        ob.vel.x = -ob.vel.x * elasticity;
    } else if ob.pos.x + ob.size > bounds.x {
        ob.pos.x = bounds.x - ob.size;
        ob.vel.x = -ob.vel.x * elasticity;
    }
    if ob.pos.y - ob.size < 0.0 {
        ob.pos.y = ob.size;
        ob.vel.y = -ob.vel.y * elasticity;
    } else if ob.pos.y + ob.size > bounds.y {
        ob.pos.y = bounds.y - ob.size;
        ob.vel.y = -ob.vel.y * elasticity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_obstacle;
    use rand::SeedableRng;

    fn ctx() -> (Tuning, Pcg32) {
        (Tuning::default(), Pcg32::seed_from_u64(1234))
    }

    #[test]
    fn test_perfect_chaser_converges() {
        let (tuning, mut rng) = ctx();
        let mut ob = test_obstacle();
        ob.pos = Vec2::new(600.0, 300.0);
        let player = Vec2::new(400.0, 300.0);
        let entrance = Vec2::new(12.0, 300.0);
        let bounds = Vec2::new(800.0, 600.0);

        let mut last_dist = (player - ob.pos).length();
        for now in 0..100 {
            update_obstacle(&mut ob, player, entrance, bounds, now, &tuning, &mut rng);
            let dist = (player - ob.pos).length();
            assert!(dist < last_dist, "distance must strictly decrease");
            last_dist = dist;
        }
    }

    #[test]
    fn test_lower_accuracy_chases_slower() {
        let (tuning, mut rng) = ctx();
        let player = Vec2::new(400.0, 300.0);
        let entrance = Vec2::new(12.0, 300.0);
        let bounds = Vec2::new(800.0, 600.0);

        let mut fast = test_obstacle();
        fast.pos = Vec2::new(700.0, 300.0);
        let mut slow = test_obstacle();
        slow.pos = Vec2::new(700.0, 300.0);
        slow.chase_accuracy = 0.4;

        update_obstacle(&mut fast, player, entrance, bounds, 0, &tuning, &mut rng);
        update_obstacle(&mut slow, player, entrance, bounds, 0, &tuning, &mut rng);
        assert!(fast.vel.length() > slow.vel.length());
    }

    #[test]
    fn test_bounce_clamps_and_reflects() {
        let mut ob = test_obstacle();
        ob.pos = Vec2::new(790.0, 300.0);
        ob.vel = Vec2::new(5.0, 0.0);
        bounce_at_bounds(&mut ob, Vec2::new(800.0, 600.0), 0.7);
        assert_eq!(ob.pos.x, 800.0 - ob.size);
        assert!(ob.vel.x < 0.0);
        assert!((ob.vel.x + 5.0 * 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_entrance_repulsion_pushes_away() {
        let (tuning, mut rng) = ctx();
        let entrance = Vec2::new(12.0, 300.0);
        let mut ob = test_obstacle();
        ob.pos = Vec2::new(40.0, 300.0);
        // Chase would pull it left toward the player at the entrance; the
        // repulsion must win while well inside the protection circle.
        ob.chase_accuracy = 0.0;
        let before = ob.pos.x;
        update_obstacle(
            &mut ob,
            entrance,
            entrance,
            Vec2::new(800.0, 600.0),
            0,
            &tuning,
            &mut rng,
        );
        assert!(ob.pos.x > before);
    }

    #[test]
    fn test_blind_entry_and_expiry() {
        let (tuning, mut rng) = ctx();
        let mut ob = test_obstacle();
        ob.blind_chance = 1.0;
        ob.blind_range = (5, 5);
        let bounds = Vec2::new(800.0, 600.0);
        let player = Vec2::new(400.0, 300.0);
        let entrance = Vec2::new(12.0, 300.0);

        // First eligible tick rolls straight into blind (chance = 1)
        update_obstacle(&mut ob, player, entrance, bounds, BLIND_RETRIGGER_LOCKOUT, &tuning, &mut rng);
        assert!(ob.blind);
        assert_eq!(ob.blind_duration, 5);

        // Runs out after the sampled duration and records the end tick
        for now in 1..=5u64 {
            update_obstacle(
                &mut ob,
                player,
                entrance,
                bounds,
                BLIND_RETRIGGER_LOCKOUT + now,
                &tuning,
                &mut rng,
            );
        }
        assert!(!ob.blind);
        assert_eq!(ob.last_blind_end, BLIND_RETRIGGER_LOCKOUT + 5);

        // Lockout holds even at chance = 1
        update_obstacle(
            &mut ob,
            player,
            entrance,
            bounds,
            BLIND_RETRIGGER_LOCKOUT + 6,
            &tuning,
            &mut rng,
        );
        assert!(!ob.blind);
    }

    #[test]
    fn test_blind_speed_is_capped() {
        let (tuning, mut rng) = ctx();
        let mut ob = test_obstacle();
        ob.blind = true;
        ob.blind_duration = 1000;
        ob.vel = Vec2::new(10.0, 0.0);
        let cap = tuning.blind_speed_factor * ob.base_speed();
        update_obstacle(
            &mut ob,
            Vec2::new(400.0, 300.0),
            Vec2::new(12.0, 300.0),
            Vec2::new(800.0, 600.0),
            0,
            &tuning,
            &mut rng,
        );
        // Friction applies after the clamp, so the cap holds
        assert!(ob.vel.length() <= cap + 1e-4);
    }
}
