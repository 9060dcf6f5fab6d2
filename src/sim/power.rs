//! Player power-up state machine and per-kind effects
//!
//! Effects are expressed as pure data: [`apply`] inspects the target obstacle
//! and returns a [`PowerAction`] delta for the tick loop to carry out. No
//! effect mutates engine state directly, which keeps every variant trivially
//! testable.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ShapeKind};
use crate::Tuning;

/// The three stealable powers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerKind {
    /// Randomizes the target's shape (rate-limited by a cooldown)
    ShapeShifter,
    /// Removes the target from the active set
    Eliminator,
    /// Shrinks the target toward the minimum size
    Reducer,
}

impl PowerKind {
    pub const ALL: [PowerKind; 3] = [
        PowerKind::ShapeShifter,
        PowerKind::Eliminator,
        PowerKind::Reducer,
    ];

    /// How long the power stays active after acquisition, in ticks
    pub fn duration_ticks(self) -> u64 {
        match self {
            PowerKind::ShapeShifter => 360,
            PowerKind::Eliminator => 240,
            PowerKind::Reducer => 300,
        }
    }

    pub fn random(rng: &mut Pcg32) -> Self {
        use rand::Rng;
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// What an active power does to an overlapped obstacle this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerAction {
    Reshape(ShapeKind),
    Eliminate,
    Shrink(f32),
}

/// The player's power-up state.
///
/// Lifecycle: idle -> active on steal (`ends_at = now + duration`), active ->
/// idle when the clock passes `ends_at`. Only one power is ever active;
/// acquisition while active is gated off in the collision pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerState {
    pub active: bool,
    pub kind: Option<PowerKind>,
    /// Tick at which the active power expires
    pub ends_at: u64,
    /// Currently wielding a power (as opposed to never having acquired one)
    pub has_power: bool,
    /// Last tick a shape-shift fired, for the cooldown
    pub last_shift_tick: u64,
}

impl PowerState {
    /// Acquire a power. Replaces any previous expiry rather than stacking.
    pub fn activate(&mut self, kind: PowerKind, now: u64) {
        self.active = true;
        self.has_power = true;
        self.kind = Some(kind);
        self.ends_at = now + kind.duration_ticks();
        self.last_shift_tick = 0;
    }

    /// Time-based expiry, checked once per tick
    pub fn expire_if_due(&mut self, now: u64) {
        if self.active && now >= self.ends_at {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.has_power = false;
        self.kind = None;
        self.ends_at = 0;
        self.last_shift_tick = 0;
    }
}

/// Compute the effect of the active power on an overlapped obstacle.
///
/// Returns `None` when nothing should happen this tick (no active power, or
/// the shape-shifter is still cooling down). The caller applies the action
/// and, for `Reshape`, records the shift tick.
pub fn apply(
    power: &PowerState,
    _target: &Obstacle,
    now: u64,
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> Option<PowerAction> {
    if !power.active {
        return None;
    }
    match power.kind? {
        PowerKind::ShapeShifter => {
            if now.saturating_sub(power.last_shift_tick) < tuning.shapeshift_cooldown_ticks {
                return None;
            }
            Some(PowerAction::Reshape(ShapeKind::random_regular(rng)))
        }
        PowerKind::Eliminator => Some(PowerAction::Eliminate),
        PowerKind::Reducer => Some(PowerAction::Shrink(tuning.reducer_factor)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_activation_sets_expiry() {
        let mut power = PowerState::default();
        power.activate(PowerKind::Reducer, 100);
        assert!(power.active);
        assert!(power.has_power);
        assert_eq!(power.ends_at, 100 + PowerKind::Reducer.duration_ticks());
    }

    #[test]
    fn test_expiry_is_time_based() {
        let mut power = PowerState::default();
        power.activate(PowerKind::Eliminator, 0);
        power.expire_if_due(PowerKind::Eliminator.duration_ticks() - 1);
        assert!(power.active);
        power.expire_if_due(PowerKind::Eliminator.duration_ticks());
        assert!(!power.active);
        assert!(power.kind.is_none());
        assert!(!power.has_power);
    }

    #[test]
    fn test_reactivation_replaces_expiry() {
        let mut power = PowerState::default();
        power.activate(PowerKind::Reducer, 0);
        let first_end = power.ends_at;
        power.activate(PowerKind::ShapeShifter, 50);
        assert_eq!(power.kind, Some(PowerKind::ShapeShifter));
        assert_ne!(power.ends_at, first_end);
        assert_eq!(power.ends_at, 50 + PowerKind::ShapeShifter.duration_ticks());
    }

    #[test]
    fn test_shapeshifter_cooldown() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let target = super::super::state::test_obstacle();

        let mut power = PowerState::default();
        power.activate(PowerKind::ShapeShifter, 0);
        power.last_shift_tick = 100;

        // Inside the cooldown: no action
        let action = apply(&power, &target, 100 + tuning.shapeshift_cooldown_ticks - 1, &tuning, &mut rng);
        assert!(action.is_none());

        // Past the cooldown: reshapes to a non-power kind
        let action = apply(&power, &target, 100 + tuning.shapeshift_cooldown_ticks, &tuning, &mut rng);
        match action {
            Some(PowerAction::Reshape(kind)) => assert!(!kind.is_power()),
            other => panic!("expected reshape, got {other:?}"),
        }
    }

    #[test]
    fn test_reducer_shrinks_eliminator_removes() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let target = super::super::state::test_obstacle();

        let mut power = PowerState::default();
        power.activate(PowerKind::Reducer, 0);
        assert_eq!(
            apply(&power, &target, 1, &tuning, &mut rng),
            Some(PowerAction::Shrink(tuning.reducer_factor))
        );

        power.activate(PowerKind::Eliminator, 0);
        assert_eq!(
            apply(&power, &target, 1, &tuning, &mut rng),
            Some(PowerAction::Eliminate)
        );
    }

    #[test]
    fn test_idle_power_does_nothing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let target = super::super::state::test_obstacle();
        let power = PowerState::default();
        assert!(apply(&power, &target, 0, &tuning, &mut rng).is_none());
    }
}
