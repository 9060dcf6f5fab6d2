//! Game state and core simulation types
//!
//! Everything the render collaborator reads each frame lives here. State is
//! serializable for snapshotting; the RNG is reconstructed from the seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::power::PowerState;
use crate::Tuning;
use crate::consts::*;

/// The fixed set of obstacle shapes. `Power` marks an obstacle that carries a
/// stealable power-up; every other kind is purely cosmetic apart from its
/// collision envelope (see [`super::geometry::effective_radius`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Triangle,
    Square,
    Rectangle,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
    Star,
    Diamond,
    Cross,
    Arrow,
    Trapezoid,
    Kite,
    Crescent,
    Blob,
    Power,
}

impl ShapeKind {
    /// Every non-power shape, for random reassignment and spawning
    pub const REGULAR: [ShapeKind; 15] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Rectangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Heptagon,
        ShapeKind::Octagon,
        ShapeKind::Star,
        ShapeKind::Diamond,
        ShapeKind::Cross,
        ShapeKind::Arrow,
        ShapeKind::Trapezoid,
        ShapeKind::Kite,
        ShapeKind::Crescent,
        ShapeKind::Blob,
    ];

    /// Pick a uniformly random non-power shape
    pub fn random_regular(rng: &mut Pcg32) -> Self {
        Self::REGULAR[rng.random_range(0..Self::REGULAR.len())]
    }

    pub fn is_power(self) -> bool {
        self == ShapeKind::Power
    }
}

/// Notification fired synchronously within the tick that detected the
/// condition. Each is queued at most once per triggering event; the UI
/// collaborator drains the queue after every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelChanged(u32),
    Success,
    GameOver,
}

/// An axis-aligned zone (entrance or exit)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Zone {
    pub min: Vec2,
    pub max: Vec2,
}

impl Zone {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Circle-vs-rect overlap: distance from the circle center to the
    /// closest point of the rect is under the radius.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        (center - closest).length() < radius
    }
}

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub infected: bool,
    /// Ramps from 0 to 1 at a fixed rate once infected (render drives a tint)
    pub infection_progress: f32,
    /// Position history, newest first (render only)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
    /// Position at the end of the previous tick, for stuck detection
    pub prev_pos: Vec2,
    /// Consecutive ticks spent barely moving near the entrance
    pub stuck_ticks: u32,
}

impl Player {
    pub fn new(spawn: Vec2, speed: f32) -> Self {
        Self {
            pos: spawn,
            radius: PLAYER_RADIUS,
            speed,
            infected: false,
            infection_progress: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            prev_pos: spawn,
            stuck_ticks: 0,
        }
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    /// Return to spawn and clear everything except session-level settings
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.prev_pos = spawn;
        self.infected = false;
        self.infection_progress = 0.0;
        self.trail.clear();
        self.stuck_ticks = 0;
    }
}

/// A hostile shape pursuing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ShapeKind,
    pub pos: Vec2,
    /// Nominal size; drives both visual scale and (inversely) speed.
    /// Never drops below [`MIN_SHAPE_SIZE`].
    pub size: f32,
    pub vel: Vec2,
    /// Cosmetic spin
    pub rotation: f32,
    pub rotation_rate: f32,
    /// Blind state: randomized movement instead of pursuit
    pub blind: bool,
    pub blind_elapsed: u32,
    pub blind_duration: u32,
    /// Sampled duration range (ticks) when entering blind state
    pub blind_range: (u32, u32),
    /// Per-tick probability of rolling into blind state
    pub blind_chance: f32,
    /// Tick at which the last blind spell ended (re-trigger lockout)
    pub last_blind_end: u64,
    /// 0 = pure wander, 1 = perfect pursuit. Scales chase speed down for
    /// inaccurate chasers rather than adding angular noise.
    pub chase_accuracy: f32,
}

impl Obstacle {
    /// Base speed from size: linear map of [30, 90] onto [2.0, 0.5],
    /// clamped outside that range. Bigger shapes lumber, small ones dart.
    pub fn base_speed(&self) -> f32 {
        let size = self.size.clamp(SPAWN_SIZE_MIN, SPAWN_SIZE_MAX);
        let t = (size - SPAWN_SIZE_MIN) / (SPAWN_SIZE_MAX - SPAWN_SIZE_MIN);
        crate::lerp(SPEED_AT_MIN_SIZE, SPEED_AT_MAX_SIZE, t)
    }

    /// Shrink by a factor, clamped to the size floor. Shrinking never
    /// destroys an obstacle.
    pub fn shrink(&mut self, factor: f32) {
        self.size = (self.size * factor).max(MIN_SHAPE_SIZE);
    }
}

/// A particle for the infection burst (render hint, not gameplay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub size: f32,
}

fn restored_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded generator threaded through every random draw
    #[serde(skip, default = "restored_rng")]
    pub rng: Pcg32,
    /// Balance knobs, fixed for the session
    pub tuning: Tuning,
    /// Current level, starts at 1
    pub level: u32,
    /// Game-over overlay is showing (the sim keeps running)
    pub game_over: bool,
    /// Ticks until the game-over overlay auto-dismisses
    pub game_over_ticks: u32,
    /// True only during the tick that detected exit arrival
    pub success: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Canvas dimensions
    pub width: f32,
    pub height: f32,
    pub entrance: Zone,
    pub exit: Zone,
    pub player: Player,
    pub power: PowerState,
    /// Active obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Pending notifications, drained by the UI collaborator each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session with default balance on the default canvas
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, CANVAS_WIDTH, CANVAS_HEIGHT, Tuning::default())
    }

    /// Create a session with explicit canvas dimensions and balance
    pub fn with_tuning(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let mid_y = height * 0.5;
        let entrance = Zone::new(Vec2::new(0.0, mid_y - 60.0), Vec2::new(24.0, mid_y + 60.0));
        let exit = Zone::new(
            Vec2::new(width - 24.0, mid_y - 60.0),
            Vec2::new(width, mid_y + 60.0),
        );
        let spawn = Vec2::new(entrance.max.x + PLAYER_RADIUS, mid_y);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(spawn, tuning.player_speed),
            tuning,
            level: 1,
            game_over: false,
            game_over_ticks: 0,
            success: false,
            time_ticks: 0,
            width,
            height,
            entrance,
            exit,
            power: PowerState::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        super::level::populate(&mut state);
        state
    }

    /// Player spawn point, just inside the entrance
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.entrance.max.x + PLAYER_RADIUS, self.entrance.midpoint().y)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a notification for the UI collaborator
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications (call once per frame)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Emit a radial particle burst at `pos` (infection flash)
    pub fn emit_burst(&mut self, pos: Vec2, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(1.0..4.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                size: self.rng.random_range(2.0..6.0),
            });
        }
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}

/// A plain mid-field obstacle for tests (no blindness, perfect accuracy)
#[cfg(test)]
pub(crate) fn test_obstacle() -> Obstacle {
    Obstacle {
        id: 1,
        kind: ShapeKind::Hexagon,
        pos: Vec2::new(400.0, 300.0),
        size: 40.0,
        vel: Vec2::ZERO,
        rotation: 0.0,
        rotation_rate: 0.01,
        blind: false,
        blind_elapsed: 0,
        blind_duration: 0,
        blind_range: (30, 180),
        blind_chance: 0.0,
        last_blind_end: 0,
        chase_accuracy: 1.0,
    }
}
