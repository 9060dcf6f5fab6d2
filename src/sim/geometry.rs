//! Pure geometry helpers shared by the behavior and collision code.

use glam::Vec2;

use super::state::ShapeKind;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Effective collision radius for a shape of the given nominal size.
///
/// Each polygon gets a fixed multiplier approximating its collision envelope.
/// These are tuned constants, not derived from vertex geometry at runtime.
pub fn effective_radius(kind: ShapeKind, size: f32) -> f32 {
    let mult = match kind {
        ShapeKind::Triangle => 0.5,
        ShapeKind::Square => 0.71,
        ShapeKind::Rectangle => 1.25,
        ShapeKind::Pentagon => 0.81,
        ShapeKind::Hexagon => 0.866,
        ShapeKind::Heptagon => 0.9,
        ShapeKind::Octagon => 0.92,
        ShapeKind::Star => 0.6,
        ShapeKind::Diamond => 0.7,
        ShapeKind::Cross => 0.55,
        ShapeKind::Arrow => 0.6,
        ShapeKind::Trapezoid => 0.75,
        ShapeKind::Kite => 0.65,
        ShapeKind::Crescent => 0.6,
        ShapeKind::Blob => 0.95,
        ShapeKind::Power => 1.0,
    };
    mult * size
}

/// True iff two circles overlap (strict: touching circles do not count)
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    distance(pos_a, pos_b) < radius_a + radius_b
}
