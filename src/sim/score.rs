//! Scoring
//!
//! Points scale with the square of the ball's speed, so the longer a rally
//! runs (and the faster the ball gets) the more each brick is worth. Speeds
//! are converted to pixels per millisecond first, where they are small
//! numbers; the `sqrt(1000)` factor brings the result back to a sensible
//! range.

use glam::Vec2;

use super::state::BrickKind;
use crate::per_millisecond;

/// Base value for clearing a whole wall
pub const LEVEL_CLEAR_BASE: u32 = 1000;

#[inline]
fn speed_factor() -> f32 {
    1000.0_f32.sqrt()
}

/// Points for an event worth `base`, given the ball velocity at that moment.
/// Always at least 1.
pub fn points(base: u32, ball_vel: Vec2) -> u64 {
    let raw = speed_factor() * per_millisecond(ball_vel).length_squared() * base as f32;
    (raw.floor() as u64).max(1)
}

pub fn brick_points(kind: BrickKind, ball_vel: Vec2) -> u64 {
    points(kind.base_value(), ball_vel)
}

pub fn level_clear_points(ball_vel: Vec2) -> u64 {
    points(LEVEL_CLEAR_BASE, ball_vel)
}
