//! Collision response for axis-aligned boxes
//!
//! The ball bounces away from whichever edges of the other box it is
//! poking past. Using `abs()` instead of a plain sign flip means a ball
//! that overlaps for several ticks keeps heading out instead of jittering.

use glam::Vec2;

use super::rect::Rect;
use crate::tuning::Tuning;

/// Which field walls a ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub side: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// New ball velocity after hitting `other`, which moves at `other_vel`.
///
/// Every hit also speeds the ball up a little and guarantees a minimum
/// vertical speed so it can never end up travelling flat.
pub fn bounce_off(ball: &Rect, vel: Vec2, other: &Rect, other_vel: Vec2, tuning: &Tuning) -> Vec2 {
    let mut vel = vel;

    if other.contains(ball) {
        // Swallowed whole, no edge to reason about: send it down
        vel.y = vel.y.abs();
    } else {
        if ball.bottom() > other.bottom() {
            vel.y = vel.y.abs();
        } else if ball.top() < other.top() {
            vel.y = -vel.y.abs();
        }

        if ball.right() > other.right() {
            vel.x = vel.x.abs();
        } else if ball.left() < other.left() {
            vel.x = -vel.x.abs();
        }
    }

    vel.x += tuning.velocity_transfer * other_vel.x;

    let speed = (vel.length() * tuning.speedup_per_hit).min(tuning.max_ball_speed);
    vel = vel.normalize_or_zero() * speed;

    enforce_min_y_speed(vel, tuning)
}

/// Raise |vy| to the minimum (downward when exactly 0), then trim vx if that
/// pushed the speed over the cap.
fn enforce_min_y_speed(mut vel: Vec2, tuning: &Tuning) -> Vec2 {
    let min_y = tuning.min_ball_y_speed;
    if vel.y > -min_y && vel.y < min_y {
        vel.y = if vel.y < 0.0 { -min_y } else { min_y };
    }

    let max = tuning.max_ball_speed;
    if vel.length_squared() > max * max {
        let max_x = (max * max - vel.y * vel.y).max(0.0).sqrt();
        vel.x = vel.x.clamp(-max_x, max_x);
    }
    vel
}

/// Bounce off the left, right and top of the field.
/// The bottom is open; see [`fell_out`].
pub fn wall_bounce(ball: &Rect, vel: Vec2, field: &Rect) -> (Vec2, WallContact) {
    let mut vel = vel;
    let mut contact = WallContact::default();

    if ball.left() < field.left() {
        vel.x = vel.x.abs();
        contact.side = true;
    } else if ball.right() > field.right() {
        vel.x = -vel.x.abs();
        contact.side = true;
    }

    if ball.top() < field.top() {
        vel.y = vel.y.abs();
        contact.top = true;
    }

    (vel, contact)
}

/// The ball is lost once its top edge has dropped below the field, so the
/// player gets to watch it fall off screen.
#[inline]
pub fn fell_out(ball: &Rect, field: &Rect) -> bool {
    ball.top() > field.bottom()
}
