//! Axis-aligned rectangle geometry for the ball, paddle, bricks and field
//!
//! Screen convention: origin at the top-left, +x right, +y down. A rect is
//! anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`, keeping the width
    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top_left(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// True when the two rects overlap with a non-zero area.
    /// Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when `other` lies entirely inside this rect (edges inclusive)
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Move the rect horizontally so it sits within `bounds`.
    /// A rect wider than the bounds is pinned to the left edge.
    pub fn clamp_horizontal(&mut self, bounds: &Rect) {
        if self.right() > bounds.right() {
            self.set_right(bounds.right());
        }
        if self.left() < bounds.left() {
            self.set_left(bounds.left());
        }
    }
}

/// Checks if the rectangles around two game objects overlap
#[inline]
pub fn rects_collide(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}
