//! Brick wall generation
//!
//! The wall is as many columns as fit across the field, centred so the
//! margins on both sides match. The gap after the last column is not part
//! of the wall's width.

use rand::Rng;

use super::rect::Rect;
use super::state::{Brick, BrickKind, GameState};
use crate::consts::FIELD_WIDTH;
use crate::tuning::Tuning;

/// Columns that fit across the field
pub fn column_count(tuning: &Tuning) -> u32 {
    (FIELD_WIDTH / (tuning.brick_width + tuning.brick_gap_x)).floor() as u32
}

/// Gap between the field edge and the first (or last) column
pub fn side_gap(tuning: &Tuning) -> f32 {
    let cols = column_count(tuning) as f32;
    let wall_width = (tuning.brick_width + tuning.brick_gap_x) * cols - tuning.brick_gap_x;
    ((FIELD_WIDTH - wall_width) / 2.0).floor()
}

/// Brick rectangles for a full wall, row by row
pub fn wall_rects(tuning: &Tuning) -> Vec<Rect> {
    let cols = column_count(tuning);
    let left = side_gap(tuning);

    let mut rects = Vec::with_capacity((cols * tuning.brick_rows) as usize);
    for row in 0..tuning.brick_rows {
        let y = tuning.brick_top + row as f32 * (tuning.brick_height + tuning.brick_gap_y);
        for col in 0..cols {
            let x = left + col as f32 * (tuning.brick_width + tuning.brick_gap_x);
            rects.push(Rect::new(x, y, tuning.brick_width, tuning.brick_height));
        }
    }
    rects
}

/// Replace the current bricks with a fresh wall for `state.level`
pub fn generate_wall(state: &mut GameState) {
    let level = state.level;
    let rects = wall_rects(&state.tuning);
    let mut rng = state.rng_state.next_rng();
    let mut token_placed = false;

    state.bricks.clear();
    for rect in rects {
        let kind = roll_brick_kind(level, &mut rng, token_placed);
        if kind == BrickKind::Token {
            token_placed = true;
        }
        let id = state.next_entity_id();
        state.bricks.push(Brick::new(id, kind, rect));
    }

    log::debug!("Level {} wall: {} bricks", level, state.bricks.len());
}

/// Level 1 is all standard bricks. Tough bricks appear from level 2,
/// bonus and token bricks from level 3, with at most one token per wall.
fn roll_brick_kind(level: u32, rng: &mut impl Rng, token_placed: bool) -> BrickKind {
    if level <= 1 {
        return BrickKind::Standard;
    }

    let roll = rng.random_range(0..100u32);

    if level >= 3 && !token_placed && roll < 2 {
        return BrickKind::Token;
    }

    if level >= 3 && (2..8).contains(&roll) {
        return BrickKind::Bonus;
    }

    // Tough bricks get more common each level, capped at half the wall
    let tough_chance = (10 + level * 5).min(50);
    if roll >= 100 - tough_chance {
        return BrickKind::Tough;
    }

    BrickKind::Standard
}
