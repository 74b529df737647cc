//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layout;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;
pub mod tokens;

pub use collision::{WallContact, bounce_off, fell_out, wall_bounce};
pub use layout::generate_wall;
pub use rect::{Rect, rects_collide};
pub use state::{Ball, BallState, Brick, BrickKind, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
pub use tokens::Tokens;
