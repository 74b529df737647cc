//! Breaking Bricks - a Breakout clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, levels)
//! - `session`: Fixed-timestep runner that hosts drive once per frame
//! - `tuning`: Data-driven game balance
//! - `persistence`: Versioned save envelopes over a key/value store
//! - `platform`: Browser/native differences (time, storage)

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta a host may feed the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playing field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ticks after a paddle hit before the paddle can be hit again
    pub const PADDLE_COOLDOWN_TICKS: u32 = 10;
}

/// Rotate a vector by an angle in degrees.
///
/// With +y pointing down the field, positive angles turn clockwise on screen.
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Pixels per second expressed as pixels per millisecond
#[inline]
pub fn per_millisecond(v: Vec2) -> Vec2 {
    v / 1000.0
}
