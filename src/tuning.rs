//! Game balance parameters
//!
//! Everything that shapes how the game feels lives here rather than in the
//! simulation code, so difficulty presets are just different `Tuning` values.

use serde::{Deserialize, Serialize};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Balance constants. Speeds are in pixels per second, sizes in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Ball ===
    pub ball_size: f32,
    /// Speed the ball is served at
    pub ball_start_speed: f32,
    /// Vertical speed floor after any collision (keeps the ball from skimming sideways forever)
    pub min_ball_y_speed: f32,
    pub max_ball_speed: f32,
    /// Serve angles are drawn from [-max, max) degrees off straight down
    pub max_serve_angle_deg: i32,
    /// Serves closer to vertical than this get pushed out to it
    pub min_serve_angle_deg: i32,
    /// Multiplier applied to ball speed on every object hit
    pub speedup_per_hit: f32,
    /// Fraction of the struck object's horizontal velocity added to the ball
    pub velocity_transfer: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the bottom of the field to the paddle's top edge
    pub paddle_bottom_offset: f32,
    pub paddle_max_speed: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_rows: u32,
    pub brick_gap_x: f32,
    pub brick_gap_y: f32,
    /// y of the first brick row
    pub brick_top: f32,

    // === Run ===
    pub starting_tokens: u32,
    /// Pause between clearing a wall and the next level's serve (ticks)
    pub level_clear_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_size: 20.0,
            ball_start_speed: 250.0,
            min_ball_y_speed: 250.0,
            max_ball_speed: 1200.0,
            max_serve_angle_deg: 60,
            min_serve_angle_deg: 15,
            speedup_per_hit: 1.01,
            velocity_transfer: 0.10,

            paddle_width: 100.0,
            paddle_height: 20.0,
            paddle_bottom_offset: 100.0,
            paddle_max_speed: 550.0,

            brick_width: 70.0,
            brick_height: 20.0,
            brick_rows: 5,
            brick_gap_x: 10.0,
            brick_gap_y: 10.0,
            brick_top: 0.0,

            starting_tokens: 3,
            level_clear_ticks: 2 * 120,
        }
    }
}

impl Tuning {
    /// Balance for a difficulty preset
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let base = Self::default();
        match difficulty {
            Difficulty::Easy => Self {
                ball_start_speed: 200.0,
                min_ball_y_speed: 200.0,
                paddle_width: 130.0,
                starting_tokens: 5,
                ..base
            },
            Difficulty::Normal => base,
            Difficulty::Hard => Self {
                ball_start_speed: 320.0,
                min_ball_y_speed: 300.0,
                speedup_per_hit: 1.02,
                paddle_width: 80.0,
                starting_tokens: 2,
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_is_default() {
        assert_eq!(Tuning::for_difficulty(Difficulty::Normal), Tuning::default());
    }

    #[test]
    fn test_presets_order_by_challenge() {
        let easy = Tuning::for_difficulty(Difficulty::Easy);
        let hard = Tuning::for_difficulty(Difficulty::Hard);
        assert!(easy.starting_tokens > hard.starting_tokens);
        assert!(easy.ball_start_speed < hard.ball_start_speed);
        assert!(easy.paddle_width > hard.paddle_width);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("norm"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }
}
