//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tokens::Tokens;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball waiting at the start position for the serve input
    Serve,
    /// Active gameplay
    Playing,
    /// Wall cleared, short pause before the next level
    LevelCleared,
    /// Game is paused
    Paused,
    /// Out of tokens
    GameOver,
}

/// Ball state - waiting to be served or in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    Held,
    Free,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    pub state: BallState,
    /// Ticks before the paddle can be hit again (prevents repeated speed-ups while overlapping)
    #[serde(default)]
    pub paddle_cooldown: u32,
}

impl Ball {
    pub fn new(id: u32, start: Vec2, size: f32) -> Self {
        Self {
            id,
            rect: Rect::new(start.x, start.y, size, size),
            vel: Vec2::ZERO,
            state: BallState::Held,
            paddle_cooldown: 0,
        }
    }

    /// Put the ball back at `start`, stopped and waiting for a serve
    pub fn reset(&mut self, start: Vec2) {
        self.rect.set_top_left(start);
        self.vel = Vec2::ZERO;
        self.state = BallState::Held;
        self.paddle_cooldown = 0;
    }

    pub fn is_free(&self) -> bool {
        self.state == BallState::Free
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Only ever horizontal. Tracked so it can be passed on to the ball.
    pub vel: Vec2,
}

impl Paddle {
    /// Centred horizontally, `tuning.paddle_bottom_offset` above the bottom
    pub fn new(tuning: &Tuning) -> Self {
        let x = (FIELD_WIDTH - tuning.paddle_width) / 2.0;
        let y = FIELD_HEIGHT - tuning.paddle_bottom_offset;
        Self {
            rect: Rect::new(x, y, tuning.paddle_width, tuning.paddle_height),
            vel: Vec2::ZERO,
        }
    }

    /// Drive the paddle with an axis value in [-1, 1], staying on the field.
    /// A non-finite axis leaves the paddle where it is.
    pub fn drive(&mut self, axis: f32, max_speed: f32, dt: f32, field: &Rect) {
        let axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };
        self.vel = Vec2::new(axis * max_speed, 0.0);
        self.rect.translate(self.vel * dt);
        self.rect.clamp_horizontal(field);
    }

    /// Axis value that moves the paddle centre toward `target_x` without overshooting
    pub fn axis_toward(&self, target_x: f32, max_speed: f32, dt: f32) -> f32 {
        if !target_x.is_finite() {
            return 0.0;
        }
        let delta = target_x - self.rect.center().x;
        let max_step = max_speed * dt;
        if max_step <= 0.0 {
            return 0.0;
        }
        (delta / max_step).clamp(-1.0, 1.0)
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Standard,
    /// Takes two hits
    Tough,
    /// Worth ten times a standard brick
    Bonus,
    /// Grants a token when broken
    Token,
}

impl BrickKind {
    /// Base score value, scaled by ball speed when the brick breaks
    pub fn base_value(&self) -> u32 {
        match self {
            BrickKind::Standard => 1,
            BrickKind::Tough => 2,
            BrickKind::Bonus => 10,
            BrickKind::Token => 5,
        }
    }

    pub fn hit_points(&self) -> u8 {
        match self {
            BrickKind::Tough => 2,
            _ => 1,
        }
    }

    pub fn grants_token(&self) -> bool {
        *self == BrickKind::Token
    }
}

/// A brick entity. Bricks never move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub kind: BrickKind,
    pub hp: u8,
    pub rect: Rect,
}

impl Brick {
    pub fn new(id: u32, kind: BrickKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            hp: kind.hit_points(),
            rect,
        }
    }
}

/// Things that happened during a tick, for hosts to log, sound or animate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Served { ball_id: u32 },
    WallHit { ball_id: u32 },
    PaddleHit { ball_id: u32 },
    BrickHit { brick_id: u32, hp_left: u8 },
    BrickBroken { brick_id: u32, kind: BrickKind, points: u64 },
    TokenGained { tokens: u32 },
    BallLost { ball_id: u32, tokens_left: u32 },
    LevelCleared { level: u32, bonus: u64 },
    LevelStarted { level: u32 },
    Paused,
    Resumed,
    GameOver { score: u64, level: u32 },
}

/// RNG state wrapper for serialization.
///
/// Each draw site gets a fresh generator from `(seed, stream)` and bumps the
/// stream, so a deserialized state continues the exact same sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Current level (1-based)
    pub level: u32,
    pub tokens: Tokens,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks spent in the current timed phase (LevelCleared)
    pub phase_ticks: u32,
    pub tuning: Tuning,
    pub paddle: Paddle,
    /// Active balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    /// Remaining bricks (sorted by id for determinism)
    pub bricks: Vec<Brick>,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default balance. The wall is not built yet;
    /// call [`super::generate_wall`] (the session does this for you).
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level: 1,
            tokens: Tokens::new(tuning.starting_tokens),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Serve,
            phase_ticks: 0,
            paddle: Paddle::new(&tuning),
            tuning,
            balls: Vec::new(),
            bricks: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_ball_held();

        state
    }

    /// The playing field
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Where a held ball waits: centred horizontally, at mid-height
    pub fn ball_start(&self) -> Vec2 {
        let size = self.tuning.ball_size;
        Vec2::new((FIELD_WIDTH - size) / 2.0, FIELD_HEIGHT / 2.0)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_ball_held(&mut self) {
        let id = self.next_entity_id();
        let ball = Ball::new(id, self.ball_start(), self.tuning.ball_size);
        self.balls.push(ball);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_free_ball(&self) -> bool {
        self.balls.iter().any(Ball::is_free)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.bricks.sort_by_key(|b| b.id);
    }
}
