//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;

use super::collision::{bounce_off, fell_out, wall_bounce};
use super::layout::generate_wall;
use super::score::{brick_points, level_clear_points};
use super::state::{BallState, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::rotate_degrees;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle direction, -1 (full left) to 1 (full right)
    pub paddle_axis: f32,
    /// Steer the paddle centre toward this x instead (mouse/touch)
    pub target_x: Option<f32>,
    /// Serve any held ball
    pub serve: bool,
    /// Pause toggle
    pub pause: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
    /// Demo mode - the paddle plays itself
    pub autoplay: bool,
}

impl TickInput {
    /// Drop the one-shot commands once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.serve = false;
        self.pause = false;
        self.skip_level = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing | GamePhase::Serve => {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = if state.has_free_ball() {
                    GamePhase::Playing
                } else {
                    GamePhase::Serve
                };
                state.push_event(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    let mut input = input.clone();
    if input.autoplay {
        autoplay(state, &mut input);
    }
    let input = &input;

    // Debug: skip to next level
    if input.skip_level {
        start_next_level(state);
        return;
    }

    state.time_ticks += 1;

    // Update paddle position
    let field = state.field();
    let max_speed = state.tuning.paddle_max_speed;
    let axis = match input.target_x {
        Some(x) => state.paddle.axis_toward(x, max_speed, dt),
        None => input.paddle_axis,
    };
    state.paddle.drive(axis, max_speed, dt, &field);

    match state.phase {
        GamePhase::Serve => {
            if input.serve {
                serve_held_balls(state);
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => {
            // Extra balls can be waiting while another is still in play
            if input.serve {
                serve_held_balls(state);
            }
            step_balls(state, dt);
        }

        GamePhase::LevelCleared => {
            state.phase_ticks += 1;
            if state.phase_ticks >= state.tuning.level_clear_ticks {
                start_next_level(state);
            }
        }

        GamePhase::Paused | GamePhase::GameOver => {}
    }
}

/// Serve angle in whole degrees off straight down, drawn from
/// `[-max_deg, max_deg)`. Anything closer to vertical than `min_deg` is
/// pushed out to `min_deg` on the same side (0 goes right).
pub fn serve_angle(rng: &mut impl Rng, max_deg: i32, min_deg: i32) -> i32 {
    if max_deg <= 0 {
        return 0;
    }
    let angle = rng.random_range(-max_deg..max_deg);
    if angle.abs() < min_deg {
        if angle < 0 { -min_deg } else { min_deg }
    } else {
        angle
    }
}

fn serve_held_balls(state: &mut GameState) {
    let mut rng = state.rng_state.next_rng();
    let tuning = &state.tuning;

    for ball in state.balls.iter_mut().filter(|b| b.state == BallState::Held) {
        let angle = serve_angle(&mut rng, tuning.max_serve_angle_deg, tuning.min_serve_angle_deg);
        ball.vel = rotate_degrees(Vec2::new(0.0, tuning.ball_start_speed), angle as f32);
        ball.state = BallState::Free;
        state.events.push(GameEvent::Served { ball_id: ball.id });
    }
}

/// Move free balls and resolve walls, paddle, bricks and ball loss
fn step_balls(state: &mut GameState, dt: f32) {
    let field = state.field();
    let start = state.ball_start();
    let paddle_rect = state.paddle.rect;
    let paddle_vel = state.paddle.vel;
    let had_bricks = !state.bricks.is_empty();
    let mut last_break_vel = None;
    let mut lost_any = false;

    for ball in state.balls.iter_mut() {
        if ball.state != BallState::Free {
            continue;
        }

        ball.paddle_cooldown = ball.paddle_cooldown.saturating_sub(1);
        ball.rect.translate(ball.vel * dt);

        if fell_out(&ball.rect, &field) {
            ball.reset(start);
            state.tokens.lose(1);
            lost_any = true;
            log::debug!("Ball {} lost, {} tokens left", ball.id, state.tokens.count());
            state.events.push(GameEvent::BallLost {
                ball_id: ball.id,
                tokens_left: state.tokens.count(),
            });
            continue;
        }

        let (vel, contact) = wall_bounce(&ball.rect, ball.vel, &field);
        ball.vel = vel;
        if contact.any() {
            state.events.push(GameEvent::WallHit { ball_id: ball.id });
        }

        if ball.paddle_cooldown == 0 && ball.rect.intersects(&paddle_rect) {
            ball.vel = bounce_off(&ball.rect, ball.vel, &paddle_rect, paddle_vel, &state.tuning);
            ball.paddle_cooldown = PADDLE_COOLDOWN_TICKS;
            state.events.push(GameEvent::PaddleHit { ball_id: ball.id });
        }

        for brick in state.bricks.iter_mut() {
            if brick.hp == 0 || !ball.rect.intersects(&brick.rect) {
                continue;
            }

            ball.vel = bounce_off(&ball.rect, ball.vel, &brick.rect, Vec2::ZERO, &state.tuning);
            brick.hp -= 1;

            if brick.hp > 0 {
                state.events.push(GameEvent::BrickHit {
                    brick_id: brick.id,
                    hp_left: brick.hp,
                });
                continue;
            }

            let points = brick_points(brick.kind, ball.vel);
            state.score += points;
            last_break_vel = Some(ball.vel);
            state.events.push(GameEvent::BrickBroken {
                brick_id: brick.id,
                kind: brick.kind,
                points,
            });

            if brick.kind.grants_token() {
                state.tokens.add(1);
                state.events.push(GameEvent::TokenGained {
                    tokens: state.tokens.count(),
                });
            }
        }
    }

    state.bricks.retain(|b| b.hp > 0);

    // Clearing the wall wins over running out of tokens in the same tick
    if had_bricks && state.bricks.is_empty() {
        clear_level(state, last_break_vel.unwrap_or(Vec2::ZERO));
        return;
    }

    if lost_any && state.tokens.is_empty() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {} on level {}", state.score, state.level);
        state.push_event(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        return;
    }

    if !state.has_free_ball() {
        state.phase = GamePhase::Serve;
    }
}

fn clear_level(state: &mut GameState, ball_vel: Vec2) {
    let bonus = level_clear_points(ball_vel);
    state.score += bonus;
    state.tokens.add(1);
    log::info!("Level {} cleared, bonus {}", state.level, bonus);
    state.push_event(GameEvent::LevelCleared {
        level: state.level,
        bonus,
    });
    state.push_event(GameEvent::TokenGained {
        tokens: state.tokens.count(),
    });

    let start = state.ball_start();
    for ball in &mut state.balls {
        ball.reset(start);
    }
    state.phase = GamePhase::LevelCleared;
    state.phase_ticks = 0;
}

/// Build the next wall and go back to serving with a single ball
fn start_next_level(state: &mut GameState) {
    state.level += 1;
    generate_wall(state);

    state.balls.truncate(1);
    let start = state.ball_start();
    match state.balls.first_mut() {
        Some(ball) => ball.reset(start),
        None => state.spawn_ball_held(),
    }

    state.phase = GamePhase::Serve;
    state.phase_ticks = 0;
    log::info!("Level {} started", state.level);
    state.push_event(GameEvent::LevelStarted { level: state.level });
}

/// Play for the user: serve straight away and steer toward where the
/// lowest falling ball will cross the paddle line.
fn autoplay(state: &GameState, input: &mut TickInput) {
    if state.phase == GamePhase::Serve {
        input.serve = true;
    }

    let paddle_top = state.paddle.rect.top();
    let urgent = state
        .balls
        .iter()
        .filter(|b| b.is_free() && b.vel.y > 0.0 && b.rect.bottom() <= paddle_top)
        .max_by(|a, b| {
            a.rect
                .bottom()
                .partial_cmp(&b.rect.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target = match urgent {
        Some(ball) => predict_landing_x(ball.rect.center(), ball.vel, ball.rect.w, paddle_top - ball.rect.h / 2.0),
        None => match state.balls.iter().find(|b| b.is_free()) {
            Some(ball) => ball.rect.center().x,
            None => FIELD_WIDTH / 2.0,
        },
    };

    // Vary the contact point so rallies don't loop forever
    let time_factor = state.time_ticks as f32 * 0.01;
    let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15) * state.paddle.rect.w / 2.0;

    input.target_x = Some(target + offset);
}

/// Where a ball centred at `pos` moving at `vel` will be horizontally when
/// its centre reaches `line_y`, folding in side wall bounces.
pub fn predict_landing_x(pos: Vec2, vel: Vec2, ball_width: f32, line_y: f32) -> f32 {
    if vel.y <= 0.0 {
        return pos.x;
    }

    let t = ((line_y - pos.y) / vel.y).max(0.0);
    let x = pos.x + vel.x * t;

    let lo = ball_width / 2.0;
    let hi = FIELD_WIDTH - ball_width / 2.0;
    let span = hi - lo;
    if span <= 0.0 {
        return FIELD_WIDTH / 2.0;
    }

    let mut p = (x - lo).rem_euclid(2.0 * span);
    if p > span {
        p = 2.0 * span - p;
    }
    lo + p
}
