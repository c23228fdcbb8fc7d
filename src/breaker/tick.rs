//! Fixed timestep breaker tick

use super::levels::generate_level;
use super::state::{BreakerState, GameEvent};
use crate::consts::EVENT_QUEUE_CAP;
use crate::sim::{GamePhase, trim_oldest};

/// Pointer moved to logical `x`; centres the paddle there, kept on the table.
pub fn pointer_move(state: &mut BreakerState, x: Option<f32>) {
    if !state.phase.is_playing() {
        return;
    }
    let Some(x) = x.filter(|x| x.is_finite()) else {
        return;
    };
    let max_x = (state.tuning.width - state.tuning.paddle_width).max(0.0);
    state.paddle_x = (x - state.tuning.paddle_width / 2.0).clamp(0.0, max_x);
}

/// Advance the breaker by one tick. A no-op unless playing.
pub fn tick(state: &mut BreakerState) {
    if !state.phase.is_playing() {
        return;
    }

    state.time_ticks += 1;
    trim_oldest(&mut state.events, EVENT_QUEUE_CAP);

    move_ball(state);
    collide_paddle(state);
    collide_blocks(state);
    move_blocks(state);

    if state.blocks.iter().all(|b| !b.active) {
        advance_level(state);
        return;
    }

    let ball = &state.ball;
    if ball.pos.y + ball.radius > state.tuning.table_bottom {
        state.finish(GamePhase::GameOver);
    }
}

/// Integrate and bounce off the side walls and the top rail
fn move_ball(state: &mut BreakerState) {
    let width = state.tuning.width;
    let top = state.tuning.table_top;
    let ball = &mut state.ball;

    ball.pos += ball.vel;

    // Reflect away from the surface so a ball still touching it can't flip back
    if ball.pos.x - ball.radius < 0.0 {
        ball.vel.x = ball.vel.x.abs();
    } else if ball.pos.x + ball.radius > width {
        ball.vel.x = -ball.vel.x.abs();
    }
    if ball.pos.y - ball.radius < top {
        ball.vel.y = ball.vel.y.abs();
    }
}

fn collide_paddle(state: &mut BreakerState) {
    let paddle = state.paddle_rect();
    let ball = &mut state.ball;
    let descending = ball.vel.y > 0.0;
    let over_paddle = ball.pos.x > paddle.min.x && ball.pos.x < paddle.max.x;

    if descending && over_paddle && ball.pos.y + ball.radius > paddle.min.y {
        ball.vel.y = -ball.vel.y;
        state.score += state.tuning.paddle_score;
        state.events.push(GameEvent::PaddleBounce);
    }
}

/// Every overlapped block breaks and scores; the ball turns back once.
fn collide_blocks(state: &mut BreakerState) {
    let center = state.ball.pos;
    let radius = state.ball.radius;
    let points = state.tuning.block_score;

    let mut hits = 0;
    for block in state.blocks.iter_mut().filter(|b| b.active) {
        if block.rect().overlaps_circle_box(center, radius) {
            block.active = false;
            hits += 1;
            state.score += points;
            state.events.push(GameEvent::BlockDestroyed {
                id: block.id,
                points,
            });
        }
    }

    if hits > 0 {
        state.ball.vel.y = -state.ball.vel.y;
    }
}

fn move_blocks(state: &mut BreakerState) {
    let width = state.tuning.width;
    for block in state.blocks.iter_mut().filter(|b| b.active) {
        if let Some(vx) = block.vel_x.as_mut() {
            block.pos.x += *vx;
            if block.pos.x < 0.0 || block.pos.x + block.size.x > width {
                *vx = -*vx;
            }
        }
    }
}

/// Next layout with a faster serve, or the win once the last level is clear
fn advance_level(state: &mut BreakerState) {
    let cleared = state.level;
    state.events.push(GameEvent::LevelCleared { level: cleared });

    if cleared >= state.tuning.level_count {
        state.finish(GamePhase::Win);
        return;
    }

    state.level += 1;
    state.serve_ball();
    generate_level(state);
    log::info!(
        "Level {} cleared, serving at speed {:.1}",
        cleared,
        state.tuning.ball_speed(state.level)
    );
}
