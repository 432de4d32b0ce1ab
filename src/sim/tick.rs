//! One frame of simulation
//!
//! Paddle move, ball move, wall/floor/paddle bounces, brick hits and the
//! level-clear check, always in that order.

use serde::{Deserialize, Serialize};

use super::collision::{hits_ceiling, hits_floor, hits_paddle, hits_side_wall, point_in_brick};
use super::session::Session;
use super::state::{Direction, Mode};
use crate::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};

/// Sound cues triggered by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Wall or paddle bounce
    Hit,
    /// Brick destroyed
    Brick,
    /// Level cleared
    Win,
    /// Ball left through the bottom
    Lose,
}

/// Side effects of a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(Cue),
    BrickDestroyed { row: usize, col: usize },
    /// Schedule the game-over transition for this run after the loss delay
    BallLost { epoch: u32 },
    LevelUp { level: u32 },
}

/// Advance the session by one frame. Does nothing unless running.
pub fn advance(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.mode != Mode::Running {
        return events;
    }

    if session.autopilot {
        steer_autopilot(session);
    }

    // 1. Paddle
    session.paddle.apply_intents(session.intents);

    // 2. Ball
    let ball = &mut session.ball;
    ball.pos += ball.vel;

    // 3. Side walls
    if hits_side_wall(ball, SURFACE_WIDTH) {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::Sound(Cue::Hit));
    }

    // 4. Ceiling
    if hits_ceiling(ball) {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::Sound(Cue::Hit));
    }

    // 5. Floor: game over follows after the loss delay
    if hits_floor(ball, SURFACE_HEIGHT) {
        if let Some(epoch) = session.mark_ball_lost() {
            events.push(GameEvent::Sound(Cue::Lose));
            events.push(GameEvent::BallLost { epoch });
        }
    }

    // 6. Paddle
    let ball = &mut session.ball;
    if hits_paddle(ball, &session.paddle) {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::Sound(Cue::Hit));
    }

    // 7. Bricks. Every brick under the ball center is hit this frame.
    for brick in session.bricks.iter_mut().filter(|b| b.alive) {
        if point_in_brick(ball.pos, brick) {
            ball.vel.y = -ball.vel.y;
            brick.alive = false;
            log::debug!("Brick ({}, {}) destroyed", brick.row, brick.col);
            events.push(GameEvent::BrickDestroyed {
                row: brick.row,
                col: brick.col,
            });
            events.push(GameEvent::Sound(Cue::Brick));
        }
    }

    // 8. Level clear
    if session.bricks.is_cleared() {
        events.push(GameEvent::Sound(Cue::Win));
        session.level_up();
        events.push(GameEvent::LevelUp {
            level: session.level,
        });
    }

    events
}

/// Point the held-key intents at the ball, with a dead zone around the
/// paddle center so it doesn't jitter.
fn steer_autopilot(session: &mut Session) {
    let (left, right) = session.paddle.span();
    let center = (left + right) / 2.0;
    let dead_zone = session.paddle.width / 4.0;
    let offset = session.ball.pos.x - center;

    session.intents.clear();
    if offset > dead_zone {
        session.intents.set(Direction::Right, true);
    } else if offset < -dead_zone {
        session.intents.set(Direction::Left, true);
    }
}
