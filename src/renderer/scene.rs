//! Per-frame scene composition
//!
//! Pure functions from session state to what should be on screen. The GPU
//! pipeline and the DOM overlays consume these.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Brick, Mode, Session};

/// Segments in the ball's triangle fan
const BALL_SEGMENTS: u32 = 32;

/// Text drawn centered over the surface while paused
pub const PAUSE_TEXT: &str = "Paused";

/// Everything drawn on the surface for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    /// Triangle list in surface pixels (origin top-left, y down)
    pub vertices: Vec<Vertex>,
    /// Centered overlay text
    pub pause_text: Option<&'static str>,
}

impl Scene {
    /// Alive bricks, then the paddle, then the ball
    pub fn compose(session: &Session) -> Self {
        let alive = session.bricks.alive().count();
        let mut vertices = Vec::with_capacity(alive * 6 + 6 + BALL_SEGMENTS as usize * 3);

        for brick in session.bricks.alive() {
            vertices.extend(shapes::rect(brick.origin(), Brick::size(), colors::BRICK));
        }

        let paddle = &session.paddle;
        vertices.extend(shapes::rect(
            glam::Vec2::new(paddle.x, paddle.y),
            glam::Vec2::new(paddle.width, paddle.height),
            colors::PADDLE,
        ));

        vertices.extend(shapes::circle(
            session.ball.pos,
            session.ball.radius,
            colors::BALL,
            BALL_SEGMENTS,
        ));

        let pause_text = (session.mode == Mode::Paused).then_some(PAUSE_TEXT);

        Self {
            vertices,
            pause_text,
        }
    }
}

/// Page elements outside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub level: u32,
    pub start_overlay: bool,
    pub game_over_overlay: bool,
    pub pause_overlay: bool,
}

impl Hud {
    pub fn from_session(session: &Session) -> Self {
        Self {
            level: session.level,
            start_overlay: session.mode == Mode::NotStarted,
            game_over_overlay: session.mode == Mode::GameOver,
            pause_overlay: session.mode == Mode::Paused,
        }
    }
}
