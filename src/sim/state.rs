//! Entity state for the ball, paddle and brick grid
//!
//! Plain data plus the small geometric helpers the physics step needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Coarse game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Start overlay is showing, nothing moves
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen, pause text drawn over the scene
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

impl Mode {
    /// Whether the frame loop stays alive in this mode
    pub fn is_live(self) -> bool {
        matches!(self, Mode::Running | Mode::Paused)
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Held-key movement requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
}

impl Intents {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The player's paddle. `y` never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame while a direction key is held
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(PADDLE_SPEED)
    }
}

impl Paddle {
    pub fn new(speed: f32) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: SURFACE_HEIGHT - PADDLE_BOTTOM_GAP,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed,
        };
        paddle.recenter();
        paddle
    }

    /// Rightmost allowed `x`
    pub fn max_x(&self) -> f32 {
        SURFACE_WIDTH - self.width
    }

    pub fn recenter(&mut self) {
        self.x = SURFACE_WIDTH / 2.0 - self.width / 2.0;
    }

    /// Move by `amount` if there is room in that direction, stopping at the edge
    pub fn nudge(&mut self, direction: Direction, amount: f32) {
        let max_x = self.max_x();
        match direction {
            Direction::Right if self.x < max_x => self.x = (self.x + amount).min(max_x),
            Direction::Left if self.x > 0.0 => self.x = (self.x - amount).max(0.0),
            _ => {}
        }
    }

    /// Per-frame keyboard movement. Right wins when both keys are held
    /// and there is room to the right.
    pub fn apply_intents(&mut self, intents: Intents) {
        if intents.right && self.x < self.max_x() {
            self.nudge(Direction::Right, self.speed);
        } else if intents.left && self.x > 0.0 {
            self.nudge(Direction::Left, self.speed);
        }
    }

    /// Horizontal span as (left, right)
    pub fn span(&self) -> (f32, f32) {
        (self.x, self.x + self.width)
    }
}

/// The ball. Position may sit outside the surface until the bounce for
/// that frame is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::serve_position(),
            vel: Vec2::new(BALL_BASE_SPEED, -BALL_BASE_SPEED),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    pub fn serve_position() -> Vec2 {
        Vec2::new(SURFACE_WIDTH / 2.0, SURFACE_HEIGHT - BALL_SERVE_GAP)
    }

    /// Put the ball back at the serve point moving up and to the right
    pub fn serve(&mut self, speed: f32) {
        self.pos = Self::serve_position();
        self.vel = Vec2::new(speed, -speed);
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A single brick. Its position is derived from the grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub alive: bool,
}

impl Brick {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            alive: true,
        }
    }

    /// Top-left corner in surface pixels
    pub fn origin(&self) -> Vec2 {
        Vec2::new(
            self.col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
            self.row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
        )
    }

    pub fn size() -> Vec2 {
        Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)
    }
}

/// Row-major grid of bricks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// A fully alive grid
    pub fn new(rows: usize, cols: usize) -> Self {
        let bricks = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Brick::new(row, col)))
            .collect();
        Self { rows, cols, bricks }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row < self.rows && col < self.cols {
            self.bricks.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row < self.rows && col < self.cols {
            self.bricks.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.alive)
    }

    pub fn destroyed_count(&self) -> usize {
        self.bricks.iter().filter(|b| !b.alive).count()
    }

    /// Every brick destroyed. An empty grid never counts as cleared.
    pub fn is_cleared(&self) -> bool {
        !self.bricks.is_empty() && self.destroyed_count() == self.bricks.len()
    }
}
