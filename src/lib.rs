//! Brick Breaker - A classic paddle-and-bricks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, levels, physics, game modes)
//! - `input`: Keyboard, drag and autopilot intent mapping
//! - `driver`: Per-frame scheduling decisions and deferred timers
//! - `renderer`: Scene composition and the WebGPU pipeline
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Drawing surface size in pixels
    pub const SURFACE_WIDTH: f32 = 860.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the surface bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_GAP: f32 = 20.0;
    /// Pixels per frame while a direction key is held
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Pixels per drag move event (same value as the keyboard speed)
    pub const DRAG_STEP: f32 = 7.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Distance from the surface bottom to the ball's serve position
    pub const BALL_SERVE_GAP: f32 = 30.0;
    /// Per-axis speed before any level scaling is applied
    pub const BALL_BASE_SPEED: f32 = 4.0;
    /// Level beyond which the ball stops getting faster
    pub const BALL_SPEED_LEVEL_CAP: u32 = 10;

    /// Brick layout
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_BASE_ROWS: u32 = 3;
    pub const BRICK_MAX_ROWS: usize = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;

    /// Highest reachable level
    pub const MAX_LEVEL: u32 = 100;

    /// Delay between losing the ball and the game-over screen
    pub const LOSS_DELAY_MS: u32 = 1000;
}
