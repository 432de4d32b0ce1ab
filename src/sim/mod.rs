//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Integer-valued pixel deltas, one step per frame
//! - Stable iteration order (row-major bricks)
//! - Deferred transitions are reported as events, never scheduled here

pub mod collision;
pub mod level;
pub mod session;
pub mod state;
pub mod tick;

pub use level::{ball_speed, build_bricks, column_count, next_level, row_count};
pub use session::Session;
pub use state::{Ball, Brick, BrickGrid, Direction, Intents, Mode, Paddle};
pub use tick::{Cue, GameEvent, advance};
