//! Level progression: grid size and ball speed per level

use super::state::BrickGrid;
use crate::consts::*;

/// Brick rows for a level, growing by one per level up to the cap
pub fn row_count(level: u32) -> usize {
    (BRICK_BASE_ROWS.saturating_add(level) as usize).min(BRICK_MAX_ROWS)
}

pub fn column_count(_level: u32) -> usize {
    BRICK_COLUMNS
}

/// Per-axis ball speed at serve time
pub fn ball_speed(level: u32) -> f32 {
    BALL_BASE_SPEED + level.min(BALL_SPEED_LEVEL_CAP) as f32
}

/// Level after clearing `level`, held at the cap
pub fn next_level(level: u32) -> u32 {
    level.saturating_add(1).min(MAX_LEVEL)
}

/// Fresh, fully alive grid for a level
pub fn build_bricks(level: u32) -> BrickGrid {
    let grid = BrickGrid::new(row_count(level), column_count(level));
    log::debug!(
        "Level {}: {}x{} bricks",
        level,
        grid.rows(),
        grid.cols()
    );
    grid
}
