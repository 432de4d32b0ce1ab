//! Collision checks between the ball and the surface, paddle and bricks
//!
//! All checks are axis-aligned interval comparisons on the ball's current
//! position. Nothing is swept, so a fast enough ball can skip past a thin
//! target in one frame.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};

/// Ball extends past the left or right surface edge
pub fn hits_side_wall(ball: &Ball, surface_width: f32) -> bool {
    ball.right() > surface_width || ball.left() < 0.0
}

/// Ball extends past the top surface edge
pub fn hits_ceiling(ball: &Ball) -> bool {
    ball.top() < 0.0
}

/// Ball extends past the bottom surface edge (ball lost)
pub fn hits_floor(ball: &Ball, surface_height: f32) -> bool {
    ball.bottom() > surface_height
}

/// Ball center is over the paddle, the ball is falling and its bottom has
/// reached the paddle's top edge while its top is still above the paddle's
/// bottom edge.
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let (left, right) = paddle.span();
    let over_paddle = ball.pos.x > left && ball.pos.x < right;
    let falling = ball.vel.y > 0.0;
    let reached_top = ball.bottom() > paddle.y;
    let above_bottom = ball.top() < paddle.y + paddle.height;
    over_paddle && falling && reached_top && above_bottom
}

/// Point lies strictly inside the brick's rectangle
pub fn point_in_brick(point: Vec2, brick: &Brick) -> bool {
    let min = brick.origin();
    let max = min + Brick::size();
    point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: BALL_RADIUS,
        }
    }

    #[test]
    fn test_side_walls() {
        assert!(!hits_side_wall(&ball_at(430.0, 300.0, 5.0, 5.0), SURFACE_WIDTH));
        assert!(hits_side_wall(&ball_at(853.0, 300.0, 5.0, 5.0), SURFACE_WIDTH));
        assert!(hits_side_wall(&ball_at(7.0, 300.0, -5.0, 5.0), SURFACE_WIDTH));
        // Touching exactly is not past the edge
        assert!(!hits_side_wall(&ball_at(852.0, 300.0, 5.0, 5.0), SURFACE_WIDTH));
    }

    #[test]
    fn test_ceiling_and_floor() {
        assert!(hits_ceiling(&ball_at(100.0, 7.0, 5.0, -5.0)));
        assert!(!hits_ceiling(&ball_at(100.0, 8.0, 5.0, -5.0)));
        assert!(hits_floor(&ball_at(100.0, 593.0, 5.0, 5.0), SURFACE_HEIGHT));
        assert!(!hits_floor(&ball_at(100.0, 592.0, 5.0, 5.0), SURFACE_HEIGHT));
    }

    #[test]
    fn test_paddle_hit_requires_falling_ball() {
        let paddle = Paddle::default();
        let x = paddle.x + paddle.width / 2.0;
        assert!(hits_paddle(&ball_at(x, 575.0, 5.0, 5.0), &paddle));
        assert!(!hits_paddle(&ball_at(x, 575.0, 5.0, -5.0), &paddle));
    }

    #[test]
    fn test_paddle_miss_outside_span() {
        let paddle = Paddle::default();
        assert!(!hits_paddle(&ball_at(paddle.x, 575.0, 5.0, 5.0), &paddle));
        assert!(!hits_paddle(
            &ball_at(paddle.x + paddle.width, 575.0, 5.0, 5.0),
            &paddle
        ));
    }

    #[test]
    fn test_paddle_miss_once_ball_is_below() {
        let paddle = Paddle::default();
        let x = paddle.x + paddle.width / 2.0;
        // Top of the ball already under the paddle's bottom edge
        assert!(!hits_paddle(&ball_at(x, 599.0, 5.0, 5.0), &paddle));
    }

    #[test]
    fn test_point_in_brick_is_strict() {
        let brick = Brick::new(0, 0);
        assert!(point_in_brick(Vec2::new(40.0, 55.0), &brick));
        assert!(!point_in_brick(Vec2::new(35.0, 55.0), &brick));
        assert!(!point_in_brick(Vec2::new(105.0, 55.0), &brick));
        assert!(!point_in_brick(Vec2::new(40.0, 70.0), &brick));
    }
}
