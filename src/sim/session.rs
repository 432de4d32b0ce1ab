//! Game session and mode transitions
//!
//! One `Session` owns every entity for a single player. The frame driver
//! and the input callbacks both mutate it; nothing is shared across threads.

use serde::{Deserialize, Serialize};

use super::level::{ball_speed, build_bricks, next_level};
use super::state::{Ball, BrickGrid, Direction, Intents, Mode, Paddle};
use crate::settings::Settings;

/// Complete game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Current mode
    pub mode: Mode,
    /// Current level (1..=100)
    pub level: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Held direction keys
    pub intents: Intents,
    /// Demo mode: intents follow the ball
    pub autopilot: bool,
    /// Pixels per drag move event
    drag_step: f32,
    /// Incremented on every start; tags deferred game-over timers
    epoch: u32,
    /// Ball already lost this run, game over is scheduled
    loss_pending: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            mode: Mode::NotStarted,
            level: 1,
            paddle: Paddle::new(settings.key_paddle_speed()),
            ball: Ball::default(),
            bricks: build_bricks(1),
            intents: Intents::default(),
            autopilot: false,
            drag_step: settings.drag_paddle_step(),
            epoch: 0,
            loss_pending: false,
        }
    }

    /// Identifier of the current run
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Ball was lost this run and the game-over timer is running
    pub fn loss_pending(&self) -> bool {
        self.loss_pending
    }

    /// Begin a run at the current level. Only valid before the first run
    /// (or from a restart, which goes through here).
    pub fn start(&mut self) -> bool {
        if self.mode != Mode::NotStarted {
            log::debug!("Ignoring start in {:?}", self.mode);
            return false;
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.loss_pending = false;
        self.mode = Mode::Running;
        self.bricks = build_bricks(self.level);
        self.reset_ball_and_paddle();
        log::info!("Run {} started at level {}", self.epoch, self.level);
        true
    }

    /// Flip between running and paused. Ignored in any other mode.
    pub fn toggle_pause(&mut self) -> bool {
        self.mode = match self.mode {
            Mode::Running => Mode::Paused,
            Mode::Paused => Mode::Running,
            other => {
                log::debug!("Ignoring pause toggle in {:?}", other);
                return false;
            }
        };
        log::debug!("Pause toggled -> {:?}", self.mode);
        true
    }

    /// Pause only if currently running (focus loss, hidden tab)
    pub fn pause(&mut self) -> bool {
        self.mode == Mode::Running && self.toggle_pause()
    }

    /// Advance to the next level: new grid, ball and paddle back to serve.
    /// Mode is unchanged.
    pub fn level_up(&mut self) {
        self.level = next_level(self.level);
        self.reset_ball_and_paddle();
        self.bricks = build_bricks(self.level);
        log::info!("Level up -> {}", self.level);
    }

    /// Record the ball leaving through the bottom. Returns the run epoch the
    /// first time per run so the caller can schedule the game-over timer.
    pub fn mark_ball_lost(&mut self) -> Option<u32> {
        if self.loss_pending {
            return None;
        }
        self.loss_pending = true;
        log::info!("Ball lost in run {}", self.epoch);
        Some(self.epoch)
    }

    /// Deferred game-over. Timers from an earlier run are ignored.
    pub fn expire_loss(&mut self, epoch: u32) -> bool {
        if epoch != self.epoch || !self.loss_pending {
            log::warn!(
                "Ignoring stale game-over timer (run {}, current run {})",
                epoch,
                self.epoch
            );
            return false;
        }
        if !self.mode.is_live() {
            return false;
        }
        self.mode = Mode::GameOver;
        self.loss_pending = false;
        self.intents.clear();
        log::info!("Game over at level {}", self.level);
        true
    }

    /// Back to level 1 and straight into a new run. Only valid after game over.
    pub fn restart(&mut self) -> bool {
        if self.mode != Mode::GameOver {
            log::debug!("Ignoring restart in {:?}", self.mode);
            return false;
        }
        self.level = 1;
        self.mode = Mode::NotStarted;
        log::info!("Restarting");
        self.start()
    }

    /// One drag step. Only moves the paddle during active play.
    pub fn drag(&mut self, direction: Direction) {
        if self.mode == Mode::Running {
            self.paddle.nudge(direction, self.drag_step);
        }
    }

    pub fn reset_ball_and_paddle(&mut self) {
        self.ball.serve(ball_speed(self.level));
        self.paddle.recenter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session_waits_for_start() {
        let session = Session::default();
        assert_eq!(session.mode, Mode::NotStarted);
        assert_eq!(session.level, 1);
        assert_eq!(session.epoch(), 0);
        assert_eq!(session.ball.vel.x, BALL_BASE_SPEED);
    }

    #[test]
    fn test_start_serves_at_level_speed() {
        let mut session = Session::default();
        assert!(session.start());
        assert_eq!(session.mode, Mode::Running);
        assert_eq!(session.ball.vel.x, 5.0);
        assert_eq!(session.ball.vel.y, -5.0);
        assert_eq!(session.bricks.len(), 40);
        assert_eq!(session.epoch(), 1);
        // Second start is ignored
        assert!(!session.start());
        assert_eq!(session.epoch(), 1);
    }

    #[test]
    fn test_toggle_pause_twice_is_identity() {
        let mut session = Session::default();
        session.start();
        assert!(session.toggle_pause());
        assert_eq!(session.mode, Mode::Paused);
        assert!(session.toggle_pause());
        assert_eq!(session.mode, Mode::Running);
    }

    #[test]
    fn test_toggle_pause_ignored_outside_play() {
        let mut session = Session::default();
        assert!(!session.toggle_pause());
        assert_eq!(session.mode, Mode::NotStarted);
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut session = Session::default();
        session.start();
        assert!(session.pause());
        assert!(!session.pause());
        assert_eq!(session.mode, Mode::Paused);
    }

    #[test]
    fn test_level_up_rebuilds_and_serves() {
        let mut session = Session::default();
        session.start();
        session.paddle.x = 0.0;
        session.level_up();
        assert_eq!(session.level, 2);
        assert_eq!(session.mode, Mode::Running);
        assert_eq!(session.bricks.len(), 50);
        assert_eq!(session.ball.vel.x, 6.0);
        assert_eq!(session.ball.vel.y, -6.0);
        assert_eq!(session.paddle.x, SURFACE_WIDTH / 2.0 - PADDLE_WIDTH / 2.0);
    }

    #[test]
    fn test_level_stays_at_cap() {
        let mut session = Session::default();
        session.level = MAX_LEVEL;
        session.level_up();
        assert_eq!(session.level, MAX_LEVEL);
        assert_eq!(session.bricks.rows(), BRICK_MAX_ROWS);
    }

    #[test]
    fn test_ball_lost_only_reported_once() {
        let mut session = Session::default();
        session.start();
        assert_eq!(session.mark_ball_lost(), Some(1));
        assert_eq!(session.mark_ball_lost(), None);
        assert!(session.expire_loss(1));
        assert_eq!(session.mode, Mode::GameOver);
    }

    #[test]
    fn test_game_over_fires_while_paused() {
        let mut session = Session::default();
        session.start();
        let epoch = session.mark_ball_lost().unwrap();
        session.toggle_pause();
        assert!(session.expire_loss(epoch));
        assert_eq!(session.mode, Mode::GameOver);
    }

    #[test]
    fn test_stale_timer_ignored_after_restart() {
        let mut session = Session::default();
        session.start();
        let first = session.mark_ball_lost().unwrap();
        assert!(session.expire_loss(first));

        assert!(session.restart());
        let second = session.mark_ball_lost().unwrap();
        assert_ne!(first, second);
        // A leftover timer from the first run must not end the second
        assert!(!session.expire_loss(first));
        assert_eq!(session.mode, Mode::Running);
        assert!(session.expire_loss(second));
    }

    #[test]
    fn test_restart_resets_level() {
        let mut session = Session::default();
        session.start();
        session.level_up();
        session.level_up();
        let epoch = session.mark_ball_lost().unwrap();
        session.expire_loss(epoch);

        assert!(session.restart());
        assert_eq!(session.level, 1);
        assert_eq!(session.mode, Mode::Running);
        assert_eq!(session.bricks.rows(), 4);
        assert_eq!(session.bricks.cols(), 10);
        assert_eq!(session.ball.vel.x, 5.0);
        assert!(!session.loss_pending());
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut session = Session::default();
        session.start();
        assert!(!session.restart());
        assert_eq!(session.epoch(), 1);
    }

    #[test]
    fn test_drag_ignored_when_paused() {
        let mut session = Session::default();
        session.start();
        session.toggle_pause();
        let x = session.paddle.x;
        session.drag(Direction::Left);
        assert_eq!(session.paddle.x, x);
        session.toggle_pause();
        session.drag(Direction::Left);
        assert_eq!(session.paddle.x, x - DRAG_STEP);
    }

    proptest! {
        #[test]
        fn pause_toggle_pairs_are_identity(pairs in 0usize..20, paused in any::<bool>()) {
            let mut session = Session::default();
            session.start();
            if paused {
                session.toggle_pause();
            }
            let before = session.mode;
            for _ in 0..pairs {
                session.toggle_pause();
                session.toggle_pause();
            }
            prop_assert_eq!(session.mode, before);
        }
    }
}
