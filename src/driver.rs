//! Frame driver
//!
//! Each display frame asks the session's mode what to do: step physics and
//! draw, only draw, or draw once and stop rescheduling. Deferred game-over
//! timers are tagged with the run epoch so a timer from an old run is inert.

use crate::consts::LOSS_DELAY_MS;
use crate::sim::{GameEvent, Mode, Session, advance};

/// What a single frame does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Physics step, then draw
    Step,
    /// Draw only (paused)
    RenderOnly,
    /// Draw the static scene and let the loop end
    RenderOnce,
}

impl FrameAction {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Running => FrameAction::Step,
            Mode::Paused => FrameAction::RenderOnly,
            Mode::NotStarted | Mode::GameOver => FrameAction::RenderOnce,
        }
    }

    /// Whether another frame should be requested after this one
    pub fn reschedules(self) -> bool {
        !matches!(self, FrameAction::RenderOnce)
    }
}

/// Outcome of one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub action: FrameAction,
    pub events: Vec<GameEvent>,
}

/// Run one frame against the session
pub fn run_frame(session: &mut Session) -> Frame {
    let action = FrameAction::for_mode(session.mode);
    let events = match action {
        FrameAction::Step => advance(session),
        FrameAction::RenderOnly | FrameAction::RenderOnce => Vec::new(),
    };
    Frame { action, events }
}

/// A scheduled game-over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deferred {
    pub epoch: u32,
    pub due_at_ms: f64,
}

/// One-shot game-over timers polled against a millisecond clock
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Deferred>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, epoch: u32, now_ms: f64) {
        self.pending.push(Deferred {
            epoch,
            due_at_ms: now_ms + f64::from(LOSS_DELAY_MS),
        });
    }

    /// Schedule a timer for every ball loss among `events`
    pub fn schedule_losses(&mut self, events: &[GameEvent], now_ms: f64) {
        for event in events {
            if let GameEvent::BallLost { epoch } = event {
                self.schedule(*epoch, now_ms);
            }
        }
    }

    /// Fire every due timer in schedule order. Returns how many ended a run.
    pub fn fire_due(&mut self, session: &mut Session, now_ms: f64) -> usize {
        let (due, rest): (Vec<Deferred>, Vec<Deferred>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|d| d.due_at_ms <= now_ms);
        self.pending = rest;
        due.into_iter()
            .filter(|d| session.expire_loss(d.epoch))
            .count()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn losing_session() -> Session {
        let mut session = Session::default();
        session.start();
        session.ball.pos = Vec2::new(20.0, 590.0);
        session.ball.vel = Vec2::new(0.0, 5.0);
        session
    }

    #[test]
    fn test_actions_per_mode() {
        assert_eq!(FrameAction::for_mode(Mode::Running), FrameAction::Step);
        assert_eq!(FrameAction::for_mode(Mode::Paused), FrameAction::RenderOnly);
        assert_eq!(FrameAction::for_mode(Mode::GameOver), FrameAction::RenderOnce);
        assert_eq!(FrameAction::for_mode(Mode::NotStarted), FrameAction::RenderOnce);
        assert!(FrameAction::RenderOnly.reschedules());
        assert!(!FrameAction::RenderOnce.reschedules());
    }

    #[test]
    fn test_game_over_after_delay() {
        let mut session = losing_session();
        let mut timers = TimerQueue::new();

        let frame = run_frame(&mut session);
        timers.schedule_losses(&frame.events, 0.0);
        assert_eq!(timers.len(), 1);

        assert_eq!(timers.fire_due(&mut session, 999.0), 0);
        assert_eq!(session.mode, Mode::Running);

        assert_eq!(timers.fire_due(&mut session, 1000.0), 1);
        assert_eq!(session.mode, Mode::GameOver);
        assert!(timers.is_empty());

        // Frozen from here on
        let frozen = session.ball.pos;
        let frame = run_frame(&mut session);
        assert_eq!(frame.action, FrameAction::RenderOnce);
        assert_eq!(session.ball.pos, frozen);
    }

    #[test]
    fn test_paused_frames_do_not_step() {
        let mut session = Session::default();
        session.start();
        session.toggle_pause();
        let before = session.ball.pos;
        let frame = run_frame(&mut session);
        assert_eq!(frame.action, FrameAction::RenderOnly);
        assert!(frame.events.is_empty());
        assert_eq!(session.ball.pos, before);
    }

    #[test]
    fn test_stale_timer_after_restart() {
        let mut session = losing_session();
        let mut timers = TimerQueue::new();
        let frame = run_frame(&mut session);
        timers.schedule_losses(&frame.events, 0.0);
        timers.fire_due(&mut session, 1000.0);
        assert_eq!(session.mode, Mode::GameOver);

        session.restart();
        session.ball.pos = Vec2::new(20.0, 590.0);
        session.ball.vel = Vec2::new(0.0, 5.0);
        let frame = run_frame(&mut session);
        timers.schedule_losses(&frame.events, 1500.0);
        // Old run's timer is already gone; the new one is not due yet
        assert_eq!(timers.fire_due(&mut session, 2000.0), 0);
        assert_eq!(session.mode, Mode::Running);
        assert_eq!(timers.fire_due(&mut session, 2500.0), 1);
    }

    #[test]
    fn test_old_epoch_timer_is_inert() {
        let mut session = Session::default();
        session.start();
        let mut timers = TimerQueue::new();
        timers.schedule(session.epoch() + 7, 0.0);
        assert_eq!(timers.fire_due(&mut session, 5000.0), 0);
        assert_eq!(session.mode, Mode::Running);
    }
}
