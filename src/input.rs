//! Input mapping
//!
//! Turns raw key names, drag positions and button activations into session
//! changes. Unrecognized input is ignored.

use crate::sim::{Direction, Session};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Pause,
    /// Demo mode toggle
    Autopilot,
}

impl Key {
    /// Classify a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Move(Direction::Left)),
            "ArrowRight" | "Right" => Some(Key::Move(Direction::Right)),
            "Escape" => Some(Key::Pause),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// On-page buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    PauseResume,
    Restart,
}

/// Apply a key press. Returns whether the key was recognized.
pub fn key_down(session: &mut Session, key: &str) -> bool {
    match Key::from_dom(key) {
        Some(Key::Move(direction)) => session.intents.set(direction, true),
        Some(Key::Pause) => {
            session.toggle_pause();
        }
        Some(Key::Autopilot) => {
            session.autopilot = !session.autopilot;
            if !session.autopilot {
                session.intents.clear();
            }
            log::info!("Autopilot: {}", session.autopilot);
        }
        None => return false,
    }
    true
}

/// Apply a key release. Only direction keys care.
pub fn key_up(session: &mut Session, key: &str) -> bool {
    match Key::from_dom(key) {
        Some(Key::Move(direction)) => {
            session.intents.set(direction, false);
            true
        }
        _ => false,
    }
}

/// Apply a button activation. Returns whether it changed the mode.
pub fn activate(session: &mut Session, control: Control) -> bool {
    match control {
        Control::Start => session.start(),
        Control::PauseResume => session.toggle_pause(),
        Control::Restart => session.restart(),
    }
}

/// Horizontal drag gesture tracking for touch and pointer streams.
/// Each move compares against the previous move, not the press point.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    last_x: Option<f32>,
}

impl DragTracker {
    pub fn press(&mut self, x: f32) {
        self.last_x = Some(x);
    }

    /// Direction of travel since the last event, if any
    pub fn move_to(&mut self, x: f32) -> Option<Direction> {
        let last = self.last_x?;
        self.last_x = Some(x);
        let delta = x - last;
        if delta > 0.0 {
            Some(Direction::Right)
        } else if delta < 0.0 {
            Some(Direction::Left)
        } else {
            None
        }
    }

    pub fn release(&mut self) {
        self.last_x = None;
    }

    pub fn is_active(&self) -> bool {
        self.last_x.is_some()
    }

    /// Track a move and step the paddle
    pub fn drag(&mut self, session: &mut Session, x: f32) {
        if let Some(direction) = self.move_to(x) {
            session.drag(direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DRAG_STEP;
    use crate::sim::Mode;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Move(Direction::Left)));
        assert_eq!(Key::from_dom("Left"), Some(Key::Move(Direction::Left)));
        assert_eq!(Key::from_dom("Right"), Some(Key::Move(Direction::Right)));
        assert_eq!(Key::from_dom("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_dom("a"), None);
        assert_eq!(Key::from_dom(" "), None);
    }

    #[test]
    fn test_press_and_release_set_intents() {
        let mut session = Session::default();
        assert!(key_down(&mut session, "ArrowRight"));
        assert!(session.intents.right);
        assert!(key_up(&mut session, "ArrowRight"));
        assert!(!session.intents.right);
        assert!(!key_down(&mut session, "q"));
        assert!(!key_up(&mut session, "Escape"));
    }

    #[test]
    fn test_escape_and_button_share_toggle() {
        let mut session = Session::default();
        activate(&mut session, Control::Start);
        key_down(&mut session, "Escape");
        assert_eq!(session.mode, Mode::Paused);
        activate(&mut session, Control::PauseResume);
        assert_eq!(session.mode, Mode::Running);
    }

    #[test]
    fn test_autopilot_off_clears_intents() {
        let mut session = Session::default();
        key_down(&mut session, "i");
        assert!(session.autopilot);
        session.intents.right = true;
        key_down(&mut session, "I");
        assert!(!session.autopilot);
        assert!(!session.intents.right);
    }

    #[test]
    fn test_drag_needs_press() {
        let mut drag = DragTracker::default();
        assert_eq!(drag.move_to(50.0), None);
        drag.press(50.0);
        assert_eq!(drag.move_to(60.0), Some(Direction::Right));
        assert_eq!(drag.move_to(60.0), None);
        assert_eq!(drag.move_to(40.0), Some(Direction::Left));
        drag.release();
        assert!(!drag.is_active());
        assert_eq!(drag.move_to(10.0), None);
    }

    #[test]
    fn test_drag_steps_paddle() {
        let mut session = Session::default();
        session.start();
        let x = session.paddle.x;
        let mut drag = DragTracker::default();
        drag.press(200.0);
        drag.drag(&mut session, 260.0);
        drag.drag(&mut session, 261.0);
        assert_eq!(session.paddle.x, x + 2.0 * DRAG_STEP);
    }
}
