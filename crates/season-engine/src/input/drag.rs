//! Drag interaction state machine.
//!
//! `Idle --press on body--> Dragging --move--> Dragging --release--> Idle`.
//! Presses off the body, and moves/releases while idle, are ignored.
//! Listener capture lives inside the `Dragging` state, so leaving that state
//! by any route (release, cancel, drop) deregisters the listeners.

use glam::Vec2;

use crate::core::orbit::OrbitEllipse;
use crate::core::season::{snap_to_season, Season};
use crate::input::capture::{CaptureGuard, PointerCapture};

/// Public view of the machine's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Internal state. `Dragging` owns the listener registration.
#[derive(Debug)]
enum DragState {
    Idle,
    /// The guard is held for its Drop: it releases the listeners.
    Dragging(CaptureGuard),
}

/// True when `point` is on the body disc (boundary included).
pub fn hit_test(point: Vec2, body_center: Vec2, body_radius: f32) -> bool {
    point.distance(body_center) <= body_radius
}

/// Drag state machine for the orbiting body.
#[derive(Debug)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.state {
            DragState::Idle => DragPhase::Idle,
            DragState::Dragging(_) => DragPhase::Dragging,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// Handle a press at viewport point `local`. Starts a drag, registering
    /// listeners exactly once, if the press lands on the body.
    /// Returns whether a drag started.
    pub fn press(
        &mut self,
        local: Vec2,
        body_center: Vec2,
        body_radius: f32,
        capture: &mut dyn PointerCapture,
    ) -> bool {
        if self.is_dragging() {
            log::warn!("press while already dragging; ignoring");
            return false;
        }
        if !hit_test(local, body_center, body_radius) {
            return false;
        }
        self.state = DragState::Dragging(capture.attach());
        true
    }

    /// Handle a pointer move. While dragging, returns the live orbital angle
    /// under the pointer; no snapping happens here.
    pub fn track(&self, local: Vec2, orbit: &OrbitEllipse) -> Option<f32> {
        self.is_dragging().then(|| orbit.angle_for_position(local))
    }

    /// Handle a release. Ends the drag (listeners released) and returns the
    /// season the live angle should snap to.
    pub fn release(&mut self, live_angle: f32) -> Option<Season> {
        if !self.end() {
            return None;
        }
        Some(snap_to_season(live_angle))
    }

    /// End any drag without producing a snap target. Returns whether a drag
    /// was live.
    pub fn cancel(&mut self) -> bool {
        self.end()
    }

    fn end(&mut self) -> bool {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(_guard) => true,
            DragState::Idle => false,
        }
    }
}

impl Default for DragMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::capture::CountingCapture;

    fn orbit() -> OrbitEllipse {
        OrbitEllipse::new(Vec2::new(300.0, 150.0), 220.0, 100.0)
    }

    #[test]
    fn initial_state_is_idle() {
        let drag = DragMachine::new();
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn press_on_rim_starts_drag_press_past_rim_does_not() {
        let body = Vec2::new(520.0, 150.0);
        let mut capture = CountingCapture::new();

        let mut drag = DragMachine::new();
        assert!(drag.press(Vec2::new(520.0, 180.0), body, 30.0, &mut capture));
        assert!(drag.is_dragging());

        let mut drag = DragMachine::new();
        assert!(!drag.press(Vec2::new(520.0, 180.001), body, 30.0, &mut capture));
        assert!(!drag.is_dragging());
        assert_eq!(capture.total(), 1);
    }

    #[test]
    fn idle_move_and_release_are_ignored() {
        let mut drag = DragMachine::new();
        assert_eq!(drag.track(Vec2::new(1.0, 1.0), &orbit()), None);
        assert_eq!(drag.release(45.0), None);
        assert!(!drag.cancel());
    }

    #[test]
    fn move_reports_live_angle_and_release_snaps() {
        let o = orbit();
        let mut capture = CountingCapture::new();
        let mut drag = DragMachine::new();
        let body = o.position_for_angle(90.0);
        assert!(drag.press(body, body, 30.0, &mut capture));

        let angle = drag.track(o.position_for_angle(100.0), &o).unwrap();
        assert!((angle - 100.0).abs() < 1e-2);
        assert_eq!(capture.live(), 1);

        assert_eq!(drag.release(angle), Some(Season::Spring));
        assert!(!drag.is_dragging());
        assert_eq!(capture.live(), 0);
    }

    #[test]
    fn second_press_does_not_register_twice() {
        let body = Vec2::ZERO;
        let mut capture = CountingCapture::new();
        let mut drag = DragMachine::new();
        assert!(drag.press(body, body, 10.0, &mut capture));
        assert!(!drag.press(body, body, 10.0, &mut capture));
        assert_eq!(capture.live(), 1);
        assert!(drag.cancel());
        assert_eq!(capture.live(), 0);
    }

    #[test]
    fn dropping_mid_drag_releases_listeners() {
        let body = Vec2::ZERO;
        let mut capture = CountingCapture::new();
        {
            let mut drag = DragMachine::new();
            drag.press(body, body, 10.0, &mut capture);
            assert_eq!(capture.live(), 1);
        }
        assert_eq!(capture.live(), 0);
    }
}
