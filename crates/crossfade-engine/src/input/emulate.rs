use super::types::{TouchEvent, TouchPhase};

/// Touch id used for mouse-emulated touches.
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

/// Turns left-button mouse input into a single-finger touch sequence.
///
/// - press: `Began` at the last known pointer position
/// - motion while pressed: `Moved`
/// - release: `Ended`
/// - pointer leaves the window while pressed: `Cancelled`
#[derive(Debug, Default)]
pub struct TouchEmulator {
    pointer: Option<(f32, f32)>,
    pressed: bool,
}

impl TouchEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<TouchEvent> {
        self.pointer = Some((x, y));
        self.pressed.then(|| self.event(TouchPhase::Moved))
    }

    pub fn button(&mut self, pressed: bool) -> Option<TouchEvent> {
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;
        let phase = if pressed { TouchPhase::Began } else { TouchPhase::Ended };
        Some(self.event(phase))
    }

    pub fn pointer_left(&mut self) -> Option<TouchEvent> {
        let cancelled = self.pressed.then(|| self.event(TouchPhase::Cancelled));
        self.pressed = false;
        self.pointer = None;
        cancelled
    }

    fn event(&self, phase: TouchPhase) -> TouchEvent {
        let (x, y) = self.pointer.unwrap_or((0.0, 0.0));
        TouchEvent::new(MOUSE_TOUCH_ID, x, y, phase)
    }
}
