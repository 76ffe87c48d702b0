use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase as WinitTouchPhase, WindowEvent};
use winit::window::Window;

use crate::input::{TouchEmulator, TouchEvent, TouchPhase};

/// Translates a winit `WindowEvent` into a touch event.
///
/// Native touches map one-to-one; left mouse input goes through `emulator`.
/// Returns `None` for everything else.
pub(crate) fn translate_touch(
    window: &Window,
    emulator: &mut TouchEmulator,
    event: &WindowEvent,
) -> Option<TouchEvent> {
    match event {
        WindowEvent::Touch(Touch {
            id,
            phase,
            location,
            ..
        }) => {
            let (x, y) = to_logical_f32(window, *location);
            Some(TouchEvent::new(*id, x, y, map_phase(*phase)))
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            emulator.pointer_moved(x, y)
        }

        WindowEvent::CursorLeft { .. } => emulator.pointer_left(),

        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => emulator.button(*state == ElementState::Pressed),

        _ => None,
    }
}

fn map_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Began,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}
