//! Input subsystem.
//!
//! The only input the application sees is touch. The public types do not
//! expose winit; the runtime translates native touch events, and emulates
//! touch with the left mouse button on desktop.

mod emulate;
mod types;

pub(crate) mod platform;

pub use emulate::{TouchEmulator, MOUSE_TOUCH_ID};
pub use types::{TouchEvent, TouchPhase};
