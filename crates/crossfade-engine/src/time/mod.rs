//! Time subsystem.
//!
//! Frame timing, time sources and the fade drivers built on top of them.
//! Nothing here touches the runtime or the GPU, so all of it is unit-testable:
//! - one `FrameClock` per window, `tick()` once per presented frame
//! - a `TimeSource` drives the sinusoidal fade; `ManualClock` makes it deterministic
//! - `FpsCounter` turns frame deltas into a periodic frame-rate readout

mod fade;
mod fps;
mod frame_clock;
mod source;

pub use fade::{sine_fade, FadeDriver, FadeHandle};
pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
pub use source::{ManualClock, MonotonicClock, TimeSource};
