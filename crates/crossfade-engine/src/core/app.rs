use crate::device::GraphicsDevice;
use crate::input::TouchEvent;

use super::ctx::FrameCtx;
use super::error::StartError;

/// Control directive returned by `draw`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application lifecycle driven by a host.
///
/// Call order is `start`, then any number of `draw` / `touch`, then `stop`.
/// A host may `start` again after `stop` (mobile resume).
pub trait App<D: GraphicsDevice> {
    /// Acquires all device resources. An error aborts the host.
    fn start(&mut self, device: &mut D) -> Result<(), StartError>;

    /// Called once per display refresh.
    fn draw(&mut self, ctx: &mut FrameCtx<'_, D>) -> AppControl;

    /// Releases device resources.
    fn stop(&mut self, device: &mut D);

    /// Called for each touch (or emulated touch) event.
    fn touch(&mut self, event: &TouchEvent) {
        log::info!("touch {event}");
    }
}
