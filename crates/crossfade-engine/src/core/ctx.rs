use crate::time::FrameTime;

/// Per-frame context passed to [`App::draw`](super::App::draw).
pub struct FrameCtx<'a, D> {
    pub device: &'a mut D,
    pub time: FrameTime,
}

impl<'a, D> FrameCtx<'a, D> {
    #[inline]
    pub fn new(device: &'a mut D, time: FrameTime) -> Self {
        Self { device, time }
    }
}
