use std::time::Duration;

/// Rolling frame-rate counter.
///
/// Frames are accumulated until `window` worth of frame time has passed; the
/// average over that window is then reported and the counter starts over.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    elapsed: f32,
    frames: u32,
    last: Option<f32>,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.as_secs_f32().max(f32::EPSILON),
            elapsed: 0.0,
            frames: 0,
            last: None,
        }
    }

    /// Records one frame of `dt` seconds.
    ///
    /// Returns the frames-per-second value when a window completes.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt.max(0.0);
        self.frames += 1;

        if self.elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        self.last = Some(fps);
        Some(fps)
    }

    /// Most recently completed reading.
    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
