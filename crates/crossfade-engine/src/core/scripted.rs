use crate::device::GraphicsDevice;
use crate::input::TouchEvent;
use crate::time::FrameTime;

use super::app::{App, AppControl};
use super::ctx::FrameCtx;
use super::error::StartError;

/// One host callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Start,
    /// A display refresh `dt` seconds after the previous one.
    Draw { dt: f32 },
    Touch(TouchEvent),
    Stop,
}

impl Step {
    /// `count` draws at a fixed interval.
    pub fn frames(count: usize, dt: f32) -> impl Iterator<Item = Step> {
        std::iter::repeat_n(Step::Draw { dt }, count)
    }
}

/// What a scripted run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostReport {
    pub frames: u64,
    pub touches: u64,
    /// `draw` asked to exit; the app was stopped and the script cut short.
    pub exited: bool,
}

/// Deterministic host: replays a list of callbacks against an [`App`].
///
/// Mirrors the runtime's dispatch rules (fatal start, stop on exit) without a
/// window or event loop, so any [`GraphicsDevice`] can be used.
#[derive(Debug)]
pub struct ScriptedHost<D> {
    device: D,
    frame_index: u64,
}

impl<D: GraphicsDevice> ScriptedHost<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            frame_index: 0,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    /// Runs `steps` in order.
    ///
    /// A failing `start` ends the run with its error; later steps are not run.
    pub fn run<A, I>(&mut self, app: &mut A, steps: I) -> Result<HostReport, StartError>
    where
        A: App<D>,
        I: IntoIterator<Item = Step>,
    {
        let mut report = HostReport::default();

        for step in steps {
            match step {
                Step::Start => app.start(&mut self.device)?,
                Step::Draw { dt } => {
                    let time = FrameTime::with_delta(dt, self.frame_index);
                    self.frame_index = self.frame_index.wrapping_add(1);
                    report.frames += 1;

                    let control = app.draw(&mut FrameCtx::new(&mut self.device, time));
                    if control == AppControl::Exit {
                        app.stop(&mut self.device);
                        report.exited = true;
                        break;
                    }
                }
                Step::Touch(event) => {
                    app.touch(&event);
                    report.touches += 1;
                }
                Step::Stop => app.stop(&mut self.device),
            }
        }

        Ok(report)
    }
}
