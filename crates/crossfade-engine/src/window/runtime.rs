use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_touch;
use crate::input::TouchEmulator;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "crossfade".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until the window closes.
    ///
    /// Returns the error that ended the loop, if any: a failed window/GPU
    /// setup or a failed `App::start`.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App<Gpu> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The live window and everything bound to it.
///
/// Field order is drop order: the GPU (and its surface) goes before the window.
struct WindowEntry {
    gpu: Gpu,
    clock: FrameClock,
    touch: TouchEmulator,
    window: Arc<Window>,
}

struct HostState<A>
where
    A: App<Gpu> + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    started: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> HostState<A>
where
    A: App<Gpu> + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            started: false,
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), self.gpu_init.clone()))
            .context("GPU initialization failed")?;

        let info = gpu.adapter_info();
        let size = gpu.size();
        log::info!(
            "gpu ready: {} ({:?}), surface {:?} {}x{}",
            info.name,
            info.backend,
            gpu.surface_format(),
            size.width,
            size.height
        );

        Ok(WindowEntry {
            gpu,
            clock: FrameClock::default(),
            touch: TouchEmulator::new(),
            window,
        })
    }

    /// Records a fatal error and leaves the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    /// Calls `App::stop` once per successful start.
    fn stop_app(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;

        if let Some(entry) = self.entry.as_mut() {
            self.app.stop(&mut entry.gpu);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.stop_app();
        self.entry = None;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for HostState<A>
where
    A: App<Gpu> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.fatal.is_some() {
            return;
        }

        let mut entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => return self.fail(event_loop, err),
        };

        if let Err(err) = self.app.start(&mut entry.gpu) {
            // Dropping `entry` tears down the GPU and window.
            return self.fail(event_loop, anyhow::Error::new(err).context("start failed"));
        }

        self.started = true;
        entry.clock.reset();
        entry.window.request_redraw();
        self.entry = Some(entry);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Surfaces are invalid while suspended (Android); start again on resume.
        self.stop_app();
        self.entry = None;
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the fade animates every frame.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        // Split borrows: the app and the window entry are used together below.
        let (app, entry) = (&mut self.app, &mut self.entry);

        let Some(entry) = entry.as_mut().filter(|e| e.window.id() == window_id) else {
            return;
        };

        if let Some(touch) = translate_touch(&entry.window, &mut entry.touch, &event) {
            app.touch(&touch);
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.gpu.resize(*new_size);
                entry.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.gpu.resize(new_size);
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let time = entry.clock.tick();
                let control = app.draw(&mut FrameCtx::new(&mut entry.gpu, time));

                if control == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop_app();
        self.entry = None;
    }
}
