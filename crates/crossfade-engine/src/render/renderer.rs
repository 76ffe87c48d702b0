use crate::assets::{decode_rgba, AssetError, AssetSource};
use crate::core::{App, AppControl, FrameCtx, StartError};
use crate::device::{BufferKind, FrameStatus, GraphicsDevice, QuadDraw};
use crate::input::TouchEvent;
use crate::texture;
use crate::time::{FadeDriver, FpsCounter};

use super::config::RendererConfig;
use super::geometry::{QUAD_INDICES, QUAD_VERTICES};
use super::overlay::{fps_label, rasterize_label, OVERLAY_SCALE};
use super::shader::FADE_PROGRAM;

/// Every device object the quad needs. Dropping it releases all of them.
///
/// Field order is drop order: bindings go before the program and textures
/// they refer to.
struct QuadResources<D: GraphicsDevice> {
    /// Frame-rate label and the text it currently shows.
    overlay: Option<(D::Overlay, String)>,
    bindings: D::Bindings,
    program: D::Program,
    textures: [D::Texture; 2],
    indices: D::Buffer,
    vertices: D::Buffer,
}

/// Draws a full-screen quad that cross-fades two textures.
///
/// Generic over the device so the same lifecycle runs on wgpu and on
/// [`MockDevice`](crate::device::MockDevice).
pub struct Renderer<D: GraphicsDevice> {
    assets: Box<dyn AssetSource>,
    config: RendererConfig,
    fade: FadeDriver,
    fps: FpsCounter,

    resources: Option<QuadResources<D>>,
    warned_not_started: bool,
}

impl<D: GraphicsDevice> Renderer<D> {
    pub fn new(assets: impl AssetSource + 'static, config: RendererConfig, fade: FadeDriver) -> Self {
        Self {
            assets: Box::new(assets),
            config,
            fade,
            fps: FpsCounter::default(),
            resources: None,
            warned_not_started: false,
        }
    }

    /// True between a successful `start` and the next `stop`.
    pub fn is_started(&self) -> bool {
        self.resources.is_some()
    }

    /// Fade factor the next `draw` would use.
    pub fn fade_factor(&self) -> f32 {
        self.fade.factor()
    }

    /// Last frame-rate reading, once a full second has been drawn.
    pub fn fps(&self) -> Option<f32> {
        self.fps.last()
    }

    fn load_texture(&self, device: &mut D, name: &str) -> Result<D::Texture, AssetError> {
        let bytes = self.assets.open(name)?;
        let decoded = decode_rgba(name, &bytes)?;
        let (w, h) = decoded.dimensions();

        let image = texture::prepare(decoded, self.config.texture_layout);
        let (tw, th) = image.dimensions();
        log::debug!("texture `{name}`: {w}x{h} decoded, {tw}x{th} uploaded");

        Ok(device.create_texture(name, &image))
    }
}

impl<D: GraphicsDevice> App<D> for Renderer<D> {
    fn start(&mut self, device: &mut D) -> Result<(), StartError> {
        if self.resources.take().is_some() {
            log::debug!("start while started; released previous resources");
        }

        // Built into locals so a failure part-way drops (and releases) what exists.
        let vertices = device.create_buffer(
            BufferKind::Vertex,
            "quad vertices",
            bytemuck::cast_slice(&QUAD_VERTICES),
        );
        let indices = device.create_buffer(
            BufferKind::Index,
            "quad indices",
            bytemuck::cast_slice(&QUAD_INDICES),
        );

        let [first, second] = &self.config.images;
        let textures = [
            self.load_texture(device, first)?,
            self.load_texture(device, second)?,
        ];

        let program = device.create_program(&FADE_PROGRAM)?;
        let bindings = device.bind_program(&program, [&textures[0], &textures[1]]);

        let overlay = if self.config.show_fps {
            let text = fps_label(None);
            let overlay = device.create_overlay("fps overlay", &rasterize_label(&text), OVERLAY_SCALE)?;
            Some((overlay, text))
        } else {
            None
        };

        self.resources = Some(QuadResources {
            overlay,
            bindings,
            program,
            textures,
            indices,
            vertices,
        });

        self.fade.restart();
        self.fps = FpsCounter::default();
        self.warned_not_started = false;

        log::info!("start");
        Ok(())
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_, D>) -> AppControl {
        let Some(res) = self.resources.as_ref() else {
            if !self.warned_not_started {
                log::warn!("draw called without a started renderer; ignoring");
                self.warned_not_started = true;
            }
            return AppControl::Continue;
        };

        let status = ctx.device.draw_quad(&QuadDraw {
            clear: self.config.clear_color,
            program: &res.program,
            bindings: &res.bindings,
            vertices: &res.vertices,
            indices: &res.indices,
            index_count: QUAD_INDICES.len() as u32,
            fade_factor: self.fade.factor(),
            overlay: res.overlay.as_ref().map(|(overlay, _)| overlay),
        });

        match status {
            FrameStatus::Presented => {
                if let Some(fps) = self.fps.tick(ctx.time.dt) {
                    log::info!("fps: {fps:.1}");
                    if let Some((overlay, shown)) =
                        self.resources.as_mut().and_then(|r| r.overlay.as_mut())
                    {
                        let text = fps_label(Some(fps));
                        if *shown != text {
                            ctx.device.update_overlay(overlay, &rasterize_label(&text));
                            *shown = text;
                        }
                    }
                }
                AppControl::Continue
            }
            FrameStatus::Skipped => AppControl::Continue,
            FrameStatus::Fatal => {
                log::error!("device lost; exiting");
                AppControl::Exit
            }
        }
    }

    fn stop(&mut self, _device: &mut D) {
        drop(self.resources.take());
        log::info!("stop");
    }

    fn touch(&mut self, event: &TouchEvent) {
        log::info!("touch {event}");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;
    use crate::assets::MemoryAssets;
    use crate::device::{GlCall, MockDevice, ReleasedKind};
    use crate::time::{FrameTime, ManualClock};

    fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
            .write_to(&mut out, ImageFormat::Png)
            .expect("png encode");
        out.into_inner()
    }

    fn assets() -> MemoryAssets {
        MemoryAssets::new()
            .with("gl2-hello-1.png", png(4, 4, [255, 0, 0, 255]))
            .with("gl2-hello-2.png", png(4, 4, [0, 0, 255, 255]))
    }

    #[test]
    fn start_restarts_the_fade_clock() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(5));

        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), FadeDriver::sine_with(clock.clone()));

        renderer.start(&mut device).expect("start");
        assert!((renderer.fade_factor() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn second_start_replaces_resources() {
        let (fade, _) = FadeDriver::manual(0.0);
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), fade);

        renderer.start(&mut device).expect("first start");
        let live = device.live_total();
        renderer.start(&mut device).expect("second start");

        assert_eq!(device.live_total(), live);
        assert_eq!(device.live(ReleasedKind::Texture), 2);
    }

    #[test]
    fn draw_before_start_is_ignored() {
        let (fade, _) = FadeDriver::manual(0.0);
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), fade);

        let control = renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(0.016, 0)));
        assert_eq!(control, AppControl::Continue);
        assert!(device.calls().is_empty());
    }

    #[test]
    fn fatal_frame_requests_exit() {
        let (fade, _) = FadeDriver::manual(0.0);
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), fade);
        renderer.start(&mut device).expect("start");

        device.set_frame_status(FrameStatus::Fatal);
        let control = renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(0.016, 0)));
        assert_eq!(control, AppControl::Exit);
    }

    #[test]
    fn skipped_frame_keeps_running_and_draws_nothing() {
        let (fade, _) = FadeDriver::manual(0.0);
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), fade);
        renderer.start(&mut device).expect("start");
        device.clear_calls();

        device.set_frame_status(FrameStatus::Skipped);
        let control = renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(0.016, 0)));
        assert_eq!(control, AppControl::Continue);
        assert!(!device.calls().iter().any(|c| matches!(c, GlCall::DrawElements { .. })));
    }

    #[test]
    fn skipped_frames_do_not_count_towards_fps() {
        let (fade, _) = FadeDriver::manual(0.0);
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), fade);
        renderer.start(&mut device).expect("start");

        device.set_frame_status(FrameStatus::Skipped);
        for i in 0..64 {
            renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(1.0 / 32.0, i)));
        }
        assert_eq!(renderer.fps(), None);

        device.set_frame_status(FrameStatus::Presented);
        for i in 64..96 {
            renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(1.0 / 32.0, i)));
        }
        let fps = renderer.fps().expect("a full window of presented frames");
        assert!((fps - 32.0).abs() < 1e-3);
    }

    #[test]
    fn hidden_fps_creates_no_overlay() {
        let (fade, _) = FadeDriver::manual(0.0);
        let config = RendererConfig {
            show_fps: false,
            ..RendererConfig::default()
        };
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> = Renderer::new(assets(), config, fade);
        renderer.start(&mut device).expect("start");
        renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(0.016, 0)));

        assert_eq!(device.live(ReleasedKind::Overlay), 0);
        assert_eq!(device.overlay_image(), None);
        assert!(!device.calls().iter().any(|c| matches!(c, GlCall::DrawOverlay { .. })));
    }

    #[test]
    fn fps_is_reported_after_one_second_of_frames() {
        let (fade, _) = FadeDriver::manual(0.0);
        let mut device = MockDevice::new();
        let mut renderer: Renderer<MockDevice> =
            Renderer::new(assets(), RendererConfig::default(), fade);
        renderer.start(&mut device).expect("start");

        for i in 0..32 {
            renderer.draw(&mut FrameCtx::new(&mut device, FrameTime::with_delta(1.0 / 32.0, i)));
        }
        let fps = renderer.fps().expect("a full window elapsed");
        assert!((fps - 32.0).abs() < 1e-3);
    }
}
