use std::sync::Arc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::backend::{BufferKind, FrameStatus, GraphicsDevice, ProgramSource, QuadDraw, VertexLayout};
use super::{surface, ProgramLinkError, SurfaceErrorAction};

const OVERLAY_WGSL: &str = include_str!("shaders/overlay.wgsl");

/// Distance of the overlay from the bottom-left corner, in device pixels.
const OVERLAY_MARGIN: u32 = 8;

/// Initialization parameters for the GPU layer.
///
/// Keep this structure minimal. Add configuration flags only when a concrete
/// platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// The source images are sRGB-encoded and uploaded as `Rgba8UnormSrgb`,
    /// so an sRGB surface round-trips their colors unchanged.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO paces `draw` to the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// Defaults to the WebGL2/GLES3 downlevel set so the quad runs on the same
    /// class of hardware as the mobile targets.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Owns wgpu core objects and the surface configuration.
///
/// This is the production [`GraphicsDevice`]:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain) for one window
/// - turns a [`QuadDraw`] into one clear+draw render pass and presents it
pub struct Gpu {
    /// Kept alive for the lifetime of the surface.
    _instance: wgpu::Instance,

    /// Window the surface presents to; shared with the runtime.
    window: Arc<Window>,

    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl Gpu {
    /// Creates a GPU context bound to `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers on the
    /// event loop thread block on it with `pollster`.
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // An `Arc<Window>` target yields a `'static` surface.
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("crossfade device"),
                required_features,
                required_limits: required_limits.using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        Ok(Self {
            _instance: instance,
            window,
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Adapter information (name, backend, driver).
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }

    fn overlay_bind_group(
        &self,
        layout: &wgpu::BindGroupLayout,
        rect_ubo: &wgpu::Buffer,
        texture: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("crossfade overlay bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: rect_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

// ── handles ───────────────────────────────────────────────────────────────

/// Uploaded texture and the view the bind group samples through.
pub struct GpuTexture {
    // Declared first so the view is dropped before the texture.
    view: wgpu::TextureView,
    _texture: wgpu::Texture,
}

/// Linked program: pipeline plus the layout its bindings must follow.
pub struct GpuProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

/// Bind group for one program + texture pair, and the fade uniform it reads.
pub struct GpuBindings {
    bind_group: wgpu::BindGroup,
    fade_ubo: wgpu::Buffer,
}

/// Overlay pipeline, its current image and the rectangle uniform.
pub struct GpuOverlay {
    // Declared first: the bind group refers to everything below it.
    bind_group: wgpu::BindGroup,
    texture: GpuTexture,
    size: (u32, u32),
    scale: u32,
    rect_ubo: wgpu::Buffer,
    sampler: wgpu::Sampler,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct OverlayUniform {
    rect: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FadeUniform {
    fade_factor: f32,
    _pad: [f32; 3], // 16-byte uniform alignment
}

impl GraphicsDevice for Gpu {
    type Buffer = wgpu::Buffer;
    type Texture = GpuTexture;
    type Program = GpuProgram;
    type Bindings = GpuBindings;
    type Overlay = GpuOverlay;

    fn create_buffer(&mut self, kind: BufferKind, label: &str, contents: &[u8]) -> Self::Buffer {
        let usage = match kind {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX,
            BufferKind::Index => wgpu::BufferUsages::INDEX,
        };

        self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        })
    }

    fn create_texture(&mut self, label: &str, image: &RgbaImage) -> Self::Texture {
        let (width, height) = image.dimensions();

        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            image.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        GpuTexture {
            view,
            _texture: texture,
        }
    }

    fn create_program(&mut self, source: &ProgramSource<'_>) -> Result<Self::Program, ProgramLinkError> {
        validate_wgsl(source.label, source.source, [source.vertex_entry, source.fragment_entry])?;

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.source.into()),
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("crossfade quad bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<FadeUniform>() as u64,
                            ),
                        },
                        count: None,
                    },
                    texture_entry(1),
                    texture_entry(2),
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("crossfade quad pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let attributes = [wgpu::VertexAttribute {
            format: vertex_format(source)?,
            offset: u64::from(source.vertex_layout.offset),
            shader_location: source.vertex_layout.location,
        }];
        let vertex_buffer = wgpu::VertexBufferLayout {
            array_stride: u64::from(source.vertex_layout.stride),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(source.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(source.vertex_entry),
                compilation_options: Default::default(),
                buffers: &[vertex_buffer],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(source.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint16),
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("crossfade linear clamp sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!("linked program `{}`", source.label);

        Ok(GpuProgram {
            label: source.label.to_string(),
            pipeline,
            bind_group_layout,
            sampler,
        })
    }

    fn bind_program(&mut self, program: &Self::Program, textures: [&Self::Texture; 2]) -> Self::Bindings {
        let fade_ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("crossfade fade ubo"),
            size: std::mem::size_of::<FadeUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let [first, second] = textures;
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} bind group", program.label)),
            layout: &program.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: fade_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&first.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&second.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&program.sampler),
                },
            ],
        });

        GpuBindings { bind_group, fade_ubo }
    }

    fn create_overlay(
        &mut self,
        label: &str,
        image: &RgbaImage,
        scale: u32,
    ) -> Result<Self::Overlay, ProgramLinkError> {
        validate_wgsl(label, OVERLAY_WGSL, ["vs_overlay", "fs_overlay"])?;

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(OVERLAY_WGSL.into()),
        });

        let bind_group_layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("crossfade overlay bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<OverlayUniform>() as u64,
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("crossfade overlay pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_overlay"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_overlay"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Magnified bitmap text: keep texel edges sharp.
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("crossfade overlay nearest sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let rect_ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("crossfade overlay ubo"),
            size: std::mem::size_of::<OverlayUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let texture = self.create_texture(label, image);
        let bind_group = self.overlay_bind_group(&bind_group_layout, &rect_ubo, &texture, &sampler);

        log::debug!("created overlay `{label}`");

        Ok(GpuOverlay {
            bind_group,
            texture,
            size: image.dimensions(),
            scale,
            rect_ubo,
            sampler,
            bind_group_layout,
            pipeline,
        })
    }

    fn update_overlay(&mut self, overlay: &mut Self::Overlay, image: &RgbaImage) {
        let texture = self.create_texture("crossfade overlay", image);
        overlay.bind_group = self.overlay_bind_group(
            &overlay.bind_group_layout,
            &overlay.rect_ubo,
            &texture,
            &overlay.sampler,
        );
        overlay.texture = texture;
        overlay.size = image.dimensions();
    }

    fn draw_quad(&mut self, draw: &QuadDraw<'_, Self>) -> FrameStatus {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                return match self.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => FrameStatus::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        FrameStatus::Skipped
                    }
                };
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniform = FadeUniform {
            fade_factor: draw.fade_factor.clamp(0.0, 1.0),
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&draw.bindings.fade_ubo, 0, bytemuck::bytes_of(&uniform));

        if let Some(overlay) = draw.overlay {
            let rect = OverlayUniform {
                rect: overlay_clip_rect(
                    (self.size.width, self.size.height),
                    overlay.size,
                    overlay.scale,
                ),
            };
            self.queue
                .write_buffer(&overlay.rect_ubo, 0, bytemuck::bytes_of(&rect));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("crossfade frame encoder"),
            });

        // The pass owns the vertex binding; it ends (and releases it) when dropped.
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("crossfade quad pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(draw.clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&draw.program.pipeline);
            rpass.set_bind_group(0, &draw.bindings.bind_group, &[]);
            rpass.set_vertex_buffer(0, draw.vertices.slice(..));
            rpass.set_index_buffer(draw.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..draw.index_count, 0, 0..1);

            if let Some(overlay) = draw.overlay {
                rpass.set_pipeline(&overlay.pipeline);
                rpass.set_bind_group(0, &overlay.bind_group, &[]);
                rpass.draw(0..4, 0..1);
            }
        }

        self.window.pre_present_notify();
        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        FrameStatus::Presented
    }
}

fn vertex_format(source: &ProgramSource<'_>) -> Result<wgpu::VertexFormat, ProgramLinkError> {
    let VertexLayout { components, .. } = source.vertex_layout;
    match components {
        1 => Ok(wgpu::VertexFormat::Float32),
        2 => Ok(wgpu::VertexFormat::Float32x2),
        3 => Ok(wgpu::VertexFormat::Float32x3),
        4 => Ok(wgpu::VertexFormat::Float32x4),
        n => Err(ProgramLinkError::new(
            source.label,
            format!("unsupported attribute width: {n} floats"),
        )),
    }
}

/// Clip-space `[min_x, min_y, max_x, max_y]` of an `image`-sized overlay
/// magnified by `scale`, [`OVERLAY_MARGIN`] pixels from the bottom-left corner
/// of a `surface`-sized target.
fn overlay_clip_rect(surface: (u32, u32), image: (u32, u32), scale: u32) -> [f32; 4] {
    let (sw, sh) = (surface.0.max(1) as f32, surface.1.max(1) as f32);
    let to_clip_x = |px: u32| px as f32 / sw * 2.0 - 1.0;
    let to_clip_y = |px: u32| px as f32 / sh * 2.0 - 1.0;

    let (w, h) = (image.0 * scale, image.1 * scale);
    [
        to_clip_x(OVERLAY_MARGIN),
        to_clip_y(OVERLAY_MARGIN),
        to_clip_x(OVERLAY_MARGIN + w),
        to_clip_y(OVERLAY_MARGIN + h),
    ]
}

/// Front-loads shader errors so a bad program surfaces as a
/// [`ProgramLinkError`] instead of a wgpu validation panic.
fn validate_wgsl(label: &str, wgsl: &str, entries: [&str; 2]) -> Result<(), ProgramLinkError> {
    use wgpu::naga;

    let module = naga::front::wgsl::parse_str(wgsl)
        .map_err(|e| ProgramLinkError::new(label, e.emit_to_string(wgsl)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| ProgramLinkError::new(label, e.to_string()))?;

    for entry in entries {
        if !module.entry_points.iter().any(|ep| ep.name == entry) {
            return Err(ProgramLinkError::new(
                label,
                format!("missing entry point `{entry}`"),
            ));
        }
    }

    Ok(())
}
