//! Recording device for tests and headless runs.
//!
//! `MockDevice` does not talk to a GPU. It records every operation as a
//! GL-style [`GlCall`], tracks which handles are alive, and keeps enough state
//! (buffer contents, texture pixels, the last draw) to evaluate the quad's
//! vertex and fragment stages on the CPU.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use image::RgbaImage;

use crate::render::{crossfade, texcoord, Color};

use super::backend::{BufferKind, FrameStatus, GraphicsDevice, ProgramSource, QuadDraw, VertexLayout};
use super::ProgramLinkError;

/// Primitive topology of a recorded draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    TriangleStrip,
}

/// Kind of handle reported by [`GlCall::Release`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ReleasedKind {
    Buffer,
    Texture,
    Program,
    Bindings,
    Overlay,
}

/// One recorded device operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer { id: u32, kind: BufferKind, len: usize },
    CreateTexture { id: u32, width: u32, height: u32 },
    LinkProgram { id: u32 },
    /// Uniform/attribute lookup after link.
    ResolveLocations { program: u32 },
    Clear(Color),
    UseProgram(u32),
    ActiveTexture { unit: u32, texture: u32 },
    Uniform1i { name: &'static str, value: i32 },
    Uniform1f { name: &'static str, value: f32 },
    BindBuffer { kind: BufferKind, id: u32 },
    EnableAttrib(u32),
    AttribPointer(VertexLayout),
    DrawElements { topology: Topology, count: u32 },
    DisableAttrib(u32),
    CreateOverlay { id: u32, width: u32, height: u32, scale: u32 },
    UpdateOverlay { id: u32, width: u32, height: u32 },
    DrawOverlay { id: u32 },
    Release { kind: ReleasedKind, id: u32 },
}

#[derive(Debug, Default)]
struct Ledger {
    calls: Vec<GlCall>,
    live: HashMap<ReleasedKind, usize>,
    /// Pixels of live textures and overlays, by id.
    images: HashMap<u32, RgbaImage>,
}

impl Ledger {
    fn acquire(&mut self, kind: ReleasedKind) {
        *self.live.entry(kind).or_default() += 1;
    }

    fn release(&mut self, kind: ReleasedKind, id: u32) {
        if let Some(n) = self.live.get_mut(&kind) {
            *n = n.saturating_sub(1);
        }
        if matches!(kind, ReleasedKind::Texture | ReleasedKind::Overlay) {
            self.images.remove(&id);
        }
        self.calls.push(GlCall::Release { kind, id });
    }
}

type SharedLedger = Rc<RefCell<Ledger>>;

/// Records its release into the ledger when dropped.
#[derive(Debug)]
struct Tracked {
    kind: ReleasedKind,
    id: u32,
    ledger: SharedLedger,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.borrow_mut().release(self.kind, self.id);
    }
}

#[derive(Debug)]
pub struct MockBuffer {
    kind: BufferKind,
    data: Vec<u8>,
    handle: Tracked,
}

impl MockBuffer {
    pub fn id(&self) -> u32 {
        self.handle.id
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug)]
pub struct MockTexture {
    width: u32,
    height: u32,
    handle: Tracked,
}

impl MockTexture {
    pub fn id(&self) -> u32 {
        self.handle.id
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[derive(Debug)]
pub struct MockProgram {
    layout: VertexLayout,
    handle: Tracked,
}

impl MockProgram {
    pub fn id(&self) -> u32 {
        self.handle.id
    }
}

#[derive(Debug)]
pub struct MockOverlay {
    scale: u32,
    handle: Tracked,
}

impl MockOverlay {
    pub fn id(&self) -> u32 {
        self.handle.id
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

/// Resolved locations, GL-style: uniforms first, then the attribute.
#[derive(Debug)]
pub struct MockBindings {
    program: u32,
    textures: [u32; 2],
    _handle: Tracked,
}

/// What the last successful draw read from its buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
    pub fade_factor: f32,
    pub textures: [u32; 2],
    pub overlay: Option<u32>,
}

/// Scoped attribute enable: records the disable on every exit path.
struct AttribScope<'a> {
    ledger: &'a SharedLedger,
    location: u32,
}

impl<'a> AttribScope<'a> {
    fn enable(ledger: &'a SharedLedger, location: u32) -> Self {
        ledger.borrow_mut().calls.push(GlCall::EnableAttrib(location));
        Self { ledger, location }
    }
}

impl Drop for AttribScope<'_> {
    fn drop(&mut self) {
        self.ledger
            .borrow_mut()
            .calls
            .push(GlCall::DisableAttrib(self.location));
    }
}

/// In-memory [`GraphicsDevice`].
#[derive(Debug)]
pub struct MockDevice {
    ledger: SharedLedger,
    next_id: u32,
    link_failure: Option<String>,
    frame_status: FrameStatus,
    last_draw: Option<RecordedDraw>,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            ledger: SharedLedger::default(),
            next_id: 1,
            link_failure: None,
            frame_status: FrameStatus::Presented,
            last_draw: None,
        }
    }

    /// Makes every subsequent `create_program` fail with `message`.
    pub fn fail_link(&mut self, message: impl Into<String>) {
        self.link_failure = Some(message.into());
    }

    /// Status reported by subsequent draws; anything but `Presented` skips drawing.
    pub fn set_frame_status(&mut self, status: FrameStatus) {
        self.frame_status = status;
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<GlCall> {
        self.ledger.borrow().calls.clone()
    }

    /// Forgets recorded calls (live-handle tracking is kept).
    pub fn clear_calls(&mut self) {
        self.ledger.borrow_mut().calls.clear();
    }

    /// Number of live handles of `kind`.
    pub fn live(&self, kind: ReleasedKind) -> usize {
        self.ledger.borrow().live.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of live handles of any kind.
    pub fn live_total(&self) -> usize {
        self.ledger.borrow().live.values().sum()
    }

    pub fn last_draw(&self) -> Option<&RecordedDraw> {
        self.last_draw.as_ref()
    }

    /// Runs the last draw's vertex and fragment stages for one vertex position.
    ///
    /// Textures are sampled nearest-neighbour. Returns `None` when nothing has
    /// been drawn or a texture has since been released.
    pub fn shade(&self, position: [f32; 2]) -> Option<[f32; 4]> {
        let draw = self.last_draw.as_ref()?;
        let uv = texcoord(position);

        let ledger = self.ledger.borrow();
        let a = sample_nearest(ledger.images.get(&draw.textures[0])?, uv);
        let b = sample_nearest(ledger.images.get(&draw.textures[1])?, uv);
        Some(crossfade(a, b, draw.fade_factor))
    }

    /// Current image of the overlay drawn by the last draw, if any.
    pub fn overlay_image(&self) -> Option<RgbaImage> {
        let id = self.last_draw.as_ref()?.overlay?;
        self.ledger.borrow().images.get(&id).cloned()
    }

    fn track(&mut self, kind: ReleasedKind) -> Tracked {
        let id = self.next_id;
        self.next_id += 1;
        self.ledger.borrow_mut().acquire(kind);
        Tracked {
            kind,
            id,
            ledger: Rc::clone(&self.ledger),
        }
    }

    fn record(&self, call: GlCall) {
        self.ledger.borrow_mut().calls.push(call);
    }
}

impl GraphicsDevice for MockDevice {
    type Buffer = MockBuffer;
    type Texture = MockTexture;
    type Program = MockProgram;
    type Bindings = MockBindings;
    type Overlay = MockOverlay;

    fn create_buffer(&mut self, kind: BufferKind, _label: &str, contents: &[u8]) -> Self::Buffer {
        let handle = self.track(ReleasedKind::Buffer);
        self.record(GlCall::CreateBuffer {
            id: handle.id,
            kind,
            len: contents.len(),
        });
        MockBuffer {
            kind,
            data: contents.to_vec(),
            handle,
        }
    }

    fn create_texture(&mut self, _label: &str, image: &RgbaImage) -> Self::Texture {
        let handle = self.track(ReleasedKind::Texture);
        let (width, height) = image.dimensions();
        {
            let mut ledger = self.ledger.borrow_mut();
            ledger.images.insert(handle.id, image.clone());
            ledger.calls.push(GlCall::CreateTexture {
                id: handle.id,
                width,
                height,
            });
        }
        MockTexture {
            width,
            height,
            handle,
        }
    }

    fn create_program(&mut self, source: &ProgramSource<'_>) -> Result<Self::Program, ProgramLinkError> {
        if let Some(message) = &self.link_failure {
            return Err(ProgramLinkError::new(source.label, message.clone()));
        }

        for entry in [source.vertex_entry, source.fragment_entry] {
            if !source.source.contains(&format!("fn {entry}(")) {
                return Err(ProgramLinkError::new(
                    source.label,
                    format!("missing entry point `{entry}`"),
                ));
            }
        }

        let handle = self.track(ReleasedKind::Program);
        self.record(GlCall::LinkProgram { id: handle.id });
        Ok(MockProgram {
            layout: source.vertex_layout,
            handle,
        })
    }

    fn bind_program(&mut self, program: &Self::Program, textures: [&Self::Texture; 2]) -> Self::Bindings {
        let handle = self.track(ReleasedKind::Bindings);
        self.record(GlCall::ResolveLocations { program: program.id() });
        MockBindings {
            program: program.id(),
            textures: [textures[0].id(), textures[1].id()],
            _handle: handle,
        }
    }

    fn create_overlay(
        &mut self,
        _label: &str,
        image: &RgbaImage,
        scale: u32,
    ) -> Result<Self::Overlay, ProgramLinkError> {
        let handle = self.track(ReleasedKind::Overlay);
        let (width, height) = image.dimensions();
        {
            let mut ledger = self.ledger.borrow_mut();
            ledger.images.insert(handle.id, image.clone());
            ledger.calls.push(GlCall::CreateOverlay {
                id: handle.id,
                width,
                height,
                scale,
            });
        }
        Ok(MockOverlay { scale, handle })
    }

    fn update_overlay(&mut self, overlay: &mut Self::Overlay, image: &RgbaImage) {
        let (width, height) = image.dimensions();
        let mut ledger = self.ledger.borrow_mut();
        ledger.images.insert(overlay.id(), image.clone());
        ledger.calls.push(GlCall::UpdateOverlay {
            id: overlay.id(),
            width,
            height,
        });
    }

    fn draw_quad(&mut self, draw: &QuadDraw<'_, Self>) -> FrameStatus {
        if self.frame_status != FrameStatus::Presented {
            return self.frame_status;
        }

        let bindings = draw.bindings;
        debug_assert_eq!(bindings.program, draw.program.id());

        self.record(GlCall::Clear(draw.clear));
        self.record(GlCall::UseProgram(draw.program.id()));
        for (unit, texture) in (0u32..).zip(bindings.textures) {
            self.record(GlCall::ActiveTexture { unit, texture });
        }
        self.record(GlCall::Uniform1i { name: "textures[0]", value: 0 });
        self.record(GlCall::Uniform1i { name: "textures[1]", value: 1 });
        self.record(GlCall::Uniform1f {
            name: "fade_factor",
            value: draw.fade_factor,
        });
        self.record(GlCall::BindBuffer {
            kind: BufferKind::Vertex,
            id: draw.vertices.id(),
        });

        let layout = draw.program.layout;
        debug_assert_eq!(draw.vertices.kind(), BufferKind::Vertex);
        debug_assert_eq!(draw.indices.kind(), BufferKind::Index);

        let drawn = {
            let _attrib = AttribScope::enable(&self.ledger, layout.location);
            self.record(GlCall::AttribPointer(layout));
            self.record(GlCall::BindBuffer {
                kind: BufferKind::Index,
                id: draw.indices.id(),
            });

            let vertices = read_vertices(draw.vertices.data(), layout);
            let indices: Vec<u16> = draw
                .indices
                .data()
                .chunks_exact(2)
                .map(|c| u16::from_ne_bytes([c[0], c[1]]))
                .take(draw.index_count as usize)
                .collect();

            if indices.len() != draw.index_count as usize
                || indices.iter().any(|&i| usize::from(i) >= vertices.len())
            {
                log::error!(
                    "draw rejected: {} indices requested, {} available, {} vertices",
                    draw.index_count,
                    indices.len(),
                    vertices.len()
                );
                false
            } else {
                self.record(GlCall::DrawElements {
                    topology: Topology::TriangleStrip,
                    count: draw.index_count,
                });
                self.last_draw = Some(RecordedDraw {
                    vertices,
                    indices,
                    fade_factor: draw.fade_factor,
                    textures: bindings.textures,
                    overlay: draw.overlay.map(MockOverlay::id),
                });
                true
            }
        };

        if !drawn {
            return FrameStatus::Skipped;
        }

        if let Some(overlay) = draw.overlay {
            self.record(GlCall::DrawOverlay { id: overlay.id() });
        }

        FrameStatus::Presented
    }
}

fn read_vertices(data: &[u8], layout: VertexLayout) -> Vec<[f32; 2]> {
    let stride = layout.stride.max(1) as usize;
    let offset = layout.offset as usize;
    let read_f32 = |at: usize| {
        data.get(at..at + 4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
    };

    (0..)
        .map(|i| offset + i * stride)
        .map_while(|base| Some([read_f32(base)?, read_f32(base + 4)?]))
        .collect()
}

fn sample_nearest(image: &RgbaImage, uv: [f32; 2]) -> [f32; 4] {
    let (w, h) = image.dimensions();
    let x = ((uv[0] * w as f32) as u32).min(w.saturating_sub(1));
    let y = ((uv[1] * h as f32) as u32).min(h.saturating_sub(1));
    image.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0)
}
