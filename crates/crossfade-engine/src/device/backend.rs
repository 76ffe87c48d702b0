use image::RgbaImage;

use crate::render::Color;

use super::ProgramLinkError;

/// Buffer binding target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data.
    Vertex,
    /// Element (index) data.
    Index,
}

/// Layout of the single `f32` vertex attribute a program consumes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    /// Shader attribute location.
    pub location: u32,
    /// Number of `f32` components (1..=4).
    pub components: u32,
    /// Distance in bytes between consecutive vertices.
    pub stride: u32,
    /// Byte offset of the attribute inside a vertex.
    pub offset: u32,
}

/// Fixed shader program description.
///
/// `source` holds both stages (WGSL); entry points select them.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSource<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub vertex_layout: VertexLayout,
}

/// Outcome of a frame submission.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// The frame was drawn and presented.
    Presented,
    /// Nothing was drawn this frame (transient surface condition).
    Skipped,
    /// The device cannot continue; the host should shut down.
    Fatal,
}

/// One full-screen quad draw.
///
/// The device clears the target to `clear`, binds `program` with its
/// `bindings` (two textures on units 0 and 1, fade uniform), enables the
/// position attribute for the duration of the draw only, and draws
/// `index_count` indices as a triangle strip. A present `overlay` is drawn on
/// top, anchored to the bottom-left corner of the target.
pub struct QuadDraw<'a, D: GraphicsDevice + ?Sized> {
    pub clear: Color,
    pub program: &'a D::Program,
    pub bindings: &'a D::Bindings,
    pub vertices: &'a D::Buffer,
    pub indices: &'a D::Buffer,
    pub index_count: u32,
    pub fade_factor: f32,
    pub overlay: Option<&'a D::Overlay>,
}

/// Immediate-mode device used by the renderer.
///
/// All handle types are owning: dropping one releases the GPU object.
pub trait GraphicsDevice {
    type Buffer;
    type Texture;
    type Program;
    /// Resolved uniform/sampler slots of a program, bound to two textures.
    type Bindings;
    /// Screen-anchored image drawn after the quad.
    type Overlay;

    /// Creates a static buffer initialised with `contents`.
    fn create_buffer(&mut self, kind: BufferKind, label: &str, contents: &[u8]) -> Self::Buffer;

    /// Uploads an RGBA8 image as a linearly filtered, edge-clamped 2D texture.
    fn create_texture(&mut self, label: &str, image: &RgbaImage) -> Self::Texture;

    /// Compiles and links `source`.
    fn create_program(&mut self, source: &ProgramSource<'_>) -> Result<Self::Program, ProgramLinkError>;

    /// Resolves the program's uniform locations and attaches `textures` to
    /// sampler slots 0 and 1.
    fn bind_program(&mut self, program: &Self::Program, textures: [&Self::Texture; 2]) -> Self::Bindings;

    /// Creates an overlay showing `image`, nearest-sampled at `scale` device
    /// pixels per texel.
    fn create_overlay(&mut self, label: &str, image: &RgbaImage, scale: u32)
        -> Result<Self::Overlay, ProgramLinkError>;

    /// Replaces the overlay's image. The size may change.
    fn update_overlay(&mut self, overlay: &mut Self::Overlay, image: &RgbaImage);

    /// Clears the target and draws one quad.
    fn draw_quad(&mut self, draw: &QuadDraw<'_, Self>) -> FrameStatus;
}
