//! Graphics device boundary.
//!
//! [`GraphicsDevice`] is the seam between the renderer and a GPU API. It
//! speaks in owned handles: dropping a buffer, texture, program or binding set
//! releases the underlying GPU object, so a renderer never has to remember to
//! free anything.
//!
//! Implementations:
//! - [`Gpu`]: wgpu, bound to a winit window surface
//! - [`MockDevice`]: records GL-style calls and evaluates draws on the CPU

mod backend;
mod error;
mod gpu;
mod mock;
mod surface;

pub use backend::{BufferKind, FrameStatus, GraphicsDevice, ProgramSource, QuadDraw, VertexLayout};
pub use error::{ProgramLinkError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuInit};
pub use mock::{
    GlCall, MockBindings, MockBuffer, MockDevice, MockOverlay, MockProgram, MockTexture, RecordedDraw,
    ReleasedKind, Topology,
};
