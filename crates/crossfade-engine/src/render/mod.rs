//! The texture-fade quad renderer.
//!
//! Convention:
//! - geometry is a fixed full-screen quad in clip space, drawn as a triangle strip
//! - the fragment stage blends texture 0 and texture 1 by the fade factor
//! - a frame-rate label is drawn over the quad, bottom-left

mod color;
mod config;
mod geometry;
mod overlay;
mod renderer;
mod shader;

pub use color::Color;
pub use config::{RendererConfig, DEFAULT_IMAGES};
pub use geometry::{QuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use overlay::{fps_label, rasterize_label, OVERLAY_SCALE};
pub use renderer::Renderer;
pub use shader::{clip_position, crossfade, texcoord, FADE_PROGRAM, FADE_WGSL};
