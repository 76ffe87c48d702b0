//! Crossfade engine crate.
//!
//! A full-screen quad that cross-fades two textures, plus the platform and
//! GPU runtime that hosts it. The renderer is written against the
//! [`device::GraphicsDevice`] seam and the [`core::App`] lifecycle, so it runs
//! unchanged on wgpu and on the recording mock device.

pub mod assets;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod texture;
pub mod time;
pub mod window;
