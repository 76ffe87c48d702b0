//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, builds the [`Gpu`](crate::device::Gpu)
//! and dispatches the [`App`](crate::core::App) lifecycle callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
