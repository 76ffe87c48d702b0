//! Core engine-facing contracts.
//!
//! This module defines the interface between a host (the winit runtime, or a
//! scripted host in tests) and the application it drives: four lifecycle
//! callbacks and the per-frame context passed to `draw`.

mod app;
mod ctx;
mod error;
mod scripted;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
pub use error::StartError;
pub use scripted::{HostReport, ScriptedHost, Step};
