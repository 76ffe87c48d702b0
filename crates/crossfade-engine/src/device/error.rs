/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Shader compilation or program link failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to link program `{label}`: {message}")]
pub struct ProgramLinkError {
    pub label: String,
    pub message: String,
}

impl ProgramLinkError {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }
}
