/// Failure to produce a decoded image for a named resource.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset `{name}` not found")]
    NotFound { name: String },

    #[error("failed to read asset `{name}`")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode asset `{name}`")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

impl AssetError {
    /// Name of the resource the error refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::Io { name, .. } | Self::Decode { name, .. } => name,
        }
    }
}
