use image::{ImageFormat, RgbaImage};

use super::AssetError;

/// Decodes a PNG resource into 8-bit RGBA.
///
/// Palette, grayscale and 16-bit images are converted; RGBA8 input is used
/// without conversion.
pub fn decode_rgba(name: &str, bytes: &[u8]) -> Result<RgbaImage, AssetError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|source| {
        AssetError::Decode {
            name: name.to_string(),
            source,
        }
    })?;

    Ok(decoded.into_rgba8())
}
