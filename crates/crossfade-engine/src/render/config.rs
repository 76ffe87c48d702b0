use crate::texture::TextureLayout;

use super::Color;

/// Image names loaded by default, in texture-unit order.
pub const DEFAULT_IMAGES: [&str; 2] = ["gl2-hello-1.png", "gl2-hello-2.png"];

/// Static renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Asset names for texture units 0 and 1.
    pub images: [String; 2],
    /// Background the target is cleared to each frame.
    pub clear_color: Color,
    /// Storage layout for uploaded textures.
    pub texture_layout: TextureLayout,
    /// Draw the frame-rate label over the quad.
    pub show_fps: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGES.map(String::from),
            clear_color: Color::BLACK,
            texture_layout: TextureLayout::Exact,
            show_fps: true,
        }
    }
}
