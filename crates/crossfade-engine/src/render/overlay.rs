//! Frame-rate label drawn over the quad.
//!
//! Text is rasterized on the CPU from a built-in 3x5 bitmap font into a small
//! RGBA image: black ink on an opaque white box. The device draws the image in
//! the bottom-left corner, magnified by [`OVERLAY_SCALE`].

use image::{Rgba, RgbaImage};

/// Device pixels per label texel.
pub const OVERLAY_SCALE: u32 = 3;

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;
/// Blank texels between glyphs and around the label.
const GAP: u32 = 1;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Rows of a glyph, top to bottom; bit 2 is the leftmost column.
fn glyph(c: char) -> [u8; GLYPH_H as usize] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => [0; GLYPH_H as usize],
    }
}

/// Text shown for a frame-rate reading; `None` before the first full window.
pub fn fps_label(fps: Option<f32>) -> String {
    match fps {
        Some(fps) => format!("{:.0} FPS", fps.max(0.0)),
        None => "-- FPS".to_string(),
    }
}

/// Rasterizes `text` at one texel per font pixel.
///
/// Characters outside the font render as blanks.
pub fn rasterize_label(text: &str) -> RgbaImage {
    let count = text.chars().count().max(1) as u32;
    let width = GAP + count * (GLYPH_W + GAP);
    let height = GAP + GLYPH_H + GAP;

    let mut image = RgbaImage::from_pixel(width, height, PAPER);
    for (i, c) in (0u32..).zip(text.chars()) {
        let left = GAP + i * (GLYPH_W + GAP);
        for (row, bits) in (0u32..).zip(glyph(c)) {
            for col in 0..GLYPH_W {
                if bits & (0b100 >> col) != 0 {
                    image.put_pixel(left + col, GAP + row, INK);
                }
            }
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(fps_label(None), "-- FPS");
        assert_eq!(fps_label(Some(59.6)), "60 FPS");
        assert_eq!(fps_label(Some(-1.0)), "0 FPS");
    }

    #[test]
    fn label_size_follows_character_count() {
        assert_eq!(rasterize_label("60 FPS").dimensions(), (25, 7));
        assert_eq!(rasterize_label("").dimensions(), (5, 7));
    }

    #[test]
    fn one_draws_its_stem() {
        let image = rasterize_label("1");
        let ink: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, px)| **px == INK)
            .map(|(x, y, _)| (x, y))
            .collect();
        // Centre column of the glyph, offset by the gap.
        for y in 1..=5 {
            assert!(ink.contains(&(2, y)), "stem at row {y}");
        }
        assert!(ink.contains(&(1, 2)), "flag");
        assert!(ink.contains(&(1, 5)) && ink.contains(&(3, 5)), "base");
        assert_eq!(image.get_pixel(0, 0), &PAPER);
    }

    #[test]
    fn unknown_characters_are_blank() {
        let image = rasterize_label("?");
        assert!(image.pixels().all(|px| *px == PAPER));
    }

    #[test]
    fn different_readings_render_differently() {
        assert_ne!(rasterize_label("30 FPS"), rasterize_label("60 FPS"));
    }
}
