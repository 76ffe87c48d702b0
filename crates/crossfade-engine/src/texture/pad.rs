use image::{imageops, RgbaImage};

/// How decoded images are laid out in GPU textures.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextureLayout {
    /// Upload at the decoded size.
    #[default]
    Exact,
    /// Round each axis up to the next power of two and pad.
    PowerOfTwo,
}

/// Smallest power of two `>= n`. `0` maps to `1`.
///
/// `None` when that power does not fit in a `u32` (`n > 2^31`).
pub fn next_pow2(n: u32) -> Option<u32> {
    n.checked_next_power_of_two()
}

/// Returns `image` padded to power-of-two dimensions.
///
/// The source occupies `[0, w) x [0, h)` unchanged; the rest is transparent
/// black. Images that already have power-of-two sides are returned as-is.
///
/// An axis longer than `2^31` has no power-of-two size in a `u32` and keeps
/// its length. No decodable image gets there.
pub fn pad_to_pow2(image: RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let (pw, ph) = (next_pow2(w).unwrap_or(w), next_pow2(h).unwrap_or(h));
    if (pw, ph) == (w, h) {
        return image;
    }

    let mut padded = RgbaImage::new(pw, ph);
    imageops::replace(&mut padded, &image, 0, 0);
    padded
}

/// Applies `layout` to a decoded image.
pub fn prepare(image: RgbaImage, layout: TextureLayout) -> RgbaImage {
    match layout {
        TextureLayout::Exact => image,
        TextureLayout::PowerOfTwo => pad_to_pow2(image),
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn next_pow2_rounds_up() {
        assert_eq!(next_pow2(0), Some(1));
        assert_eq!(next_pow2(1), Some(1));
        assert_eq!(next_pow2(2), Some(2));
        assert_eq!(next_pow2(3), Some(4));
        assert_eq!(next_pow2(255), Some(256));
        assert_eq!(next_pow2(256), Some(256));
        assert_eq!(next_pow2(257), Some(512));
    }

    #[test]
    fn next_pow2_has_no_answer_past_2_31() {
        assert_eq!(next_pow2(1 << 31), Some(1 << 31));
        assert_eq!(next_pow2((1 << 31) + 1), None);
        assert_eq!(next_pow2(u32::MAX), None);
    }

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, (x ^ y) as u8, 255]))
    }

    #[test]
    fn pad_keeps_source_in_top_left() {
        let src = gradient(5, 3);
        let padded = pad_to_pow2(src.clone());

        assert_eq!(padded.dimensions(), (8, 4));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(padded.get_pixel(x, y), src.get_pixel(x, y), "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn pad_fills_remainder_with_transparent_black() {
        let padded = pad_to_pow2(gradient(5, 3));
        for (x, y, px) in padded.enumerate_pixels() {
            if x >= 5 || y >= 3 {
                assert_eq!(*px, Rgba([0, 0, 0, 0]), "padding pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn pad_leaves_pow2_images_untouched() {
        let src = gradient(16, 8);
        assert_eq!(pad_to_pow2(src.clone()), src);
    }

    #[test]
    fn exact_layout_is_identity() {
        let src = gradient(7, 9);
        assert_eq!(prepare(src.clone(), TextureLayout::Exact), src);
        assert_eq!(prepare(src, TextureLayout::PowerOfTwo).dimensions(), (8, 16));
    }
}
