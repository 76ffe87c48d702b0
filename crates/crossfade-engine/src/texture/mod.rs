//! CPU-side texture preparation.
//!
//! Some GPUs (and GLES2-era code paths) require power-of-two texture sizes.
//! [`pad_to_pow2`] enlarges the storage while leaving the source pixels in the
//! top-left corner.
//!
//! Sampling caveat: texture coordinates are *not* rescaled for the padding.
//! A padded texture sampled over `[0, 1]` shows the source image in its
//! top-left `w / next_pow2(w)` by `h / next_pow2(h)` region and transparent
//! black elsewhere.

mod pad;

pub use pad::{next_pow2, pad_to_pow2, prepare, TextureLayout};
