#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crossfade_engine::assets::MemoryAssets;
use crossfade_engine::device::MockDevice;
use crossfade_engine::render::{Renderer, RendererConfig, DEFAULT_IMAGES};
use crossfade_engine::time::FadeDriver;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];

pub fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
        .write_to(&mut out, ImageFormat::Png)
        .expect("png encode");
    out.into_inner()
}

/// Both default images as solid-color PNGs of the given size.
pub fn solid_assets(w: u32, h: u32) -> MemoryAssets {
    MemoryAssets::new()
        .with(DEFAULT_IMAGES[0], png(w, h, RED))
        .with(DEFAULT_IMAGES[1], png(w, h, BLUE))
}

pub fn renderer(assets: MemoryAssets, fade: FadeDriver) -> Renderer<MockDevice> {
    Renderer::new(assets, RendererConfig::default(), fade)
}

pub fn unit(px: [u8; 4]) -> [f32; 4] {
    px.map(|c| f32::from(c) / 255.0)
}

pub fn assert_color_eq(actual: [f32; 4], expected: [f32; 4]) {
    for i in 0..4 {
        assert!(
            (actual[i] - expected[i]).abs() < 1e-5,
            "channel {i}: {actual:?} != {expected:?}"
        );
    }
}
