//! The crossfade program and a CPU reference of its two stages.

use crate::device::ProgramSource;

use super::geometry::QuadVertex;

/// WGSL source of both stages.
pub const FADE_WGSL: &str = include_str!("shaders/fade.wgsl");

/// The program the renderer links in `start`.
pub const FADE_PROGRAM: ProgramSource<'static> = ProgramSource {
    label: "crossfade quad",
    source: FADE_WGSL,
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    vertex_layout: QuadVertex::LAYOUT,
};

/// Vertex stage: clip-space position (Y flipped).
#[inline]
pub fn clip_position(position: [f32; 2]) -> [f32; 4] {
    [position[0], -position[1], 0.0, 1.0]
}

/// Vertex stage: texture coordinate for a quad position.
///
/// Note: no correction for power-of-two padding is applied.
#[inline]
pub fn texcoord(position: [f32; 2]) -> [f32; 2] {
    [position[0] * 0.5 + 0.5, position[1] * 0.5 + 0.5]
}

/// Fragment stage: `mix(a, b, factor)` per channel.
#[inline]
pub fn crossfade(a: [f32; 4], b: [f32; 4], factor: f32) -> [f32; 4] {
    let t = factor.clamp(0.0, 1.0);
    std::array::from_fn(|i| a[i] * (1.0 - t) + b[i] * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [f32; 4] = [1.0, 0.0, 0.2, 1.0];
    const B: [f32; 4] = [0.0, 1.0, 0.6, 0.5];

    #[test]
    fn crossfade_endpoints_select_one_texture() {
        assert_eq!(crossfade(A, B, 0.0), A);
        assert_eq!(crossfade(A, B, 1.0), B);
    }

    #[test]
    fn crossfade_midpoint_is_mean() {
        let mid = crossfade(A, B, 0.5);
        for i in 0..4 {
            assert!((mid[i] - (A[i] + B[i]) / 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn texcoords_map_corners_to_unit_square() {
        assert_eq!(texcoord([-1.0, -1.0]), [0.0, 0.0]);
        assert_eq!(texcoord([1.0, 1.0]), [1.0, 1.0]);
        assert_eq!(texcoord([0.0, 0.0]), [0.5, 0.5]);
        assert_eq!(clip_position([0.5, 0.5]), [0.5, -0.5, 0.0, 1.0]);
    }

    #[test]
    fn program_source_names_its_entry_points() {
        assert!(FADE_WGSL.contains("fn vs_main("));
        assert!(FADE_WGSL.contains("fn fs_main("));
        assert!(FADE_WGSL.contains("fade_factor"));
    }
}
