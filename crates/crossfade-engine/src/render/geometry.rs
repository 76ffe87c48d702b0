//! Quad geometry shared by every renderer configuration.

use bytemuck::{Pod, Zeroable};

use crate::device::VertexLayout;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2], // clip space, -1..1
}

impl QuadVertex {
    /// Position attribute: location 0, two floats, tightly packed.
    pub const LAYOUT: VertexLayout = VertexLayout {
        location: 0,
        components: 2,
        stride: std::mem::size_of::<QuadVertex>() as u32,
        offset: 0,
    };
}

/// Corners of the full-screen quad, in triangle-strip order.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [-1.0, 1.0] },
    QuadVertex { position: [1.0, 1.0] },
];

/// Triangle-strip indices: (0,1,2) and (1,2,3).
///
/// `u16` is the narrowest index format wgpu accepts.
pub const QUAD_INDICES: [u16; 4] = [0, 1, 2, 3];
