//! Unit meshes and per-instance data for arrows and the charge sphere.
//!
//! Meshes are built once in local space: arrows point along +Y and span
//! `y = 0..1`, the sphere has unit radius. The vertex shader scales and
//! orients each instance from its [`GlyphInstance`].

use bytemuck::{Pod, Zeroable};

use crate::field::Glyph;
use crate::scene::ChargeMarker;

/// Which piece of a glyph a vertex belongs to. Selects the scaling rule in
/// the vertex shader.
pub const PART_SHAFT: u32 = 0;
pub const PART_HEAD: u32 = 1;
pub const PART_SPHERE: u32 = 2;

/// Segments around the arrow axis.
pub const ARROW_SEGMENTS: u32 = 12;

/// Shaft radius relative to head width, with a floor in render units.
pub const SHAFT_RADIUS_RATIO: f32 = 0.15;
pub const MIN_SHAFT_RADIUS: f32 = 0.008;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub part: u32,
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Uint32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Per-instance arrow parameters, 64 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GlyphInstance {
    pub origin: [f32; 3],
    pub length: f32,
    pub direction: [f32; 3],
    pub head_length: f32,
    /// RGB + opacity.
    pub color: [f32; 4],
    pub head_width: f32,
    pub shaft_radius: f32,
    pub shaft_length: f32,
    pub _pad: f32,
}

impl GlyphInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        2 => Float32x3, // origin
        3 => Float32,   // length
        4 => Float32x3, // direction
        5 => Float32,   // head_length
        6 => Float32x4, // color
        7 => Float32,   // head_width
        8 => Float32,   // shaft_radius
        9 => Float32,   // shaft_length
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    /// A solid sphere at the origin; `length` carries the radius.
    pub fn sphere(marker: &ChargeMarker) -> Self {
        let [r, g, b] = marker.color;
        Self {
            origin: [0.0; 3],
            length: marker.radius,
            direction: [0.0, 1.0, 0.0],
            head_length: 0.0,
            color: [r, g, b, 1.0],
            head_width: 0.0,
            shaft_radius: 0.0,
            shaft_length: 0.0,
            _pad: 0.0,
        }
    }
}

impl From<&Glyph> for GlyphInstance {
    fn from(glyph: &Glyph) -> Self {
        let [r, g, b] = glyph.color;
        let head_width = glyph.head_width as f32;
        Self {
            origin: glyph.origin.as_vec3().to_array(),
            length: glyph.length as f32,
            direction: glyph.direction.as_vec3().to_array(),
            head_length: glyph.head_length as f32,
            color: [r, g, b, glyph.opacity as f32],
            head_width,
            shaft_radius: (head_width * SHAFT_RADIUS_RATIO).max(MIN_SHAFT_RADIUS),
            shaft_length: glyph.shaft_length() as f32,
            _pad: 0.0,
        }
    }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    fn push(&mut self, position: [f32; 3], part: u32) -> u32 {
        self.vertices.push(MeshVertex { position, part });
        (self.vertices.len() - 1) as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Unit arrow along +Y: a cylinder shaft (`PART_SHAFT`) from `y = 0` to
/// `y = 1` and a cone head (`PART_HEAD`) with base at `y = 0`, tip at `y = 1`.
pub fn arrow_mesh(segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut mesh = Mesh::default();
    let ring = |i: u32| {
        let a = i as f32 / segments as f32 * std::f32::consts::TAU;
        (a.cos(), a.sin())
    };

    // Shaft side
    let shaft_base = mesh.vertices.len() as u32;
    for i in 0..segments {
        let (x, z) = ring(i);
        mesh.push([x, 0.0, z], PART_SHAFT);
        mesh.push([x, 1.0, z], PART_SHAFT);
    }
    for i in 0..segments {
        let a0 = shaft_base + 2 * i;
        let a1 = a0 + 1;
        let b0 = shaft_base + 2 * ((i + 1) % segments);
        let b1 = b0 + 1;
        mesh.indices.extend_from_slice(&[a0, b0, a1, a1, b0, b1]);
    }

    // Cone side + base cap
    let tip = mesh.push([0.0, 1.0, 0.0], PART_HEAD);
    let centre = mesh.push([0.0, 0.0, 0.0], PART_HEAD);
    let cone_base = mesh.vertices.len() as u32;
    for i in 0..segments {
        let (x, z) = ring(i);
        mesh.push([x, 0.0, z], PART_HEAD);
    }
    for i in 0..segments {
        let a = cone_base + i;
        let b = cone_base + (i + 1) % segments;
        mesh.indices.extend_from_slice(&[a, b, tip]);
        mesh.indices.extend_from_slice(&[b, a, centre]);
    }

    mesh
}

/// Unit UV sphere tagged `PART_SPHERE`.
pub fn sphere_mesh(stacks: u32, slices: u32) -> Mesh {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut mesh = Mesh::default();

    for s in 0..=stacks {
        let phi = s as f32 / stacks as f32 * std::f32::consts::PI;
        let (y, r) = (phi.cos(), phi.sin());
        for l in 0..=slices {
            let theta = l as f32 / slices as f32 * std::f32::consts::TAU;
            mesh.push([r * theta.cos(), y, r * theta.sin()], PART_SPHERE);
        }
    }

    let row = slices + 1;
    for s in 0..stacks {
        for l in 0..slices {
            let a = s * row + l;
            let b = a + row;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_instance_layout_is_64_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 64);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 16);

        let last = GlyphInstance::ATTRIBS[7];
        assert_eq!(last.shader_location, 9);
        assert_eq!(last.offset, 56);
    }

    #[test]
    fn test_arrow_mesh_spans_unit_height() {
        let mesh = arrow_mesh(ARROW_SEGMENTS);
        assert!(mesh.vertices.iter().all(|v| (0.0..=1.0).contains(&v.position[1])));
        assert!(mesh.vertices.iter().any(|v| v.part == PART_SHAFT));
        assert!(mesh.vertices.iter().any(|v| v.part == PART_HEAD));
        // 2 per shaft quad, 2 per cone segment
        assert_eq!(mesh.triangle_count(), 4 * ARROW_SEGMENTS as usize);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_sphere_mesh_is_unit_radius() {
        let mesh = sphere_mesh(8, 16);
        for v in &mesh.vertices {
            let r = glam::Vec3::from(v.position).length();
            assert!((r - 1.0).abs() < 1e-5);
            assert_eq!(v.part, PART_SPHERE);
        }
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_instance_from_glyph() {
        let glyph = Glyph {
            origin: DVec3::new(2.5, 0.0, 0.0),
            direction: DVec3::X,
            length: 2.0,
            head_length: 0.4,
            head_width: 0.2,
            color: [1.0, 0.0, 0.0],
            opacity: 0.75,
        };
        let inst = GlyphInstance::from(&glyph);
        assert_eq!(inst.origin, [2.5, 0.0, 0.0]);
        assert_eq!(inst.direction, [1.0, 0.0, 0.0]);
        assert_eq!(inst.color, [1.0, 0.0, 0.0, 0.75]);
        assert!((inst.shaft_radius - 0.03).abs() < 1e-6);
        assert!((inst.shaft_length - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_glyph_keeps_visible_shaft() {
        let glyph = Glyph {
            origin: DVec3::new(5.0, 5.0, 5.0),
            direction: DVec3::ONE.normalize(),
            length: 0.01,
            head_length: 0.002,
            head_width: 0.001,
            color: [1.0, 0.0, 0.0],
            opacity: 0.01,
        };
        assert_eq!(GlyphInstance::from(&glyph).shaft_radius, MIN_SHAFT_RADIUS);
    }
}
