//! WGSL for instanced arrow and sphere rendering.
//!
//! One unlit shader serves both the translucent field arrows and the opaque
//! charge sphere; the vertex `part` tag picks how local mesh coordinates are
//! scaled before the +Y axis is rotated onto the instance direction.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
}

pub const MESH_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) part: u32,
};

struct InstanceInput {
    @location(2) origin: vec3<f32>,
    @location(3) length: f32,
    @location(4) direction: vec3<f32>,
    @location(5) head_length: f32,
    @location(6) color: vec4<f32>,
    @location(7) head_width: f32,
    @location(8) shaft_radius: f32,
    @location(9) shaft_length: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

const PART_SHAFT: u32 = 0u;
const PART_HEAD: u32 = 1u;

// Rotation taking +Y onto `dir` (unit length).
fn basis_from_y(dir: vec3<f32>) -> mat3x3<f32> {
    var helper = vec3<f32>(1.0, 0.0, 0.0);
    if abs(dir.x) > 0.9 {
        helper = vec3<f32>(0.0, 0.0, 1.0);
    }
    let x_axis = normalize(cross(helper, dir));
    let z_axis = cross(x_axis, dir);
    return mat3x3<f32>(x_axis, dir, z_axis);
}

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    var local: vec3<f32>;
    if vertex.part == PART_SHAFT {
        local = vec3<f32>(
            vertex.position.x * instance.shaft_radius,
            vertex.position.y * instance.shaft_length,
            vertex.position.z * instance.shaft_radius,
        );
    } else if vertex.part == PART_HEAD {
        let r = instance.head_width * 0.5;
        local = vec3<f32>(
            vertex.position.x * r,
            instance.shaft_length + vertex.position.y * instance.head_length,
            vertex.position.z * r,
        );
    } else {
        // Sphere: `length` is the radius
        local = vertex.position * instance.length;
    }

    let world = instance.origin + basis_from_y(instance.direction) * local;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 1.0);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
