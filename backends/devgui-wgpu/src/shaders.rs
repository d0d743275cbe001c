//! WGSL shader for the overlay pipeline.

use dear_imgui_rs::render::DrawVert;
use wgpu::*;

/// Vertex shader entry point
pub(crate) const VS_ENTRY_POINT: &str = "vs_main";
/// Fragment shader entry point
pub(crate) const FS_ENTRY_POINT: &str = "fs_main";

/// Vertex and fragment stages for overlay draw lists. The gamma uniform lets
/// one module serve both linear and sRGB render targets.
const SHADER_SOURCE: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
}

struct Uniforms {
    mvp: mat4x4<f32>,
    gamma: f32,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var u_sampler: sampler;

@group(1) @binding(0)
var u_texture: texture_2d<f32>;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.position = uniforms.mvp * vec4<f32>(in.position, 0.0, 1.0);
    out.color = in.color;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = in.color * textureSample(u_texture, u_sampler, in.uv);
    let corrected_color = pow(color.rgb, vec3<f32>(uniforms.gamma));
    return vec4<f32>(corrected_color, color.a);
}
"#;

pub(crate) fn create_shader_module(device: &Device) -> ShaderModule {
    device.create_shader_module(ShaderModuleDescriptor {
        label: Some("devgui shader"),
        source: ShaderSource::Wgsl(SHADER_SOURCE.into()),
    })
}

/// Buffer layout of [`DrawVert`]: position, uv, packed RGBA color.
pub(crate) fn vertex_buffer_layout() -> VertexBufferLayout<'static> {
    const ATTRIBUTES: &[VertexAttribute] = &vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Unorm8x4
    ];

    VertexBufferLayout {
        array_stride: std::mem::size_of::<DrawVert>() as BufferAddress,
        step_mode: VertexStepMode::Vertex,
        attributes: ATTRIBUTES,
    }
}
