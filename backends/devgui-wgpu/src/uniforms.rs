//! Shader uniforms and the shared uniform buffer.

use bytemuck::{Pod, Zeroable};
use wgpu::*;

/// Round `size` up to the next multiple of `alignment` (a power of two).
pub(crate) fn align_to(size: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (size + alignment - 1) & !(alignment - 1)
}

/// Uniform data fed to the overlay shader: the orthographic projection over
/// the display rectangle and the gamma applied in the fragment stage.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct Uniforms {
    mvp: [[f32; 4]; 4],
    gamma: f32,
    _padding: [f32; 3],
}

impl Uniforms {
    /// Build uniforms mapping `display_pos`/`display_size` onto clip space.
    pub(crate) fn new(display_pos: [f32; 2], display_size: [f32; 2], gamma: f32) -> Self {
        let left = display_pos[0];
        let right = display_pos[0] + display_size[0];
        let top = display_pos[1];
        let bottom = display_pos[1] + display_size[1];

        let mvp = [
            [2.0 / (right - left), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (top - bottom), 0.0, 0.0],
            [0.0, 0.0, 0.5, 0.0],
            [
                (right + left) / (left - right),
                (top + bottom) / (bottom - top),
                0.5,
                1.0,
            ],
        ];

        Self {
            mvp,
            gamma,
            _padding: [0.0; 3],
        }
    }

    /// Gamma the fragment shader applies when rendering into `format`.
    ///
    /// sRGB targets re-encode shader output, so overlay colors need the
    /// inverse transfer applied first; linear targets pass through.
    pub(crate) fn gamma_for_format(format: TextureFormat) -> f32 {
        match format {
            TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8UnormSrgb
            | TextureFormat::Bc1RgbaUnormSrgb
            | TextureFormat::Bc2RgbaUnormSrgb
            | TextureFormat::Bc3RgbaUnormSrgb
            | TextureFormat::Bc7RgbaUnormSrgb
            | TextureFormat::Etc2Rgb8UnormSrgb
            | TextureFormat::Etc2Rgb8A1UnormSrgb
            | TextureFormat::Etc2Rgba8UnormSrgb
            | TextureFormat::Astc {
                block: _,
                channel: AstcChannel::UnormSrgb,
            } => 2.2,
            _ => 1.0,
        }
    }
}

/// Uniform buffer plus the frame bind group shared by every draw call
/// (uniforms at binding 0, the sampler at binding 1).
pub(crate) struct UniformBuffer {
    buffer: Buffer,
    bind_group: BindGroup,
    layout: BindGroupLayout,
}

impl UniformBuffer {
    pub(crate) fn new(device: &Device, sampler: &Sampler) -> Self {
        let buffer_size = align_to(std::mem::size_of::<Uniforms>(), 16);
        let buffer = device.create_buffer(&BufferDescriptor {
            label: Some("devgui uniform buffer"),
            size: buffer_size as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("devgui frame bind group layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("devgui frame bind group"),
            layout: &layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            buffer,
            bind_group,
            layout,
        }
    }

    pub(crate) fn write(&self, queue: &Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    pub(crate) fn layout(&self) -> &BindGroupLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(mvp: &[[f32; 4]; 4], x: f32, y: f32) -> [f32; 2] {
        [
            mvp[0][0] * x + mvp[1][0] * y + mvp[3][0],
            mvp[0][1] * x + mvp[1][1] * y + mvp[3][1],
        ]
    }

    #[test]
    fn projection_maps_display_corners_to_clip_space() {
        let uniforms = Uniforms::new([0.0, 0.0], [800.0, 600.0], 1.0);
        assert_eq!(project(&uniforms.mvp, 0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(project(&uniforms.mvp, 800.0, 600.0), [1.0, -1.0]);
        assert_eq!(project(&uniforms.mvp, 400.0, 300.0), [0.0, 0.0]);
    }

    #[test]
    fn projection_honors_display_offset() {
        let uniforms = Uniforms::new([100.0, 50.0], [200.0, 100.0], 1.0);
        assert_eq!(project(&uniforms.mvp, 100.0, 50.0), [-1.0, 1.0]);
        assert_eq!(project(&uniforms.mvp, 300.0, 150.0), [1.0, -1.0]);
    }

    #[test]
    fn gamma_tracks_target_format() {
        assert_eq!(Uniforms::gamma_for_format(TextureFormat::Bgra8UnormSrgb), 2.2);
        assert_eq!(Uniforms::gamma_for_format(TextureFormat::Rgba8UnormSrgb), 2.2);
        assert_eq!(Uniforms::gamma_for_format(TextureFormat::Bgra8Unorm), 1.0);
        assert_eq!(Uniforms::gamma_for_format(TextureFormat::Rgba16Float), 1.0);
    }

    #[test]
    fn align_to_rounds_up_to_the_alignment() {
        assert_eq!(align_to(0, 4), 0);
        assert_eq!(align_to(1, 4), 4);
        assert_eq!(align_to(4, 4), 4);
        assert_eq!(align_to(84, 16), 96);
    }
}
