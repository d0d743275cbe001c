//! GPU state shared across frames: sampler, uniforms, texture bind groups.

use std::collections::HashMap;

use wgpu::*;

use crate::uniforms::UniformBuffer;

/// Uniform buffer plus the per-texture bind group cache.
///
/// Image bind groups are keyed by overlay texture id and dropped whenever the
/// texture behind an id changes, so a draw never binds a stale view.
pub(crate) struct SharedResources {
    uniforms: UniformBuffer,
    image_layout: BindGroupLayout,
    image_bind_groups: HashMap<u64, BindGroup>,
}

impl SharedResources {
    pub(crate) fn new(device: &Device) -> Self {
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("devgui sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: MipmapFilterMode::Linear,
            anisotropy_clamp: 1,
            ..Default::default()
        });

        let uniforms = UniformBuffer::new(device, &sampler);

        let image_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("devgui image bind group layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    multisampled: false,
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                },
                count: None,
            }],
        });

        Self {
            uniforms,
            image_layout,
            image_bind_groups: HashMap::new(),
        }
    }

    pub(crate) fn uniforms(&self) -> &UniformBuffer {
        &self.uniforms
    }

    pub(crate) fn image_layout(&self) -> &BindGroupLayout {
        &self.image_layout
    }

    /// Bind group for a texture view, cached under the overlay texture id.
    pub(crate) fn image_bind_group(
        &mut self,
        device: &Device,
        texture_id: u64,
        view: &TextureView,
    ) -> BindGroup {
        let layout = &self.image_layout;
        self.image_bind_groups
            .entry(texture_id)
            .or_insert_with(|| {
                device.create_bind_group(&BindGroupDescriptor {
                    label: Some("devgui image bind group"),
                    layout,
                    entries: &[BindGroupEntry {
                        binding: 0,
                        resource: BindingResource::TextureView(view),
                    }],
                })
            })
            .clone()
    }

    pub(crate) fn drop_image_bind_group(&mut self, texture_id: u64) {
        self.image_bind_groups.remove(&texture_id);
    }
}
