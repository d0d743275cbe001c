//! The renderer itself: pipeline setup and draw data replay.

use dear_imgui_rs::render::{DrawCmd, DrawData, DrawIdx};
use dear_imgui_rs::{BackendFlags, Context};
use tracing::warn;
use wgpu::*;

use crate::error::{RendererError, RendererResult};
use crate::geometry::GeometryBuffers;
use crate::resources::SharedResources;
use crate::texture::TextureStore;
use crate::uniforms::Uniforms;
use crate::{GammaMode, shaders};

// DrawIdx is u16 today; deriving the format keeps an index width change to
// a one-line diff.
const INDEX_FORMAT: IndexFormat = if std::mem::size_of::<DrawIdx>() == 2 {
    IndexFormat::Uint16
} else {
    IndexFormat::Uint32
};

/// Everything the renderer needs from the host's GPU setup.
pub struct RendererConfig {
    pub device: Device,
    pub queue: Queue,
    /// Format of the render target the overlay pass draws into.
    pub target_format: TextureFormat,
    /// Depth-stencil format of that target, if it has one. The overlay
    /// never tests or writes depth; the pipeline only has to match the pass.
    pub depth_format: Option<TextureFormat>,
    /// Geometry buffer sets kept alive for GPU frames in flight.
    pub frames_in_flight: u32,
    pub multisample: MultisampleState,
}

impl RendererConfig {
    pub fn new(device: Device, queue: Queue, target_format: TextureFormat) -> Self {
        Self {
            device,
            queue,
            target_format,
            depth_format: None,
            frames_in_flight: 3,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
        }
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn with_frames_in_flight(mut self, frames: u32) -> Self {
        self.frames_in_flight = frames;
        self
    }

    pub fn with_multisample(mut self, multisample: MultisampleState) -> Self {
        self.multisample = multisample;
        self
    }
}

/// Rasterizes overlay draw data into a caller-provided render pass.
///
/// The renderer owns no render target. The host begins a pass against its own
/// swapchain, usually loading the scene it just drew, and hands the pass in;
/// the overlay composites on top with alpha blending.
pub struct WgpuRenderer {
    device: Device,
    queue: Queue,
    target_format: TextureFormat,
    pipeline: RenderPipeline,
    shared: SharedResources,
    frames: Vec<GeometryBuffers>,
    frame_index: u32,
    textures: TextureStore,
    default_texture: TextureView,
    gamma_mode: GammaMode,
}

impl WgpuRenderer {
    /// Build the pipeline and register renderer capabilities on the context.
    pub fn new(config: RendererConfig, ctx: &mut Context) -> Self {
        let RendererConfig {
            device,
            queue,
            target_format,
            depth_format,
            frames_in_flight,
            multisample,
        } = config;

        let shared = SharedResources::new(&device);
        let pipeline = create_pipeline(&device, &shared, target_format, depth_format, multisample);
        let default_texture = create_default_texture(&device, &queue);
        let frames = (0..frames_in_flight.max(1))
            .map(|_| GeometryBuffers::new())
            .collect();

        let _ = ctx.set_renderer_name(Some(format!(
            "devgui-wgpu {}",
            env!("CARGO_PKG_VERSION")
        )));
        let io = ctx.io_mut();
        let mut flags = io.backend_flags();
        flags.insert(BackendFlags::RENDERER_HAS_VTX_OFFSET);
        flags.insert(BackendFlags::RENDERER_HAS_TEXTURES);
        io.set_backend_flags(flags);

        Self {
            device,
            queue,
            target_format,
            pipeline,
            shared,
            frames,
            // Wraps to frame 0 on the first render.
            frame_index: u32::MAX,
            textures: TextureStore::new(),
            default_texture,
            gamma_mode: GammaMode::Auto,
        }
    }

    pub fn gamma_mode(&self) -> GammaMode {
        self.gamma_mode
    }

    pub fn set_gamma_mode(&mut self, mode: GammaMode) {
        self.gamma_mode = mode;
    }

    /// Draw one frame of overlay output into `render_pass`.
    ///
    /// Texture requests riding on the draw data are honored first, then the
    /// frame's geometry is uploaded and replayed. Frames with no visible
    /// geometry or a zero-area framebuffer return without touching the pass.
    pub fn render(
        &mut self,
        draw_data: &DrawData,
        render_pass: &mut RenderPass<'_>,
    ) -> RendererResult<()> {
        let total_vtx: usize = draw_data
            .draw_lists()
            .map(|list| list.vtx_buffer().len())
            .sum();
        let total_idx: usize = draw_data
            .draw_lists()
            .map(|list| list.idx_buffer().len())
            .sum();
        if total_vtx == 0 || total_idx == 0 {
            return Ok(());
        }

        let fb_width = (draw_data.display_size[0] * draw_data.framebuffer_scale[0]) as i32;
        let fb_height = (draw_data.display_size[1] * draw_data.framebuffer_scale[1]) as i32;
        if fb_width <= 0 || fb_height <= 0 || !draw_data.valid() {
            return Ok(());
        }

        self.textures
            .handle_updates(draw_data, &self.device, &self.queue, &mut self.shared);

        self.frame_index = self.frame_index.wrapping_add(1);
        self.upload_geometry(draw_data);

        let gamma = match self.gamma_mode {
            GammaMode::Auto => Uniforms::gamma_for_format(self.target_format),
            GammaMode::Linear => 1.0,
            GammaMode::Gamma22 => 2.2,
        };

        self.bind_frame_state(draw_data, render_pass, gamma);
        self.draw_lists(draw_data, render_pass, gamma)
    }

    fn upload_geometry(&mut self, draw_data: &DrawData) {
        let index = (self.frame_index as usize) % self.frames.len();
        let frame = &mut self.frames[index];
        frame.begin();
        for draw_list in draw_data.draw_lists() {
            frame.append(draw_list.vtx_buffer(), draw_list.idx_buffer());
        }
        frame.finish(&self.device, &self.queue);
    }

    /// Bind viewport, pipeline, uniforms and this frame's geometry buffers.
    fn bind_frame_state(&self, draw_data: &DrawData, render_pass: &mut RenderPass<'_>, gamma: f32) {
        let fb_width = draw_data.display_size[0] * draw_data.framebuffer_scale[0];
        let fb_height = draw_data.display_size[1] * draw_data.framebuffer_scale[1];
        render_pass.set_viewport(0.0, 0.0, fb_width, fb_height, 0.0, 1.0);
        render_pass.set_pipeline(&self.pipeline);

        let uniforms = Uniforms::new(draw_data.display_pos, draw_data.display_size, gamma);
        self.shared.uniforms().write(&self.queue, &uniforms);
        render_pass.set_bind_group(0, self.shared.uniforms().bind_group(), &[]);

        let frame = &self.frames[(self.frame_index as usize) % self.frames.len()];
        if let (Some(vertices), Some(indices)) = (frame.vertex_buffer(), frame.index_buffer()) {
            render_pass.set_vertex_buffer(0, vertices.slice(..));
            render_pass.set_index_buffer(indices.slice(..), INDEX_FORMAT);
        }
    }

    fn draw_lists(
        &mut self,
        draw_data: &DrawData,
        render_pass: &mut RenderPass<'_>,
        gamma: f32,
    ) -> RendererResult<()> {
        let mut global_vtx_offset = 0i32;
        let mut global_idx_offset = 0u32;
        let clip_off = draw_data.display_pos;
        let clip_scale = draw_data.framebuffer_scale;
        let fb_size = [
            draw_data.display_size[0] * clip_scale[0],
            draw_data.display_size[1] * clip_scale[1],
        ];

        for draw_list in draw_data.draw_lists() {
            for cmd in draw_list.commands() {
                match cmd {
                    DrawCmd::Elements {
                        count,
                        cmd_params,
                        raw_cmd,
                    } => {
                        // The id in cmd_params predates this frame's texture
                        // requests; read the effective one from the raw
                        // command.
                        let tex_id = unsafe {
                            let mut cmd_copy = *raw_cmd;
                            dear_imgui_rs::sys::ImDrawCmd_GetTexID(&mut cmd_copy)
                        } as u64;

                        let (cache_key, view) = match self.textures.get(tex_id) {
                            Some(texture) if tex_id != 0 => (tex_id, texture.view()),
                            // Unknown and null ids fall back to the 1x1 white
                            // texture under a shared cache slot.
                            _ => (0, &self.default_texture),
                        };
                        let bind_group =
                            self.shared.image_bind_group(&self.device, cache_key, view);
                        render_pass.set_bind_group(1, &bind_group, &[]);

                        let Some((x, y, width, height)) =
                            scissor_rect(cmd_params.clip_rect, clip_off, clip_scale, fb_size)
                        else {
                            continue;
                        };
                        render_pass.set_scissor_rect(x, y, width, height);

                        let Ok(count) = u32::try_from(count) else {
                            continue;
                        };
                        let Ok(idx_offset) = u32::try_from(cmd_params.idx_offset) else {
                            continue;
                        };
                        let Some(start) = idx_offset.checked_add(global_idx_offset) else {
                            continue;
                        };
                        let Some(end) = start.checked_add(count) else {
                            continue;
                        };
                        let Ok(vtx_offset) = i32::try_from(cmd_params.vtx_offset) else {
                            continue;
                        };
                        let Some(base_vertex) = vtx_offset.checked_add(global_vtx_offset) else {
                            continue;
                        };
                        render_pass.draw_indexed(start..end, base_vertex, 0..1);
                    }
                    DrawCmd::ResetRenderState => {
                        self.bind_frame_state(draw_data, render_pass, gamma);
                    }
                    DrawCmd::RawCallback { .. } => {
                        warn!("Draw lists with raw callbacks are not supported");
                    }
                }
            }

            let idx_len = u32::try_from(draw_list.idx_buffer().len()).map_err(|_| {
                RendererError::DrawListOverflow("index buffer too large".to_string())
            })?;
            global_idx_offset = global_idx_offset.checked_add(idx_len).ok_or_else(|| {
                RendererError::DrawListOverflow("index offset overflow".to_string())
            })?;

            let vtx_len = i32::try_from(draw_list.vtx_buffer().len()).map_err(|_| {
                RendererError::DrawListOverflow("vertex buffer too large".to_string())
            })?;
            global_vtx_offset = global_vtx_offset.checked_add(vtx_len).ok_or_else(|| {
                RendererError::DrawListOverflow("vertex offset overflow".to_string())
            })?;
        }

        Ok(())
    }
}

/// Scissor rectangle for one draw command, clamped to the framebuffer.
///
/// Returns `None` when the clipped rectangle has no area and the command
/// should be skipped.
fn scissor_rect(
    clip_rect: [f32; 4],
    clip_off: [f32; 2],
    clip_scale: [f32; 2],
    fb_size: [f32; 2],
) -> Option<(u32, u32, u32, u32)> {
    let min_x = ((clip_rect[0] - clip_off[0]) * clip_scale[0]).max(0.0);
    let min_y = ((clip_rect[1] - clip_off[1]) * clip_scale[1]).max(0.0);
    let max_x = ((clip_rect[2] - clip_off[0]) * clip_scale[0]).min(fb_size[0]);
    let max_y = ((clip_rect[3] - clip_off[1]) * clip_scale[1]).min(fb_size[1]);
    if max_x <= min_x || max_y <= min_y {
        return None;
    }
    Some((
        min_x as u32,
        min_y as u32,
        (max_x - min_x) as u32,
        (max_y - min_y) as u32,
    ))
}

fn create_pipeline(
    device: &Device,
    shared: &SharedResources,
    target_format: TextureFormat,
    depth_format: Option<TextureFormat>,
    multisample: MultisampleState,
) -> RenderPipeline {
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("devgui pipeline layout"),
        bind_group_layouts: &[Some(shared.uniforms().layout()), Some(shared.image_layout())],
        immediate_size: 0,
    });

    let shader = shaders::create_shader_module(device);
    let vertex_layouts = [shaders::vertex_buffer_layout()];

    let blend = BlendState {
        color: BlendComponent {
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        },
        alpha: BlendComponent {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        },
    };

    // Depth is neither tested nor written; the state only has to match the
    // host's pass attachments.
    let depth_stencil = depth_format.map(|format| DepthStencilState {
        format,
        depth_write_enabled: Some(false),
        depth_compare: Some(CompareFunction::Always),
        stencil: StencilState {
            front: StencilFaceState {
                compare: CompareFunction::Always,
                fail_op: StencilOperation::Keep,
                depth_fail_op: StencilOperation::Keep,
                pass_op: StencilOperation::Keep,
            },
            back: StencilFaceState {
                compare: CompareFunction::Always,
                fail_op: StencilOperation::Keep,
                depth_fail_op: StencilOperation::Keep,
                pass_op: StencilOperation::Keep,
            },
            read_mask: 0xff,
            write_mask: 0xff,
        },
        bias: DepthBiasState::default(),
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("devgui pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some(shaders::VS_ENTRY_POINT),
            compilation_options: Default::default(),
            buffers: &vertex_layouts,
        },
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Cw,
            cull_mode: None,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil,
        multisample,
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some(shaders::FS_ENTRY_POINT),
            compilation_options: Default::default(),
            targets: &[Some(ColorTargetState {
                format: target_format,
                blend: Some(blend),
                write_mask: ColorWrites::ALL,
            })],
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// 1x1 white texture bound whenever a draw command carries no usable id.
fn create_default_texture(device: &Device, queue: &Queue) -> TextureView {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("devgui default texture"),
        size: Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8Unorm,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: Origin3d::ZERO,
            aspect: TextureAspect::All,
        },
        &[255, 255, 255, 255],
        TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );

    texture.create_view(&TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scissor_clamps_to_framebuffer() {
        let rect = scissor_rect(
            [-10.0, -10.0, 500.0, 400.0],
            [0.0, 0.0],
            [1.0, 1.0],
            [400.0, 300.0],
        );
        assert_eq!(rect, Some((0, 0, 400, 300)));
    }

    #[test]
    fn scissor_applies_offset_and_scale() {
        let rect = scissor_rect(
            [110.0, 60.0, 210.0, 160.0],
            [100.0, 50.0],
            [2.0, 2.0],
            [800.0, 600.0],
        );
        assert_eq!(rect, Some((20, 20, 200, 200)));
    }

    #[test]
    fn empty_scissor_is_skipped() {
        // Entirely right of the framebuffer
        assert_eq!(
            scissor_rect(
                [500.0, 0.0, 600.0, 100.0],
                [0.0, 0.0],
                [1.0, 1.0],
                [400.0, 300.0]
            ),
            None
        );
        // Zero width
        assert_eq!(
            scissor_rect(
                [50.0, 50.0, 50.0, 80.0],
                [0.0, 0.0],
                [1.0, 1.0],
                [400.0, 300.0]
            ),
            None
        );
    }

    #[test]
    fn index_format_matches_draw_idx_width() {
        assert_eq!(INDEX_FORMAT, IndexFormat::Uint16);
    }
}
