//! Texture storage and the per-frame texture request protocol.
//!
//! The UI library owns texture lifecycle: each frame's draw data carries a
//! list of textures whose status asks the renderer to create, update or
//! destroy GPU storage. Font atlas pages arrive through the same path, so
//! there is no separate font upload step.

use std::collections::HashMap;

use dear_imgui_rs::TextureFormat as ImGuiTextureFormat;
use dear_imgui_rs::render::DrawData;
use dear_imgui_rs::texture::TextureRect;
use dear_imgui_rs::{TextureData, TextureId, TextureStatus};
use tracing::{debug, warn};
use wgpu::*;

use crate::error::{RendererError, RendererResult};
use crate::resources::SharedResources;

/// A GPU texture and the view draws bind.
pub(crate) struct GpuTexture {
    texture: Texture,
    view: TextureView,
}

impl GpuTexture {
    fn new(texture: Texture, view: TextureView) -> Self {
        Self { texture, view }
    }

    pub(crate) fn view(&self) -> &TextureView {
        &self.view
    }
}

/// Textures registered by the overlay, keyed by the id written back into the
/// UI library's texture data.
pub(crate) struct TextureStore {
    textures: HashMap<u64, GpuTexture>,
    // 0 is reserved for "no texture"
    next_id: u64,
}

impl TextureStore {
    pub(crate) fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_id: 1,
        }
    }

    pub(crate) fn get(&self, id: u64) -> Option<&GpuTexture> {
        self.textures.get(&id)
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.textures.contains_key(&id)
    }

    fn register(&mut self, texture: GpuTexture) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.textures.insert(id, texture);
        id
    }

    fn insert_at(&mut self, id: u64, texture: GpuTexture) {
        self.textures.insert(id, texture);
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }

    fn remove(&mut self, id: u64) -> Option<GpuTexture> {
        self.textures.remove(&id)
    }

    /// Process the frame's texture requests before any draw call is issued.
    pub(crate) fn handle_updates(
        &mut self,
        draw_data: &DrawData,
        device: &Device,
        queue: &Queue,
        shared: &mut SharedResources,
    ) {
        for texture_data in draw_data.textures() {
            let current_id = texture_data.tex_id().id();
            match texture_data.status() {
                TextureStatus::WantCreate => {
                    // A stale id can linger from a destroyed predecessor; its
                    // cached bind group must not survive into the new texture.
                    if current_id != 0 {
                        shared.drop_image_bind_group(current_id);
                    }
                    match self.create_from_data(device, queue, texture_data) {
                        Ok(new_id) => {
                            texture_data.set_tex_id(TextureId::from(new_id));
                            texture_data.set_status(TextureStatus::OK);
                        }
                        Err(err) => {
                            warn!("Failed to create overlay texture: {err}");
                        }
                    }
                }
                TextureStatus::WantUpdates => {
                    if current_id == 0 || !self.contains(current_id) {
                        // Updates can be requested before any create was
                        // honored. Build the texture now and leave it
                        // destroyed on failure to avoid a retry storm.
                        match self.create_from_data(device, queue, texture_data) {
                            Ok(new_id) => {
                                texture_data.set_tex_id(TextureId::from(new_id));
                                texture_data.set_status(TextureStatus::OK);
                            }
                            Err(err) => {
                                warn!("Failed to create overlay texture: {err}");
                                texture_data.set_status(TextureStatus::Destroyed);
                            }
                        }
                    } else {
                        shared.drop_image_bind_group(current_id);
                        if self.apply_subrect_updates(queue, texture_data, current_id) {
                            texture_data.set_status(TextureStatus::OK);
                        } else if let Err(err) =
                            self.recreate_at(device, queue, texture_data, current_id)
                        {
                            warn!("Failed to update overlay texture {current_id}: {err}");
                            texture_data.set_status(TextureStatus::Destroyed);
                        } else {
                            texture_data.set_status(TextureStatus::OK);
                        }
                    }
                }
                TextureStatus::WantDestroy => {
                    // Honored only once the UI reports the texture unused for
                    // at least one frame.
                    let can_destroy = unsafe {
                        let raw = texture_data.as_raw();
                        !raw.is_null() && (*raw).UnusedFrames > 0
                    };
                    if can_destroy {
                        self.remove(current_id);
                        shared.drop_image_bind_group(current_id);
                        texture_data.set_status(TextureStatus::Destroyed);
                        debug!("Destroyed overlay texture {current_id}");
                    }
                }
                TextureStatus::OK | TextureStatus::Destroyed => {}
            }
        }
    }

    /// Create a GPU texture from full pixel data and register it.
    fn create_from_data(
        &mut self,
        device: &Device,
        queue: &Queue,
        texture_data: &TextureData,
    ) -> RendererResult<u64> {
        let width = texture_data.width() as u32;
        let height = texture_data.height() as u32;
        let pixels = texture_data
            .pixels()
            .ok_or_else(|| RendererError::BadTexture("no pixel data".to_string()))?;

        let rgba = match texture_data.format() {
            ImGuiTextureFormat::RGBA32 => {
                if pixels.len() != (width * height * 4) as usize {
                    return Err(RendererError::BadTexture(format!(
                        "RGBA32 payload is {} bytes, expected {}",
                        pixels.len(),
                        width * height * 4
                    )));
                }
                pixels.to_vec()
            }
            ImGuiTextureFormat::Alpha8 => {
                if pixels.len() != (width * height) as usize {
                    return Err(RendererError::BadTexture(format!(
                        "Alpha8 payload is {} bytes, expected {}",
                        pixels.len(),
                        width * height
                    )));
                }
                // Expand to white RGBA so the common pipeline applies.
                let mut rgba = Vec::with_capacity(pixels.len() * 4);
                for &alpha in pixels {
                    rgba.extend_from_slice(&[255, 255, 255, alpha]);
                }
                rgba
            }
        };

        debug!("Creating overlay texture: {width}x{height}");
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("devgui texture"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_rgba(queue, &texture, [0, 0], [width, height], &rgba);

        let view = texture.create_view(&TextureViewDescriptor::default());
        Ok(self.register(GpuTexture::new(texture, view)))
    }

    /// Recreate the texture registered at `texture_id` from full pixel data,
    /// keeping the id stable.
    fn recreate_at(
        &mut self,
        device: &Device,
        queue: &Queue,
        texture_data: &TextureData,
        texture_id: u64,
    ) -> RendererResult<()> {
        if !self.contains(texture_id) {
            return Err(RendererError::UnknownTexture(texture_id));
        }
        self.remove(texture_id);
        let new_id = self.create_from_data(device, queue, texture_data)?;
        if new_id != texture_id
            && let Some(texture) = self.remove(new_id)
        {
            self.insert_at(texture_id, texture);
        }
        Ok(())
    }

    /// Apply queued sub-rectangle updates in place. Returns whether any rect
    /// was uploaded; a `false` asks the caller to fall back to a full
    /// recreate.
    fn apply_subrect_updates(
        &mut self,
        queue: &Queue,
        texture_data: &TextureData,
        texture_id: u64,
    ) -> bool {
        let Some(texture) = self.textures.get(&texture_id) else {
            return false;
        };

        let mut rects: Vec<TextureRect> = texture_data.updates().collect();
        if rects.is_empty() {
            // Older update paths report a single bounding rect instead.
            let rect = texture_data.update_rect();
            if rect.w > 0 && rect.h > 0 {
                rects.push(rect);
            }
        }
        if rects.is_empty() {
            return false;
        }

        for rect in rects {
            let Some(rgba) = Self::convert_subrect_to_rgba(texture_data, rect) else {
                return false;
            };
            write_rgba(
                queue,
                &texture.texture,
                [rect.x as u32, rect.y as u32],
                [rect.w as u32, rect.h as u32],
                &rgba,
            );
            debug!(
                "Updated overlay texture {texture_id}: {}x{} rect at ({}, {})",
                rect.w, rect.h, rect.x, rect.y
            );
        }
        true
    }

    /// Repack one update rectangle into tightly packed RGBA bytes.
    fn convert_subrect_to_rgba(texture_data: &TextureData, rect: TextureRect) -> Option<Vec<u8>> {
        let pixels = texture_data.pixels()?;
        let tex_w = texture_data.width() as usize;
        let tex_h = texture_data.height() as usize;
        if tex_w == 0 || tex_h == 0 {
            return None;
        }

        let bpp = texture_data.bytes_per_pixel() as usize;
        let (rx, ry) = (rect.x as usize, rect.y as usize);
        let (rw, rh) = (rect.w as usize, rect.h as usize);
        if rw == 0 || rh == 0 || rx >= tex_w || ry >= tex_h {
            return None;
        }
        let rw = rw.min(tex_w - rx);
        let rh = rh.min(tex_h - ry);

        let mut out = vec![0u8; rw * rh * 4];
        match texture_data.format() {
            ImGuiTextureFormat::RGBA32 => {
                for row in 0..rh {
                    let src = ((ry + row) * tex_w + rx) * bpp;
                    let dst = row * rw * 4;
                    out[dst..dst + rw * 4].copy_from_slice(&pixels[src..src + rw * 4]);
                }
            }
            ImGuiTextureFormat::Alpha8 => {
                for row in 0..rh {
                    let src = ((ry + row) * tex_w + rx) * bpp;
                    let dst = row * rw * 4;
                    for i in 0..rw {
                        out[dst + i * 4..dst + i * 4 + 4]
                            .copy_from_slice(&[255, 255, 255, pixels[src + i]]);
                    }
                }
            }
        }
        Some(out)
    }
}

/// Upload tightly packed RGBA pixels, padding rows when the copy alignment
/// requires it.
fn write_rgba(queue: &Queue, texture: &Texture, origin: [u32; 2], size: [u32; 2], rgba: &[u8]) {
    let [width, height] = size;
    let unpadded_bytes_per_row = width * 4;
    let align = COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

    let copy_info = TexelCopyTextureInfo {
        texture,
        mip_level: 0,
        origin: Origin3d {
            x: origin[0],
            y: origin[1],
            z: 0,
        },
        aspect: TextureAspect::All,
    };
    let extent = Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    if padded_bytes_per_row == unpadded_bytes_per_row {
        queue.write_texture(
            copy_info,
            rgba,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(unpadded_bytes_per_row),
                rows_per_image: Some(height),
            },
            extent,
        );
    } else {
        let row_len = unpadded_bytes_per_row as usize;
        let mut padded = vec![0u8; (padded_bytes_per_row * height) as usize];
        for row in 0..height as usize {
            let src = row * row_len;
            let dst = row * padded_bytes_per_row as usize;
            padded[dst..dst + row_len].copy_from_slice(&rgba[src..src + row_len]);
        }
        queue.write_texture(
            copy_info,
            &padded,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
            extent,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_subrect_copies_rows() {
        let mut tex = TextureData::new();
        tex.create(ImGuiTextureFormat::RGBA32, 2, 2);
        let pixels: Vec<u8> = (0..16).map(|i| (i * 10 + 10) as u8).collect();
        tex.set_data(&pixels);

        let rect = TextureRect {
            x: 0,
            y: 0,
            w: 2,
            h: 2,
        };
        let out = TextureStore::convert_subrect_to_rgba(&tex, rect).expect("expected data");
        assert_eq!(out, pixels);
    }

    #[test]
    fn rgba_subrect_picks_the_right_pixel() {
        let mut tex = TextureData::new();
        tex.create(ImGuiTextureFormat::RGBA32, 2, 2);
        let pixels: Vec<u8> = (0..16).map(|i| (i * 10 + 10) as u8).collect();
        tex.set_data(&pixels);

        let rect = TextureRect {
            x: 1,
            y: 1,
            w: 1,
            h: 1,
        };
        let out = TextureStore::convert_subrect_to_rgba(&tex, rect).expect("expected data");
        assert_eq!(out, &pixels[12..16]);
    }

    #[test]
    fn alpha8_subrect_expands_to_white_rgba() {
        let mut tex = TextureData::new();
        tex.create(ImGuiTextureFormat::Alpha8, 2, 1);
        tex.set_data(&[7, 200]);

        let rect = TextureRect {
            x: 0,
            y: 0,
            w: 2,
            h: 1,
        };
        let out = TextureStore::convert_subrect_to_rgba(&tex, rect).expect("expected data");
        assert_eq!(out, vec![255, 255, 255, 7, 255, 255, 255, 200]);
    }

    #[test]
    fn out_of_bounds_rect_yields_none() {
        let mut tex = TextureData::new();
        tex.create(ImGuiTextureFormat::RGBA32, 2, 2);
        tex.set_data(&[0u8; 16]);

        let rect = TextureRect {
            x: 2,
            y: 0,
            w: 1,
            h: 1,
        };
        assert!(TextureStore::convert_subrect_to_rgba(&tex, rect).is_none());

        let empty = TextureRect {
            x: 0,
            y: 0,
            w: 0,
            h: 1,
        };
        assert!(TextureStore::convert_subrect_to_rgba(&tex, empty).is_none());
    }

    #[test]
    fn empty_store_reserves_the_null_id() {
        let store = TextureStore::new();
        assert!(!store.contains(0));
        assert_eq!(store.next_id, 1);
    }
}
