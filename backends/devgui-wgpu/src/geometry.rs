//! Per-frame vertex and index buffer pool.
//!
//! Each frame in flight owns one set of geometry buffers, so a frame the GPU
//! is still reading never has its data overwritten. Buffers grow with
//! headroom and are never shrunk.

use dear_imgui_rs::render::{DrawIdx, DrawVert};
use wgpu::*;

use crate::uniforms::align_to;

// Growth headroom in elements, so dragging a window larger does not
// reallocate every frame.
const VERTEX_HEADROOM: usize = 5000;
const INDEX_HEADROOM: usize = 10000;

pub(crate) struct GeometryBuffers {
    vertex_buffer: Option<Buffer>,
    vertex_capacity: usize,
    vertex_staging: Vec<u8>,
    index_buffer: Option<Buffer>,
    index_capacity: usize,
    index_staging: Vec<u8>,
}

impl GeometryBuffers {
    pub(crate) fn new() -> Self {
        Self {
            vertex_buffer: None,
            vertex_capacity: 0,
            vertex_staging: Vec::new(),
            index_buffer: None,
            index_capacity: 0,
            index_staging: Vec::new(),
        }
    }

    /// Start collecting geometry for a new frame.
    pub(crate) fn begin(&mut self) {
        self.vertex_staging.clear();
        self.index_staging.clear();
    }

    /// Append one draw list's geometry to the staging area.
    pub(crate) fn append(&mut self, vertices: &[DrawVert], indices: &[DrawIdx]) {
        self.vertex_staging.extend_from_slice(bytes_of_slice(vertices));
        self.index_staging.extend_from_slice(bytes_of_slice(indices));
    }

    /// Upload the staged geometry, growing the GPU buffers when needed.
    pub(crate) fn finish(&mut self, device: &Device, queue: &Queue) {
        if self.vertex_staging.is_empty() || self.index_staging.is_empty() {
            return;
        }

        // write_buffer payloads must be 4-byte aligned; u16 indices can
        // leave the staging length short of that.
        pad_to_copy_alignment(&mut self.vertex_staging);
        pad_to_copy_alignment(&mut self.index_staging);

        if self.vertex_buffer.is_none() || self.vertex_staging.len() > self.vertex_capacity {
            let headroom = VERTEX_HEADROOM * std::mem::size_of::<DrawVert>();
            let capacity = (self.vertex_staging.len() + headroom).max(self.vertex_capacity * 2);
            self.vertex_buffer = Some(device.create_buffer(&BufferDescriptor {
                label: Some("devgui vertex buffer"),
                size: capacity as u64,
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = capacity;
        }

        if self.index_buffer.is_none() || self.index_staging.len() > self.index_capacity {
            let headroom = INDEX_HEADROOM * std::mem::size_of::<DrawIdx>();
            let capacity = (self.index_staging.len() + headroom).max(self.index_capacity * 2);
            self.index_buffer = Some(device.create_buffer(&BufferDescriptor {
                label: Some("devgui index buffer"),
                size: capacity as u64,
                usage: BufferUsages::INDEX | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = capacity;
        }

        debug_assert!(self.vertex_staging.len() <= self.vertex_capacity);
        debug_assert!(self.index_staging.len() <= self.index_capacity);

        if let Some(buffer) = &self.vertex_buffer {
            queue.write_buffer(buffer, 0, &self.vertex_staging);
        }
        if let Some(buffer) = &self.index_buffer {
            queue.write_buffer(buffer, 0, &self.index_staging);
        }
    }

    pub(crate) fn vertex_buffer(&self) -> Option<&Buffer> {
        self.vertex_buffer.as_ref()
    }

    pub(crate) fn index_buffer(&self) -> Option<&Buffer> {
        self.index_buffer.as_ref()
    }
}

// DrawVert and DrawIdx come from the C API without bytemuck impls, so view
// them as raw bytes for the upload. Both are plain repr(C) data.
fn bytes_of_slice<T>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr().cast(), std::mem::size_of_val(slice)) }
}

fn pad_to_copy_alignment(bytes: &mut Vec<u8>) {
    let padded = align_to(bytes.len(), COPY_BUFFER_ALIGNMENT as usize);
    bytes.resize(padded, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex() -> DrawVert {
        DrawVert {
            pos: [1.0, 2.0],
            uv: [0.5, 0.5],
            col: 0xffff_ffff,
        }
    }

    #[test]
    fn staged_bytes_match_element_sizes() {
        let mut buffers = GeometryBuffers::new();
        buffers.begin();
        let vertices = [vertex(); 3];
        let indices: [DrawIdx; 3] = [0, 1, 2];
        buffers.append(&vertices, &indices);
        assert_eq!(
            buffers.vertex_staging.len(),
            3 * std::mem::size_of::<DrawVert>()
        );
        assert_eq!(
            buffers.index_staging.len(),
            3 * std::mem::size_of::<DrawIdx>()
        );
    }

    #[test]
    fn begin_discards_previous_frame() {
        let mut buffers = GeometryBuffers::new();
        buffers.begin();
        let indices: [DrawIdx; 2] = [0, 1];
        buffers.append(&[vertex(); 2], &indices);
        buffers.begin();
        assert!(buffers.vertex_staging.is_empty());
        assert!(buffers.index_staging.is_empty());
    }

    #[test]
    fn copy_alignment_padding() {
        let mut bytes = vec![1u8; 6];
        pad_to_copy_alignment(&mut bytes);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[6..], &[0, 0]);

        let mut aligned = vec![1u8; 8];
        pad_to_copy_alignment(&mut aligned);
        assert_eq!(aligned.len(), 8);
    }
}
