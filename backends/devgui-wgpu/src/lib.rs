//! WGPU renderer backend for the devgui overlay.
//!
//! Replays the draw data produced by the overlay's frame driver into a render
//! pass the host engine already has open, so the overlay composites over the
//! scene without owning a swapchain.
//!
//! # Features
//!
//! - **Managed textures**: font atlas pages and user images arrive through
//!   the draw data's create/update/destroy requests
//! - **Gamma correction**: sRGB render targets are detected from the surface
//!   format, with a manual override
//! - **Multi-frame buffering**: one geometry buffer set per frame in flight
//! - **Depth-aware pipeline**: matches a depth attachment without testing
//!   or writing depth
//!
//! # Example
//!
//! ```rust,no_run
//! use dear_imgui_rs::Context;
//! use devgui_wgpu::{RendererConfig, WgpuRenderer};
//!
//! fn setup(device: wgpu::Device, queue: wgpu::Queue, surface_format: wgpu::TextureFormat) {
//!     let mut ctx = Context::create();
//!     let config = RendererConfig::new(device, queue, surface_format);
//!     let mut renderer = WgpuRenderer::new(config, &mut ctx);
//!
//!     // Each frame, after the overlay produced draw data and the host
//!     // began a render pass over its scene:
//!     // renderer.render(draw_data, &mut render_pass)?;
//! }
//! ```

mod error;
mod geometry;
mod renderer;
mod resources;
mod shaders;
mod texture;
mod uniforms;

pub use error::{RendererError, RendererResult};
pub use renderer::{RendererConfig, WgpuRenderer};

/// How the fragment shader gamma-corrects overlay colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GammaMode {
    /// Pick 2.2 or 1.0 from the render target format
    #[default]
    Auto,
    /// No correction
    Linear,
    /// Always apply gamma 2.2
    Gamma22,
}
