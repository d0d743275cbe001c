//! Winit platform backend for the devgui overlay.
//!
//! This crate binds the overlay core to a winit window: it tracks display
//! size and DPI scale, and translates winit input events into the
//! engine-style input events the overlay consumes.
//!
//! # Example
//!
//! ```rust,no_run
//! use dear_imgui_rs::Context;
//! use devgui::OverlaySystem;
//! use devgui_winit::{HiDpiMode, WinitPlatform};
//!
//! let mut ctx = Context::create();
//! let mut system = OverlaySystem::new();
//! let mut platform = WinitPlatform::new(&mut ctx);
//!
//! // In your event loop, after creating the window:
//! //   platform.attach(&window, HiDpiMode::Default, &mut ctx);
//! // For every window event:
//! //   platform.handle_window_event(&mut system, &mut ctx, &window, &event);
//! // Each redraw:
//! //   let metrics = platform.prepare_frame();
//! //   let draw_data = system.render_frame(&mut ctx, metrics.logical_size);
//! ```

mod events;
mod input;
mod platform;
#[cfg(test)]
mod test_util;

pub use platform::{FrameMetrics, HiDpiMode, WinitPlatform};
