//! # devgui - Developer Overlay for Game Engines
//!
//! A Dear ImGui integration layer for engine hosts: a registry of named
//! debug windows, an input context that borrows the mouse and keyboard from
//! the game when needed, and a per-frame driver that turns the registered
//! windows into draw lists for whatever renderer the host uses.
//!
//! The crate is renderer and platform agnostic. Pair it with
//! `devgui-wgpu` and `devgui-winit` for a standalone host, or feed
//! [`InputEvent`]s and draw data through an engine's own plumbing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dear_imgui_rs::{Context, Ui};
//! use devgui::{OverlaySystem, OverlayWindow};
//!
//! struct FpsPanel;
//!
//! impl OverlayWindow for FpsPanel {
//!     fn name(&self) -> &str {
//!         "fps"
//!     }
//!
//!     fn title(&self) -> &str {
//!         "Framerate"
//!     }
//!
//!     fn draw(&mut self, ui: &Ui) -> bool {
//!         ui.text("60.0 fps");
//!         true
//!     }
//! }
//!
//! let mut ctx = Context::create();
//! let mut system = OverlaySystem::new();
//! devgui::theme::apply_style(&mut ctx);
//! system.register(Box::new(FpsPanel));
//! system.set_visible("fps", true, true);
//!
//! // Once per host frame:
//! if let Some(draw_data) = system.render_frame(&mut ctx, [1920.0, 1080.0]) {
//!     // hand draw_data to the renderer backend
//! }
//! ```

#![deny(rust_2018_idioms)]

mod config;
pub mod console;
mod error;
mod input;
mod settings;
mod system;
pub mod theme;
mod window;

pub use self::config::*;
pub use self::error::*;
pub use self::input::*;
pub use self::settings::*;
pub use self::system::*;
pub use self::window::*;
