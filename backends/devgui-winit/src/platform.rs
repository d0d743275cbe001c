//! The platform layer: display metrics, DPI handling and event routing.

use dear_imgui_rs::Context;
use devgui::{InputEvent, OverlaySystem};
use tracing::debug;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::events;

/// DPI scaling mode for the platform
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum HiDpiMode {
    /// Use the winit scale factor as reported
    #[default]
    Default,
    /// Use a custom scale factor
    Locked(f64),
    /// Round the scale factor to the nearest integer
    Rounded,
}

impl HiDpiMode {
    fn apply(self, window_scale: f64) -> f64 {
        match self {
            HiDpiMode::Default => window_scale,
            HiDpiMode::Locked(factor) => factor,
            HiDpiMode::Rounded => window_scale.round(),
        }
    }
}

/// Display metrics snapshot consumed by the overlay frame driver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameMetrics {
    /// Display size in logical units
    pub logical_size: [f32; 2],
    /// Scale from logical units to physical pixels
    pub scale_factor: f32,
}

/// Platform backend binding the overlay to a winit window.
///
/// Tracks the window's logical size and DPI scale across resize events and
/// translates window events into the overlay's input events.
pub struct WinitPlatform {
    hidpi_mode: HiDpiMode,
    hidpi_factor: f64,
    logical_size: [f32; 2],
}

impl WinitPlatform {
    /// Create a new winit platform backend
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dear_imgui_rs::Context;
    /// use devgui_winit::WinitPlatform;
    ///
    /// let mut ctx = Context::create();
    /// let mut platform = WinitPlatform::new(&mut ctx);
    /// ```
    pub fn new(ctx: &mut Context) -> Self {
        let _ = ctx.set_platform_name(Some(format!(
            "devgui-winit {}",
            env!("CARGO_PKG_VERSION")
        )));

        Self {
            hidpi_mode: HiDpiMode::default(),
            hidpi_factor: 1.0,
            logical_size: [0.0, 0.0],
        }
    }

    /// Get the current DPI scaling factor
    pub fn hidpi_factor(&self) -> f64 {
        self.hidpi_factor
    }

    /// Attach the platform to a window.
    ///
    /// Seeds the display size and framebuffer scale so the first frame is
    /// laid out correctly.
    pub fn attach(&mut self, window: &Window, hidpi_mode: HiDpiMode, ctx: &mut Context) {
        self.hidpi_mode = hidpi_mode;
        self.hidpi_factor = hidpi_mode.apply(window.scale_factor());
        self.update_logical_size(window);
        debug!(
            "Attached overlay platform: {}x{} logical at scale {}",
            self.logical_size[0], self.logical_size[1], self.hidpi_factor
        );

        let io = ctx.io_mut();
        io.set_display_size(self.logical_size);
        io.set_display_framebuffer_scale([self.hidpi_factor as f32, self.hidpi_factor as f32]);
    }

    /// Display metrics for the frame about to be drawn.
    pub fn prepare_frame(&self) -> FrameMetrics {
        FrameMetrics {
            logical_size: self.logical_size,
            scale_factor: self.hidpi_factor as f32,
        }
    }

    /// Handle a winit window event.
    ///
    /// Size and scale changes update the stored metrics; input events are
    /// translated and routed through
    /// [`OverlaySystem::handle_event`](devgui::OverlaySystem::handle_event).
    /// Returns `true` when the overlay consumed the event.
    pub fn handle_window_event(
        &mut self,
        system: &mut OverlaySystem,
        ctx: &mut Context,
        window: &Window,
        event: &WindowEvent,
    ) -> bool {
        match event {
            WindowEvent::Resized(_) => {
                self.update_logical_size(window);
                false
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.hidpi_factor = self.hidpi_mode.apply(*scale_factor);
                self.update_logical_size(window);
                debug!("Overlay display scale changed to {}", self.hidpi_factor);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let mut consumed = false;
                events::keyboard_events(event, |input| {
                    consumed |= system.handle_event(ctx, &input);
                });
                consumed
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position =
                    self.scale_pos_from_winit(window, position.to_logical(window.scale_factor()));
                system.handle_event(ctx, &InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::CursorLeft { .. } => {
                // Park the pointer far off-screen so hover state clears
                system.handle_event(ctx, &InputEvent::CursorMoved {
                    x: -f32::MAX,
                    y: -f32::MAX,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match events::mouse_button_event(*button, *state) {
                    Some(input) => system.handle_event(ctx, &input),
                    None => false,
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                system.handle_event(ctx, &events::wheel_event(*delta))
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let mut consumed = false;
                for input in events::modifier_events(modifiers.state()) {
                    consumed |= system.handle_event(ctx, &input);
                }
                consumed
            }
            _ => false,
        }
    }

    /// Scale a logical size from winit to our active DPI mode
    pub fn scale_size_from_winit(
        &self,
        window: &Window,
        logical_size: LogicalSize<f64>,
    ) -> LogicalSize<f64> {
        match self.hidpi_mode {
            HiDpiMode::Default => logical_size,
            _ => logical_size
                .to_physical::<f64>(window.scale_factor())
                .to_logical(self.hidpi_factor),
        }
    }

    /// Scale a logical position from winit to our active DPI mode
    pub fn scale_pos_from_winit(
        &self,
        window: &Window,
        logical_pos: LogicalPosition<f64>,
    ) -> LogicalPosition<f64> {
        match self.hidpi_mode {
            HiDpiMode::Default => logical_pos,
            _ => logical_pos
                .to_physical::<f64>(window.scale_factor())
                .to_logical(self.hidpi_factor),
        }
    }

    fn update_logical_size(&mut self, window: &Window) {
        let logical = self.scale_size_from_winit(
            window,
            window.inner_size().to_logical(window.scale_factor()),
        );
        self.logical_size = [logical.width as f32, logical.height as f32];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidpi_mode_default() {
        assert_eq!(HiDpiMode::default(), HiDpiMode::Default);
    }

    #[test]
    fn test_hidpi_mode_factors() {
        assert_eq!(HiDpiMode::Default.apply(1.5), 1.5);
        assert_eq!(HiDpiMode::Locked(2.0).apply(1.5), 2.0);
        assert_eq!(HiDpiMode::Rounded.apply(1.5), 2.0);
        assert_eq!(HiDpiMode::Rounded.apply(1.25), 1.0);
    }

    #[test]
    fn test_platform_creation() {
        let _guard = crate::test_util::test_sync::lock_context();
        let mut ctx = Context::create();
        let platform = WinitPlatform::new(&mut ctx);

        assert_eq!(platform.hidpi_mode, HiDpiMode::Default);
        assert_eq!(platform.hidpi_factor(), 1.0);
        assert_eq!(platform.logical_size, [0.0, 0.0]);
    }

    #[test]
    fn test_frame_metrics_snapshot() {
        let _guard = crate::test_util::test_sync::lock_context();
        let mut ctx = Context::create();
        let mut platform = WinitPlatform::new(&mut ctx);
        platform.logical_size = [1280.0, 720.0];
        platform.hidpi_factor = 2.0;

        let metrics = platform.prepare_frame();
        assert_eq!(metrics.logical_size, [1280.0, 720.0]);
        assert_eq!(metrics.scale_factor, 2.0);
    }
}
