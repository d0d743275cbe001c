//! Standalone Winit + WGPU runner for the devgui overlay.
//!
//! Engines normally embed [`devgui`] into their own window and render loop.
//! This crate is for everything that has no loop to embed into: overlay
//! development, panel prototyping and the demo binary. It opens a window,
//! drives [`OverlaySystem`] every frame and renders the result with
//! [`devgui_wgpu::WgpuRenderer`] on a cleared surface.
//!
//! # Quick start
//!
//! ```no_run
//! use devgui::theme;
//! use devgui_app::{AppConfig, OverlayApp};
//!
//! fn main() -> Result<(), devgui_app::AppError> {
//!     OverlayApp::new(AppConfig::default())
//!         .on_setup(|system, ctx| {
//!             theme::apply_style(ctx);
//!             system.set_menu_bar_visible(true);
//!             system.push_input_context();
//!         })
//!         .run()
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use dear_imgui_rs::Context;
use devgui::{FileSettingsStore, OverlayConfig, OverlaySystem};
use devgui_wgpu::{RendererConfig, WgpuRenderer};
use devgui_winit::{HiDpiMode, WinitPlatform};
use pollster::block_on;
use thiserror::Error;
use tracing::{error, info};
use wgpu::SurfaceError;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Errors surfaced by the runner.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Renderer error: {0}")]
    Renderer(#[from] devgui_wgpu::RendererError),

    #[error("Setup failed: {0}")]
    Setup(String),
}

/// Window and surface settings for [`OverlayApp`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    /// Logical window size at startup.
    pub window_size: (f64, f64),
    pub present_mode: wgpu::PresentMode,
    /// Background color behind the overlay, linear RGBA.
    pub clear_color: [f32; 4],
    /// Overlay settings handed to [`OverlaySystem`] at startup.
    pub overlay: OverlayConfig,
    /// Layout persistence path. `None` keeps the layout in memory for the
    /// lifetime of the process.
    pub settings_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: format!("devgui {}", env!("CARGO_PKG_VERSION")),
            window_size: (1280.0, 720.0),
            present_mode: wgpu::PresentMode::Fifo,
            clear_color: [0.12, 0.14, 0.17, 1.0],
            overlay: OverlayConfig::default(),
            settings_path: None,
        }
    }
}

type SetupFn = Box<dyn FnOnce(&mut OverlaySystem, &mut Context)>;
type EventFn = Box<dyn FnMut(&WindowEvent, &mut OverlaySystem)>;

/// Overlay runner owning the window, the GPU surface and the overlay stack.
///
/// Construct with [`OverlayApp::new`], register panels and hotkeys through
/// the `on_*` builders, then call [`OverlayApp::run`]. The run loop polls
/// continuously and redraws every frame, which matches how the overlay
/// behaves inside a game loop.
pub struct OverlayApp {
    config: AppConfig,
    setup: Option<SetupFn>,
    on_event: Option<EventFn>,
    state: Option<AppState>,
}

impl OverlayApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            setup: None,
            on_event: None,
            state: None,
        }
    }

    /// Run once after the GPU and overlay are initialized. Register windows,
    /// apply the theme and install a clipboard backend here.
    pub fn on_setup<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut OverlaySystem, &mut Context) + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Observe raw window events before the overlay sees them. Hotkey chords
    /// live here so they keep working while the overlay captures input.
    pub fn on_window_event<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&WindowEvent, &mut OverlaySystem) + 'static,
    {
        self.on_event = Some(Box::new(hook));
        self
    }

    /// Run the event loop until the window is closed.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        info!("Starting overlay runner");
        event_loop.run_app(&mut self)?;
        Ok(())
    }
}

impl ApplicationHandler for OverlayApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let setup = self.setup.take();
        match AppState::new(event_loop, &self.config, setup) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                error!("Failed to initialize the overlay window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if let Some(hook) = self.on_event.as_mut() {
            hook(&event, &mut state.system);
        }
        state
            .platform
            .handle_window_event(&mut state.system, &mut state.ctx, &state.window, &event);

        match event {
            WindowEvent::Resized(physical_size) => state.resize(physical_size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = state.window.inner_size();
                state.resize(size);
            }
            WindowEvent::CloseRequested => {
                state.save_settings();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = state.render_frame() {
                    error!("Overlay frame failed: {err}");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.window.request_redraw();
        }
    }
}

struct AppState {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_desc: wgpu::SurfaceConfiguration,
    ctx: Context,
    system: OverlaySystem,
    platform: WinitPlatform,
    renderer: WgpuRenderer,
    settings: Option<FileSettingsStore>,
    clear_color: wgpu::Color,
}

impl AppState {
    fn new(
        event_loop: &ActiveEventLoop,
        config: &AppConfig,
        setup: Option<SetupFn>,
    ) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let size = LogicalSize::new(config.window_size.0, config.window_size.1);
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(config.window_title.clone())
                        .with_inner_size(size),
                )
                .map_err(|e| AppError::Setup(format!("window creation failed: {e}")))?,
        );

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| AppError::Setup(format!("surface creation failed: {e}")))?;

        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| AppError::Setup(format!("no suitable GPU adapter: {e}")))?;

        let (device, queue) = block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
            .map_err(|e| AppError::Setup(format!("device request failed: {e}")))?;

        let physical_size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        // Overlay colors are authored for an sRGB target.
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        let format = preferred
            .iter()
            .copied()
            .find(|f| caps.formats.contains(f))
            .unwrap_or(caps.formats[0]);
        info!("Surface format: {format:?}");

        let surface_desc = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: physical_size.width,
            height: physical_size.height,
            present_mode: config.present_mode,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_desc);

        let mut ctx = Context::create();
        let mut system = OverlaySystem::with_config(config.overlay.clone());

        let mut settings = config.settings_path.clone().map(FileSettingsStore::new);
        match settings.as_mut() {
            Some(store) => system.load_settings(&mut ctx, store),
            // Without a store, keep ImGui from writing imgui.ini on its own.
            None => {
                let _ = ctx.set_ini_filename(None::<String>);
            }
        }

        let mut platform = WinitPlatform::new(&mut ctx);
        platform.attach(&window, HiDpiMode::Default, &mut ctx);

        let renderer_config =
            RendererConfig::new(device.clone(), queue.clone(), surface_desc.format);
        let renderer = WgpuRenderer::new(renderer_config, &mut ctx);

        if let Some(setup) = setup {
            setup(&mut system, &mut ctx);
        }

        Ok(Self {
            window,
            device,
            queue,
            surface,
            surface_desc,
            ctx,
            system,
            platform,
            renderer,
            settings,
            clear_color: wgpu::Color {
                r: f64::from(config.clear_color[0]),
                g: f64::from(config.clear_color[1]),
                b: f64::from(config.clear_color[2]),
                a: f64::from(config.clear_color[3]),
            },
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.surface_desc.width = new_size.width;
        self.surface_desc.height = new_size.height;
        self.surface.configure(&self.device, &self.surface_desc);
    }

    fn render_frame(&mut self) -> Result<(), AppError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_desc);
                return Ok(());
            }
            Err(SurfaceError::Timeout) => return Ok(()),
            Err(err) => return Err(AppError::from(err)),
        };

        let metrics = self.platform.prepare_frame();
        // Monitor scale changes reach the overlay as a live config edit.
        self.system.config_mut().display_scale = metrics.scale_factor;

        let draw_data = self.system.render_frame(&mut self.ctx, metrics.logical_size);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("devgui command encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("devgui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(draw_data) = draw_data {
                self.renderer.render(draw_data, &mut render_pass)?;
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();

        if let Some(store) = self.settings.as_mut() {
            self.system.save_settings_if_dirty(&mut self.ctx, store);
        }
        Ok(())
    }

    fn save_settings(&mut self) {
        if let Some(store) = self.settings.as_mut() {
            self.system.save_settings(&mut self.ctx, store);
        }
    }
}
