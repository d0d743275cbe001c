//! Interactive overlay demo with two engine-style panels.
//!
//! Hotkeys are routed through the console verbs, the same path a game
//! console would use:
//!
//! | Key | Console line          |
//! |-----|-----------------------|
//! | F1  | `devgui_toggle_menu`  |
//! | F2  | `devgui_show entities`|
//! | F3  | `devgui_show perf`    |
//! | F4  | `devgui_show_demo`    |
//! | F5  | `devgui_toggle_input` |

use std::path::PathBuf;
use std::time::Instant;

use dear_imgui_rs::{ClipboardBackend, Ui};
use devgui::{OverlayWindow, PanelFlags, console, theme};
use devgui_app::{AppConfig, OverlayApp};
use winit::event::WindowEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

fn main() -> Result<(), devgui_app::AppError> {
    init_logging();

    let config = AppConfig {
        window_title: format!("devgui demo {}", env!("CARGO_PKG_VERSION")),
        settings_path: Some(PathBuf::from("devgui-demo.ini")),
        ..AppConfig::default()
    };

    OverlayApp::new(config)
        .on_setup(|system, ctx| {
            theme::apply_style(ctx);
            ctx.set_clipboard_backend(LocalClipboard::default());
            system.register_all([
                Box::new(EntityPanel::new()) as Box<dyn OverlayWindow>,
                Box::new(PerfPanel::new()),
            ]);
            // Open the menu at startup so the hotkeys are discoverable.
            console::dispatch(system, "devgui_toggle_menu");
        })
        .on_window_event(|event, system| {
            if let Some(line) = hotkey_line(event) {
                console::dispatch(system, line);
            }
        })
        .run()
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "devgui=debug,devgui_winit=info,devgui_wgpu=info,warn".into());
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Map a pressed key to the console line it triggers.
fn hotkey_line(event: &WindowEvent) -> Option<&'static str> {
    let WindowEvent::KeyboardInput { event, .. } = event else {
        return None;
    };
    if !event.state.is_pressed() || event.repeat {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    match code {
        KeyCode::F1 => Some("devgui_toggle_menu"),
        KeyCode::F2 => Some("devgui_show entities"),
        KeyCode::F3 => Some("devgui_show perf"),
        KeyCode::F4 => Some("devgui_show_demo"),
        KeyCode::F5 => Some("devgui_toggle_input"),
        _ => None,
    }
}

/// Process-local clipboard so text fields can copy and paste without a
/// platform integration.
#[derive(Default)]
struct LocalClipboard {
    text: String,
}

impl ClipboardBackend for LocalClipboard {
    fn get(&mut self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }

    fn set(&mut self, value: &str) {
        self.text = value.to_owned();
    }
}

struct Entity {
    name: &'static str,
    class: &'static str,
    health: f32,
    dormant: bool,
}

/// Fake scene inspector in the shape an engine would register one.
struct EntityPanel {
    entities: Vec<Entity>,
    selected: Option<usize>,
    show_dormant: bool,
}

impl EntityPanel {
    fn new() -> Self {
        let entity = |name, class, health, dormant| Entity {
            name,
            class,
            health,
            dormant,
        };
        Self {
            entities: vec![
                entity("player", "Pawn", 100.0, false),
                entity("camera_rig", "Camera", 100.0, false),
                entity("turret_07", "Turret", 62.5, false),
                entity("spawner_a", "Spawner", 100.0, true),
                entity("nav_probe", "Probe", 18.0, false),
                entity("skybox", "StaticMesh", 100.0, true),
            ],
            selected: None,
            show_dormant: false,
        }
    }
}

impl OverlayWindow for EntityPanel {
    fn name(&self) -> &str {
        "entities"
    }

    fn title(&self) -> &str {
        "Entity Browser"
    }

    fn flags(&self) -> PanelFlags {
        PanelFlags::NO_COLLAPSE
    }

    fn draw(&mut self, ui: &Ui) -> bool {
        ui.checkbox("Show dormant", &mut self.show_dormant);
        ui.separator();

        for (index, entity) in self.entities.iter().enumerate() {
            if entity.dormant && !self.show_dormant {
                continue;
            }
            let marker = if self.selected == Some(index) { ">" } else { " " };
            if ui.selectable(format!("{marker} {} [{}]", entity.name, entity.class)) {
                self.selected = Some(index);
            }
        }

        ui.separator();
        match self.selected.and_then(|i| self.entities.get_mut(i)) {
            Some(entity) => {
                ui.label_text("name", entity.name);
                ui.label_text("class", entity.class);
                ui.slider_f32("health", &mut entity.health, 0.0, 100.0);
                ui.checkbox("dormant", &mut entity.dormant);
            }
            None => ui.text_disabled("No entity selected"),
        }
        true
    }
}

const HISTORY: usize = 120;

/// Frame time plot fed by the demo's own redraw cadence.
struct PerfPanel {
    samples: [f32; HISTORY],
    cursor: usize,
    filled: usize,
    last: Option<Instant>,
    paused: bool,
}

impl PerfPanel {
    fn new() -> Self {
        Self {
            samples: [0.0; HISTORY],
            cursor: 0,
            filled: 0,
            last: None,
            paused: false,
        }
    }

    fn reset(&mut self) {
        self.samples = [0.0; HISTORY];
        self.cursor = 0;
        self.filled = 0;
        self.last = None;
    }
}

impl OverlayWindow for PerfPanel {
    fn name(&self) -> &str {
        "perf"
    }

    fn title(&self) -> &str {
        "Performance"
    }

    fn flags(&self) -> PanelFlags {
        PanelFlags::NO_COLLAPSE | PanelFlags::AUTO_RESIZE
    }

    fn draw(&mut self, ui: &Ui) -> bool {
        let now = Instant::now();
        if self.paused {
            self.last = None;
        } else {
            if let Some(last) = self.last {
                let millis = now.duration_since(last).as_secs_f32() * 1000.0;
                self.samples[self.cursor] = millis;
                self.cursor = (self.cursor + 1) % HISTORY;
                self.filled = (self.filled + 1).min(HISTORY);
            }
            self.last = Some(now);
        }

        let window = &self.samples[..self.filled];
        let average = if window.is_empty() {
            0.0
        } else {
            window.iter().sum::<f32>() / window.len() as f32
        };
        // Until the ring wraps, index 0 is already the oldest sample.
        let offset = if self.filled < HISTORY {
            0
        } else {
            self.cursor as i32
        };

        ui.plot_lines_config("frame time", window)
            .values_offset(offset)
            .scale_min(0.0)
            .graph_size([260.0, 60.0])
            .overlay_text(format!("{average:.2} ms"))
            .build();

        let budget = (average / 33.3).clamp(0.0, 1.0);
        ui.progress_bar(budget)
            .size([260.0, 0.0])
            .overlay_text(format!("{:.0}% of a 30 FPS frame", budget * 100.0))
            .build();

        ui.checkbox("Pause", &mut self.paused);
        ui.same_line();
        if ui.button("Reset") {
            self.reset();
        }
        true
    }

    fn on_visibility_changed(&mut self, visible: bool) {
        // Drop the stale timestamp so the first visible frame is not
        // recorded as the whole time the panel spent hidden.
        if visible {
            self.last = None;
        }
    }
}
