//! The overlay system: window registry, input context and frame driver.

use std::collections::BTreeMap;
use std::time::Instant;

use dear_imgui_rs::{Context, Ui, render::DrawData};
use tracing::{debug, warn};

use crate::config::OverlayConfig;
use crate::input::{self, InputEvent};
use crate::settings::SettingsStore;
use crate::window::OverlayWindow;

struct PanelEntry {
    window: Box<dyn OverlayWindow>,
    visible: bool,
}

impl PanelEntry {
    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.window.on_visibility_changed(visible);
        }
    }
}

/// Owns the registered overlay windows and drives them through one UI frame
/// per host frame.
///
/// The input context is a single flag, not a refcount: any number of push
/// requests are satisfied by one grab, and the first pop releases it. While
/// the flag is set the host should route its input through
/// [`handle_event`](OverlaySystem::handle_event) and show the OS cursor.
pub struct OverlaySystem {
    windows: BTreeMap<String, PanelEntry>,
    config: OverlayConfig,
    input_active: bool,
    menu_bar: bool,
    demo: bool,
    metrics: bool,
    last_frame: Option<Instant>,
}

impl Default for OverlaySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySystem {
    pub fn new() -> Self {
        Self::with_config(OverlayConfig::default())
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        Self {
            windows: BTreeMap::new(),
            menu_bar: config.menu_bar,
            demo: config.demo_window,
            config,
            input_active: false,
            metrics: false,
            last_frame: None,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Live-tunable settings; scale changes apply on the next frame.
    pub fn config_mut(&mut self) -> &mut OverlayConfig {
        &mut self.config
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    /// Register a window under its internal name.
    ///
    /// Names are unique; a second window with the same name is rejected and
    /// the registry keeps the first.
    pub fn register(&mut self, window: Box<dyn OverlayWindow>) -> bool {
        let name = window.name().to_owned();
        if self.windows.contains_key(&name) {
            warn!("Overlay window {name} is already registered");
            return false;
        }
        debug!("Registered overlay window {name}");
        self.windows.insert(name, PanelEntry {
            window,
            visible: false,
        });
        true
    }

    /// Register a batch of windows, typically at host startup.
    pub fn register_all(&mut self, windows: impl IntoIterator<Item = Box<dyn OverlayWindow>>) {
        for window in windows {
            self.register(window);
        }
    }

    /// Remove a window, returning it to the caller.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn OverlayWindow>> {
        let entry = self.windows.remove(name);
        if entry.is_none() {
            warn!("Cannot unregister unknown overlay window {name}");
        }
        entry.map(|e| e.window)
    }

    /// Remove every window, usually on host shutdown.
    pub fn unregister_all(&mut self) {
        self.windows.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.windows.contains_key(name)
    }

    /// Internal names of all registered windows, in sorted order.
    pub fn window_names(&self) -> impl Iterator<Item = &str> {
        self.windows.keys().map(String::as_str)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Whether the named window is currently shown. Unknown names read as
    /// hidden.
    pub fn is_visible(&self, name: &str) -> bool {
        self.windows.get(name).is_some_and(|e| e.visible)
    }

    /// Show or hide a window, optionally moving the input context with it.
    ///
    /// With `grab_input`, showing pushes the input context and hiding pops
    /// it. Returns `false` if no window has that name.
    pub fn set_visible(&mut self, name: &str, visible: bool, grab_input: bool) -> bool {
        let Some(entry) = self.windows.get_mut(name) else {
            warn!("No overlay window called {name}");
            return false;
        };
        entry.set_visible(visible);
        if visible && grab_input {
            self.push_input_context();
        } else if !visible && grab_input {
            self.pop_input_context();
        }
        true
    }

    /// Flip a window's visibility without touching the input context.
    ///
    /// Returns `false` if no window has that name.
    pub fn toggle(&mut self, name: &str) -> bool {
        let Some(entry) = self.windows.get_mut(name) else {
            warn!("No overlay window called {name}");
            return false;
        };
        entry.set_visible(!entry.visible);
        true
    }

    // ------------------------------------------------------------------
    // Input context
    // ------------------------------------------------------------------

    /// Grab host input for the overlay. No-op while already grabbed.
    pub fn push_input_context(&mut self) {
        if self.input_active {
            return;
        }
        debug!("Overlay input context enabled");
        self.input_active = true;
    }

    /// Release host input. No-op while not grabbed.
    pub fn pop_input_context(&mut self) {
        if !self.input_active {
            return;
        }
        debug!("Overlay input context disabled");
        self.input_active = false;
    }

    /// True while the overlay holds the input context in any capacity.
    pub fn wants_input(&self) -> bool {
        self.input_active
    }

    /// Feed one host input event to the UI.
    ///
    /// Returns `true` when the overlay consumed the event, which is the case
    /// for every event that arrives while the input context is active. When
    /// inactive nothing is forwarded and the host handles the event itself.
    pub fn handle_event(&mut self, ctx: &mut Context, event: &InputEvent) -> bool {
        if !self.input_active {
            return false;
        }
        input::forward_event(ctx.io_mut(), event);
        true
    }

    // ------------------------------------------------------------------
    // Menu bar and built-in debug windows
    // ------------------------------------------------------------------

    pub fn is_menu_bar_visible(&self) -> bool {
        self.menu_bar
    }

    pub fn set_menu_bar_visible(&mut self, visible: bool) {
        self.menu_bar = visible;
    }

    pub fn toggle_menu_bar(&mut self) {
        self.menu_bar = !self.menu_bar;
    }

    /// Open the UI library's demo window.
    pub fn show_demo_window(&mut self) {
        self.demo = true;
    }

    pub fn demo_window_visible(&self) -> bool {
        self.demo
    }

    pub fn metrics_window_visible(&self) -> bool {
        self.metrics
    }

    // ------------------------------------------------------------------
    // Frame driver
    // ------------------------------------------------------------------

    /// Run one overlay frame and hand back the draw lists for rendering.
    ///
    /// Skips the frame entirely when the display has no area, for example
    /// while the host window is minimized. After everything is drawn, the
    /// input context auto-releases if no window, menu bar or debug window is
    /// left on screen, so a dismissed overlay never strands the cursor grab.
    pub fn render_frame<'ctx>(
        &mut self,
        ctx: &'ctx mut Context,
        display_size: [f32; 2],
    ) -> Option<&'ctx DrawData> {
        let [width, height] = display_size;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(1.0 / 60.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);

        {
            let io = ctx.io_mut();
            io.set_display_size(display_size);
            let scale = self.config.display_scale;
            io.set_display_framebuffer_scale([scale, scale]);
            io.set_delta_time(delta.max(f32::EPSILON));
        }
        ctx.style_mut().set_font_scale_main(self.config.font_scale);

        let ui = &*ctx.frame();

        if self.menu_bar {
            self.draw_menu_bar(ui);
        }
        if self.demo {
            ui.show_demo_window(&mut self.demo);
        }
        if self.metrics {
            ui.show_metrics_window(&mut self.metrics);
        }

        let mut drawn = false;
        for entry in self.windows.values_mut() {
            if !entry.visible {
                continue;
            }
            drawn = true;
            let window = &mut entry.window;
            let stay_open = ui
                .window(window.title().to_owned())
                .flags(window.flags().to_window_flags())
                .build(|| window.draw(ui))
                .unwrap_or(true);
            if !stay_open {
                entry.set_visible(false);
            }
        }

        let draw_data = ctx.render();

        if !drawn && !self.demo && !self.metrics && !self.menu_bar {
            self.pop_input_context();
        }
        Some(draw_data)
    }

    fn draw_menu_bar(&mut self, ui: &Ui) {
        let Some(_token) = ui.begin_main_menu_bar() else {
            return;
        };

        ui.menu("File", || {
            if ui.menu_item("Close Menu") {
                self.menu_bar = false;
                self.pop_input_context();
            }
        });

        ui.menu("Windows", || {
            for entry in self.windows.values_mut() {
                let mut visible = entry.visible;
                if ui.menu_item_toggle(entry.window.title(), None::<&str>, &mut visible, true) {
                    entry.set_visible(visible);
                }
            }
        });

        ui.menu("Debug", || {
            ui.menu_item_toggle("Show Demo Window", None::<&str>, &mut self.demo, true);
            ui.menu_item_toggle("Show Metrics Window", None::<&str>, &mut self.metrics, true);
        });
    }

    // ------------------------------------------------------------------
    // Layout persistence
    // ------------------------------------------------------------------

    /// Restore the saved window layout and take over persistence.
    ///
    /// Disables the UI library's own file handling; from here on layout text
    /// moves only through the store.
    pub fn load_settings(&mut self, ctx: &mut Context, store: &mut dyn SettingsStore) {
        let _ = ctx.set_ini_filename(None::<String>);
        match store.load() {
            Ok(Some(data)) => ctx.load_ini_settings(&data),
            Ok(None) => {}
            Err(err) => warn!("Failed to load overlay layout: {err}"),
        }
    }

    /// Write the current window layout to the store.
    pub fn save_settings(&mut self, ctx: &mut Context, store: &mut dyn SettingsStore) {
        let mut data = String::new();
        ctx.save_ini_settings(&mut data);
        if let Err(err) = store.save(&data) {
            warn!("Failed to save overlay layout: {err}");
        }
    }

    /// Save only when the UI marked the layout dirty. Serializing clears the
    /// mark, so calling this every frame writes at most once per change.
    pub fn save_settings_if_dirty(
        &mut self,
        ctx: &mut Context,
        store: &mut dyn SettingsStore,
    ) -> bool {
        if !ctx.io_mut().want_save_ini_settings() {
            return false;
        }
        self.save_settings(ctx, store);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::PanelFlags;

    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        name: &'static str,
        title: &'static str,
        changes: Rc<RefCell<Vec<bool>>>,
    }

    impl Probe {
        fn boxed(name: &'static str, title: &'static str) -> Box<Self> {
            Box::new(Self {
                name,
                title,
                changes: Rc::default(),
            })
        }

        fn boxed_with_log(
            name: &'static str,
            title: &'static str,
        ) -> (Box<Self>, Rc<RefCell<Vec<bool>>>) {
            let changes = Rc::new(RefCell::new(Vec::new()));
            let probe = Box::new(Self {
                name,
                title,
                changes: Rc::clone(&changes),
            });
            (probe, changes)
        }
    }

    impl OverlayWindow for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn title(&self) -> &str {
            self.title
        }

        fn flags(&self) -> PanelFlags {
            PanelFlags::NO_COLLAPSE
        }

        fn draw(&mut self, _ui: &Ui) -> bool {
            true
        }

        fn on_visibility_changed(&mut self, visible: bool) {
            self.changes.borrow_mut().push(visible);
        }
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let mut system = OverlaySystem::new();
        assert!(system.register(Probe::boxed("entities", "Entity Browser")));
        assert!(!system.register(Probe::boxed("entities", "Impostor")));
        assert_eq!(system.window_count(), 1);
    }

    #[test]
    fn window_names_are_sorted() {
        let mut system = OverlaySystem::new();
        system.register(Probe::boxed("sound", "Sound Debug"));
        system.register(Probe::boxed("entities", "Entity Browser"));
        system.register(Probe::boxed("net", "Net Graph"));
        let names: Vec<&str> = system.window_names().collect();
        assert_eq!(names, ["entities", "net", "sound"]);
    }

    #[test]
    fn unregister_returns_the_window() {
        let mut system = OverlaySystem::new();
        system.register(Probe::boxed("entities", "Entity Browser"));
        let window = system.unregister("entities").unwrap();
        assert_eq!(window.name(), "entities");
        assert!(!system.contains("entities"));
        assert!(system.unregister("entities").is_none());
    }

    #[test]
    fn set_visible_with_grab_moves_the_input_context() {
        let mut system = OverlaySystem::new();
        system.register(Probe::boxed("entities", "Entity Browser"));

        system.set_visible("entities", true, true);
        assert!(system.is_visible("entities"));
        assert!(system.wants_input());

        system.set_visible("entities", false, true);
        assert!(!system.is_visible("entities"));
        assert!(!system.wants_input());
    }

    #[test]
    fn set_visible_without_grab_leaves_input_alone() {
        let mut system = OverlaySystem::new();
        system.register(Probe::boxed("entities", "Entity Browser"));

        system.set_visible("entities", true, false);
        assert!(system.is_visible("entities"));
        assert!(!system.wants_input());
    }

    #[test]
    fn push_while_active_and_pop_while_inactive_are_no_ops() {
        let mut system = OverlaySystem::new();

        system.pop_input_context();
        assert!(!system.wants_input());

        system.push_input_context();
        system.push_input_context();
        assert!(system.wants_input());

        system.pop_input_context();
        assert!(!system.wants_input());
        system.pop_input_context();
        assert!(!system.wants_input());
    }

    #[test]
    fn toggle_flips_visibility_and_notifies() {
        let mut system = OverlaySystem::new();
        system.register(Probe::boxed("entities", "Entity Browser"));

        assert!(system.toggle("entities"));
        assert!(system.is_visible("entities"));
        assert!(!system.wants_input());

        assert!(system.toggle("entities"));
        assert!(!system.is_visible("entities"));

        assert!(!system.toggle("missing"));
    }

    #[test]
    fn visibility_callback_fires_only_on_change() {
        let mut system = OverlaySystem::new();
        let (probe, changes) = Probe::boxed_with_log("entities", "Entity Browser");
        system.register(probe);

        system.set_visible("entities", true, false);
        system.set_visible("entities", true, false);
        system.set_visible("entities", false, false);

        assert_eq!(*changes.borrow(), [true, false]);
    }

    #[test]
    fn unknown_names_read_as_hidden() {
        let system = OverlaySystem::new();
        assert!(!system.is_visible("missing"));
        assert!(!system.contains("missing"));
    }

    #[test]
    fn demo_window_opens_on_request() {
        let mut system = OverlaySystem::new();
        assert!(!system.demo_window_visible());
        system.show_demo_window();
        assert!(system.demo_window_visible());
    }

    #[test]
    fn config_menu_bar_applies_at_startup() {
        let config = OverlayConfig {
            menu_bar: true,
            demo_window: true,
            ..OverlayConfig::default()
        };
        let system = OverlaySystem::with_config(config);
        assert!(system.is_menu_bar_visible());
        assert!(system.demo_window_visible());
    }
}
