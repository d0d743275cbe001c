use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Mutex, OnceLock};

use dear_imgui_rs as imgui;
use devgui::{
    Button, InputEvent, MemorySettingsStore, OverlaySystem, OverlayWindow, PanelFlags,
};

fn test_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(())).lock().unwrap()
}

fn headless_context() -> imgui::Context {
    let mut ctx = imgui::Context::create();
    let _ = ctx.set_ini_filename::<std::path::PathBuf>(None);
    let _ = ctx.font_atlas_mut().build();
    ctx
}

#[derive(Default)]
struct DrawLog {
    draws: u32,
    stay_open: bool,
}

struct CounterPanel {
    name: &'static str,
    log: Rc<RefCell<DrawLog>>,
}

impl CounterPanel {
    fn with_log(name: &'static str) -> (Box<Self>, Rc<RefCell<DrawLog>>) {
        let log = Rc::new(RefCell::new(DrawLog {
            draws: 0,
            stay_open: true,
        }));
        let panel = Box::new(Self {
            name,
            log: Rc::clone(&log),
        });
        (panel, log)
    }
}

impl OverlayWindow for CounterPanel {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.name
    }

    fn flags(&self) -> PanelFlags {
        PanelFlags::AUTO_RESIZE
    }

    fn draw(&mut self, ui: &imgui::Ui) -> bool {
        ui.text("probe");
        let mut log = self.log.borrow_mut();
        log.draws += 1;
        log.stay_open
    }
}

#[test]
fn zero_area_display_skips_the_frame() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    assert!(system.render_frame(&mut ctx, [0.0, 600.0]).is_none());
    assert!(system.render_frame(&mut ctx, [800.0, 0.0]).is_none());
}

#[test]
fn only_visible_windows_are_drawn() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    let (shown, shown_log) = CounterPanel::with_log("shown");
    let (hidden, hidden_log) = CounterPanel::with_log("hidden");
    system.register(shown);
    system.register(hidden);
    system.set_visible("shown", true, false);

    let draw_data = system.render_frame(&mut ctx, [800.0, 600.0]);
    assert!(draw_data.is_some());
    assert_eq!(shown_log.borrow().draws, 1);
    assert_eq!(hidden_log.borrow().draws, 0);
}

#[test]
fn declining_to_stay_open_hides_the_window() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    let (panel, log) = CounterPanel::with_log("transient");
    system.register(panel);
    system.set_visible("transient", true, true);
    assert!(system.wants_input());

    log.borrow_mut().stay_open = false;
    let _ = system.render_frame(&mut ctx, [800.0, 600.0]);
    assert!(!system.is_visible("transient"));

    // The window was still drawn this frame, so the input context lets go
    // on the next one.
    assert!(system.wants_input());
    let _ = system.render_frame(&mut ctx, [800.0, 600.0]);
    assert!(!system.wants_input());
}

#[test]
fn input_context_survives_while_demo_window_is_open() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    system.push_input_context();
    system.show_demo_window();

    let _ = system.render_frame(&mut ctx, [800.0, 600.0]);
    assert!(system.wants_input());
    assert!(system.demo_window_visible());
}

#[test]
fn idle_overlay_releases_the_input_context() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    system.push_input_context();
    assert!(system.wants_input());

    let _ = system.render_frame(&mut ctx, [800.0, 600.0]);
    assert!(!system.wants_input());
}

#[test]
fn events_pass_through_while_inactive() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    let event = InputEvent::CursorMoved { x: 10.0, y: 20.0 };
    assert!(!system.handle_event(&mut ctx, &event));

    system.push_input_context();
    assert!(system.handle_event(&mut ctx, &event));
    assert!(system.handle_event(&mut ctx, &InputEvent::ButtonPressed(Button::F1)));
    assert!(system.handle_event(&mut ctx, &InputEvent::ButtonReleased(Button::F1)));
    assert!(system.handle_event(
        &mut ctx,
        &InputEvent::Wheel {
            horizontal: 0.0,
            vertical: 1.0,
        }
    ));
}

#[test]
fn layout_round_trips_through_a_settings_store() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();
    let mut store = MemorySettingsStore::new();

    system.load_settings(&mut ctx, &mut store);

    let (panel, _log) = CounterPanel::with_log("layout");
    system.register(panel);
    system.set_visible("layout", true, false);
    let _ = system.render_frame(&mut ctx, [800.0, 600.0]);

    system.save_settings(&mut ctx, &mut store);
    assert!(store.contents().is_some());

    // Loading the saved text back is accepted without complaint.
    let mut fresh = OverlaySystem::new();
    fresh.load_settings(&mut ctx, &mut store);
}

#[test]
fn menu_bar_frame_runs_without_windows() {
    let _guard = test_guard();
    let mut ctx = headless_context();
    let mut system = OverlaySystem::new();

    system.set_menu_bar_visible(true);
    system.push_input_context();

    let _ = system.render_frame(&mut ctx, [800.0, 600.0]);
    assert!(system.is_menu_bar_visible());
    assert!(system.wants_input());
}
