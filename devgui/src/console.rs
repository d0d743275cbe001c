//! Console verbs for driving the overlay from the host's command system.
//!
//! The overlay does not own a console; the host registers these verbs with
//! whatever command system it has and routes matching lines to [`dispatch`].
//! `+`/`-` pairs follow the usual bind convention, so `+devgui_input` can sit
//! on a key and release with it.

use tracing::warn;

use crate::system::OverlaySystem;

/// A console verb understood by [`dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleCommand {
    /// `devgui_show <window>`: toggle the named window
    Show,
    /// `devgui_toggle_input`: toggle the overlay input context
    ToggleInput,
    /// `+devgui_input`: grab input
    InputStart,
    /// `-devgui_input`: release input
    InputEnd,
    /// `devgui_toggle_menu`: toggle the menu bar and input
    ToggleMenu,
    /// `+devgui_menu`: open the menu bar and grab input
    MenuStart,
    /// `-devgui_menu`: close the menu bar and release input
    MenuEnd,
    /// `devgui_show_demo`: open the UI library demo window
    ShowDemo,
}

impl ConsoleCommand {
    /// Every verb, in registration order.
    pub const ALL: [ConsoleCommand; 8] = [
        ConsoleCommand::Show,
        ConsoleCommand::ToggleInput,
        ConsoleCommand::InputStart,
        ConsoleCommand::InputEnd,
        ConsoleCommand::ToggleMenu,
        ConsoleCommand::MenuStart,
        ConsoleCommand::MenuEnd,
        ConsoleCommand::ShowDemo,
    ];

    /// The verb as typed in the console.
    pub fn name(self) -> &'static str {
        match self {
            ConsoleCommand::Show => "devgui_show",
            ConsoleCommand::ToggleInput => "devgui_toggle_input",
            ConsoleCommand::InputStart => "+devgui_input",
            ConsoleCommand::InputEnd => "-devgui_input",
            ConsoleCommand::ToggleMenu => "devgui_toggle_menu",
            ConsoleCommand::MenuStart => "+devgui_menu",
            ConsoleCommand::MenuEnd => "-devgui_menu",
            ConsoleCommand::ShowDemo => "devgui_show_demo",
        }
    }

    /// Short description for the host's command listing.
    pub fn help(self) -> &'static str {
        match self {
            ConsoleCommand::Show => "Toggles the named overlay window",
            ConsoleCommand::ToggleInput => "Toggles the mouse cursor for overlay windows",
            ConsoleCommand::InputStart | ConsoleCommand::InputEnd => {
                "Grabs or releases overlay input, same as devgui_toggle_input"
            }
            ConsoleCommand::ToggleMenu => "Toggles the overlay menu bar",
            ConsoleCommand::MenuStart | ConsoleCommand::MenuEnd => {
                "Toggles the menu bar and input"
            }
            ConsoleCommand::ShowDemo => "Shows the UI library demo window",
        }
    }

    /// Look up a verb by its console name.
    pub fn from_name(name: &str) -> Option<ConsoleCommand> {
        ConsoleCommand::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Execute one console line against the overlay.
///
/// The line is the full command as entered, verb first. Unknown verbs return
/// `false` so the host can fall through to its own handling; bad arguments
/// are reported through the log and count as handled.
pub fn dispatch(system: &mut OverlaySystem, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return false;
    };
    let Some(command) = ConsoleCommand::from_name(verb) else {
        return false;
    };

    match command {
        ConsoleCommand::Show => match parts.next() {
            None => warn!("Format: devgui_show <window name>"),
            Some(name) if !system.contains(name) => {
                warn!("Failed to find overlay window called {name}");
            }
            Some(name) => {
                system.toggle(name);
            }
        },
        ConsoleCommand::ToggleInput => {
            if system.wants_input() {
                system.pop_input_context();
            } else {
                system.push_input_context();
            }
        }
        ConsoleCommand::InputStart => system.push_input_context(),
        ConsoleCommand::InputEnd => system.pop_input_context(),
        ConsoleCommand::ToggleMenu => {
            system.toggle_menu_bar();
            if system.is_menu_bar_visible() {
                system.push_input_context();
            } else {
                system.pop_input_context();
            }
        }
        ConsoleCommand::MenuStart => {
            system.set_menu_bar_visible(true);
            system.push_input_context();
        }
        ConsoleCommand::MenuEnd => {
            system.set_menu_bar_visible(false);
            system.pop_input_context();
        }
        ConsoleCommand::ShowDemo => system.show_demo_window(),
    }
    true
}

/// Completion candidates for `devgui_show`.
///
/// Lists every registered window; the host's console is expected to filter
/// against what the user has typed so far.
pub fn complete_show(system: &OverlaySystem) -> Vec<String> {
    system
        .window_names()
        .map(|name| format!("{} {}", ConsoleCommand::Show.name(), name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::OverlayWindow;
    use dear_imgui_rs::Ui;

    struct Stub(&'static str);

    impl OverlayWindow for Stub {
        fn name(&self) -> &str {
            self.0
        }

        fn title(&self) -> &str {
            self.0
        }

        fn draw(&mut self, _ui: &Ui) -> bool {
            true
        }
    }

    #[test]
    fn verbs_round_trip_through_names() {
        for command in ConsoleCommand::ALL {
            assert_eq!(ConsoleCommand::from_name(command.name()), Some(command));
        }
        assert_eq!(ConsoleCommand::from_name("devgui_bogus"), None);
    }

    #[test]
    fn unknown_verbs_fall_through() {
        let mut system = OverlaySystem::new();
        assert!(!dispatch(&mut system, "say hello"));
        assert!(!dispatch(&mut system, ""));
    }

    #[test]
    fn input_verbs_drive_the_context() {
        let mut system = OverlaySystem::new();
        assert!(dispatch(&mut system, "+devgui_input"));
        assert!(system.wants_input());
        assert!(dispatch(&mut system, "-devgui_input"));
        assert!(!system.wants_input());

        assert!(dispatch(&mut system, "devgui_toggle_input"));
        assert!(system.wants_input());
        assert!(dispatch(&mut system, "devgui_toggle_input"));
        assert!(!system.wants_input());
    }

    #[test]
    fn menu_verbs_open_menu_and_grab_input() {
        let mut system = OverlaySystem::new();
        assert!(dispatch(&mut system, "devgui_toggle_menu"));
        assert!(system.is_menu_bar_visible());
        assert!(system.wants_input());

        assert!(dispatch(&mut system, "devgui_toggle_menu"));
        assert!(!system.is_menu_bar_visible());
        assert!(!system.wants_input());

        assert!(dispatch(&mut system, "+devgui_menu"));
        assert!(system.is_menu_bar_visible());
        assert!(dispatch(&mut system, "-devgui_menu"));
        assert!(!system.is_menu_bar_visible());
        assert!(!system.wants_input());
    }

    #[test]
    fn show_without_argument_is_handled_with_a_warning() {
        let mut system = OverlaySystem::new();
        assert!(dispatch(&mut system, "devgui_show"));
    }

    #[test]
    fn show_toggles_the_named_window_without_grabbing_input() {
        let mut system = OverlaySystem::new();
        system.register(Box::new(Stub("entities")));

        assert!(dispatch(&mut system, "devgui_show entities"));
        assert!(system.is_visible("entities"));
        assert!(!system.wants_input());

        assert!(dispatch(&mut system, "devgui_show entities"));
        assert!(!system.is_visible("entities"));

        assert!(dispatch(&mut system, "devgui_show missing"));
        assert!(!system.is_visible("missing"));
    }

    #[test]
    fn completion_lists_a_line_per_window() {
        let mut system = OverlaySystem::new();
        system.register(Box::new(Stub("perf")));
        system.register(Box::new(Stub("entities")));

        let lines = complete_show(&system);
        assert_eq!(lines, ["devgui_show entities", "devgui_show perf"]);
    }
}
