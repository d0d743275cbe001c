//! Overlay window trait and presentation flags.
//!
//! Tools implement [`OverlayWindow`] and register themselves with an
//! [`OverlaySystem`](crate::OverlaySystem). The system owns visibility and
//! drives [`OverlayWindow::draw`] once per frame for every visible window.

use bitflags::bitflags;
use dear_imgui_rs::{Ui, WindowFlags};

bitflags! {
    /// Presentation flags a window reports through [`OverlayWindow::flags`]
    ///
    /// These are a small, renderer-agnostic subset of the underlying window
    /// flags. They are translated when the host window is begun.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PanelFlags: u32 {
        /// Disable the collapse triangle and double-click collapsing
        const NO_COLLAPSE = 1 << 0;
        /// Size the window to its contents every frame
        const AUTO_RESIZE = 1 << 1;
        /// Disable resizing with the lower-right grip
        const NO_RESIZE = 1 << 2;
        /// Keep the window where the user cannot drag it
        const NO_MOVE = 1 << 3;
        /// Disable scrollbars (scrolling by other means still works)
        const NO_SCROLLBAR = 1 << 4;
        /// Disable keyboard/gamepad navigation within the window
        const NO_NAV = 1 << 5;
        /// Reserve space for a menu bar inside the window
        const MENU_BAR = 1 << 6;
    }
}

impl PanelFlags {
    /// Translate into the flags understood by the UI library.
    pub fn to_window_flags(self) -> WindowFlags {
        let mut flags = WindowFlags::empty();
        if self.contains(PanelFlags::NO_COLLAPSE) {
            flags.insert(WindowFlags::NO_COLLAPSE);
        }
        if self.contains(PanelFlags::AUTO_RESIZE) {
            flags.insert(WindowFlags::ALWAYS_AUTO_RESIZE);
        }
        if self.contains(PanelFlags::NO_RESIZE) {
            flags.insert(WindowFlags::NO_RESIZE);
        }
        if self.contains(PanelFlags::NO_MOVE) {
            flags.insert(WindowFlags::NO_MOVE);
        }
        if self.contains(PanelFlags::NO_SCROLLBAR) {
            flags.insert(WindowFlags::NO_SCROLLBAR);
        }
        if self.contains(PanelFlags::NO_NAV) {
            flags.insert(WindowFlags::NO_NAV);
        }
        if self.contains(PanelFlags::MENU_BAR) {
            flags.insert(WindowFlags::MENU_BAR);
        }
        flags
    }
}

impl Default for PanelFlags {
    fn default() -> Self {
        PanelFlags::empty()
    }
}

/// A named developer tool window hosted by the overlay.
///
/// Windows start hidden. Visibility is owned by the registry, not the
/// window itself; use
/// [`OverlaySystem::set_visible`](crate::OverlaySystem::set_visible) or the
/// console verbs to show one.
pub trait OverlayWindow {
    /// Stable internal name used for registry lookups and console completion.
    ///
    /// Must be unique among registered windows and should not contain spaces.
    fn name(&self) -> &str;

    /// Title passed to the UI library and shown in the Windows menu.
    fn title(&self) -> &str;

    /// Presentation flags applied when the window is begun.
    fn flags(&self) -> PanelFlags {
        PanelFlags::empty()
    }

    /// Draw the window contents for this frame.
    ///
    /// Returns whether the window should stay open. Returning `false` hides
    /// the window at the end of the frame, as if the user had dismissed it.
    fn draw(&mut self, ui: &Ui) -> bool;

    /// Called whenever the registry flips this window's visibility.
    fn on_visibility_changed(&mut self, _visible: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_flags_translate_to_window_flags() {
        let flags = (PanelFlags::NO_COLLAPSE | PanelFlags::AUTO_RESIZE).to_window_flags();
        assert!(flags.contains(WindowFlags::NO_COLLAPSE));
        assert!(flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE));
        assert!(!flags.contains(WindowFlags::NO_MOVE));
    }

    #[test]
    fn empty_panel_flags_translate_to_empty() {
        assert_eq!(PanelFlags::empty().to_window_flags(), WindowFlags::empty());
    }

    #[test]
    fn no_nav_maps_to_combined_nav_flags() {
        let flags = PanelFlags::NO_NAV.to_window_flags();
        assert!(flags.contains(WindowFlags::NO_NAV));
    }
}
