//! Input forwarding between the host engine and the UI library.
//!
//! The host translates its raw input layer into [`InputEvent`]s and hands
//! them to [`OverlaySystem::handle_event`](crate::OverlaySystem::handle_event)
//! while the overlay input context is active. The button-code translation
//! table lives here, along with the capture gating rules.

use dear_imgui_rs::{Io, Key, MouseButton};

/// Flat button code covering mouse buttons and physical keys.
///
/// This mirrors the button space game engines typically expose: a single
/// enum for everything the input system can report, mouse included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    MouseLeft,
    MouseRight,
    MouseMiddle,
    Mouse4,
    Mouse5,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Pad0,
    Pad1,
    Pad2,
    Pad3,
    Pad4,
    Pad5,
    Pad6,
    Pad7,
    Pad8,
    Pad9,
    PadDivide,
    PadMultiply,
    PadMinus,
    PadPlus,
    PadEnter,
    PadDecimal,
    LeftBracket,
    RightBracket,
    Semicolon,
    Apostrophe,
    Backquote,
    Comma,
    Period,
    Slash,
    Backslash,
    Minus,
    Equal,
    Enter,
    Space,
    Backspace,
    Tab,
    CapsLock,
    NumLock,
    Escape,
    ScrollLock,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Break,
    LeftShift,
    RightShift,
    LeftAlt,
    RightAlt,
    LeftCtrl,
    RightCtrl,
    LeftSuper,
    RightSuper,
    App,
    Up,
    Left,
    Down,
    Right,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    CapsLockToggle,
    NumLockToggle,
    ScrollLockToggle,
}

/// Translate a button code into the key understood by the UI library.
///
/// Returns `None` for mouse buttons and for codes without a key equivalent:
/// the backquote stays with the host console, and the lock-state pseudo
/// buttons, Break and the application key have no counterpart.
pub fn button_to_key(button: Button) -> Option<Key> {
    let key = match button {
        Button::Digit0 => Key::Key0,
        Button::Digit1 => Key::Key1,
        Button::Digit2 => Key::Key2,
        Button::Digit3 => Key::Key3,
        Button::Digit4 => Key::Key4,
        Button::Digit5 => Key::Key5,
        Button::Digit6 => Key::Key6,
        Button::Digit7 => Key::Key7,
        Button::Digit8 => Key::Key8,
        Button::Digit9 => Key::Key9,
        Button::A => Key::A,
        Button::B => Key::B,
        Button::C => Key::C,
        Button::D => Key::D,
        Button::E => Key::E,
        Button::F => Key::F,
        Button::G => Key::G,
        Button::H => Key::H,
        Button::I => Key::I,
        Button::J => Key::J,
        Button::K => Key::K,
        Button::L => Key::L,
        Button::M => Key::M,
        Button::N => Key::N,
        Button::O => Key::O,
        Button::P => Key::P,
        Button::Q => Key::Q,
        Button::R => Key::R,
        Button::S => Key::S,
        Button::T => Key::T,
        Button::U => Key::U,
        Button::V => Key::V,
        Button::W => Key::W,
        Button::X => Key::X,
        Button::Y => Key::Y,
        Button::Z => Key::Z,
        Button::Pad0 => Key::Keypad0,
        Button::Pad1 => Key::Keypad1,
        Button::Pad2 => Key::Keypad2,
        Button::Pad3 => Key::Keypad3,
        Button::Pad4 => Key::Keypad4,
        Button::Pad5 => Key::Keypad5,
        Button::Pad6 => Key::Keypad6,
        Button::Pad7 => Key::Keypad7,
        Button::Pad8 => Key::Keypad8,
        Button::Pad9 => Key::Keypad9,
        Button::PadDivide => Key::KeypadDivide,
        Button::PadMultiply => Key::KeypadMultiply,
        Button::PadMinus => Key::KeypadSubtract,
        Button::PadPlus => Key::KeypadAdd,
        Button::PadEnter => Key::KeypadEnter,
        Button::PadDecimal => Key::KeypadDecimal,
        Button::LeftBracket => Key::LeftBracket,
        Button::RightBracket => Key::RightBracket,
        Button::Semicolon => Key::Semicolon,
        Button::Apostrophe => Key::Apostrophe,
        Button::Comma => Key::Comma,
        Button::Period => Key::Period,
        Button::Slash => Key::Slash,
        Button::Backslash => Key::Backslash,
        Button::Minus => Key::Minus,
        Button::Equal => Key::Equal,
        Button::Enter => Key::Enter,
        Button::Space => Key::Space,
        Button::Backspace => Key::Backspace,
        Button::Tab => Key::Tab,
        Button::CapsLock => Key::CapsLock,
        Button::NumLock => Key::NumLock,
        Button::Escape => Key::Escape,
        Button::ScrollLock => Key::ScrollLock,
        Button::Insert => Key::Insert,
        Button::Delete => Key::Delete,
        Button::Home => Key::Home,
        Button::End => Key::End,
        Button::PageUp => Key::PageUp,
        Button::PageDown => Key::PageDown,
        Button::LeftShift => Key::LeftShift,
        Button::RightShift => Key::RightShift,
        Button::LeftAlt => Key::LeftAlt,
        Button::RightAlt => Key::RightAlt,
        Button::LeftCtrl => Key::LeftCtrl,
        Button::RightCtrl => Key::RightCtrl,
        Button::LeftSuper => Key::LeftSuper,
        Button::RightSuper => Key::RightSuper,
        Button::Up => Key::UpArrow,
        Button::Left => Key::LeftArrow,
        Button::Down => Key::DownArrow,
        Button::Right => Key::RightArrow,
        Button::F1 => Key::F1,
        Button::F2 => Key::F2,
        Button::F3 => Key::F3,
        Button::F4 => Key::F4,
        Button::F5 => Key::F5,
        Button::F6 => Key::F6,
        Button::F7 => Key::F7,
        Button::F8 => Key::F8,
        Button::F9 => Key::F9,
        Button::F10 => Key::F10,
        Button::F11 => Key::F11,
        Button::F12 => Key::F12,
        Button::Backquote
        | Button::Break
        | Button::App
        | Button::CapsLockToggle
        | Button::NumLockToggle
        | Button::ScrollLockToggle
        | Button::MouseLeft
        | Button::MouseRight
        | Button::MouseMiddle
        | Button::Mouse4
        | Button::Mouse5 => return None,
    };
    Some(key)
}

/// Translate a mouse button code. Returns `None` for keyboard keys.
pub fn button_to_mouse(button: Button) -> Option<MouseButton> {
    match button {
        Button::MouseLeft => Some(MouseButton::Left),
        Button::MouseRight => Some(MouseButton::Right),
        Button::MouseMiddle => Some(MouseButton::Middle),
        Button::Mouse4 => Some(MouseButton::Extra1),
        Button::Mouse5 => Some(MouseButton::Extra2),
        _ => None,
    }
}

/// A single input event forwarded from the host input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in overlay coordinates
    CursorMoved { x: f32, y: f32 },
    /// Key or mouse button pressed
    ButtonPressed(Button),
    /// Key or mouse button released
    ButtonReleased(Button),
    /// Scroll wheel delta, in lines
    Wheel { horizontal: f32, vertical: f32 },
    /// Text input character
    CharTyped(char),
}

/// Forward one event into the UI input queue, applying the capture rules.
///
/// Mouse presses and releases only reach the UI when it wants the mouse,
/// and characters only when it wants the keyboard. Cursor position and
/// wheel deltas are forwarded unconditionally so hover state stays fresh.
/// Keycodes always reach the UI; capture must not affect whether shortcut
/// state is tracked.
pub(crate) fn forward_event(io: &mut Io, event: &InputEvent) {
    match *event {
        InputEvent::CursorMoved { x, y } => {
            io.add_mouse_pos_event([x, y]);
        }
        InputEvent::ButtonPressed(button) => forward_button(io, button, true),
        InputEvent::ButtonReleased(button) => forward_button(io, button, false),
        InputEvent::Wheel {
            horizontal,
            vertical,
        } => {
            io.add_mouse_wheel_event([horizontal, vertical]);
        }
        InputEvent::CharTyped(ch) => {
            if io.want_capture_keyboard() {
                io.add_input_character(ch);
            }
        }
    }
}

fn forward_button(io: &mut Io, button: Button, pressed: bool) {
    if let Some(mouse) = button_to_mouse(button) {
        if io.want_capture_mouse() {
            io.add_mouse_button_event(mouse, pressed);
        }
    } else if let Some(key) = button_to_key(button) {
        io.add_key_event(key, pressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map_directly() {
        assert_eq!(button_to_key(Button::A), Some(Key::A));
        assert_eq!(button_to_key(Button::Z), Some(Key::Z));
        assert_eq!(button_to_key(Button::Digit0), Some(Key::Key0));
        assert_eq!(button_to_key(Button::Digit9), Some(Key::Key9));
    }

    #[test]
    fn keypad_buttons_map_to_keypad_keys() {
        assert_eq!(button_to_key(Button::Pad5), Some(Key::Keypad5));
        assert_eq!(button_to_key(Button::PadMinus), Some(Key::KeypadSubtract));
        assert_eq!(button_to_key(Button::PadPlus), Some(Key::KeypadAdd));
        assert_eq!(button_to_key(Button::PadEnter), Some(Key::KeypadEnter));
    }

    #[test]
    fn modifiers_keep_left_right_distinction() {
        assert_eq!(button_to_key(Button::LeftCtrl), Some(Key::LeftCtrl));
        assert_eq!(button_to_key(Button::RightCtrl), Some(Key::RightCtrl));
        assert_eq!(button_to_key(Button::LeftSuper), Some(Key::LeftSuper));
        assert_eq!(button_to_key(Button::RightSuper), Some(Key::RightSuper));
    }

    #[test]
    fn unmapped_buttons_return_none() {
        assert_eq!(button_to_key(Button::Backquote), None);
        assert_eq!(button_to_key(Button::Break), None);
        assert_eq!(button_to_key(Button::App), None);
        assert_eq!(button_to_key(Button::CapsLockToggle), None);
        assert_eq!(button_to_key(Button::ScrollLockToggle), None);
    }

    #[test]
    fn mouse_buttons_are_not_keys() {
        assert_eq!(button_to_key(Button::MouseLeft), None);
        assert_eq!(button_to_mouse(Button::MouseLeft), Some(MouseButton::Left));
        assert_eq!(button_to_mouse(Button::Mouse4), Some(MouseButton::Extra1));
        assert_eq!(button_to_mouse(Button::Mouse5), Some(MouseButton::Extra2));
        assert_eq!(button_to_mouse(Button::Space), None);
    }
}
