//! Keyboard and mouse mapping from winit to the overlay button space.
//!
//! Everything funnels into [`devgui::Button`], the flat engine-style button
//! code the overlay core understands.

use devgui::Button;
use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::{Key as WinitKey, KeyLocation, NamedKey};

/// Convert a winit mouse button to an overlay button code.
pub fn winit_mouse_to_button(button: WinitMouseButton) -> Option<Button> {
    match button {
        WinitMouseButton::Left => Some(Button::MouseLeft),
        WinitMouseButton::Right => Some(Button::MouseRight),
        WinitMouseButton::Middle => Some(Button::MouseMiddle),
        WinitMouseButton::Back => Some(Button::Mouse4),
        WinitMouseButton::Forward => Some(Button::Mouse5),
        // Map common OS extra buttons if delivered as Other indices
        WinitMouseButton::Other(3) => Some(Button::Mouse4),
        WinitMouseButton::Other(4) => Some(Button::Mouse5),
        WinitMouseButton::Other(_) => None,
    }
}

/// Convert a winit key to an overlay button code with location awareness.
///
/// The keypad shares characters with the main block, so digits and the
/// arithmetic characters split on [`KeyLocation`].
pub fn winit_key_to_button(key: &WinitKey, location: KeyLocation) -> Option<Button> {
    match key {
        WinitKey::Character(s) => {
            let ch = s.chars().next()?;
            match (ch, location) {
                // Numbers (0-9), keypad first
                ('0', KeyLocation::Numpad) => Some(Button::Pad0),
                ('1', KeyLocation::Numpad) => Some(Button::Pad1),
                ('2', KeyLocation::Numpad) => Some(Button::Pad2),
                ('3', KeyLocation::Numpad) => Some(Button::Pad3),
                ('4', KeyLocation::Numpad) => Some(Button::Pad4),
                ('5', KeyLocation::Numpad) => Some(Button::Pad5),
                ('6', KeyLocation::Numpad) => Some(Button::Pad6),
                ('7', KeyLocation::Numpad) => Some(Button::Pad7),
                ('8', KeyLocation::Numpad) => Some(Button::Pad8),
                ('9', KeyLocation::Numpad) => Some(Button::Pad9),
                ('0', _) => Some(Button::Digit0),
                ('1', _) => Some(Button::Digit1),
                ('2', _) => Some(Button::Digit2),
                ('3', _) => Some(Button::Digit3),
                ('4', _) => Some(Button::Digit4),
                ('5', _) => Some(Button::Digit5),
                ('6', _) => Some(Button::Digit6),
                ('7', _) => Some(Button::Digit7),
                ('8', _) => Some(Button::Digit8),
                ('9', _) => Some(Button::Digit9),

                // Letters (A-Z)
                ('a' | 'A', _) => Some(Button::A),
                ('b' | 'B', _) => Some(Button::B),
                ('c' | 'C', _) => Some(Button::C),
                ('d' | 'D', _) => Some(Button::D),
                ('e' | 'E', _) => Some(Button::E),
                ('f' | 'F', _) => Some(Button::F),
                ('g' | 'G', _) => Some(Button::G),
                ('h' | 'H', _) => Some(Button::H),
                ('i' | 'I', _) => Some(Button::I),
                ('j' | 'J', _) => Some(Button::J),
                ('k' | 'K', _) => Some(Button::K),
                ('l' | 'L', _) => Some(Button::L),
                ('m' | 'M', _) => Some(Button::M),
                ('n' | 'N', _) => Some(Button::N),
                ('o' | 'O', _) => Some(Button::O),
                ('p' | 'P', _) => Some(Button::P),
                ('q' | 'Q', _) => Some(Button::Q),
                ('r' | 'R', _) => Some(Button::R),
                ('s' | 'S', _) => Some(Button::S),
                ('t' | 'T', _) => Some(Button::T),
                ('u' | 'U', _) => Some(Button::U),
                ('v' | 'V', _) => Some(Button::V),
                ('w' | 'W', _) => Some(Button::W),
                ('x' | 'X', _) => Some(Button::X),
                ('y' | 'Y', _) => Some(Button::Y),
                ('z' | 'Z', _) => Some(Button::Z),

                // Punctuation
                ('\'', _) => Some(Button::Apostrophe),
                (',', _) => Some(Button::Comma),
                ('-', KeyLocation::Numpad) => Some(Button::PadMinus),
                ('-', _) => Some(Button::Minus),
                ('.', KeyLocation::Numpad) => Some(Button::PadDecimal),
                ('.', _) => Some(Button::Period),
                ('/', KeyLocation::Numpad) => Some(Button::PadDivide),
                ('/', _) => Some(Button::Slash),
                ('*', KeyLocation::Numpad) => Some(Button::PadMultiply),
                ('+', KeyLocation::Numpad) => Some(Button::PadPlus),
                (';', _) => Some(Button::Semicolon),
                ('=', _) => Some(Button::Equal),
                ('[', _) => Some(Button::LeftBracket),
                ('\\', _) => Some(Button::Backslash),
                (']', _) => Some(Button::RightBracket),
                ('`', _) => Some(Button::Backquote),

                _ => None,
            }
        }
        WinitKey::Named(named_key) => match named_key {
            // Navigation keys
            NamedKey::ArrowDown => Some(Button::Down),
            NamedKey::ArrowLeft => Some(Button::Left),
            NamedKey::ArrowRight => Some(Button::Right),
            NamedKey::ArrowUp => Some(Button::Up),
            NamedKey::End => Some(Button::End),
            NamedKey::Home => Some(Button::Home),
            NamedKey::PageDown => Some(Button::PageDown),
            NamedKey::PageUp => Some(Button::PageUp),

            // Editing keys
            NamedKey::Backspace => Some(Button::Backspace),
            NamedKey::Delete => Some(Button::Delete),
            NamedKey::Insert => Some(Button::Insert),

            // Whitespace keys
            NamedKey::Tab => Some(Button::Tab),
            NamedKey::Space => Some(Button::Space),
            NamedKey::Enter => match location {
                KeyLocation::Numpad => Some(Button::PadEnter),
                _ => Some(Button::Enter),
            },
            NamedKey::Escape => Some(Button::Escape),

            // Modifier keys, left/right resolved from the location
            NamedKey::Shift => match location {
                KeyLocation::Right => Some(Button::RightShift),
                _ => Some(Button::LeftShift),
            },
            NamedKey::Control => match location {
                KeyLocation::Right => Some(Button::RightCtrl),
                _ => Some(Button::LeftCtrl),
            },
            NamedKey::Alt => match location {
                KeyLocation::Right => Some(Button::RightAlt),
                _ => Some(Button::LeftAlt),
            },
            NamedKey::Super => match location {
                KeyLocation::Right => Some(Button::RightSuper),
                _ => Some(Button::LeftSuper),
            },

            // Function keys
            NamedKey::F1 => Some(Button::F1),
            NamedKey::F2 => Some(Button::F2),
            NamedKey::F3 => Some(Button::F3),
            NamedKey::F4 => Some(Button::F4),
            NamedKey::F5 => Some(Button::F5),
            NamedKey::F6 => Some(Button::F6),
            NamedKey::F7 => Some(Button::F7),
            NamedKey::F8 => Some(Button::F8),
            NamedKey::F9 => Some(Button::F9),
            NamedKey::F10 => Some(Button::F10),
            NamedKey::F11 => Some(Button::F11),
            NamedKey::F12 => Some(Button::F12),

            // Lock keys
            NamedKey::CapsLock => Some(Button::CapsLock),
            NamedKey::ScrollLock => Some(Button::ScrollLock),
            NamedKey::NumLock => Some(Button::NumLock),

            // Special keys
            NamedKey::Pause => Some(Button::Break),
            NamedKey::ContextMenu => Some(Button::App),

            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(
            winit_mouse_to_button(WinitMouseButton::Left),
            Some(Button::MouseLeft)
        );
        assert_eq!(
            winit_mouse_to_button(WinitMouseButton::Right),
            Some(Button::MouseRight)
        );
        assert_eq!(
            winit_mouse_to_button(WinitMouseButton::Middle),
            Some(Button::MouseMiddle)
        );
        assert_eq!(
            winit_mouse_to_button(WinitMouseButton::Back),
            Some(Button::Mouse4)
        );
        assert_eq!(
            winit_mouse_to_button(WinitMouseButton::Forward),
            Some(Button::Mouse5)
        );
        assert_eq!(
            winit_mouse_to_button(WinitMouseButton::Other(3)),
            Some(Button::Mouse4)
        );
        assert_eq!(winit_mouse_to_button(WinitMouseButton::Other(10)), None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("a".into()), KeyLocation::Standard),
            Some(Button::A)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("A".into()), KeyLocation::Standard),
            Some(Button::A)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::Escape), KeyLocation::Standard),
            Some(Button::Escape)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::F1), KeyLocation::Standard),
            Some(Button::F1)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::ArrowUp), KeyLocation::Standard),
            Some(Button::Up)
        );
    }

    #[test]
    fn test_keypad_location_is_honored() {
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("1".into()), KeyLocation::Standard),
            Some(Button::Digit1)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("1".into()), KeyLocation::Numpad),
            Some(Button::Pad1)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("-".into()), KeyLocation::Numpad),
            Some(Button::PadMinus)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("-".into()), KeyLocation::Standard),
            Some(Button::Minus)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::Enter), KeyLocation::Numpad),
            Some(Button::PadEnter)
        );
    }

    #[test]
    fn test_modifier_keys_with_location() {
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::Shift), KeyLocation::Left),
            Some(Button::LeftShift)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::Shift), KeyLocation::Right),
            Some(Button::RightShift)
        );
        assert_eq!(
            winit_key_to_button(&WinitKey::Named(NamedKey::Super), KeyLocation::Right),
            Some(Button::RightSuper)
        );
    }

    #[test]
    fn test_console_key_still_maps_to_a_button() {
        // The overlay core decides what to do with it; the backend reports it.
        assert_eq!(
            winit_key_to_button(&WinitKey::Character("`".into()), KeyLocation::Standard),
            Some(Button::Backquote)
        );
    }
}
