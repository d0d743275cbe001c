//! Translation of winit input events into overlay input events.
//!
//! These helpers only build [`InputEvent`] values; routing and capture
//! decisions stay with the overlay core.

use devgui::{Button, InputEvent};
use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::ModifiersState;

use crate::input::{winit_key_to_button, winit_mouse_to_button};

/// Expand one keyboard event into button and text events.
///
/// A press also carries the text it produced, so a single key event can
/// yield several overlay events.
pub fn keyboard_events(event: &KeyEvent, mut sink: impl FnMut(InputEvent)) {
    let pressed = event.state == ElementState::Pressed;
    if let Some(button) = winit_key_to_button(&event.logical_key, event.location) {
        sink(if pressed {
            InputEvent::ButtonPressed(button)
        } else {
            InputEvent::ButtonReleased(button)
        });
    }
    if pressed {
        if let Some(text) = &event.text {
            for ch in text.chars() {
                if !ch.is_control() {
                    sink(InputEvent::CharTyped(ch));
                }
            }
        }
    }
}

/// Convert a scroll delta to a wheel event, in lines.
pub fn wheel_event(delta: MouseScrollDelta) -> InputEvent {
    match delta {
        MouseScrollDelta::LineDelta(h, v) => InputEvent::Wheel {
            horizontal: h,
            vertical: v,
        },
        MouseScrollDelta::PixelDelta(pos) => InputEvent::Wheel {
            // Scale pixel deltas down to line-ish units
            horizontal: (pos.x / 100.0) as f32,
            vertical: (pos.y / 100.0) as f32,
        },
    }
}

/// Convert a mouse button transition, if the button has an overlay code.
pub fn mouse_button_event(
    button: winit::event::MouseButton,
    state: ElementState,
) -> Option<InputEvent> {
    let button = winit_mouse_to_button(button)?;
    Some(match state {
        ElementState::Pressed => InputEvent::ButtonPressed(button),
        ElementState::Released => InputEvent::ButtonReleased(button),
    })
}

/// Resynchronize all modifier keys from a winit modifiers snapshot.
///
/// Winit does not say which side changed, so both sides of each modifier
/// are set to the snapshot state. Events that restate the current state are
/// harmless downstream.
pub fn modifier_events(state: ModifiersState) -> [InputEvent; 8] {
    fn button_state(button: Button, down: bool) -> InputEvent {
        if down {
            InputEvent::ButtonPressed(button)
        } else {
            InputEvent::ButtonReleased(button)
        }
    }

    [
        button_state(Button::LeftShift, state.shift_key()),
        button_state(Button::RightShift, state.shift_key()),
        button_state(Button::LeftCtrl, state.control_key()),
        button_state(Button::RightCtrl, state.control_key()),
        button_state(Button::LeftAlt, state.alt_key()),
        button_state(Button::RightAlt, state.alt_key()),
        button_state(Button::LeftSuper, state.super_key()),
        button_state(Button::RightSuper, state.super_key()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::MouseButton;

    #[test]
    fn test_wheel_line_delta_passes_through() {
        let event = wheel_event(MouseScrollDelta::LineDelta(0.0, 3.0));
        assert_eq!(
            event,
            InputEvent::Wheel {
                horizontal: 0.0,
                vertical: 3.0
            }
        );
    }

    #[test]
    fn test_wheel_pixel_delta_is_scaled() {
        let event = wheel_event(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            50.0, -200.0,
        )));
        assert_eq!(
            event,
            InputEvent::Wheel {
                horizontal: 0.5,
                vertical: -2.0
            }
        );
    }

    #[test]
    fn test_mouse_button_transitions() {
        assert_eq!(
            mouse_button_event(MouseButton::Left, ElementState::Pressed),
            Some(InputEvent::ButtonPressed(Button::MouseLeft))
        );
        assert_eq!(
            mouse_button_event(MouseButton::Right, ElementState::Released),
            Some(InputEvent::ButtonReleased(Button::MouseRight))
        );
        assert_eq!(
            mouse_button_event(MouseButton::Other(10), ElementState::Pressed),
            None
        );
    }

    #[test]
    fn test_modifier_snapshot_sets_both_sides() {
        let events = modifier_events(ModifiersState::SHIFT);
        assert_eq!(events[0], InputEvent::ButtonPressed(Button::LeftShift));
        assert_eq!(events[1], InputEvent::ButtonPressed(Button::RightShift));
        assert_eq!(events[2], InputEvent::ButtonReleased(Button::LeftCtrl));
        assert_eq!(events[7], InputEvent::ButtonReleased(Button::RightSuper));
    }
}
