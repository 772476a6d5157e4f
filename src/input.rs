use std::collections::HashSet;

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::game::Steering;

/// Reports each press of a key once, however long it is held.
#[derive(Debug, Clone, Default)]
pub struct KeyInput {
    was_down: bool,
}

impl KeyInput {
    /// Feeds the current key state; true on the frame the key goes down.
    pub fn poll(&mut self, is_down: bool) -> bool {
        let pressed = is_down && !self.was_down;
        self.was_down = is_down;
        pressed
    }
}

/// Mouse state handed down the GUI tree once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseEvent {
    /// Cursor position in pixels from the top-left corner.
    pub x: f32,
    pub y: f32,
    /// Left button currently held.
    pub pressed: bool,
    /// Left button went down since the previous frame.
    pub clicked: bool,
}

/// Keyboard and mouse state accumulated from window events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    cursor: (f32, f32),
    mouse_down: bool,
    clicked: bool,
}

impl InputState {
    pub fn keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys.insert(key);
            }
            ElementState::Released => {
                self.keys.remove(&key);
            }
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        let down = state == ElementState::Pressed;
        if down && !self.mouse_down {
            self.clicked = true;
        }
        self.mouse_down = down;
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn clear_keys(&mut self) {
        self.keys.clear();
        self.mouse_down = false;
    }

    /// Snapshot for this frame; the click is consumed.
    pub fn take_mouse_event(&mut self) -> MouseEvent {
        let event = MouseEvent {
            x: self.cursor.0,
            y: self.cursor.1,
            pressed: self.mouse_down,
            clicked: self.clicked,
        };
        self.clicked = false;
        event
    }
}

/// Steering from the movement keys. W/S pitch, A/D yaw, arrows as aliases.
pub fn steering(is_pressed: impl Fn(KeyCode) -> bool) -> Steering {
    let axis = |neg: [KeyCode; 2], pos: [KeyCode; 2]| {
        let mut value = 0.0;
        if neg.iter().any(|&k| is_pressed(k)) {
            value -= 1.0;
        }
        if pos.iter().any(|&k| is_pressed(k)) {
            value += 1.0;
        }
        value
    };
    Steering {
        pitch: axis(
            [KeyCode::KeyW, KeyCode::ArrowUp],
            [KeyCode::KeyS, KeyCode::ArrowDown],
        ),
        yaw: axis(
            [KeyCode::KeyD, KeyCode::ArrowRight],
            [KeyCode::KeyA, KeyCode::ArrowLeft],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_input_fires_once_per_press() {
        let mut key = KeyInput::default();
        assert!(!key.poll(false));
        assert!(key.poll(true));
        assert!(!key.poll(true));
        assert!(!key.poll(false));
        assert!(key.poll(true));
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let held = [KeyCode::KeyW, KeyCode::KeyS, KeyCode::ArrowLeft];
        let s = steering(|k| held.contains(&k));
        assert_eq!(s.pitch, 0.0);
        assert_eq!(s.yaw, 1.0);
    }

    #[test]
    fn no_keys_no_steering() {
        assert_eq!(steering(|_| false), Steering::default());
    }

    #[test]
    fn click_is_reported_once() {
        let mut input = InputState::default();
        input.cursor_moved(12.0, 34.0);
        input.mouse_button(MouseButton::Left, ElementState::Pressed);
        let first = input.take_mouse_event();
        assert_eq!((first.x, first.y), (12.0, 34.0));
        assert!(first.pressed && first.clicked);
        let second = input.take_mouse_event();
        assert!(second.pressed && !second.clicked);
        input.mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!input.take_mouse_event().pressed);
    }

    #[test]
    fn other_buttons_do_not_click() {
        let mut input = InputState::default();
        input.mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(!input.take_mouse_event().clicked);
    }

    #[test]
    fn keys_are_tracked_until_released() {
        let mut input = InputState::default();
        input.keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.keyboard(KeyCode::KeyA, ElementState::Pressed);
        input.keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_pressed(KeyCode::KeyA));
        input.clear_keys();
        assert!(!input.is_key_pressed(KeyCode::KeyA));
    }
}
