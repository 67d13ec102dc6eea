//! Host input snapshot
//!
//! The host samples its raw input once per frame and hands the runtime a
//! plain [`InputSnapshot`]. Nothing in the runtime polls devices directly.

use crate::foundation::math::Vec2;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// All buttons, in snapshot slot order
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    fn slot(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Per-frame state of one logical button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Button is currently held
    pub down: bool,
    /// Button went down this frame
    pub pressed: bool,
    /// Button went up this frame
    pub released: bool,
}

impl ButtonState {
    /// Derive edge flags from the previous and current held state
    pub fn from_transition(was_down: bool, is_down: bool) -> Self {
        Self {
            down: is_down,
            pressed: !was_down && is_down,
            released: was_down && !is_down,
        }
    }
}

/// Editing keys consumed by text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// Delete the character before the caret
    Backspace,
    /// Delete the character after the caret
    Delete,
    /// Move the caret one character left
    Left,
    /// Move the caret one character right
    Right,
    /// Move the caret one line up
    Up,
    /// Move the caret one line down
    Down,
    /// Move the caret to the start of the line
    Home,
    /// Move the caret to the end of the line
    End,
    /// Submit the text
    Enter,
}

/// Pull-based input snapshot for one frame
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    /// Pointer position in screen pixels (top-left origin, y down)
    pub pointer: Vec2,
    /// False while something else (a game menu) owns the pointer
    pub pointer_visible: bool,
    /// Button states, indexed by [`MouseButton`]
    buttons: [ButtonState; 3],
    /// Scroll wheel delta this frame (positive = up)
    pub scroll: f32,
    /// Characters typed this frame
    pub typed: Vec<char>,
    /// Editing keys pressed this frame
    pub keys: Vec<EditKey>,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            pointer: Vec2::zeros(),
            pointer_visible: true,
            buttons: [ButtonState::default(); 3],
            scroll: 0.0,
            typed: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl InputSnapshot {
    /// Snapshot with the pointer at the given screen position and nothing pressed
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pointer: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// State of a button
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.slot()]
    }

    /// Set the state of a button
    pub fn set_button(&mut self, button: MouseButton, state: ButtonState) {
        self.buttons[button.slot()] = state;
    }

    /// Builder form of [`InputSnapshot::set_button`]
    pub fn with_button(mut self, button: MouseButton, state: ButtonState) -> Self {
        self.set_button(button, state);
        self
    }

    /// Primary button state
    pub fn left(&self) -> ButtonState {
        self.button(MouseButton::Left)
    }
}

/// Tracks held buttons across frames so hosts only report "is down"
///
/// Mirrors how a host turns raw device polling into edge flags.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: [bool; 3],
}

impl InputTracker {
    /// Create a tracker with every button released
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw pointer position and held buttons
    pub fn sample(&mut self, pointer: Vec2, held: [bool; 3]) -> InputSnapshot {
        let mut snapshot = InputSnapshot { pointer, ..Default::default() };
        for button in MouseButton::ALL {
            let slot = button.slot();
            snapshot.set_button(button, ButtonState::from_transition(self.held[slot], held[slot]));
        }
        self.held = held;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_transitions() {
        let pressed = ButtonState::from_transition(false, true);
        assert!(pressed.down && pressed.pressed && !pressed.released);

        let held = ButtonState::from_transition(true, true);
        assert!(held.down && !held.pressed && !held.released);

        let released = ButtonState::from_transition(true, false);
        assert!(!released.down && !released.pressed && released.released);
    }

    #[test]
    fn test_tracker_edges() {
        let mut tracker = InputTracker::new();
        let first = tracker.sample(Vec2::new(1.0, 2.0), [true, false, false]);
        assert!(first.left().pressed);

        let second = tracker.sample(Vec2::new(1.0, 2.0), [true, false, false]);
        assert!(second.left().down && !second.left().pressed);

        let third = tracker.sample(Vec2::new(1.0, 2.0), [false, false, false]);
        assert!(third.left().released);
        assert!(!third.button(MouseButton::Right).down);
    }
}
