//! Per-tick input snapshot
//!
//! The window layer polls the keyboard and hands the core one immutable
//! [`InputSnapshot`] per tick. Only edge-triggered presses drive actions, so a
//! key held across several ticks fires once.

use serde::{Deserialize, Serialize};

/// Keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
    Backspace,
    Tab,
    ShiftLeft,
    ControlLeft,
    W,
    A,
    S,
    D,
    J,
    K,
    M,
    R,
    X,
    Z,
}

impl Key {
    /// Display name for menus
    pub fn name(&self) -> &'static str {
        match self {
            Key::Up => "UP",
            Key::Down => "DOWN",
            Key::Left => "LEFT",
            Key::Right => "RIGHT",
            Key::Enter => "ENTER",
            Key::Escape => "ESCAPE",
            Key::Space => "SPACE",
            Key::Backspace => "BACKSPACE",
            Key::Tab => "TAB",
            Key::ShiftLeft => "SHIFT",
            Key::ControlLeft => "CONTROL",
            Key::W => "W",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::J => "J",
            Key::K => "K",
            Key::M => "M",
            Key::R => "R",
            Key::X => "X",
            Key::Z => "Z",
        }
    }

    /// Keys that are bound to fixed menu actions and cannot become the jump
    /// key
    pub fn is_reserved(&self) -> bool {
        Action::ALL.iter().any(|a| a.key() == *self)
    }
}

/// Fixed-binding logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NavigateUp,
    NavigateDown,
    Confirm,
    Cancel,
    Restart,
    ToMenu,
    Backspace,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::NavigateUp,
        Action::NavigateDown,
        Action::Confirm,
        Action::Cancel,
        Action::Restart,
        Action::ToMenu,
        Action::Backspace,
    ];

    pub fn key(&self) -> Key {
        match self {
            Action::NavigateUp => Key::Up,
            Action::NavigateDown => Key::Down,
            Action::Confirm => Key::Enter,
            Action::Cancel => Key::Escape,
            Action::Restart => Key::R,
            Action::ToMenu => Key::M,
            Action::Backspace => Key::Backspace,
        }
    }
}

/// Everything the core reads from the keyboard in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Keys that went down since the previous tick
    pub pressed: Vec<Key>,
    /// Keys currently down, in the order they were pressed
    pub held: Vec<Key>,
    /// Characters typed since the previous tick
    pub text: String,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot where `key` was just pressed (and is held)
    pub fn press(key: Key) -> Self {
        Self {
            pressed: vec![key],
            held: vec![key],
            text: String::new(),
        }
    }

    /// Snapshot carrying typed text only
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn action(&self, action: Action) -> bool {
        self.is_just_pressed(action.key())
    }

    /// First held key that is free to be bound as the jump key
    pub fn first_bindable_held(&self) -> Option<Key> {
        self.held.iter().copied().find(|k| !k.is_reserved())
    }

    /// Copy with edge-triggered parts cleared (held keys remain)
    pub fn without_edges(&self) -> Self {
        Self {
            pressed: Vec::new(),
            held: self.held.clone(),
            text: String::new(),
        }
    }
}
