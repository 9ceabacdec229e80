//! Platform-neutral input events and the fixed control scheme
//!
//! Backends translate their native events into [`InputEvent`]; the frame
//! driver turns those into sim actions through [`Controls`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{Action, Direction, Side};

/// Keys the game reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Q,
    A,
    P,
    L,
    Space,
    Escape,
    Other,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Q => "Q",
            Key::A => "A",
            Key::P => "P",
            Key::L => "L",
            Key::Space => "SPACE",
            Key::Escape => "ESCAPE",
            Key::Other => "?",
        };
        f.write_str(name)
    }
}

/// A single host input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Application quit request (e.g. Ctrl+C, OS shutdown)
    Quit,
    /// A key was pressed
    KeyDown(Key),
    /// The window's close button was used
    WindowClose,
}

/// What the frame loop should do with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the main loop
    Quit,
    /// Forward to the state machine
    Game(Action),
}

/// Fixed key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub left_up: Key,
    pub left_down: Key,
    pub right_up: Key,
    pub right_down: Key,
    pub toggle: Key,
    pub quit: Key,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left_up: Key::Q,
            left_down: Key::A,
            right_up: Key::P,
            right_down: Key::L,
            toggle: Key::Space,
            quit: Key::Escape,
        }
    }
}

impl Controls {
    /// Keys bound to a paddle as (up, down)
    pub fn paddle_keys(&self, side: Side) -> (Key, Key) {
        match side {
            Side::Left => (self.left_up, self.left_down),
            Side::Right => (self.right_up, self.right_down),
        }
    }

    /// Translate an event into a command, if it means anything
    pub fn command(&self, event: InputEvent) -> Option<Command> {
        let key = match event {
            InputEvent::Quit | InputEvent::WindowClose => return Some(Command::Quit),
            InputEvent::KeyDown(key) => key,
        };

        if key == self.quit {
            return Some(Command::Quit);
        }
        if key == self.toggle {
            return Some(Command::Game(Action::Toggle));
        }

        let action = if key == self.left_up {
            Action::Move(Side::Left, Direction::Up)
        } else if key == self.left_down {
            Action::Move(Side::Left, Direction::Down)
        } else if key == self.right_up {
            Action::Move(Side::Right, Direction::Up)
        } else if key == self.right_down {
            Action::Move(Side::Right, Direction::Down)
        } else {
            return None;
        };
        Some(Command::Game(action))
    }
}
