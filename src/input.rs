//! Logical key queries
//!
//! The simulation never polls hardware. It asks an [`InputSource`] whether a
//! logical [`Key`] is held this frame; the host decides what that means.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
    /// Start a game from the title screen, or continue after losing a ship
    Start,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::TurnLeft, Key::TurnRight, Key::Thrust, Key::Fire, Key::Start];
}

/// Boolean key query interface
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Input snapshot for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub start: bool,
}

impl FrameInput {
    /// Capture the current state of any input source
    pub fn snapshot(source: &impl InputSource) -> Self {
        Self {
            turn_left: source.is_key_down(Key::TurnLeft),
            turn_right: source.is_key_down(Key::TurnRight),
            thrust: source.is_key_down(Key::Thrust),
            fire: source.is_key_down(Key::Fire),
            start: source.is_key_down(Key::Start),
        }
    }
}

impl InputSource for FrameInput {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::TurnLeft => self.turn_left,
            Key::TurnRight => self.turn_right,
            Key::Thrust => self.thrust,
            Key::Fire => self.fire,
            Key::Start => self.start,
        }
    }
}

/// Physical key names bound to each logical key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub turn_left: String,
    pub turn_right: String,
    pub thrust: String,
    pub fire: String,
    pub start: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            turn_left: "left".to_string(),
            turn_right: "right".to_string(),
            thrust: "up".to_string(),
            fire: "spacebar".to_string(),
            start: "s".to_string(),
        }
    }
}

impl KeyBindings {
    /// Physical key name for a logical key
    pub fn name(&self, key: Key) -> &str {
        match key {
            Key::TurnLeft => &self.turn_left,
            Key::TurnRight => &self.turn_right,
            Key::Thrust => &self.thrust,
            Key::Fire => &self.fire,
            Key::Start => &self.start,
        }
    }
}

/// Held physical keys, as reported by the host window, viewed through bindings
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    bindings: KeyBindings,
    held: HashSet<String>,
}

impl KeyboardState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    /// Physical key went down (names are case-insensitive)
    pub fn press(&mut self, name: &str) {
        self.held.insert(name.to_lowercase());
    }

    /// Physical key went up
    pub fn release(&mut self, name: &str) {
        self.held.remove(&name.to_lowercase());
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&self.bindings.name(key).to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_input_queries() {
        let input = FrameInput {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        assert!(input.is_key_down(Key::Thrust));
        assert!(input.is_key_down(Key::Fire));
        assert!(!input.is_key_down(Key::TurnLeft));
        assert!(!input.is_key_down(Key::Start));
    }

    #[test]
    fn test_keyboard_uses_bindings() {
        let mut keyboard = KeyboardState::new(KeyBindings::default());
        keyboard.press("Up");
        keyboard.press("spacebar");
        assert!(keyboard.is_key_down(Key::Thrust));
        assert!(keyboard.is_key_down(Key::Fire));
        assert!(!keyboard.is_key_down(Key::TurnRight));

        keyboard.release("up");
        assert!(!keyboard.is_key_down(Key::Thrust));
    }

    #[test]
    fn test_rebound_key() {
        let bindings = KeyBindings {
            fire: "z".to_string(),
            ..Default::default()
        };
        let mut keyboard = KeyboardState::new(bindings);
        keyboard.press("spacebar");
        assert!(!keyboard.is_key_down(Key::Fire));
        keyboard.press("z");
        assert!(keyboard.is_key_down(Key::Fire));
    }

    #[test]
    fn test_snapshot_matches_source() {
        let mut keyboard = KeyboardState::new(KeyBindings::default());
        keyboard.press("left");
        keyboard.press("s");
        let snap = FrameInput::snapshot(&keyboard);
        assert_eq!(
            snap,
            FrameInput {
                turn_left: true,
                start: true,
                ..Default::default()
            }
        );
        for key in Key::ALL {
            assert_eq!(snap.is_key_down(key), keyboard.is_key_down(key));
        }
    }
}
