//! Directional key state
//!
//! Pure pressed/released flags. The host flips them from keyboard events;
//! the simulation only reads them.

use serde::{Deserialize, Serialize};

/// One of the four driving keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value (arrows or WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "arrowup" | "w" => Some(Direction::Forward),
            "arrowdown" | "s" => Some(Direction::Back),
            "arrowleft" | "a" => Some(Direction::Left),
            "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held state of the driving keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Forward => self.forward = pressed,
            Direction::Back => self.back = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    /// +1 forward, -1 back, 0 for neither or both
    pub fn throttle(&self) -> f32 {
        (self.forward as i8 - self.back as i8) as f32
    }

    /// +1 left, -1 right (positive yaw turns left)
    pub fn steer(&self) -> f32 {
        (self.left as i8 - self.right as i8) as f32
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Forward));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Escape"), None);
    }

    #[test]
    fn test_axes_cancel_when_both_held() {
        let mut input = InputState::default();
        input.set(Direction::Forward, true);
        assert_eq!(input.throttle(), 1.0);
        input.set(Direction::Back, true);
        assert_eq!(input.throttle(), 0.0);

        input.set(Direction::Right, true);
        assert_eq!(input.steer(), -1.0);
        assert!(input.right);

        input.release_all();
        assert_eq!(input, InputState::default());
    }
}
