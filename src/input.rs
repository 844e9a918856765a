//! Input sources normalized to a tilt vector
//!
//! Orientation sensors, accelerometers, and arrow keys all end up as one
//! `Vec2` with each axis in [-1, 1]. The most recent reading wins; sources
//! are not blended.

use glam::Vec2;

use crate::consts::{GRAVITY, KEY_TILT, MAX_TILT_DEGREES};

/// Arrow keys that tilt the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a DOM-style key name ("ArrowLeft", ...) to a key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Latest normalized input, updated by whichever source fired last
#[derive(Debug, Clone)]
pub struct InputState {
    tilt: Vec2,
    max_tilt_degrees: f32,
    key_tilt: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(MAX_TILT_DEGREES, KEY_TILT)
    }
}

impl InputState {
    pub fn new(max_tilt_degrees: f32, key_tilt: f32) -> Self {
        Self {
            tilt: Vec2::ZERO,
            max_tilt_degrees,
            key_tilt,
        }
    }

    /// Device orientation angles in degrees. `gamma` is left/right roll,
    /// `beta` front/back pitch; a missing reading counts as level.
    pub fn set_orientation(&mut self, gamma: Option<f32>, beta: Option<f32>) {
        let max = self.max_tilt_degrees;
        let norm = |angle: Option<f32>| angle.unwrap_or(0.0).clamp(-max, max) / max;
        self.tilt = Vec2::new(norm(gamma), norm(beta));
    }

    /// Raw accelerometer reading in m/s². Screen x is mirrored so tipping the
    /// device right rolls the ball right.
    pub fn set_acceleration(&mut self, x: f32, y: f32) {
        self.tilt = Vec2::new(
            (-x / GRAVITY).clamp(-1.0, 1.0),
            (y / GRAVITY).clamp(-1.0, 1.0),
        );
    }

    /// Arrow key pressed: set that axis to the fixed key tilt
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.tilt.x = -self.key_tilt,
            Key::Right => self.tilt.x = self.key_tilt,
            Key::Up => self.tilt.y = -self.key_tilt,
            Key::Down => self.tilt.y = self.key_tilt,
        }
    }

    /// Any key released: level the board on both axes
    pub fn key_up(&mut self) {
        self.tilt = Vec2::ZERO;
    }

    /// Set the vector directly (replays, tests). Non-finite components are
    /// kept as given so the engine rejects them.
    pub fn set_vector(&mut self, v: Vec2) {
        self.tilt = if v.is_finite() {
            crate::clamp_unit(v)
        } else {
            v
        };
    }

    pub fn clear(&mut self) {
        self.tilt = Vec2::ZERO;
    }

    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.tilt
    }
}
