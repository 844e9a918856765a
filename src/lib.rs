//! Tilt Maze - roll a ball through a grid maze to the goal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze grid, ball physics, wall collisions)
//! - `input`: Tilt/keyboard readings normalized to an input vector
//! - `frame`: Per-frame driver (dt clamping, status line, restart)
//! - `view`: Read-only render snapshot and viewport helpers
//! - `settings`: Tunable parameters loaded from JSON

pub mod frame;
pub mod input;
pub mod settings;
pub mod sim;
pub mod view;

pub use frame::{FrameDriver, FrameReport, Status};
pub use input::{InputState, Key};
pub use settings::{Settings, SettingsError};
pub use sim::{Maze, PhysicsEngine, StepOutcome};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Ball acceleration at full tilt (cell units/s²)
    pub const ACCEL: f32 = 6.0;
    /// Velocity damping rate (1/s), applied as `v -= v * FRICTION * dt`
    pub const FRICTION: f32 = 3.5;

    /// Ball radius in cell units
    pub const BALL_RADIUS: f32 = 0.28;
    /// Ball radius must stay below this (exclusive) to fit a one-cell corridor
    pub const MAX_BALL_RADIUS: f32 = 0.5;
    /// Goal radius in cell units
    pub const GOAL_RADIUS: f32 = 0.4;

    /// Ball spawn point (center of the top-left interior cell)
    pub const START_X: f32 = 1.5;
    pub const START_Y: f32 = 1.5;
    /// Goal sits this far in from the right/bottom edges
    pub const GOAL_INSET: f32 = 2.5;

    /// Largest frame delta handed to the engine (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Orientation angle that maps to full tilt (degrees)
    pub const MAX_TILT_DEGREES: f32 = 30.0;
    /// Input magnitude for a held arrow key
    pub const KEY_TILT: f32 = 0.8;
    /// Standard gravity, used to normalize accelerometer readings (m/s²)
    pub const GRAVITY: f32 = 9.8;
}

/// Clamp each axis of `v` to [-1, 1]
#[inline]
pub fn clamp_unit(v: Vec2) -> Vec2 {
    v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

/// Clamp `value` into [min, max] without panicking when the bounds cross.
///
/// Caps at `max` first and floors at `min` second, so inverted bounds
/// resolve to `min`.
#[inline]
pub fn clamp_loose(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
