//! Game state and core simulation types
//!
//! Everything a session needs to resume lives in [`GameState`].

use core::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The rolling ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center, in cell units
    pub pos: Vec2,
    /// Velocity, in cell units per second
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::new(START_X, START_Y),
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Back to the start cell, at rest
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(START_X, START_Y);
        self.vel = Vec2::ZERO;
    }
}

/// The target circle, fixed near the bottom-right corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub radius: f32,
}

impl Goal {
    /// Place the goal for a maze of the given size
    pub fn for_maze(cols: usize, rows: usize, radius: f32) -> Self {
        Self {
            pos: Vec2::new(cols as f32 - GOAL_INSET, rows as f32 - GOAL_INSET),
            radius,
        }
    }

    /// Whether the ball overlaps the goal
    #[inline]
    pub fn reached_by(&self, ball: &Ball) -> bool {
        ball.pos.distance(self.pos) < ball.radius + self.radius
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub goal: Goal,
    /// Set once the ball reaches the goal; only `reset` clears it
    pub won: bool,
}

impl GameState {
    pub fn new(ball: Ball, goal: Goal) -> Self {
        Self {
            ball,
            goal,
            won: false,
        }
    }
}

/// Tunable physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Acceleration at full input (cell units/s²)
    pub accel: f32,
    /// Damping rate (1/s)
    pub friction: f32,
    pub ball_radius: f32,
    pub goal_radius: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            accel: ACCEL,
            friction: FRICTION,
            ball_radius: BALL_RADIUS,
            goal_radius: GOAL_RADIUS,
        }
    }
}

/// Invalid physics parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite(&'static str),
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite(field) => write!(f, "physics parameter `{field}` is not finite"),
            Self::OutOfRange { field, value } => {
                write!(f, "physics parameter `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl PhysicsParams {
    /// All finite; accel and friction non-negative; goal radius positive;
    /// ball radius in (0, 0.5) so the ball fits a one-cell corridor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("accel", self.accel, false),
            ("friction", self.friction, false),
            ("ball_radius", self.ball_radius, true),
            ("goal_radius", self.goal_radius, true),
        ];
        for (field, value, strictly_positive) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(field));
            }
            let ok = if strictly_positive {
                value > 0.0
            } else {
                value >= 0.0
            };
            if !ok {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if self.ball_radius >= MAX_BALL_RADIUS {
            return Err(ConfigError::OutOfRange {
                field: "ball_radius",
                value: self.ball_radius,
            });
        }
        Ok(())
    }
}
