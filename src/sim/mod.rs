//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only, never the wall clock
//! - Row-major collision order
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod maze;
pub mod state;

pub use collision::{CollisionResult, ball_cell_collision, distance_to_cell};
pub use engine::{PhysicsEngine, StepError, StepOutcome};
pub use maze::{Maze, MazeError, REFERENCE_LAYOUT};
pub use state::{Ball, ConfigError, GameState, Goal, PhysicsParams};
