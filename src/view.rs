//! Read-only view of a session for renderers
//!
//! Nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::sim::{Maze, PhysicsEngine};

/// Ball pose as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub won: bool,
}

/// Goal pose as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Everything that moves, captured after a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball: BallView,
    pub goal: GoalView,
}

impl Snapshot {
    pub fn capture(engine: &PhysicsEngine) -> Self {
        let ball = engine.ball();
        let goal = engine.goal();
        Self {
            ball: BallView {
                x: ball.pos.x,
                y: ball.pos.y,
                radius: ball.radius,
                won: engine.is_won(),
            },
            goal: GoalView {
                x: goal.pos.x,
                y: goal.pos.y,
                radius: goal.radius,
            },
        }
    }
}

/// Square-cell fit of the maze into a surface, centered on both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Side length of one cell in surface units
    pub cell_size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Viewport {
    pub fn fit(width: f32, height: f32, cols: usize, rows: usize) -> Self {
        let cols = cols as f32;
        let rows = rows as f32;
        let cell_size = (width / cols).min(height / rows);
        Self {
            cell_size,
            offset_x: (width - cols * cell_size) / 2.0,
            offset_y: (height - rows * cell_size) / 2.0,
        }
    }

    /// Cell-unit point to surface coordinates
    #[inline]
    pub fn to_surface(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.offset_x + x * self.cell_size,
            self.offset_y + y * self.cell_size,
        )
    }
}

/// Fill colors, 0xRRGGBB
pub struct Palette;

impl Palette {
    pub const FLOOR: u32 = 0x151515;
    pub const WALL: u32 = 0x2a2a2a;
    pub const GOAL: u32 = 0x3ee387;
    pub const BALL: u32 = 0x4cc3ff;
    pub const BALL_WON: u32 = 0xffd166;

    #[inline]
    pub fn ball(won: bool) -> u32 {
        if won { Self::BALL_WON } else { Self::BALL }
    }
}

/// Character-grid rendering: `#` wall, `.` floor, `G` goal, `o` ball
/// (`@` once the goal is reached). One character per cell.
pub fn render_text(maze: &Maze, snapshot: &Snapshot) -> String {
    let ball_cell = (snapshot.ball.x.floor() as i64, snapshot.ball.y.floor() as i64);
    let goal_cell = (snapshot.goal.x.floor() as i64, snapshot.goal.y.floor() as i64);

    let mut out = String::with_capacity((maze.cols() + 1) * maze.rows());
    for (row, cells) in maze.rows_iter().enumerate() {
        for (col, &wall) in cells.iter().enumerate() {
            let here = (col as i64, row as i64);
            let c = if here == ball_cell {
                if snapshot.ball.won { '@' } else { 'o' }
            } else if here == goal_cell {
                'G'
            } else if wall {
                '#'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
