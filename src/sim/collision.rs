//! Collision detection between the ball and a wall cell
//!
//! Cells are axis-aligned unit squares, so the test is the usual
//! circle-vs-box: clamp the circle center onto the box and measure.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the cell to the ball center
    pub point: Vec2,
    /// Ball center minus `point`, before normalizing
    pub delta: Vec2,
    /// Unit vector from `point` toward the ball center (push-out direction)
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            delta: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// True when the push-out is mostly horizontal.
    ///
    /// Compared on the raw offset, not the normal, so near-ties are not
    /// rounded together. Exact ties go to vertical, so a ball hitting a
    /// corner exactly diagonally loses its y velocity.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.delta.x.abs() > self.delta.y.abs()
    }
}

/// Check a ball against the wall cell whose top-left corner is `(cell_x, cell_y)`.
///
/// Reports a hit only for `0 < dist < radius`. A center exactly on or inside
/// the square gives `dist == 0` and has no usable normal, so it is a miss.
pub fn ball_cell_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    cell_x: i32,
    cell_y: i32,
) -> CollisionResult {
    let min = Vec2::new(cell_x as f32, cell_y as f32);
    let nearest = ball_pos.clamp(min, min + Vec2::ONE);
    let delta = ball_pos - nearest;
    let dist = delta.length();

    if dist > 0.0 && dist < ball_radius {
        return CollisionResult {
            hit: true,
            point: nearest,
            delta,
            normal: delta / dist,
            penetration: ball_radius - dist,
        };
    }

    CollisionResult::miss()
}

/// Distance from `pos` to the nearest point of cell `(cell_x, cell_y)`
pub fn distance_to_cell(pos: Vec2, cell_x: i32, cell_y: i32) -> f32 {
    let min = Vec2::new(cell_x as f32, cell_y as f32);
    (pos - pos.clamp(min, min + Vec2::ONE)).length()
}
