//! Fixed timestep physics
//!
//! Advances the ball one frame at a time: accelerate from input, damp with
//! friction, then move each axis separately and push the ball out of any wall
//! cell it overlaps.

use core::fmt;

use glam::Vec2;

use super::collision::ball_cell_collision;
use super::maze::Maze;
use super::state::{Ball, ConfigError, GameState, Goal, PhysicsParams};
use crate::{clamp_loose, clamp_unit};

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Ball moved, goal not reached
    Continuing,
    /// Ball reached the goal on this step (reported exactly once per run)
    JustWon,
    /// Goal was already reached; nothing moved
    AlreadyWon,
}

/// A step call with unusable arguments. State is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepError {
    NonFiniteDt(f32),
    NegativeDt(f32),
    NonFiniteInput { x: f32, y: f32 },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteDt(dt) => write!(f, "step dt is not finite: {dt}"),
            Self::NegativeDt(dt) => write!(f, "step dt is negative: {dt}"),
            Self::NonFiniteInput { x, y } => {
                write!(f, "step input is not finite: ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for StepError {}

/// One maze session: the grid plus the ball/goal state that moves over it
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    maze: Maze,
    params: PhysicsParams,
    state: GameState,
}

impl PhysicsEngine {
    /// Engine with the default physics constants
    pub fn new(maze: Maze) -> Self {
        Self::build(maze, PhysicsParams::default())
    }

    /// Engine with custom constants, rejected if any are unusable
    pub fn with_params(maze: Maze, params: PhysicsParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::build(maze, params))
    }

    fn build(maze: Maze, params: PhysicsParams) -> Self {
        log::debug!(
            "Physics engine: {}x{} maze, accel={}, friction={}",
            maze.cols(),
            maze.rows(),
            params.accel,
            params.friction
        );
        let state = GameState::new(
            Ball::new(params.ball_radius),
            Goal::for_maze(maze.cols(), maze.rows(), params.goal_radius),
        );
        Self {
            maze,
            params,
            state,
        }
    }

    /// Put the ball back at the start, at rest, and clear the win
    pub fn reset(&mut self) {
        self.state.ball.respawn();
        self.state.won = false;
    }

    /// Advance by `dt` seconds under `input` (each axis in [-1, 1]).
    ///
    /// The caller bounds `dt`; large values are integrated as given.
    /// Finite input outside [-1, 1] is clamped per axis.
    pub fn step(&mut self, dt: f32, input: Vec2) -> Result<StepOutcome, StepError> {
        if !dt.is_finite() {
            return Err(StepError::NonFiniteDt(dt));
        }
        if dt < 0.0 {
            return Err(StepError::NegativeDt(dt));
        }
        if !input.is_finite() {
            return Err(StepError::NonFiniteInput {
                x: input.x,
                y: input.y,
            });
        }

        if self.state.won {
            return Ok(StepOutcome::AlreadyWon);
        }

        let input = clamp_unit(input);
        let ball = &mut self.state.ball;
        ball.vel += input * self.params.accel * dt;
        // First-order damping; not exp(-k*dt)
        ball.vel -= ball.vel * self.params.friction * dt;

        // Axes move separately so each resolves its own wall contact
        let dx = self.state.ball.vel.x * dt;
        self.move_ball(Vec2::new(dx, 0.0));
        let dy = self.state.ball.vel.y * dt;
        self.move_ball(Vec2::new(0.0, dy));

        if self.state.goal.reached_by(&self.state.ball) {
            self.state.won = true;
            log::info!(
                "Goal reached at ({:.2}, {:.2})",
                self.state.ball.pos.x,
                self.state.ball.pos.y
            );
            return Ok(StepOutcome::JustWon);
        }

        Ok(StepOutcome::Continuing)
    }

    /// Displace the ball, clamp it inside the wall ring, then resolve
    /// overlaps with every touched wall cell in row-major order.
    fn move_ball(&mut self, delta: Vec2) {
        let (min, max) = self.bounds();
        let ball = &mut self.state.ball;
        let r = ball.radius;

        ball.pos += delta;
        ball.pos.x = clamp_loose(ball.pos.x, min.x, max.x);
        ball.pos.y = clamp_loose(ball.pos.y, min.y, max.y);

        let cell_min_x = (ball.pos.x - r).floor() as i32;
        let cell_max_x = (ball.pos.x + r).floor() as i32;
        let cell_min_y = (ball.pos.y - r).floor() as i32;
        let cell_max_y = (ball.pos.y + r).floor() as i32;

        // Later cells see the position corrected by earlier ones
        for cy in cell_min_y..=cell_max_y {
            for cx in cell_min_x..=cell_max_x {
                if !self.maze.is_wall(cx, cy) {
                    continue;
                }
                let hit = ball_cell_collision(ball.pos, r, cx, cy);
                if !hit.hit {
                    continue;
                }
                ball.pos += hit.normal * hit.penetration;
                if hit.is_horizontal() {
                    ball.vel.x = 0.0;
                } else {
                    ball.vel.y = 0.0;
                }
                log::trace!(
                    "Wall contact at cell ({cx}, {cy}), depth {:.4}",
                    hit.penetration
                );
            }
        }
    }

    /// Range the ball center may occupy: one cell in from the left/top edge,
    /// two in from the right/bottom, less the radius
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = self.state.ball.radius;
        let min = Vec2::splat(1.0 + r);
        let max = Vec2::new(
            self.maze.cols() as f32 - 2.0 - r,
            self.maze.rows() as f32 - 2.0 - r,
        );
        (min, max)
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    #[inline]
    pub fn goal(&self) -> &Goal {
        &self.state.goal
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.state.won
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::distance_to_cell;
    use proptest::prelude::*;

    const OPEN_7: [&str; 7] = [
        "1111111", "1000001", "1000001", "1000001", "1000001", "1000001", "1111111",
    ];

    fn open_engine() -> PhysicsEngine {
        PhysicsEngine::new(Maze::from_layout(&OPEN_7).unwrap())
    }

    fn assert_contained(engine: &PhysicsEngine) {
        let (min, max) = engine.bounds();
        let pos = engine.ball().pos;
        let eps = 1e-4;
        assert!(pos.x >= min.x - eps && pos.x <= max.x + eps, "x out of bounds: {pos}");
        assert!(pos.y >= min.y - eps && pos.y <= max.y + eps, "y out of bounds: {pos}");
    }

    fn assert_no_penetration(engine: &PhysicsEngine) {
        let ball = engine.ball();
        for (cx, cy) in engine.maze().walls() {
            let d = distance_to_cell(ball.pos, cx, cy);
            assert!(
                d >= ball.radius - 1e-3,
                "ball at {} overlaps wall ({cx}, {cy}) by {}",
                ball.pos,
                ball.radius - d
            );
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = PhysicsEngine::new(Maze::reference());
        assert_eq!(engine.ball().pos, Vec2::new(1.5, 1.5));
        assert_eq!(engine.ball().vel, Vec2::ZERO);
        assert_eq!(engine.ball().radius, BALL_RADIUS);
        assert_eq!(engine.goal().pos, Vec2::new(12.5, 12.5));
        assert_eq!(engine.goal().radius, GOAL_RADIUS);
        assert!(!engine.is_won());
    }

    #[test]
    fn test_corridor_run_stops_at_first_wall() {
        let mut engine = PhysicsEngine::new(Maze::reference());
        let input = Vec2::new(1.0, 0.0);
        let wall_limit = 6.0 - BALL_RADIUS;

        let mut last_x = engine.ball().pos.x;
        for _ in 0..40 {
            assert_eq!(engine.step(0.05, input), Ok(StepOutcome::Continuing));
            let pos = engine.ball().pos;
            assert!(pos.x > last_x, "x must keep increasing");
            assert_eq!(pos.y, 1.5);
            assert!(pos.x <= wall_limit + 1e-5);
            last_x = pos.x;
        }

        // Keep pushing: the ball comes to rest against column 6
        for _ in 0..400 {
            engine.step(0.05, input).unwrap();
        }
        let ball = engine.ball();
        assert!((ball.pos.x - wall_limit).abs() < 1e-3, "x = {}", ball.pos.x);
        assert_eq!(ball.vel.x, 0.0);
        assert_eq!(ball.pos.y, 1.5);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut engine = PhysicsEngine::new(Maze::reference());
        for i in 0..120 {
            let t = i as f32 * 0.1;
            engine.step(0.033, Vec2::new(t.sin(), t.cos())).unwrap();
        }
        engine.reset();
        let ball = engine.ball();
        assert_eq!(ball.pos, Vec2::new(1.5, 1.5));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(!engine.is_won());
    }

    #[test]
    fn test_goal_fires_once_then_freezes() {
        let mut engine = open_engine();
        let mut wins = 0;
        for _ in 0..300 {
            if engine.step(0.05, Vec2::ONE).unwrap() == StepOutcome::JustWon {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert!(engine.is_won());

        let frozen = engine.state().clone();
        for i in 0..50 {
            let input = Vec2::new(-1.0, if i % 2 == 0 { 1.0 } else { -1.0 });
            assert_eq!(engine.step(0.05, input), Ok(StepOutcome::AlreadyWon));
        }
        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn test_reset_after_win_plays_again() {
        let mut engine = open_engine();
        while engine.step(0.05, Vec2::ONE).unwrap() != StepOutcome::JustWon {}
        engine.reset();
        assert_eq!(engine.step(0.05, Vec2::ZERO), Ok(StepOutcome::Continuing));
    }

    #[test]
    fn test_friction_decays_velocity() {
        let mut engine = open_engine();
        engine.state.ball.pos = Vec2::new(3.0, 3.0);
        engine.state.ball.vel = Vec2::new(1.0, 0.5);

        let mut speed = engine.ball().vel.length();
        let mut steps = 0;
        while speed > 1e-3 {
            engine.step(0.05, Vec2::ZERO).unwrap();
            let next = engine.ball().vel.length();
            assert!(next < speed, "speed went from {speed} to {next}");
            speed = next;
            steps += 1;
            assert!(steps < 1000);
        }
    }

    #[test]
    fn test_friction_is_first_order() {
        let mut engine = open_engine();
        engine.state.ball.pos = Vec2::new(3.0, 3.0);
        engine.state.ball.vel = Vec2::new(1.0, 0.0);
        engine.step(0.05, Vec2::ZERO).unwrap();
        // 1 - 3.5 * 0.05
        assert!((engine.ball().vel.x - 0.825).abs() < 1e-6);
    }

    #[test]
    fn test_input_is_clamped() {
        let mut a = open_engine();
        let mut b = open_engine();
        a.step(0.05, Vec2::new(5.0, -3.0)).unwrap();
        b.step(0.05, Vec2::new(1.0, -1.0)).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let mut engine = PhysicsEngine::new(Maze::reference());
        engine.step(0.05, Vec2::X).unwrap();
        let before = engine.state().clone();

        assert!(matches!(
            engine.step(f32::NAN, Vec2::ZERO),
            Err(StepError::NonFiniteDt(_))
        ));
        assert_eq!(
            engine.step(-0.01, Vec2::ZERO),
            Err(StepError::NegativeDt(-0.01))
        );
        assert!(matches!(
            engine.step(0.05, Vec2::new(f32::INFINITY, 0.0)),
            Err(StepError::NonFiniteInput { .. })
        ));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut engine = PhysicsEngine::new(Maze::reference());
        engine.step(0.05, Vec2::X).unwrap();
        let before = engine.state().clone();
        engine.step(0.0, Vec2::ONE).unwrap();
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_with_params_rejects_invalid() {
        let params = PhysicsParams {
            goal_radius: -1.0,
            ..Default::default()
        };
        assert!(PhysicsEngine::with_params(Maze::reference(), params).is_err());

        let params = PhysicsParams {
            ball_radius: 0.7,
            ..Default::default()
        };
        assert!(matches!(
            PhysicsEngine::with_params(Maze::reference(), params),
            Err(ConfigError::OutOfRange {
                field: "ball_radius",
                ..
            })
        ));

        let params = PhysicsParams {
            accel: 12.0,
            ..Default::default()
        };
        let engine = PhysicsEngine::with_params(Maze::reference(), params).unwrap();
        assert_eq!(engine.params().accel, 12.0);
    }

    #[test]
    fn test_tiny_maze_does_not_panic() {
        // Inverted clamp bounds must not panic
        let mut engine = PhysicsEngine::new(Maze::from_layout(&["111", "101", "111"]).unwrap());
        for _ in 0..10 {
            engine.step(0.05, Vec2::ONE).unwrap();
        }
        assert!(engine.ball().pos.is_finite());
    }

    #[test]
    fn test_sessions_are_independent() {
        fn assert_send<T: Send>() {}
        assert_send::<PhysicsEngine>();

        let mut a = PhysicsEngine::new(Maze::reference());
        let b = PhysicsEngine::new(Maze::reference());
        a.step(0.05, Vec2::X).unwrap();
        assert_ne!(a.state(), b.state());
        assert_eq!(b.ball().pos, Vec2::new(1.5, 1.5));
    }

    fn input_run() -> impl Strategy<Value = Vec<(f32, f32, f32, usize)>> {
        prop::collection::vec(
            (-1.0f32..=1.0, -1.0f32..=1.0, 0.001f32..=0.05, 1usize..20),
            1..40,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_stays_inside_and_out_of_walls(run in input_run()) {
            let mut engine = PhysicsEngine::new(Maze::reference());
            for (x, y, dt, repeat) in run {
                for _ in 0..repeat {
                    engine.step(dt, Vec2::new(x, y)).unwrap();
                    assert_contained(&engine);
                    assert_no_penetration(&engine);
                }
            }
        }

        #[test]
        fn prop_deterministic_replay(run in input_run()) {
            let mut a = PhysicsEngine::new(Maze::reference());
            let mut b = PhysicsEngine::new(Maze::reference());
            for (x, y, dt, repeat) in run {
                for _ in 0..repeat {
                    let ra = a.step(dt, Vec2::new(x, y));
                    let rb = b.step(dt, Vec2::new(x, y));
                    prop_assert_eq!(ra, rb);
                }
            }
            prop_assert_eq!(a.state(), b.state());
        }
    }
}
