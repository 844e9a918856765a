//! Per-frame driver
//!
//! Sits between the platform's frame callback and the engine: turns
//! timestamps into a bounded dt, feeds the current input, keeps the status
//! line, and handles restart.

use crate::consts::MAX_DT;
use crate::input::InputState;
use crate::sim::{PhysicsEngine, StepError, StepOutcome};
use crate::view::Snapshot;

/// User-facing status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Fresh game, waiting for tilt
    Ready,
    /// Orientation sensor permission granted and listening
    SensorActive,
    /// User refused sensor access
    SensorDenied,
    /// Sensor permission request errored
    SensorFailed,
    GoalReached,
}

impl Status {
    pub fn text(&self) -> &'static str {
        match self {
            Status::Ready => "Tilt to roll the ball",
            Status::SensorActive => "Sensor active",
            Status::SensorDenied => "Sensor permission was denied",
            Status::SensorFailed => "Could not enable the sensor",
            Status::GoalReached => "Goal! Well done",
        }
    }
}

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Clamped dt actually integrated
    pub dt: f32,
    pub outcome: StepOutcome,
    pub snapshot: Snapshot,
}

/// Owns one engine and drives it from frame timestamps
#[derive(Debug, Clone)]
pub struct FrameDriver {
    engine: PhysicsEngine,
    pub input: InputState,
    last_time: Option<f64>,
    max_dt: f32,
    status: Status,
}

impl FrameDriver {
    pub fn new(engine: PhysicsEngine, input: InputState) -> Self {
        Self::with_max_dt(engine, input, MAX_DT)
    }

    pub fn with_max_dt(engine: PhysicsEngine, input: InputState, max_dt: f32) -> Self {
        Self {
            engine,
            input,
            last_time: None,
            max_dt,
            status: Status::Ready,
        }
    }

    /// Run one frame at `timestamp` seconds.
    ///
    /// The first frame integrates zero time. After that dt is the gap since
    /// the previous frame, floored at zero and capped at `max_dt`. A
    /// non-finite timestamp is rejected without touching the frame clock.
    pub fn frame(&mut self, timestamp: f64) -> Result<FrameReport, StepError> {
        if !timestamp.is_finite() {
            log::warn!("Frame timestamp rejected: {timestamp}");
            return Err(StepError::NonFiniteDt(timestamp as f32));
        }
        let dt = match self.last_time {
            Some(last) => {
                let raw = (timestamp - last) as f32;
                // Non-finite gaps pass through so the engine rejects them
                if raw.is_finite() {
                    raw.min(self.max_dt).max(0.0)
                } else {
                    raw
                }
            }
            None => 0.0,
        };
        self.last_time = Some(timestamp);

        let outcome = self.engine.step(dt, self.input.vector()).inspect_err(|e| {
            log::warn!("Frame step rejected: {e}");
        })?;

        if outcome == StepOutcome::JustWon {
            self.status = Status::GoalReached;
            log::info!("Maze cleared");
        }

        Ok(FrameReport {
            dt,
            outcome,
            snapshot: Snapshot::capture(&self.engine),
        })
    }

    /// Restart button: ball back to start, board level, status reset
    pub fn restart(&mut self) {
        self.engine.reset();
        self.input.clear();
        self.status = Status::Ready;
        log::info!("Game restarted");
    }

    pub fn sensor_granted(&mut self) {
        self.status = Status::SensorActive;
    }

    pub fn sensor_denied(&mut self) {
        self.status = Status::SensorDenied;
    }

    pub fn sensor_failed(&mut self) {
        self.status = Status::SensorFailed;
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.engine)
    }
}
