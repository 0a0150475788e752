/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use crate::units::{Milliseconds, Radians, RadiansPerSecond};

/// Samples closer together than this are dropped
pub const MIN_SAMPLE_SPACING: Milliseconds = Milliseconds(10.0);

/// Angular speed below which the orbit counts as standing still
pub const MOVING_THRESHOLD: RadiansPerSecond = RadiansPerSecond(0.005);

/// Sign of the angular velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Negative,
    #[default]
    Still,
    Positive,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Negative => -1.0,
            Direction::Still => 0.0,
            Direction::Positive => 1.0,
        }
    }
}

/// What the cloth engine learns about the orbit each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationSignal {
    pub angular_speed: RadiansPerSecond,
    pub direction: Direction,
    pub is_moving: bool,
}

impl RotationSignal {
    pub fn still() -> Self {
        Self::default()
    }

    /// A signal for a constant spin, as if the tracker had measured `velocity` rad/s.
    pub fn spinning(velocity: f32) -> Self {
        Self::from_velocity(velocity)
    }

    fn from_velocity(velocity: f32) -> Self {
        let angular_speed = velocity.abs();
        let is_moving = angular_speed > *MOVING_THRESHOLD;
        let direction = match (is_moving, velocity > 0.0) {
            (false, _) => Direction::Still,
            (true, true) => Direction::Positive,
            (true, false) => Direction::Negative,
        };
        Self {
            angular_speed: RadiansPerSecond(angular_speed),
            direction,
            is_moving,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    angle: Radians,
    at: Milliseconds,
}

/// Turns a per-frame orbit angle into angular speed and direction.
#[derive(Debug, Clone, Default)]
pub struct RotationTracker {
    previous: Option<Sample>,
    velocity: f32,
    signal: RotationSignal,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, angle: Radians, timestamp: Milliseconds) -> RotationSignal {
        if !timestamp.0.is_finite() || !angle.0.is_finite() {
            // unusable reading, start over
            self.reset();
            return self.signal;
        }
        let current = Sample { angle, at: timestamp };
        let Some(previous) = self.previous else {
            self.previous = Some(current);
            return self.signal;
        };
        let elapsed = timestamp - previous.at;
        if elapsed.0 < 0.0 {
            // clock went backwards, start over from here
            self.previous = Some(current);
            self.velocity = 0.0;
            self.signal = RotationSignal::still();
            return self.signal;
        }
        if elapsed.0 < MIN_SAMPLE_SPACING.0 {
            return self.signal;
        }
        let delta = previous.angle.shortest_delta(angle);
        self.velocity = delta.per(elapsed.to_seconds());
        self.signal = RotationSignal::from_velocity(self.velocity);
        self.previous = Some(current);
        self.signal
    }

    /// Signed angular velocity from the last accepted sample pair
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn signal(&self) -> RotationSignal {
        self.signal
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
