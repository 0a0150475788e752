/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Physical units for the cloth motion simulation
//!
//! Type-safe wrappers for time and angle quantities, so that a frame delta
//! in seconds can never be confused with a clock reading in milliseconds.

use std::f32::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Deref, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Time span in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(pub f32);

/// Monotonic clock reading in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Milliseconds(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Radians(pub f32);

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Degrees(pub f32);

/// Angular velocity magnitude in radians per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RadiansPerSecond(pub f32);

// Common frame timing constants
pub const FRAME_60: Seconds = Seconds(1.0 / 60.0);
pub const FRAME_30: Seconds = Seconds(1.0 / 30.0);
pub const FRAME_120: Seconds = Seconds(1.0 / 120.0);

impl Deref for Seconds {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Milliseconds {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Radians {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Degrees {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for RadiansPerSecond {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Seconds {
    pub fn from_millis(millis: f32) -> Self {
        Self(millis / 1000.0)
    }

    pub fn to_millis(&self) -> f32 {
        self.0 * 1000.0
    }

    /// Number of 60Hz frames this span covers, used to make per-frame factors rate independent
    pub fn frames_at_60(&self) -> f32 {
        self.0 * 60.0
    }

    pub fn is_usable(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Seconds) {
        self.0 += rhs.0;
    }
}

impl Mul<f32> for Seconds {
    type Output = Seconds;
    fn mul(self, rhs: f32) -> Seconds {
        Seconds(self.0 * rhs)
    }
}

impl Milliseconds {
    pub fn to_seconds(&self) -> Seconds {
        Seconds((self.0 / 1000.0) as f32)
    }
}

impl Sub for Milliseconds {
    type Output = Milliseconds;
    fn sub(self, rhs: Milliseconds) -> Milliseconds {
        Milliseconds(self.0 - rhs.0)
    }
}

impl Add for Milliseconds {
    type Output = Milliseconds;
    fn add(self, rhs: Milliseconds) -> Milliseconds {
        Milliseconds(self.0 + rhs.0)
    }
}

impl Radians {
    /// Normalize into the half-open range (-π, π]
    pub fn wrapped(&self) -> Radians {
        let mut angle = self.0 % TAU;
        if angle > PI {
            angle -= TAU;
        } else if angle <= -PI {
            angle += TAU;
        }
        Radians(angle)
    }

    /// Delta from `self` to `to`, corrected for the jump at ±π.
    pub fn shortest_delta(&self, to: Radians) -> Radians {
        let mut delta = to.0 - self.0;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }
        Radians(delta)
    }

    pub fn per(&self, elapsed: Seconds) -> f32 {
        self.0 / elapsed.0
    }
}

impl Degrees {
    pub fn to_radians(&self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

impl std::fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}ms", self.0)
    }
}

impl std::fmt::Display for Radians {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}rad", self.0)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

impl std::fmt::Display for RadiansPerSecond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}rad/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_conversions() {
        let dt = Seconds::from_millis(16.0);
        assert!((dt.0 - 0.016).abs() < 1e-7);
        assert!((dt.to_millis() - 16.0).abs() < 1e-4);

        let clock = Milliseconds(2500.0);
        assert_eq!(clock.to_seconds(), Seconds(2.5));
        assert_eq!((Milliseconds(30.0) - Milliseconds(20.0)).0, 10.0);
    }

    #[test]
    fn test_frames_at_60() {
        assert!((FRAME_60.frames_at_60() - 1.0).abs() < 1e-6);
        assert!((FRAME_30.frames_at_60() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_usable_seconds() {
        assert!(FRAME_60.is_usable());
        assert!(!Seconds(-0.1).is_usable());
        assert!(!Seconds(f32::NAN).is_usable());
        assert!(!Seconds(f32::INFINITY).is_usable());
    }

    #[test]
    fn test_wrapped() {
        assert!((Radians(PI + 0.1).wrapped().0 - (-PI + 0.1)).abs() < 1e-5);
        assert!((Radians(-PI - 0.1).wrapped().0 - (PI - 0.1)).abs() < 1e-5);
        assert!((Radians(5.0 * TAU + 0.5).wrapped().0 - 0.5).abs() < 1e-4);
        assert_eq!(Radians(PI).wrapped(), Radians(PI));
    }

    #[test]
    fn test_shortest_delta_across_seam() {
        let delta = Radians(3.13).shortest_delta(Radians(-3.13));
        assert!(delta.0 > 0.0, "crossing +π forward should be positive: {}", delta);
        assert!((delta.0 - (TAU - 6.26)).abs() < 1e-4);

        let back = Radians(-3.13).shortest_delta(Radians(3.13));
        assert!(back.0 < 0.0);
        assert!((back.0 + delta.0).abs() < 1e-5);
    }

    #[test]
    fn test_shortest_delta_plain() {
        let delta = Radians(0.2).shortest_delta(Radians(0.5));
        assert!((delta.0 - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_degrees() {
        assert!((Degrees(180.0).to_radians().0 - PI).abs() < 1e-6);
        assert_eq!(format!("{}", Degrees(45.0)), "45.0°");
    }
}
