/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Tunables for the cloth motion.
//!
//! None of these are physical units. They were tuned by eye and should be
//! treated as presets to adjust visually, not as authoritative values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ClothError;
use crate::units::{Seconds, FRAME_120, FRAME_30, FRAME_60};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTiming {
    pub min_delta: Seconds,
    pub max_delta: Seconds,
    pub target_delta: Seconds,
    /// Successive blend passes pulling the clamped delta toward the target
    pub blend: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Ambient wave strength when nothing is happening
    pub idle: f32,
    /// Extra wind per unit of mapped orbit speed while driven
    pub active: f32,
    pub intensity: f32,
    /// Slow secondary wave, only while not driven
    pub secondary: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwistMapping {
    /// Below this speed the orbit does not drive the cloth at all
    pub activity_floor: f32,
    pub dead_zone: f32,
    pub max_mapped_speed: f32,
    pub scale: f32,
    pub max_twist: f32,
    /// Exponential approach rate toward the target twist, per second
    pub response: f32,
}

impl TwistMapping {
    /// Orbit speed past the dead zone, capped at `max_mapped_speed`
    pub fn mapped_speed(&self, angular_speed: f32) -> f32 {
        (angular_speed - self.dead_zone).clamp(0.0, self.max_mapped_speed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub energy_scale: f32,
    pub energy_exponent: f32,
    /// Energy at or below this counts as spent
    pub energy_floor: f32,
    pub kick: f32,
    pub spring: f32,
    /// Velocity retention per 60Hz frame
    pub damping: f32,
    /// Energy retention per 60Hz frame
    pub decay: f32,
    pub amplifier: f32,
    /// Rate at which leftover twist fades once the energy is spent, per second
    pub settle_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Containment {
    /// Displacement limit as a fraction of radial distance, at full energy
    pub displacement_full: f32,
    pub displacement_rest: f32,
    /// Allowed radial stretch factor, at full energy
    pub stretch_full: f32,
    pub stretch_rest: f32,
    /// Fraction of the visible half width the garment may use
    pub viewport_margin: f32,
    /// Visible half depth as a fraction of camera distance
    pub viewport_depth: f32,
    /// How much the viewport bounds open up at full energy
    pub viewport_expansion: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drape {
    /// Exponent concentrating the twist toward the hem
    pub twist_falloff: f32,
    pub gravity: f32,
    pub twist_gravity: f32,
    /// Radial distance at which axis tethering is strongest
    pub tether_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClothConfig {
    pub frame: FrameTiming,
    pub wind: Wind,
    pub twist: TwistMapping,
    pub swing: Swing,
    pub containment: Containment,
    pub drape: Drape,
}

impl Default for ClothConfig {
    fn default() -> Self {
        presets::CANONICAL
    }
}

impl ClothConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClothError> {
        let text = fs::read_to_string(path).map_err(ClothError::ConfigRead)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ClothError> {
        let config: ClothConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ClothError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        let FrameTiming { min_delta, max_delta, target_delta, blend } = self.frame;
        check(*min_delta > 0.0, "frame.min_delta must be positive")?;
        check(min_delta <= max_delta, "frame.min_delta exceeds frame.max_delta")?;
        check(
            min_delta <= target_delta && target_delta <= max_delta,
            "frame.target_delta outside the delta bounds",
        )?;
        check(blend.iter().all(|b| *b > 0.0 && *b < 1.0), "frame.blend factors must lie in (0, 1)")?;
        check(self.wind.idle >= 0.0 && self.wind.intensity >= 0.0, "wind must not be negative")?;
        let twist = &self.twist;
        check(twist.dead_zone >= 0.0, "twist.dead_zone must not be negative")?;
        check(twist.max_mapped_speed > 0.0, "twist.max_mapped_speed must be positive")?;
        check(twist.max_twist > 0.0, "twist.max_twist must be positive")?;
        check(twist.response > 0.0, "twist.response must be positive")?;
        let swing = &self.swing;
        check(swing.energy_floor > 0.0, "swing.energy_floor must be positive")?;
        check(swing.spring > 0.0, "swing.spring must be positive")?;
        check(swing.damping > 0.0 && swing.damping <= 1.0, "swing.damping must lie in (0, 1]")?;
        check(swing.decay > 0.0 && swing.decay <= 1.0, "swing.decay must lie in (0, 1]")?;
        check(swing.settle_rate > 0.0, "swing.settle_rate must be positive")?;
        let containment = &self.containment;
        check(
            0.0 < containment.displacement_rest && containment.displacement_rest <= containment.displacement_full,
            "containment displacement bounds out of order",
        )?;
        check(
            1.0 <= containment.stretch_rest && containment.stretch_rest <= containment.stretch_full,
            "containment stretch bounds out of order",
        )?;
        check(containment.viewport_expansion >= 1.0, "containment.viewport_expansion below 1")?;
        check(self.drape.twist_falloff > 0.0, "drape.twist_falloff must be positive")?;
        check(self.drape.tether_radius > 0.0, "drape.tether_radius must be positive")?;
        Ok(())
    }

    /// The most radial stretch any configuration state allows
    pub fn loosest_stretch(&self) -> f32 {
        self.containment.stretch_full
    }
}

fn check(condition: bool, reason: &str) -> Result<(), ClothError> {
    if condition {
        Ok(())
    } else {
        Err(ClothError::InvalidConfig(reason.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Preset {
    #[default]
    Canonical,
    Silk,
    Denim,
}

impl Preset {
    pub fn config(self) -> ClothConfig {
        match self {
            Preset::Canonical => presets::CANONICAL,
            Preset::Silk => presets::SILK,
            Preset::Denim => presets::DENIM,
        }
    }
}

pub mod presets {
    use super::*;

    pub const CANONICAL: ClothConfig = ClothConfig {
        frame: FrameTiming {
            min_delta: FRAME_120,
            max_delta: FRAME_30,
            target_delta: FRAME_60,
            blend: [0.15, 0.3, 0.5],
        },
        wind: Wind {
            idle: 0.32,
            active: 0.4,
            intensity: 1.0,
            secondary: 0.05,
        },
        twist: TwistMapping {
            activity_floor: 0.001,
            dead_zone: 0.015,
            max_mapped_speed: 0.09,
            scale: 0.15,
            max_twist: 0.45,
            response: 4.0,
        },
        swing: Swing {
            energy_scale: 0.5,
            energy_exponent: 1.5,
            energy_floor: 1e-4,
            kick: 20.0,
            spring: 180.0,
            damping: 0.93,
            decay: 0.99,
            amplifier: 2.2,
            settle_rate: 6.0,
        },
        containment: Containment {
            displacement_full: 0.8,
            displacement_rest: 0.25,
            stretch_full: 1.5,
            stretch_rest: 1.05,
            viewport_margin: 0.7,
            viewport_depth: 0.15,
            viewport_expansion: 1.4,
        },
        drape: Drape {
            twist_falloff: 2.0,
            gravity: 0.4,
            twist_gravity: 0.2,
            tether_radius: 2.0,
        },
    };

    pub const SILK: ClothConfig = ClothConfig {
        wind: Wind {
            idle: 0.35,
            ..CANONICAL.wind
        },
        twist: TwistMapping {
            max_mapped_speed: 0.12,
            scale: 0.18,
            max_twist: 0.6,
            response: 3.0,
            ..CANONICAL.twist
        },
        swing: Swing {
            spring: 150.0,
            damping: 0.96,
            decay: 0.995,
            amplifier: 2.5,
            ..CANONICAL.swing
        },
        ..CANONICAL
    };

    pub const DENIM: ClothConfig = ClothConfig {
        wind: Wind {
            idle: 0.25,
            secondary: 0.02,
            ..CANONICAL.wind
        },
        twist: TwistMapping {
            max_mapped_speed: 0.06,
            scale: 0.1,
            max_twist: 0.3,
            response: 6.0,
            ..CANONICAL.twist
        },
        swing: Swing {
            spring: 200.0,
            damping: 0.9,
            decay: 0.985,
            amplifier: 2.0,
            settle_rate: 8.0,
            ..CANONICAL.swing
        },
        drape: Drape {
            gravity: 0.3,
            ..CANONICAL.drape
        },
        ..CANONICAL
    };
}
