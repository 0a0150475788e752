/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use serde::Serialize;
use strum::Display;

use crate::cloth::config::{Swing, TwistMapping};
use crate::rotation::RotationSignal;
use crate::units::Seconds;

/// Frame-rate independent exponential approach factor
pub fn approach(rate: f32, dt: Seconds) -> f32 {
    1.0 - (-rate * dt.0).exp()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum Phase {
    /// The orbit is turning and pulls the twist along
    Driven,
    /// Released, the spring is swinging the stored energy out
    Swinging,
    #[default]
    AtRest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub energy: f32,
    pub initial_energy: f32,
    pub velocity: f32,
    pub position: f32,
    pub active: bool,
}

impl Default for Oscillation {
    fn default() -> Self {
        Self {
            energy: 0.0,
            initial_energy: 1.0,
            velocity: 0.0,
            position: 0.0,
            active: false,
        }
    }
}

/// The scalar state behind the fabric's rotational deformation.
#[derive(Debug, Clone, Default)]
pub struct TwistState {
    pub twist: f32,
    pub oscillation: Oscillation,
    /// Angular speed at the last driven frame, the seed for the next swing
    pub last_angular_speed: f32,
    phase: Phase,
}

impl TwistState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_driven(&self) -> bool {
        self.phase == Phase::Driven
    }

    pub fn is_swinging(&self) -> bool {
        self.phase == Phase::Swinging
    }

    /// 0 while the swing is at full energy, 1 once it has died out
    pub fn relax(&self) -> f32 {
        let Oscillation { energy, initial_energy, .. } = self.oscillation;
        if initial_energy <= 0.0 {
            return 1.0;
        }
        (1.0 - energy / initial_energy).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, signal: &RotationSignal, dt: Seconds, mapping: &TwistMapping, swing: &Swing) {
        let speed = *signal.angular_speed;
        if signal.is_moving && speed > mapping.activity_floor {
            self.drive(signal, dt, mapping);
        } else {
            self.release(dt, swing);
        }
    }

    /// Target twist for an orbit speed, saturating at `max_twist`
    pub fn target_twist(signal: &RotationSignal, mapping: &TwistMapping) -> f32 {
        let adjusted = mapping.mapped_speed(*signal.angular_speed);
        signal.direction.sign() * (adjusted * mapping.scale).min(mapping.max_twist)
    }

    fn drive(&mut self, signal: &RotationSignal, dt: Seconds, mapping: &TwistMapping) {
        let target = Self::target_twist(signal, mapping);
        let step = approach(mapping.response, dt);
        self.twist = (self.twist + (target - self.twist) * step).clamp(-mapping.max_twist, mapping.max_twist);
        self.last_angular_speed = *signal.angular_speed;
        self.oscillation.active = false;
        self.oscillation.energy = 0.0;
        self.phase = Phase::Driven;
    }

    fn release(&mut self, dt: Seconds, swing: &Swing) {
        if self.phase == Phase::Driven {
            self.seed(swing);
        }
        if self.oscillation.active {
            self.swing(dt, swing);
        }
        if !self.oscillation.active {
            let step = approach(swing.settle_rate, dt);
            let oscillation = &mut self.oscillation;
            oscillation.energy = 0.0;
            oscillation.velocity = 0.0;
            oscillation.position -= oscillation.position * step;
            self.twist -= self.twist * step;
            self.phase = Phase::AtRest;
        }
    }

    fn seed(&mut self, swing: &Swing) {
        let energy = (self.last_angular_speed.abs().powf(swing.energy_exponent) * swing.energy_scale)
            .max(swing.energy_floor);
        self.oscillation = Oscillation {
            energy,
            initial_energy: energy,
            velocity: self.twist * swing.kick,
            position: self.twist,
            active: true,
        };
        self.phase = Phase::Swinging;
    }

    fn swing(&mut self, dt: Seconds, swing: &Swing) {
        let frames = dt.frames_at_60();
        let oscillation = &mut self.oscillation;
        oscillation.velocity += -oscillation.position * swing.spring * dt.0;
        oscillation.velocity *= swing.damping.powf(frames);
        oscillation.position += oscillation.velocity * dt.0;
        oscillation.energy *= swing.decay.powf(frames);
        if oscillation.energy <= swing.energy_floor {
            oscillation.active = false;
            return;
        }
        self.twist = oscillation.position * oscillation.energy * swing.amplifier;
        self.phase = Phase::Swinging;
    }
}
