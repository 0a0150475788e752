/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Per-vertex deformation.
//!
//! A vertex's new position depends only on its rest position and a handful of
//! scalars, never on where it was drawn last frame.

use std::f32::consts::FRAC_PI_4;

use glam::{FloatExt, Vec2, Vec3};

use crate::cloth::config::ClothConfig;
use crate::cloth::viewport::ViewportBounds;

/// Vertices closer than this to the center axis have no usable twist direction
pub const DEGENERATE_RADIUS: f32 = 1e-3;

/// The frame-wide scalars every vertex shares
#[derive(Debug, Clone, Copy, Default)]
pub struct DrapeInputs {
    pub time: f32,
    /// Twist after the per-use clamp
    pub twist: f32,
    pub relax: f32,
    pub wind: f32,
    pub secondary: f32,
    pub viewport: Option<ViewportBounds>,
}

pub fn drape_vertex(rest: Vec3, height_factor: f32, inputs: &DrapeInputs, config: &ClothConfig) -> Vec3 {
    let free = 1.0 - height_factor;
    let wave = ambient_wave(rest, free, inputs.time, inputs.wind, inputs.secondary);
    let mut twist = twist_displacement(rest, height_factor, inputs, config);
    if let Some(bounds) = inputs.viewport {
        twist *= bounds.fit(rest.x + wave.x + twist.x, rest.z + wave.z + twist.y);
    }
    let radial = Vec2::new(rest.x, rest.z);
    let mut horizontal = radial + Vec2::new(wave.x, wave.z) + twist;
    let distance = radial.length();
    if distance >= DEGENERATE_RADIUS {
        horizontal = radial_band(horizontal, distance, stretch_tolerance(inputs.relax, config));
    }
    let drape = &config.drape;
    let gravity = free * drape.gravity + inputs.twist.abs() * free * drape.twist_gravity;
    Vec3::new(horizontal.x, rest.y + wave.y - gravity, horizontal.y)
}

/// Idle rippling, continuous across the mesh because the phase comes from the rest position.
pub fn ambient_wave(rest: Vec3, free: f32, time: f32, wind: f32, secondary: f32) -> Vec3 {
    let t1 = time * 2.0 + rest.y * 1.2;
    let t2 = time * 1.6 + rest.z;
    let t3 = time * 1.8 + rest.x * 0.8;
    let slow = (time * 0.8 + rest.x * 0.3).sin() * secondary;
    Vec3::new(
        t1.sin() * 0.14 * wind + slow,
        (t2 + FRAC_PI_4).sin() * 0.08 * wind + slow * 0.5,
        t3.cos() * 0.11 * wind + slow * 0.7,
    ) * free
}

/// Horizontal (x, z) displacement from twisting about the vertical axis, already contained.
pub fn twist_displacement(rest: Vec3, height_factor: f32, inputs: &DrapeInputs, config: &ClothConfig) -> Vec2 {
    let radial = Vec2::new(rest.x, rest.z);
    let distance = radial.length();
    if distance < DEGENERATE_RADIUS || inputs.twist == 0.0 {
        return Vec2::ZERO;
    }
    let drape = &config.drape;
    let free = 1.0 - height_factor;
    let tether = (distance / drape.tether_radius).min(1.0);
    let angle = inputs.twist * free.powf(drape.twist_falloff) * (1.0 - tether * 0.6);
    let flow = (0.25 + free * 0.75) * (1.0 - tether * 0.4);
    let displacement = (Vec2::from_angle(angle).rotate(radial) - radial) * flow;
    contain(radial, distance, displacement, inputs.relax, config)
}

/// Limit a displacement so the twisted vertex stays within its radial band.
pub fn contain(radial: Vec2, distance: f32, displacement: Vec2, relax: f32, config: &ClothConfig) -> Vec2 {
    let containment = &config.containment;
    let reach = containment.displacement_full.lerp(containment.displacement_rest, relax);
    let displacement = displacement.clamp_length_max(distance * reach);
    radial_band(radial + displacement, distance, stretch_tolerance(relax, config)) - radial
}

/// Allowed stretch factor, loosest at full energy (`relax` 0)
pub fn stretch_tolerance(relax: f32, config: &ClothConfig) -> f32 {
    let containment = &config.containment;
    containment.stretch_full.lerp(containment.stretch_rest, relax)
}

/// Pull a horizontal position back into `[distance / tolerance, distance * tolerance]` from the axis.
pub fn radial_band(position: Vec2, distance: f32, tolerance: f32) -> Vec2 {
    let radius = position.length();
    let (low, high) = (distance / tolerance, distance * tolerance);
    if radius > high {
        position * (high / radius)
    } else if radius < low && radius > DEGENERATE_RADIUS {
        position * (low / radius)
    } else {
        position
    }
}
