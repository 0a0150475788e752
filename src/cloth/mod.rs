/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use glam::Vec2;
use log::{debug, info, warn};

use crate::cloth::config::ClothConfig;
use crate::cloth::drape::{drape_vertex, DrapeInputs};
use crate::cloth::frame_time::FrameClock;
use crate::cloth::rest_pose::RestPose;
use crate::cloth::twist::TwistState;
use crate::cloth::viewport::ViewportBounds;
use crate::mesh::MeshHost;
use crate::rotation::RotationSignal;
use crate::units::Seconds;

pub mod config;
pub mod drape;
pub mod frame_time;
pub mod rest_pose;
pub mod twist;
pub mod viewport;

/// Simulated seconds between debug reports
const REPORT_INTERVAL: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameReport {
    /// No drawable mesh yet, nothing happened
    Skipped,
    Updated { vertices: usize },
}

/// Drives one garment's vertices from the orbit rotation, frame by frame.
///
/// The engine lazily snapshots the rest pose the first time the host can hand
/// out a position buffer, and from then on rewrites every vertex each frame as
/// a function of that snapshot and its own scalar state.
#[derive(Debug, Clone)]
pub struct ClothMotion {
    config: ClothConfig,
    rest_pose: Option<RestPose>,
    clock: FrameClock,
    state: TwistState,
    viewport: Option<ViewportBounds>,
    last_inputs: Option<DrapeInputs>,
    shape_warned: bool,
    next_report: f32,
}

impl Default for ClothMotion {
    fn default() -> Self {
        Self::new(ClothConfig::default())
    }
}

impl ClothMotion {
    pub fn new(config: ClothConfig) -> Self {
        Self {
            config,
            rest_pose: None,
            clock: FrameClock::default(),
            state: TwistState::default(),
            viewport: None,
            last_inputs: None,
            shape_warned: false,
            next_report: REPORT_INTERVAL,
        }
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn state(&self) -> &TwistState {
        &self.state
    }

    pub fn rest_pose(&self) -> Option<&RestPose> {
        self.rest_pose.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.rest_pose.is_some()
    }

    pub fn simulation_time(&self) -> Seconds {
        self.clock.simulation_time()
    }

    /// Camera-derived bounds for the twist, `None` to rely on radial containment alone
    pub fn set_viewport(&mut self, viewport: Option<ViewportBounds>) {
        self.viewport = viewport;
    }

    pub fn update(&mut self, host: &mut dyn MeshHost, signal: &RotationSignal, raw_delta: Seconds) -> FrameReport {
        let Some(buffer) = host.find_position_buffer() else {
            return FrameReport::Skipped;
        };
        if self.rest_pose.is_none() {
            buffer.set_dynamic_usage();
            info!("Cloth motion initialized with {} vertices", buffer.positions().len());
            self.rest_pose = Some(RestPose::capture(buffer.positions()));
        }
        let Some(rest_pose) = self.rest_pose.as_ref() else {
            return FrameReport::Skipped;
        };
        let live = buffer.positions_mut();
        if live.len() != rest_pose.len() && !self.shape_warned {
            warn!(
                "Position buffer has {} vertices, rest pose has {}; keeping the rest pose",
                live.len(),
                rest_pose.len()
            );
            self.shape_warned = true;
        }

        let dt = self.clock.advance(raw_delta, &self.config.frame);
        self.state.advance(signal, dt, &self.config.twist, &self.config.swing);
        let inputs = self.drape_inputs(signal);
        for (vertex, rest) in live.iter_mut().zip(rest_pose.positions()) {
            let height_factor = rest_pose.height_factor(rest.y);
            *vertex = drape_vertex(*rest, height_factor, &inputs, &self.config);
        }
        let vertices = live.len().min(rest_pose.len());
        self.last_inputs = Some(inputs);
        buffer.mark_dirty();
        buffer.recompute_normals();

        if self.clock.simulation_time().0 >= self.next_report {
            self.next_report += REPORT_INTERVAL;
            debug!(
                "Cloth {} twist={:.4} energy={:.4} relax={:.2} wind={:.3}",
                self.state.phase(),
                inputs.twist,
                self.state.oscillation.energy,
                inputs.relax,
                inputs.wind
            );
        }
        FrameReport::Updated { vertices }
    }

    /// Twist limit for deformation, looser while swinging so the release reads clearly
    pub fn twist_limit(&self) -> f32 {
        let max_twist = self.config.twist.max_twist;
        if self.state.is_swinging() {
            max_twist * 2.0
        } else {
            max_twist
        }
    }

    fn drape_inputs(&self, signal: &RotationSignal) -> DrapeInputs {
        let wind = &self.config.wind;
        let driven = self.state.is_driven();
        let active_wind = if driven {
            self.config.twist.mapped_speed(*signal.angular_speed) * wind.active * wind.intensity
        } else {
            0.0
        };
        let limit = self.twist_limit();
        let relax = self.state.relax();
        DrapeInputs {
            time: self.clock.simulation_time().0,
            twist: self.state.twist.clamp(-limit, limit),
            relax,
            wind: wind.idle + active_wind,
            secondary: if driven { 0.0 } else { wind.secondary },
            viewport: self.viewport.map(|bounds| bounds.at_relax(relax, &self.config.containment)),
        }
    }

    /// Largest ratio of drawn radial distance to rest radial distance over the last frame's pose.
    ///
    /// Useful for checking containment from the outside; 1.0 before the first update.
    pub fn max_radial_stretch(&self) -> f32 {
        let (Some(rest_pose), Some(inputs)) = (&self.rest_pose, &self.last_inputs) else {
            return 1.0;
        };
        rest_pose
            .positions()
            .iter()
            .filter_map(|rest| {
                let distance = Vec2::new(rest.x, rest.z).length();
                if distance < drape::DEGENERATE_RADIUS {
                    return None;
                }
                let draped = drape_vertex(*rest, rest_pose.height_factor(rest.y), inputs, &self.config);
                Some(Vec2::new(draped.x, draped.z).length() / distance)
            })
            .fold(1.0, f32::max)
    }
}
