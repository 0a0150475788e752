use glam::FloatExt;

use crate::cloth::config::FrameTiming;
use crate::units::Seconds;

/// Simulation clock fed by raw frame deltas.
///
/// Deltas are clamped to the configured window and then smoothed toward the
/// target frame time, so a hitch or a backgrounded tab never reaches the
/// integrator as a spike.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    simulation_time: Seconds,
}

impl FrameClock {
    pub fn stabilize(raw: Seconds, timing: &FrameTiming) -> Seconds {
        let FrameTiming { min_delta, max_delta, target_delta, blend } = *timing;
        let raw = if raw.is_usable() { raw } else { target_delta };
        let clamped = raw.0.clamp(min_delta.0, max_delta.0);
        let toward_target = clamped.lerp(target_delta.0, blend[0]);
        let second = clamped.lerp(toward_target, blend[1]);
        Seconds(clamped.lerp(second, blend[2]))
    }

    pub fn advance(&mut self, raw: Seconds, timing: &FrameTiming) -> Seconds {
        let delta = Self::stabilize(raw, timing);
        self.simulation_time += delta;
        delta
    }

    pub fn simulation_time(&self) -> Seconds {
        self.simulation_time
    }
}
