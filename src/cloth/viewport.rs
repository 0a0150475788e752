use glam::FloatExt;

use crate::cloth::config::Containment;
use crate::units::Radians;

/// Horizontal room the garment has before it leaves the camera's view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub half_width: f32,
    pub half_depth: f32,
}

impl ViewportBounds {
    pub fn from_camera(fov: Radians, distance: f32, containment: &Containment) -> Self {
        Self {
            half_width: distance * (fov.0 / 2.0).tan() * containment.viewport_margin,
            half_depth: distance * containment.viewport_depth,
        }
    }

    /// Bounds open up while the swing still has energy, `relax` 0 being full energy
    pub fn at_relax(&self, relax: f32, containment: &Containment) -> Self {
        let expansion = containment.viewport_expansion.lerp(1.0, relax);
        Self {
            half_width: self.half_width * expansion,
            half_depth: self.half_depth * expansion,
        }
    }

    /// Factor in (0, 1] that brings an x/z offset back inside the bounds
    pub fn fit(&self, x: f32, z: f32) -> f32 {
        let mut factor: f32 = 1.0;
        if x.abs() > self.half_width {
            factor = factor.min(self.half_width / x.abs());
        }
        if z.abs() > self.half_depth {
            factor = factor.min(self.half_depth / z.abs());
        }
        factor
    }
}
