use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::cloth::config::Containment;
use crate::cloth::viewport::ViewportBounds;
use crate::units::{Degrees, Radians};

const LOOK_AT: Vec3 = Vec3::ZERO;
const DRAG_SPEED: Degrees = Degrees(0.5);

/// Orbit around the garment, horizontal only: no zoom, no pan, the polar angle
/// is pinned to the horizon.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    azimuth: Radians,
    pub distance: f32,
    pub fov: Degrees,
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(8.5, Degrees(45.0))
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, fov: Degrees) -> Self {
        Self {
            azimuth: Radians(0.0),
            distance,
            fov,
            aspect: 1.0,
        }
    }

    pub fn rotate(&mut self, delta: Radians) {
        self.azimuth = Radians(self.azimuth.0 + delta.0).wrapped();
    }

    /// Pointer drag in pixels turned into orbit
    pub fn drag(&mut self, dx: f32) {
        self.rotate(Degrees(-dx * DRAG_SPEED.0).to_radians());
    }

    /// Always within (-π, π]
    pub fn azimuth(&self) -> Radians {
        self.azimuth
    }

    pub fn position(&self) -> Vec3 {
        let polar = FRAC_PI_2;
        LOOK_AT
            + Vec3::new(
                self.distance * polar.sin() * self.azimuth.0.sin(),
                self.distance * polar.cos(),
                self.distance * polar.sin() * self.azimuth.0.cos(),
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), LOOK_AT, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians().0, self.aspect, 0.1, 1000.0)
    }

    pub fn mvp_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn viewport_bounds(&self, containment: &Containment) -> ViewportBounds {
        ViewportBounds::from_camera(self.fov.to_radians(), self.distance, containment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloth::config::presets::CANONICAL;
    use std::f32::consts::PI;

    #[test]
    fn test_azimuth_wraps() {
        let mut camera = OrbitCamera::default();
        for _ in 0..40 {
            camera.rotate(Radians(0.3));
            let azimuth = camera.azimuth().0;
            assert!(azimuth > -PI && azimuth <= PI, "{azimuth}");
        }
    }

    #[test]
    fn test_stays_on_horizon() {
        let mut camera = OrbitCamera::default();
        camera.rotate(Radians(1.0));
        let position = camera.position();
        assert!(position.y.abs() < 1e-5);
        assert!((position.length() - 8.5).abs() < 1e-4);
    }

    #[test]
    fn test_drag_direction() {
        let mut camera = OrbitCamera::default();
        camera.drag(-10.0);
        assert!((camera.azimuth().0 - 5.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_viewport_follows_camera() {
        let near = OrbitCamera::new(4.0, Degrees(45.0)).viewport_bounds(&CANONICAL.containment);
        let far = OrbitCamera::new(8.5, Degrees(45.0)).viewport_bounds(&CANONICAL.containment);
        assert!(far.half_width > near.half_width);
        assert!((far.half_depth - 8.5 * 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_mvp_is_finite() {
        let camera = OrbitCamera::default();
        assert!(camera.mvp_matrix().is_finite());
    }
}
