use glam::Vec3;

/// Undeformed vertex positions, captured once and never touched again.
///
/// Every frame is computed from this snapshot, so deformation can not drift.
#[derive(Debug, Clone)]
pub struct RestPose {
    positions: Vec<Vec3>,
    bottom: f32,
    top: f32,
}

impl RestPose {
    pub fn capture(positions: &[Vec3]) -> Self {
        let (bottom, top) = positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(low, high), p| (low.min(p.y), high.max(p.y)));
        let (bottom, top) = if positions.is_empty() { (0.0, 0.0) } else { (bottom, top) };
        Self {
            positions: positions.to_vec(),
            bottom,
            top,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// 0 at the hem, 1 at the top. A flat mesh sits halfway.
    pub fn height_factor(&self, y: f32) -> f32 {
        let height = self.height();
        if height <= f32::EPSILON {
            return 0.5;
        }
        ((y - self.bottom) / height).clamp(0.0, 1.0)
    }
}
