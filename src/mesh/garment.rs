use std::f32::consts::TAU;

use glam::Vec3;

use crate::mesh::PositionBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferUsage {
    #[default]
    Static,
    Dynamic,
}

/// An in-memory indexed triangle mesh standing in for a renderer's geometry.
#[derive(Debug, Clone, Default)]
pub struct GarmentMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    usage: BufferUsage,
    version: u64,
}

impl GarmentMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut mesh = Self {
            normals: vec![Vec3::ZERO; positions.len()],
            positions,
            indices,
            ..Self::default()
        };
        mesh.recompute_normals();
        mesh
    }

    /// A flared tube hanging around the y axis, top ring first.
    pub fn skirt(rings: usize, segments: usize, radius: f32, height: f32) -> Self {
        let mut positions = Vec::with_capacity(rings * segments);
        for ring in 0..rings {
            let t = if rings > 1 { ring as f32 / (rings - 1) as f32 } else { 0.0 };
            let y = height / 2.0 - t * height;
            let flare = radius * (1.0 + 0.3 * t);
            for segment in 0..segments {
                let angle = TAU * segment as f32 / segments as f32;
                positions.push(Vec3::new(angle.cos() * flare, y, angle.sin() * flare));
            }
        }
        let mut indices = Vec::new();
        for ring in 0..rings.saturating_sub(1) {
            for segment in 0..segments {
                let next = (segment + 1) % segments;
                let a = (ring * segments + segment) as u32;
                let b = (ring * segments + next) as u32;
                let c = ((ring + 1) * segments + segment) as u32;
                let d = ((ring + 1) * segments + next) as u32;
                indices.extend_from_slice(&[a, b, c, b, d, c]);
            }
        }
        Self::new(positions, indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Bumped every time the positions are marked dirty
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Raw position data, ready for upload to a vertex buffer
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

impl PositionBuffer for GarmentMesh {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    fn mark_dirty(&mut self) {
        self.version += 1;
    }

    /// Area-weighted vertex normals
    fn recompute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);
        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let (Some(pa), Some(pb), Some(pc)) = (self.positions.get(a), self.positions.get(b), self.positions.get(c))
            else {
                continue;
            };
            let face = (*pb - *pa).cross(*pc - *pa);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }

    fn set_dynamic_usage(&mut self) {
        self.usage = BufferUsage::Dynamic;
    }
}
