/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use glam::Vec3;

pub use crate::mesh::garment::{BufferUsage, GarmentMesh};

pub mod garment;

/// A vertex position buffer the cloth engine may rewrite in place.
pub trait PositionBuffer {
    fn positions(&self) -> &[Vec3];

    fn positions_mut(&mut self) -> &mut [Vec3];

    /// The buffer changed and must be uploaded again
    fn mark_dirty(&mut self);

    fn recompute_normals(&mut self);

    /// Hint that the buffer will change every frame
    fn set_dynamic_usage(&mut self) {}
}

/// Whatever owns the drawable garment, able to hand out its position buffer.
pub trait MeshHost {
    /// The first drawable with a non-empty position buffer, if any yet
    fn find_position_buffer(&mut self) -> Option<&mut dyn PositionBuffer>;
}

/// A node in a small scene graph, possibly carrying a drawable mesh.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub mesh: Option<GarmentMesh>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: GarmentMesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first, parents before children
    pub fn first_drawable(&self) -> Option<&GarmentMesh> {
        if let Some(mesh) = self.mesh.as_ref().filter(|mesh| !mesh.is_empty()) {
            return Some(mesh);
        }
        self.children.iter().find_map(SceneNode::first_drawable)
    }

    pub fn first_drawable_mut(&mut self) -> Option<&mut GarmentMesh> {
        if self.mesh.as_ref().is_some_and(|mesh| !mesh.is_empty()) {
            return self.mesh.as_mut();
        }
        self.children.iter_mut().find_map(SceneNode::first_drawable_mut)
    }
}

impl MeshHost for SceneNode {
    fn find_position_buffer(&mut self) -> Option<&mut dyn PositionBuffer> {
        self.first_drawable_mut().map(|mesh| mesh as &mut dyn PositionBuffer)
    }
}

impl MeshHost for GarmentMesh {
    fn find_position_buffer(&mut self) -> Option<&mut dyn PositionBuffer> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
