/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use log::info;

use crate::camera::OrbitCamera;
use crate::cloth::config::ClothConfig;
use crate::cloth::{ClothMotion, FrameReport};
use crate::mesh::SceneNode;
use crate::rotation::{RotationSignal, RotationTracker};
use crate::units::{Milliseconds, Seconds};

/// One rotating garment preview: camera, tracker, engine and the scene it deforms.
///
/// Each frame the rotation is sampled first, then the engine rewrites the
/// mesh, and only then is the frame ready to present.
pub struct GarmentViewer {
    pub camera: OrbitCamera,
    tracker: RotationTracker,
    engine: ClothMotion,
    scene: Option<SceneNode>,
    config: ClothConfig,
    last_signal: RotationSignal,
}

impl GarmentViewer {
    pub fn new(camera: OrbitCamera, config: ClothConfig) -> Self {
        Self {
            camera,
            tracker: RotationTracker::new(),
            engine: ClothMotion::new(config),
            scene: None,
            config,
            last_signal: RotationSignal::still(),
        }
    }

    /// The model finished loading, possibly well after the first frames
    pub fn attach(&mut self, scene: SceneNode) {
        info!("Attached scene '{}'", scene.name);
        self.scene = Some(scene);
    }

    /// Tear down: the mesh and all simulation state go away together
    pub fn detach(&mut self) -> Option<SceneNode> {
        self.engine = ClothMotion::new(self.config);
        self.tracker.reset();
        self.last_signal = RotationSignal::still();
        self.scene.take()
    }

    pub fn frame(&mut self, now: Milliseconds, raw_delta: Seconds) -> FrameReport {
        self.last_signal = self.tracker.sample(self.camera.azimuth(), now);
        let Some(scene) = self.scene.as_mut() else {
            return FrameReport::Skipped;
        };
        let bounds = self.camera.viewport_bounds(&self.config.containment);
        self.engine.set_viewport(Some(bounds));
        self.engine.update(scene, &self.last_signal, raw_delta)
    }

    pub fn engine(&self) -> &ClothMotion {
        &self.engine
    }

    pub fn scene(&self) -> Option<&SceneNode> {
        self.scene.as_ref()
    }

    pub fn last_signal(&self) -> RotationSignal {
        self.last_signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::GarmentMesh;
    use crate::units::{Radians, FRAME_60};

    fn run(viewer: &mut GarmentViewer, frames: usize, clock: &mut f64, spin: f32) {
        for _ in 0..frames {
            viewer.camera.rotate(Radians(spin));
            *clock += 1000.0 / 60.0;
            viewer.frame(Milliseconds(*clock), FRAME_60);
        }
    }

    #[test]
    fn test_late_attach() {
        let mut viewer = GarmentViewer::new(OrbitCamera::default(), ClothConfig::default());
        let mut clock = 0.0;
        run(&mut viewer, 5, &mut clock, 0.0);
        assert!(!viewer.engine().is_initialized());
        viewer.attach(SceneNode::with_mesh("dress", GarmentMesh::skirt(4, 8, 1.0, 4.0)));
        run(&mut viewer, 1, &mut clock, 0.0);
        assert!(viewer.engine().is_initialized());
        let version = viewer.scene().and_then(SceneNode::first_drawable).map(GarmentMesh::version);
        assert_eq!(version, Some(1));
    }

    #[test]
    fn test_spinning_camera_drives_cloth() {
        let mut viewer = GarmentViewer::new(OrbitCamera::default(), ClothConfig::default());
        viewer.attach(SceneNode::with_mesh("dress", GarmentMesh::skirt(4, 8, 1.0, 4.0)));
        let mut clock = 0.0;
        run(&mut viewer, 60, &mut clock, 0.02);
        assert!(viewer.last_signal().is_moving);
        assert!(viewer.engine().state().is_driven());
        assert!(viewer.engine().state().twist > 0.0);
    }

    #[test]
    fn test_detach_resets() {
        let mut viewer = GarmentViewer::new(OrbitCamera::default(), ClothConfig::default());
        viewer.attach(SceneNode::with_mesh("dress", GarmentMesh::skirt(4, 8, 1.0, 4.0)));
        let mut clock = 0.0;
        run(&mut viewer, 3, &mut clock, 0.0);
        assert!(viewer.detach().is_some());
        assert!(!viewer.engine().is_initialized());
        assert_eq!(viewer.frame(Milliseconds(clock + 20.0), FRAME_60), FrameReport::Skipped);
    }
}
