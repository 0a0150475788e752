//! Browser bindings.
//!
//! The JavaScript renderer owns the geometry. It hands the position array in
//! every frame and, when `step` returns true, flags the attribute for upload
//! and recomputes normals itself.

use std::str::FromStr;

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::cloth::config::Preset;
use crate::cloth::ClothMotion;
use crate::mesh::{MeshHost, PositionBuffer};
use crate::rotation::{RotationSignal, RotationTracker};
use crate::units::{Milliseconds, Radians, Seconds};

#[wasm_bindgen(start)]
pub fn start() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger was already initialized");
    }
}

/// A position array borrowed from JavaScript for the length of one step
struct BorrowedBuffer<'a> {
    positions: &'a mut [Vec3],
    dirty: bool,
}

impl PositionBuffer for BorrowedBuffer<'_> {
    fn positions(&self) -> &[Vec3] {
        &*self.positions
    }

    fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut *self.positions
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn recompute_normals(&mut self) {
        // left to the renderer once `step` returns
    }
}

impl MeshHost for BorrowedBuffer<'_> {
    fn find_position_buffer(&mut self) -> Option<&mut dyn PositionBuffer> {
        if self.positions.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[wasm_bindgen]
pub struct WasmClothMotion {
    engine: ClothMotion,
    tracker: RotationTracker,
    signal: RotationSignal,
}

#[wasm_bindgen]
impl WasmClothMotion {
    /// Unknown preset names fall back to the canonical preset.
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Self {
        let preset = Preset::from_str(preset).unwrap_or_default();
        Self {
            engine: ClothMotion::new(preset.config()),
            tracker: RotationTracker::new(),
            signal: RotationSignal::still(),
        }
    }

    /// Feed the orbit controls' azimuthal angle once per frame.
    pub fn sample(&mut self, angle: f32, timestamp_ms: f64) {
        self.signal = self.tracker.sample(Radians(angle), Milliseconds(timestamp_ms));
    }

    /// Rewrite `positions` (x, y, z triples). Returns true when the buffer changed.
    pub fn step(&mut self, delta_seconds: f32, positions: &mut [f32]) -> bool {
        let Ok(positions) = bytemuck::try_cast_slice_mut::<f32, Vec3>(positions) else {
            return false;
        };
        let mut buffer = BorrowedBuffer { positions, dirty: false };
        self.engine.update(&mut buffer, &self.signal, Seconds(delta_seconds));
        buffer.dirty
    }

    #[wasm_bindgen(getter)]
    pub fn twist(&self) -> f32 {
        self.engine.state().twist
    }

    #[wasm_bindgen(getter)]
    pub fn energy(&self) -> f32 {
        self.engine.state().oscillation.energy
    }
}
