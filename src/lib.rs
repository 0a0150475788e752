/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Cloth motion for a rotating garment preview.
//!
//! The orbit angle is sampled once per frame by the [`rotation::RotationTracker`],
//! and [`cloth::ClothMotion`] turns the resulting signal into a draped, twisting,
//! swinging pose written straight into the host's vertex buffer.

pub mod camera;
pub mod cloth;
pub mod error;
pub mod mesh;
pub mod rotation;
pub mod trace;
pub mod units;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use cloth::config::{ClothConfig, Preset};
pub use cloth::{ClothMotion, FrameReport};
pub use error::ClothError;
pub use mesh::{GarmentMesh, MeshHost, PositionBuffer, SceneNode};
pub use rotation::{Direction, RotationSignal, RotationTracker};
