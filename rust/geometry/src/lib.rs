// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BCF-Lite Geometry
//!
//! Reconstructs camera poses and clipping planes from decoded BCF
//! viewpoints, in the host's unit system, using nalgebra.

pub mod camera;
pub mod clipping;
pub mod reconstruct;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use camera::{CameraPose, ViewCamera};
pub use clipping::ClippingPlane;
pub use reconstruct::{reconstruct, reconstruct_with, ReconstructOptions, ReconstructedViewpoint};
pub use transform::{normalize_or_keep, to_point3, to_vector3};
