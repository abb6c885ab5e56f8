// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera poses in host units

use nalgebra::{Point3, Vector3};

/// Camera location and orientation, ready for a host viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position (host units)
    pub location: Point3<f64>,
    /// View direction (not necessarily unit length)
    pub direction: Vector3<f64>,
    /// Up vector (not necessarily unit length)
    pub up_vector: Vector3<f64>,
    /// Vertical field of view in degrees, perspective only
    pub field_of_view: Option<f64>,
    /// Visible extent in host units, orthogonal only
    pub view_to_world_scale: Option<f64>,
    pub aspect_ratio: Option<f64>,
}

impl CameraPose {
    /// Direction and up vector are (nearly) collinear, or one is zero
    ///
    /// Such a pose has no defined roll; hosts either reject it or produce
    /// a degenerate view.
    pub fn is_degenerate(&self) -> bool {
        let d = self.direction.norm();
        let u = self.up_vector.norm();
        if d < 1e-12 || u < 1e-12 {
            return true;
        }
        // |d x u| = |d||u| sin(theta)
        self.direction.cross(&self.up_vector).norm() / (d * u) < 1e-9
    }
}

/// The camera a viewpoint asks for
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewCamera {
    Perspective(CameraPose),
    /// Parallel projection
    Orthogonal(CameraPose),
    #[default]
    None,
}

impl ViewCamera {
    pub fn pose(&self) -> Option<&CameraPose> {
        match self {
            ViewCamera::Perspective(pose) | ViewCamera::Orthogonal(pose) => Some(pose),
            ViewCamera::None => None,
        }
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        matches!(self, ViewCamera::Orthogonal(_))
    }
}
