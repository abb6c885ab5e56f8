// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewpoint clipping planes

use nalgebra::{Point3, Vector3};

/// Half-space boundary from a viewpoint
///
/// The direction is kept as authored. How large the plane is drawn is up
/// to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingPlane {
    /// Point on the plane (host units)
    pub location: Point3<f64>,
    /// Plane normal
    pub direction: Vector3<f64>,
}

impl ClippingPlane {
    pub fn new(location: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            location,
            direction,
        }
    }
}
