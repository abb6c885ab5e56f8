// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded viewpoint model
//!
//! Values are kept exactly as authored: locations in meters, directions
//! as given (not necessarily unit length). Scaling happens later, during
//! geometry reconstruction.

/// An {X, Y, Z} triple from a viewpoint document
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Triple {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Camera block as found under PerspectiveCamera or OrthogonalCamera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    /// CameraViewPoint (meters)
    pub view_point: Triple,
    /// CameraDirection
    pub direction: Triple,
    /// CameraUpVector
    pub up_vector: Triple,
    /// Vertical field of view in degrees (perspective cameras)
    pub field_of_view: Option<f64>,
    /// Visible extent in meters (orthogonal cameras)
    pub view_to_world_scale: Option<f64>,
    /// Width / height of the view (BCF 3.0)
    pub aspect_ratio: Option<f64>,
}

/// A clipping plane: a point on the plane and its normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingPlaneData {
    /// Location (meters)
    pub location: Triple,
    pub direction: Triple,
}

/// Point in overlay screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Overlay annotation line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSegment2D {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

/// Everything decoded from one `.bcfv` entry
///
/// Both camera blocks may be present; consumers treat the perspective
/// camera as primary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Viewpoint {
    pub perspective_camera: Option<CameraData>,
    pub orthogonal_camera: Option<CameraData>,
    pub clipping_planes: Vec<ClippingPlaneData>,
    pub lines: Vec<LineSegment2D>,
}
