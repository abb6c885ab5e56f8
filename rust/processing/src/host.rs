// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interfaces the host application provides to the importer

use bcf_lite_core::{HostUnit, LineSegment2D};
use bcf_lite_geometry::{Point3, Vector3};

/// The host's active 3D viewport and its named-view registry
pub trait ViewportHost {
    /// Save the current projection so the import can be undone.
    fn push_view_projection(&mut self) {}

    fn set_camera_location(&mut self, location: Point3<f64>);

    fn set_camera_direction(&mut self, direction: Vector3<f64>);

    fn set_camera_up(&mut self, up: Vector3<f64>);

    /// `true` switches to parallel (orthogonal) projection
    fn set_parallel_projection(&mut self, parallel: bool);

    /// Vertical field of view in degrees
    fn set_field_of_view(&mut self, _degrees: f64) {}

    /// Store the current camera under `name`. Collision handling is up to
    /// the host.
    fn register_named_view(&mut self, name: &str);

    fn add_clipping_plane(
        &mut self,
        location: Point3<f64>,
        direction: Vector3<f64>,
        extent_x: f64,
        extent_y: f64,
    );
}

/// Query for the host document's length unit
pub trait UnitSystemHost {
    fn current_unit(&self) -> HostUnit;
}

/// Screen overlay drawing the viewpoint title and annotation lines
pub trait OverlayRenderer {
    /// Replace the overlay content
    fn set_overlay(&mut self, title: &str, lines: &[LineSegment2D]);

    fn set_overlay_enabled(&mut self, enabled: bool);
}

/// Everything the importer needs from a host
pub trait Host: ViewportHost + UnitSystemHost + OverlayRenderer {}

impl<T: ViewportHost + UnitSystemHost + OverlayRenderer> Host for T {}
