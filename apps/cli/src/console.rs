// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Headless host that keeps viewport state in memory and logs every call.

use crate::types::OverlaySummary;
use bcf_lite_core::{HostUnit, LineSegment2D};
use bcf_lite_geometry::{Point3, Vector3};
use bcf_lite_processing::{OverlayRenderer, UnitSystemHost, ViewportHost};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    location: Point3<f64>,
    direction: Vector3<f64>,
    up: Vector3<f64>,
    parallel: bool,
    field_of_view: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            location: Point3::new(0.0, 0.0, 10.0),
            direction: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            parallel: false,
            field_of_view: 50.0,
        }
    }
}

/// In-memory stand-in for a CAD viewport
#[derive(Debug, Default)]
pub struct ConsoleHost {
    unit: HostUnit,
    current: Projection,
    /// Projections saved by `push_view_projection`
    history: Vec<Projection>,
    named_views: Vec<(String, Projection)>,
    clipping_planes: usize,
    overlay_title: Option<String>,
    overlay_lines: usize,
    overlay_enabled: bool,
}

impl ConsoleHost {
    pub fn new(unit: HostUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn overlay_summary(&self) -> Option<OverlaySummary> {
        self.overlay_title.as_ref().map(|title| OverlaySummary {
            title: title.clone(),
            enabled: self.overlay_enabled,
            lines: self.overlay_lines,
        })
    }

    pub fn named_view_count(&self) -> usize {
        self.named_views.len()
    }

    pub fn clipping_plane_count(&self) -> usize {
        self.clipping_planes
    }

    pub fn saved_projections(&self) -> usize {
        self.history.len()
    }
}

impl ViewportHost for ConsoleHost {
    fn push_view_projection(&mut self) {
        self.history.push(self.current);
    }

    fn set_camera_location(&mut self, location: Point3<f64>) {
        tracing::debug!(x = location.x, y = location.y, z = location.z, "Camera location");
        self.current.location = location;
    }

    fn set_camera_direction(&mut self, direction: Vector3<f64>) {
        tracing::debug!(x = direction.x, y = direction.y, z = direction.z, "Camera direction");
        self.current.direction = direction;
    }

    fn set_camera_up(&mut self, up: Vector3<f64>) {
        tracing::debug!(x = up.x, y = up.y, z = up.z, "Camera up");
        self.current.up = up;
    }

    fn set_parallel_projection(&mut self, parallel: bool) {
        self.current.parallel = parallel;
    }

    fn set_field_of_view(&mut self, degrees: f64) {
        self.current.field_of_view = degrees;
    }

    fn register_named_view(&mut self, name: &str) {
        // Same name twice replaces the earlier view
        self.named_views.retain(|(existing, _)| existing != name);
        self.named_views.push((name.to_string(), self.current));
        tracing::info!(view = name, "Registered named view");
    }

    fn add_clipping_plane(
        &mut self,
        location: Point3<f64>,
        direction: Vector3<f64>,
        extent_x: f64,
        extent_y: f64,
    ) {
        tracing::debug!(
            location = ?location,
            direction = ?direction,
            extent_x,
            extent_y,
            "Clipping plane"
        );
        self.clipping_planes += 1;
    }
}

impl UnitSystemHost for ConsoleHost {
    fn current_unit(&self) -> HostUnit {
        self.unit
    }
}

impl OverlayRenderer for ConsoleHost {
    fn set_overlay(&mut self, title: &str, lines: &[LineSegment2D]) {
        self.overlay_title = Some(title.to_string());
        self.overlay_lines = lines.len();
    }

    fn set_overlay_enabled(&mut self, enabled: bool) {
        self.overlay_enabled = enabled;
    }
}
