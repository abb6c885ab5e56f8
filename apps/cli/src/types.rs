// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON report types printed by the importer.

use bcf_lite_core::LineSegment2D;
use bcf_lite_geometry::{CameraPose, ClippingPlane, ViewCamera};
use bcf_lite_processing::ImportReport;
use serde::Serialize;

/// Full import report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Archive that was imported.
    pub archive: String,
    /// Host unit the geometry is expressed in.
    pub unit: String,
    /// Meters-to-host scale factor.
    pub scale: f64,
    /// Viewpoints applied to the viewport, in archive order.
    pub views: Vec<ViewSummary>,
    /// Entries that failed to decode.
    pub failures: Vec<FailureSummary>,
    /// Overlay state after the import.
    pub overlay: Option<OverlaySummary>,
    /// Total processing time (ms).
    pub total_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    pub entry: String,
    pub name: String,
    /// "perspective", "orthogonal" or "none"
    pub projection: &'static str,
    pub camera: Option<CameraSummary>,
    pub clipping_planes: Vec<PlaneSummary>,
    pub lines: Vec<LineSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSummary {
    pub location: [f64; 3],
    pub direction: [f64; 3],
    pub up_vector: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_view: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_to_world_scale: Option<f64>,
    /// Direction and up vector are collinear
    pub degenerate: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaneSummary {
    pub location: [f64; 3],
    pub direction: [f64; 3],
    pub extent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSummary {
    pub start: [i32; 2],
    pub end: [i32; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub entry: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlaySummary {
    pub title: String,
    pub enabled: bool,
    pub lines: usize,
}

impl ImportSummary {
    pub fn from_report(archive: &str, report: &ImportReport, clip_extent: f64) -> Self {
        Self {
            archive: archive.to_string(),
            unit: format!("{:?}", report.unit),
            scale: report.scale,
            views: report
                .applied
                .iter()
                .map(|applied| {
                    let camera = &applied.geometry.camera;
                    ViewSummary {
                        entry: applied.entry.clone(),
                        name: applied.view_name.clone(),
                        projection: projection_name(camera),
                        camera: camera.pose().map(CameraSummary::from),
                        clipping_planes: applied
                            .geometry
                            .clipping_planes
                            .iter()
                            .map(|p| PlaneSummary::new(p, clip_extent))
                            .collect(),
                        lines: applied.geometry.lines.iter().map(LineSummary::from).collect(),
                    }
                })
                .collect(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureSummary {
                    entry: f.entry.clone(),
                    error: f.kind.to_string(),
                })
                .collect(),
            overlay: None,
            total_time_ms: 0,
        }
    }
}

fn projection_name(camera: &ViewCamera) -> &'static str {
    match camera {
        ViewCamera::Perspective(_) => "perspective",
        ViewCamera::Orthogonal(_) => "orthogonal",
        ViewCamera::None => "none",
    }
}

impl From<&CameraPose> for CameraSummary {
    fn from(pose: &CameraPose) -> Self {
        Self {
            location: pose.location.coords.into(),
            direction: pose.direction.into(),
            up_vector: pose.up_vector.into(),
            field_of_view: pose.field_of_view,
            view_to_world_scale: pose.view_to_world_scale,
            degenerate: pose.is_degenerate(),
        }
    }
}

impl PlaneSummary {
    fn new(plane: &ClippingPlane, extent: f64) -> Self {
        Self {
            location: plane.location.coords.into(),
            direction: plane.direction.into(),
            extent,
        }
    }
}

impl From<&LineSegment2D> for LineSummary {
    fn from(line: &LineSegment2D) -> Self {
        Self {
            start: [line.start.x, line.start.y],
            end: [line.end.x, line.end.y],
        }
    }
}
