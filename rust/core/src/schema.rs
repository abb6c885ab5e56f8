// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VisualizationInfo XML schema
//!
//! Serde mirror of the subset of the buildingSMART VisualizationInfo
//! schema (BCF 2.0, 2.1 and 3.0) needed for cameras, clipping planes and
//! lines. Elements not listed here are skipped, so newer schema revisions
//! still decode. Unknown elements may also sit between the items of a
//! collection (the `overlapped-lists` quick-xml feature). Every number must
//! be finite.
//!
//! See <https://github.com/buildingSMART/BCF-XML/tree/release_3_0/Schemas>

use crate::viewpoint::{
    CameraData, ClippingPlaneData, LineSegment2D, ScreenPoint, Triple, Viewpoint,
};
use serde::{Deserialize, Deserializer};

/// Root element name
pub const ROOT_ELEMENT: &str = "VisualizationInfo";

#[derive(Debug, Deserialize)]
pub(crate) struct XmlVisualizationInfo {
    #[serde(rename = "PerspectiveCamera", default)]
    perspective_camera: Option<XmlCamera>,
    #[serde(rename = "OrthogonalCamera", default)]
    orthogonal_camera: Option<XmlCamera>,
    #[serde(rename = "ClippingPlanes", default)]
    clipping_planes: Option<XmlClippingPlanes>,
    #[serde(rename = "Lines", default)]
    lines: Option<XmlLines>,
}

#[derive(Debug, Deserialize)]
struct XmlCamera {
    #[serde(rename = "CameraViewPoint")]
    view_point: XmlTriple,
    #[serde(rename = "CameraDirection")]
    direction: XmlTriple,
    #[serde(rename = "CameraUpVector")]
    up_vector: XmlTriple,
    #[serde(rename = "FieldOfView", default, deserialize_with = "finite_opt")]
    field_of_view: Option<f64>,
    #[serde(rename = "ViewToWorldScale", default, deserialize_with = "finite_opt")]
    view_to_world_scale: Option<f64>,
    #[serde(rename = "AspectRatio", default, deserialize_with = "finite_opt")]
    aspect_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct XmlTriple {
    #[serde(rename = "X", deserialize_with = "finite")]
    x: f64,
    #[serde(rename = "Y", deserialize_with = "finite")]
    y: f64,
    #[serde(rename = "Z", deserialize_with = "finite")]
    z: f64,
}

#[derive(Debug, Default, Deserialize)]
struct XmlClippingPlanes {
    #[serde(rename = "ClippingPlane", default)]
    planes: Vec<XmlClippingPlane>,
}

#[derive(Debug, Deserialize)]
struct XmlClippingPlane {
    #[serde(rename = "Location")]
    location: XmlTriple,
    #[serde(rename = "Direction")]
    direction: XmlTriple,
}

#[derive(Debug, Default, Deserialize)]
struct XmlLines {
    #[serde(rename = "Line", default)]
    lines: Vec<XmlLine>,
}

#[derive(Debug, Deserialize)]
struct XmlLine {
    #[serde(rename = "StartPoint")]
    start: XmlScreenPoint,
    #[serde(rename = "EndPoint")]
    end: XmlScreenPoint,
}

/// Line end point. A third (Z) coordinate, as written by some exporters,
/// is ignored.
#[derive(Debug, Deserialize)]
struct XmlScreenPoint {
    #[serde(rename = "X", deserialize_with = "finite")]
    x: f64,
    #[serde(rename = "Y", deserialize_with = "finite")]
    y: f64,
}

/// `f64` that rejects `NaN` and infinities, which `str::parse` accepts
fn finite<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    check_finite(f64::deserialize(deserializer)?)
}

fn finite_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Option::<f64>::deserialize(deserializer)?
        .map(check_finite)
        .transpose()
}

fn check_finite<E: serde::de::Error>(value: f64) -> Result<f64, E> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(E::custom(format!("non-finite number {value}")))
    }
}

impl From<XmlTriple> for Triple {
    fn from(t: XmlTriple) -> Self {
        Triple::new(t.x, t.y, t.z)
    }
}

impl From<XmlCamera> for CameraData {
    fn from(c: XmlCamera) -> Self {
        CameraData {
            view_point: c.view_point.into(),
            direction: c.direction.into(),
            up_vector: c.up_vector.into(),
            field_of_view: c.field_of_view,
            view_to_world_scale: c.view_to_world_scale,
            aspect_ratio: c.aspect_ratio,
        }
    }
}

impl From<XmlScreenPoint> for ScreenPoint {
    fn from(p: XmlScreenPoint) -> Self {
        // `as` saturates on overflow
        ScreenPoint::new(p.x.round() as i32, p.y.round() as i32)
    }
}

impl From<XmlVisualizationInfo> for Viewpoint {
    fn from(info: XmlVisualizationInfo) -> Self {
        Viewpoint {
            perspective_camera: info.perspective_camera.map(Into::into),
            orthogonal_camera: info.orthogonal_camera.map(Into::into),
            clipping_planes: info
                .clipping_planes
                .unwrap_or_default()
                .planes
                .into_iter()
                .map(|p| ClippingPlaneData {
                    location: p.location.into(),
                    direction: p.direction.into(),
                })
                .collect(),
            lines: info
                .lines
                .unwrap_or_default()
                .lines
                .into_iter()
                .map(|l| LineSegment2D {
                    start: l.start.into(),
                    end: l.end.into(),
                })
                .collect(),
        }
    }
}
