// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewpoint reconstruction
//!
//! Turns a decoded [`Viewpoint`] (meters, raw triples) into geometry in
//! host units: a [`ViewCamera`], a list of [`ClippingPlane`]s and the
//! overlay lines, which are screen-space and pass through unchanged.

use crate::camera::{CameraPose, ViewCamera};
use crate::clipping::ClippingPlane;
use crate::transform::{normalize_or_keep, to_point3, to_vector3};
use bcf_lite_core::{CameraData, ClippingPlaneData, LineSegment2D, Viewpoint};
use nalgebra::Vector3;

/// Reconstruction options
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconstructOptions {
    /// Normalize direction and up vectors (and plane normals)
    pub normalize_directions: bool,
}

/// Geometry derived from one viewpoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconstructedViewpoint {
    pub camera: ViewCamera,
    pub clipping_planes: Vec<ClippingPlane>,
    pub lines: Vec<LineSegment2D>,
}

/// Reconstruct with default options
pub fn reconstruct(viewpoint: &Viewpoint, scale: f64) -> ReconstructedViewpoint {
    reconstruct_with(viewpoint, scale, ReconstructOptions::default())
}

/// Reconstruct a viewpoint in host units
///
/// When a viewpoint carries both cameras the perspective one is used.
pub fn reconstruct_with(
    viewpoint: &Viewpoint,
    scale: f64,
    options: ReconstructOptions,
) -> ReconstructedViewpoint {
    let camera = match (&viewpoint.perspective_camera, &viewpoint.orthogonal_camera) {
        (Some(cam), _) => ViewCamera::Perspective(camera_pose(cam, scale, options)),
        (None, Some(cam)) => ViewCamera::Orthogonal(camera_pose(cam, scale, options)),
        (None, None) => ViewCamera::None,
    };

    if let Some(pose) = camera.pose() {
        if pose.is_degenerate() {
            tracing::warn!(
                direction = ?pose.direction,
                up = ?pose.up_vector,
                "Camera direction and up vector are collinear"
            );
        }
    }

    ReconstructedViewpoint {
        camera,
        clipping_planes: viewpoint
            .clipping_planes
            .iter()
            .map(|plane| clipping_plane(plane, scale, options))
            .collect(),
        lines: viewpoint.lines.clone(),
    }
}

fn camera_pose(cam: &CameraData, scale: f64, options: ReconstructOptions) -> CameraPose {
    CameraPose {
        location: to_point3(&cam.view_point, scale),
        direction: direction(to_vector3(&cam.direction), options),
        up_vector: direction(to_vector3(&cam.up_vector), options),
        field_of_view: cam.field_of_view,
        view_to_world_scale: cam.view_to_world_scale.map(|s| s * scale),
        aspect_ratio: cam.aspect_ratio,
    }
}

fn clipping_plane(
    plane: &ClippingPlaneData,
    scale: f64,
    options: ReconstructOptions,
) -> ClippingPlane {
    ClippingPlane::new(
        to_point3(&plane.location, scale),
        direction(to_vector3(&plane.direction), options),
    )
}

#[inline]
fn direction(v: Vector3<f64>, options: ReconstructOptions) -> Vector3<f64> {
    if options.normalize_directions {
        normalize_or_keep(v)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bcf_lite_core::{ScreenPoint, Triple};
    use nalgebra::{Point3, Vector3};

    fn camera(view_point: Triple, direction: Triple, up: Triple) -> CameraData {
        CameraData {
            view_point,
            direction,
            up_vector: up,
            field_of_view: None,
            view_to_world_scale: None,
            aspect_ratio: None,
        }
    }

    fn sample() -> Viewpoint {
        Viewpoint {
            perspective_camera: Some(CameraData {
                field_of_view: Some(60.0),
                ..camera(
                    Triple::new(1.5, -2.25, 10.0),
                    Triple::new(0.0, 0.0, -2.0),
                    Triple::new(0.0, 1.0, 0.0),
                )
            }),
            orthogonal_camera: None,
            clipping_planes: vec![ClippingPlaneData {
                location: Triple::new(1.0, 2.0, 3.0),
                direction: Triple::new(0.0, 0.0, 1.0),
            }],
            lines: vec![LineSegment2D {
                start: ScreenPoint::new(1, 2),
                end: ScreenPoint::new(3, 4),
            }],
        }
    }

    #[test]
    fn test_unit_scale_round_trip() {
        let vp = sample();
        let r = reconstruct(&vp, 1.0);

        let ViewCamera::Perspective(pose) = r.camera else {
            panic!("Expected perspective camera");
        };
        assert_relative_eq!(pose.location, Point3::new(1.5, -2.25, 10.0));
        assert_relative_eq!(pose.direction, Vector3::new(0.0, 0.0, -2.0));
        assert_relative_eq!(pose.up_vector, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(pose.field_of_view, Some(60.0));

        assert_eq!(r.clipping_planes.len(), 1);
        assert_relative_eq!(r.clipping_planes[0].location, Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(r.clipping_planes[0].direction, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(r.lines, vp.lines);
    }

    #[test]
    fn test_scaling_is_linear() {
        let vp = sample();
        let base = reconstruct(&vp, 1.0);
        for k in [0.000621371, 0.5, 3.28084, 39.3701, 1000.0] {
            let scaled = reconstruct(&vp, k);
            let (a, b) = (base.camera.pose().unwrap(), scaled.camera.pose().unwrap());
            assert_relative_eq!(b.location, a.location * k, epsilon = 1e-9);
            assert_relative_eq!(b.direction, a.direction);
            assert_relative_eq!(b.up_vector, a.up_vector);
            assert_relative_eq!(
                scaled.clipping_planes[0].location,
                base.clipping_planes[0].location * k,
                epsilon = 1e-9
            );
            assert_eq!(scaled.lines, base.lines);
        }
    }

    #[test]
    fn test_perspective_wins_over_orthogonal() {
        let mut vp = sample();
        vp.orthogonal_camera = Some(camera(
            Triple::new(0.0, 0.0, 99.0),
            Triple::new(0.0, 0.0, -1.0),
            Triple::new(0.0, 1.0, 0.0),
        ));
        assert!(matches!(reconstruct(&vp, 1.0).camera, ViewCamera::Perspective(_)));

        vp.perspective_camera = None;
        let r = reconstruct(&vp, 2.0);
        let ViewCamera::Orthogonal(pose) = r.camera else {
            panic!("Expected orthogonal camera");
        };
        assert_relative_eq!(pose.location, Point3::new(0.0, 0.0, 198.0));
    }

    #[test]
    fn test_view_to_world_scale_is_scaled() {
        let vp = Viewpoint {
            orthogonal_camera: Some(CameraData {
                view_to_world_scale: Some(20.0),
                ..camera(Triple::default(), Triple::new(0.0, 0.0, -1.0), Triple::new(0.0, 1.0, 0.0))
            }),
            ..Viewpoint::default()
        };
        let r = reconstruct(&vp, 1000.0);
        assert_eq!(r.camera.pose().unwrap().view_to_world_scale, Some(20000.0));
    }

    #[test]
    fn test_empty_viewpoint() {
        let r = reconstruct(&Viewpoint::default(), 1000.0);
        assert_eq!(r.camera, ViewCamera::None);
        assert!(r.clipping_planes.is_empty());
        assert!(r.lines.is_empty());
    }

    #[test]
    fn test_normalize_directions() {
        let r = reconstruct_with(
            &sample(),
            1.0,
            ReconstructOptions {
                normalize_directions: true,
            },
        );
        let pose = r.camera.pose().unwrap();
        assert_relative_eq!(pose.direction, Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(pose.location, Point3::new(1.5, -2.25, 10.0));
    }
}
