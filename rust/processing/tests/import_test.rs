// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end import tests against a recording host.

use bcf_lite_core::{HostUnit, LineSegment2D, ScreenPoint};
use bcf_lite_geometry::{Point3, Vector3, ViewCamera};
use bcf_lite_processing::{
    ApplierState, ImportConfig, ImportError, OverlayRenderer, UnitSystemHost, ViewpointApplier,
    ViewportHost,
};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    PushProjection,
    Location(Point3<f64>),
    Direction(Vector3<f64>),
    Up(Vector3<f64>),
    Parallel(bool),
    FieldOfView(f64),
    NamedView(String),
    ClippingPlane(Point3<f64>, Vector3<f64>, f64, f64),
    Overlay(String, Vec<LineSegment2D>),
    OverlayEnabled(bool),
}

struct RecordingHost {
    unit: HostUnit,
    calls: Vec<Call>,
}

impl RecordingHost {
    fn new(unit: HostUnit) -> Self {
        Self {
            unit,
            calls: Vec::new(),
        }
    }

    fn named_views(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::NamedView(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    fn planes(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::ClippingPlane(..)))
            .collect()
    }
}

impl ViewportHost for RecordingHost {
    fn push_view_projection(&mut self) {
        self.calls.push(Call::PushProjection);
    }

    fn set_camera_location(&mut self, location: Point3<f64>) {
        self.calls.push(Call::Location(location));
    }

    fn set_camera_direction(&mut self, direction: Vector3<f64>) {
        self.calls.push(Call::Direction(direction));
    }

    fn set_camera_up(&mut self, up: Vector3<f64>) {
        self.calls.push(Call::Up(up));
    }

    fn set_parallel_projection(&mut self, parallel: bool) {
        self.calls.push(Call::Parallel(parallel));
    }

    fn set_field_of_view(&mut self, degrees: f64) {
        self.calls.push(Call::FieldOfView(degrees));
    }

    fn register_named_view(&mut self, name: &str) {
        self.calls.push(Call::NamedView(name.to_string()));
    }

    fn add_clipping_plane(
        &mut self,
        location: Point3<f64>,
        direction: Vector3<f64>,
        extent_x: f64,
        extent_y: f64,
    ) {
        self.calls
            .push(Call::ClippingPlane(location, direction, extent_x, extent_y));
    }
}

impl UnitSystemHost for RecordingHost {
    fn current_unit(&self) -> HostUnit {
        self.unit
    }
}

impl OverlayRenderer for RecordingHost {
    fn set_overlay(&mut self, title: &str, lines: &[LineSegment2D]) {
        self.calls.push(Call::Overlay(title.to_string(), lines.to_vec()));
    }

    fn set_overlay_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::OverlayEnabled(enabled));
    }
}

const PERSPECTIVE_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VisualizationInfo>
  <PerspectiveCamera>
    <CameraViewPoint><X>0</X><Y>0</Y><Z>10</Z></CameraViewPoint>
    <CameraDirection><X>0</X><Y>0</Y><Z>-1</Z></CameraDirection>
    <CameraUpVector><X>0</X><Y>1</Y><Z>0</Z></CameraUpVector>
    <FieldOfView>60</FieldOfView>
  </PerspectiveCamera>
</VisualizationInfo>"#;

const CLIPPING_ONLY: &str = r#"<VisualizationInfo>
  <ClippingPlanes>
    <ClippingPlane>
      <Location><X>1</X><Y>2</Y><Z>3</Z></Location>
      <Direction><X>0</X><Y>0</Y><Z>1</Z></Direction>
    </ClippingPlane>
  </ClippingPlanes>
</VisualizationInfo>"#;

const ORTHOGONAL_WITH_LINES: &str = r#"<VisualizationInfo>
  <OrthogonalCamera>
    <CameraViewPoint><X>5</X><Y>5</Y><Z>20</Z></CameraViewPoint>
    <CameraDirection><X>0</X><Y>0</Y><Z>-1</Z></CameraDirection>
    <CameraUpVector><X>0</X><Y>1</Y><Z>0</Z></CameraUpVector>
    <ViewToWorldScale>12</ViewToWorldScale>
  </OrthogonalCamera>
  <Lines>
    <Line>
      <StartPoint><X>0</X><Y>0</Y></StartPoint>
      <EndPoint><X>100</X><Y>50</Y></EndPoint>
    </Line>
  </Lines>
</VisualizationInfo>"#;

fn write_archive(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    let path = dir.join(file_name);
    std::fs::write(&path, zip.finish().unwrap().into_inner()).unwrap();
    path
}

fn applier(dir: &TempDir) -> ViewpointApplier {
    ViewpointApplier::new(ImportConfig {
        extract_dir: dir.path().join("extract"),
        ..ImportConfig::default()
    })
}

#[test]
fn perspective_camera_in_meters() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(dir.path(), "issues.bcfzip", &[("A.bcfv", PERSPECTIVE_A)]);
    let mut host = RecordingHost::new(HostUnit::Meters);

    let report = applier(&dir).run(&archive, &mut host).unwrap();

    assert_eq!(report.scale, 1.0);
    assert_eq!(report.applied.len(), 1);
    assert!(report.failures.is_empty());
    assert_eq!(
        host.calls,
        vec![
            Call::PushProjection,
            Call::Up(Vector3::new(0.0, 1.0, 0.0)),
            Call::Location(Point3::new(0.0, 0.0, 10.0)),
            Call::Direction(Vector3::new(0.0, 0.0, -1.0)),
            Call::Parallel(false),
            Call::FieldOfView(60.0),
            Call::NamedView("A".to_string()),
            Call::Overlay("A".to_string(), Vec::new()),
            Call::OverlayEnabled(false),
        ]
    );
}

#[test]
fn perspective_camera_in_millimeters() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(dir.path(), "issues.bcfzip", &[("A.bcfv", PERSPECTIVE_A)]);
    let mut host = RecordingHost::new(HostUnit::Millimeters);

    let report = applier(&dir).run(&archive, &mut host).unwrap();

    assert_eq!(report.scale, 1000.0);
    assert!(host
        .calls
        .contains(&Call::Location(Point3::new(0.0, 0.0, 10000.0))));
    // Directions are never scaled
    assert!(host
        .calls
        .contains(&Call::Direction(Vector3::new(0.0, 0.0, -1.0))));
}

#[test]
fn clipping_plane_uses_default_extent() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(dir.path(), "clip.bcf", &[("C.bcfv", CLIPPING_ONLY)]);
    let mut host = RecordingHost::new(HostUnit::Meters);

    applier(&dir).run(&archive, &mut host).unwrap();

    assert_eq!(
        host.planes(),
        vec![&Call::ClippingPlane(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 0.0, 1.0),
            100.0,
            100.0
        )]
    );
    // No camera in the entry, so no camera calls
    assert!(!host
        .calls
        .iter()
        .any(|c| matches!(c, Call::Location(_) | Call::Parallel(_))));
    assert_eq!(host.named_views(), ["C"]);
}

#[test]
fn clipping_plane_extent_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(dir.path(), "clip.bcf", &[("C.bcfv", CLIPPING_ONLY)]);
    let mut host = RecordingHost::new(HostUnit::Centimeters);

    let mut applier = ViewpointApplier::new(ImportConfig {
        extract_dir: dir.path().join("extract"),
        clip_extent: 250.0,
        ..ImportConfig::default()
    });
    applier.run(&archive, &mut host).unwrap();

    assert_eq!(
        host.planes(),
        vec![&Call::ClippingPlane(
            Point3::new(100.0, 200.0, 300.0),
            Vector3::new(0.0, 0.0, 1.0),
            250.0,
            250.0
        )]
    );
}

#[test]
fn malformed_entry_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(
        dir.path(),
        "mixed.bcfzip",
        &[
            ("t1/broken.bcfv", "<VisualizationInfo><PerspectiveCamera>"),
            ("t2/good.bcfv", PERSPECTIVE_A),
        ],
    );
    let mut host = RecordingHost::new(HostUnit::Meters);
    let mut applier = applier(&dir);

    let report = applier.run(&archive, &mut host).unwrap();

    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].entry, "t2/good.bcfv");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entry, "t1/broken.bcfv");
    assert_eq!(host.named_views(), ["t2-good"]);
    assert_eq!(applier.state(), ApplierState::Done);
}

#[test]
fn corrupt_archive_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("corrupt.bcfzip");
    std::fs::write(&archive, b"PK\x03\x04 definitely not a zip").unwrap();
    let mut host = RecordingHost::new(HostUnit::Meters);
    let mut applier = applier(&dir);

    let result = applier.run(&archive, &mut host);

    assert!(matches!(result, Err(ImportError::Archive(_))));
    assert!(host.calls.is_empty());
    assert_eq!(applier.state(), ApplierState::Idle);
}

#[test]
fn missing_archive_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = RecordingHost::new(HostUnit::Meters);

    let result = applier(&dir).run(dir.path().join("missing.bcf"), &mut host);

    assert!(result.is_err());
    assert!(host.calls.is_empty());
}

#[test]
fn archive_without_viewpoints_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(
        dir.path(),
        "markup-only.bcf",
        &[("bcf.version", "<Version/>"), ("t/markup.bcf", "<Markup/>")],
    );
    let mut host = RecordingHost::new(HostUnit::Meters);

    let report = applier(&dir).run(&archive, &mut host).unwrap();

    assert!(report.applied.is_empty());
    assert!(report.failures.is_empty());
    assert!(host.calls.is_empty());
}

#[test]
fn orthogonal_camera_switches_to_parallel() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(
        dir.path(),
        "ortho.bcf",
        &[("topic/Viewpoint_1.bcfv", ORTHOGONAL_WITH_LINES)],
    );
    let mut host = RecordingHost::new(HostUnit::Decimeters);
    let mut applier = applier(&dir);

    let report = applier.run(&archive, &mut host).unwrap();

    assert!(host.calls.contains(&Call::Parallel(true)));
    assert!(host
        .calls
        .contains(&Call::Location(Point3::new(50.0, 50.0, 200.0))));

    let ViewCamera::Orthogonal(pose) = report.applied[0].geometry.camera else {
        panic!("Expected orthogonal camera");
    };
    assert_eq!(pose.view_to_world_scale, Some(120.0));

    let lines = vec![LineSegment2D {
        start: ScreenPoint::new(0, 0),
        end: ScreenPoint::new(100, 50),
    }];
    assert!(host
        .calls
        .contains(&Call::Overlay("topic-Viewpoint_1".to_string(), lines.clone())));
    // The view name contains "viewpoint", so the overlay comes up enabled
    assert_eq!(host.calls.last(), Some(&Call::OverlayEnabled(true)));

    let overlay = applier.overlay().unwrap();
    assert_eq!(overlay.title, "topic-Viewpoint_1");
    assert_eq!(overlay.lines, lines);
    assert!(overlay.enabled);
}

#[test]
fn overlay_follows_view_switches() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(
        dir.path(),
        "ortho.bcf",
        &[("topic/viewpoint.bcfv", ORTHOGONAL_WITH_LINES)],
    );
    let mut host = RecordingHost::new(HostUnit::Meters);
    let mut applier = applier(&dir);
    applier.run(&archive, &mut host).unwrap();
    host.calls.clear();

    let views = ["Top", "topic-viewpoint", "Perspective", "BCF VIEWPOINT 2", "Front"];
    let visible: Vec<bool> = views
        .iter()
        .map(|name| applier.on_view_activated(name, &mut host))
        .collect();

    assert_eq!(visible, [false, true, false, true, false]);
    let toggles: Vec<Call> = visible.iter().map(|v| Call::OverlayEnabled(*v)).collect();
    assert_eq!(host.calls, toggles);
    assert!(!applier.overlay().unwrap().enabled);
}

#[test]
fn last_viewpoint_owns_the_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(
        dir.path(),
        "two.bcf",
        &[
            ("a/viewpoint.bcfv", ORTHOGONAL_WITH_LINES),
            ("b/viewpoint.bcfv", PERSPECTIVE_A),
        ],
    );
    let mut host = RecordingHost::new(HostUnit::Meters);
    let mut applier = applier(&dir);

    applier.run(&archive, &mut host).unwrap();

    let overlay = applier.overlay().unwrap();
    assert_eq!(overlay.title, "b-viewpoint");
    assert!(overlay.lines.is_empty());
    assert_eq!(host.named_views(), ["a-viewpoint", "b-viewpoint"]);
}

#[test]
fn extracted_files_are_cleaned_up() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(dir.path(), "issues.bcfzip", &[("A.bcfv", PERSPECTIVE_A)]);
    let mut host = RecordingHost::new(HostUnit::Meters);

    applier(&dir).run(&archive, &mut host).unwrap();
    assert!(!dir.path().join("extract").join("issues-A.bcfv").exists());

    let mut keeping = ViewpointApplier::new(ImportConfig {
        extract_dir: dir.path().join("extract"),
        keep_extracted: true,
        ..ImportConfig::default()
    });
    keeping.run(&archive, &mut host).unwrap();
    assert!(dir.path().join("extract").join("issues-A.bcfv").exists());
}

#[test]
fn in_memory_run_matches_extracting_run() {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(
        dir.path(),
        "mixed.bcfzip",
        &[
            ("t1/broken.bcfv", "<Markup/>"),
            ("t2/good.bcfv", PERSPECTIVE_A),
            ("t3/clip.bcfv", CLIPPING_ONLY),
        ],
    );

    let mut extracted_host = RecordingHost::new(HostUnit::Feet);
    let extracted = applier(&dir).run(&archive, &mut extracted_host).unwrap();

    let mut memory_host = RecordingHost::new(HostUnit::Feet);
    let in_memory = applier(&dir)
        .run_in_memory(&archive, &mut memory_host)
        .unwrap();

    assert_eq!(extracted, in_memory);
    assert_eq!(extracted_host.calls, memory_host.calls);
    assert_eq!(in_memory.failures.len(), 1);
}

#[test]
fn entries_with_the_same_flat_name_keep_their_own_camera() {
    let dir = tempfile::tempdir().unwrap();
    let at_height = |z: &str| PERSPECTIVE_A.replace("<Z>10</Z>", &format!("<Z>{z}</Z>"));
    let first = at_height("1");
    let second = at_height("2");
    let archive = write_archive(
        dir.path(),
        "clash.bcfzip",
        &[("a/b.bcfv", first.as_str()), ("a-b.bcfv", second.as_str())],
    );
    let mut host = RecordingHost::new(HostUnit::Meters);

    let report = applier(&dir).run(&archive, &mut host).unwrap();

    assert!(report.failures.is_empty());
    let entries: Vec<&str> = report.applied.iter().map(|a| a.entry.as_str()).collect();
    assert_eq!(entries, ["a/b.bcfv", "a-b.bcfv"]);

    let locations: Vec<&Call> = host
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Location(_)))
        .collect();
    assert_eq!(
        locations,
        [
            &Call::Location(Point3::new(0.0, 0.0, 1.0)),
            &Call::Location(Point3::new(0.0, 0.0, 2.0)),
        ]
    );
    // View names stay as flattened; the host resolves the duplicate
    assert_eq!(host.named_views(), ["a-b", "a-b"]);
}

#[test]
fn unknown_elements_inside_collections_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let xml = r#"<VisualizationInfo>
  <ClippingPlanes>
    <ClippingPlane>
      <Location><X>1</X><Y>2</Y><Z>3</Z></Location>
      <Direction><X>0</X><Y>0</Y><Z>1</Z></Direction>
    </ClippingPlane>
    <Foo/>
    <ClippingPlane>
      <Location><X>4</X><Y>5</Y><Z>6</Z></Location>
      <Direction><X>1</X><Y>0</Y><Z>0</Z></Direction>
    </ClippingPlane>
  </ClippingPlanes>
  <Lines>
    <Line>
      <StartPoint><X>0</X><Y>0</Y></StartPoint>
      <EndPoint><X>10</X><Y>10</Y></EndPoint>
    </Line>
    <Foo/>
    <Line>
      <StartPoint><X>20</X><Y>20</Y></StartPoint>
      <EndPoint><X>30</X><Y>30</Y></EndPoint>
    </Line>
  </Lines>
</VisualizationInfo>"#;
    let archive = write_archive(dir.path(), "extra.bcf", &[("viewpoint.bcfv", xml)]);
    let mut host = RecordingHost::new(HostUnit::Meters);
    let mut applier = applier(&dir);

    let report = applier.run(&archive, &mut host).unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(host.planes().len(), 2);
    assert_eq!(applier.overlay().unwrap().lines.len(), 2);
}

#[test]
fn non_finite_coordinates_fail_the_entry() {
    let dir = tempfile::tempdir().unwrap();
    let nan_plane = CLIPPING_ONLY.replace("<X>1</X><Y>2</Y>", "<X>NaN</X><Y>inf</Y>");
    let archive = write_archive(
        dir.path(),
        "nan.bcf",
        &[("t/nan.bcfv", nan_plane.as_str()), ("t/good.bcfv", PERSPECTIVE_A)],
    );
    let mut host = RecordingHost::new(HostUnit::Meters);

    let report = applier(&dir).run(&archive, &mut host).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entry, "t/nan.bcfv");
    assert!(host.planes().is_empty());
    assert_eq!(host.named_views(), ["t-good"]);
}
