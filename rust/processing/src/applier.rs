// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewpoint import pipeline
//!
//! One [`ViewpointApplier::run`] call imports a whole BCF archive:
//! extract the `.bcfv` entries, then for each entry decode, reconstruct
//! in host units and push the result to the host. Archive failures abort
//! before the host is touched; a broken entry is recorded and skipped.

use crate::config::ImportConfig;
use crate::host::{Host, OverlayRenderer};
use crate::overlay::{overlay_visible, OverlayState};
use bcf_lite_core::{
    decode_viewpoint, read_entries, scale_for, ArchiveError, ArchiveExtractor, DecodeError,
    HostUnit, Viewpoint, ViewpointDecoder,
};
use bcf_lite_geometry::{reconstruct_with, CameraPose, ReconstructedViewpoint, ViewCamera};
use std::path::Path;
use thiserror::Error;

/// Import failures that abort a whole run
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Pipeline stage of the applier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplierState {
    #[default]
    Idle,
    Extracting,
    Decoding,
    Reconstructing,
    Applying,
    Done,
}

/// A viewpoint that reached the host
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedViewpoint {
    /// Archive entry name
    pub entry: String,
    /// Name registered with the host
    pub view_name: String,
    pub geometry: ReconstructedViewpoint,
}

/// Outcome of one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub unit: HostUnit,
    pub scale: f64,
    pub applied: Vec<AppliedViewpoint>,
    /// Entries skipped because they could not be decoded
    pub failures: Vec<DecodeError>,
}

impl ImportReport {
    fn new(unit: HostUnit) -> Self {
        Self {
            unit,
            scale: scale_for(unit),
            applied: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Imports BCF viewpoints into a host
#[derive(Debug, Default)]
pub struct ViewpointApplier {
    config: ImportConfig,
    state: ApplierState,
    overlay: Option<OverlayState>,
}

impl ViewpointApplier {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            state: ApplierState::Idle,
            overlay: None,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn state(&self) -> ApplierState {
        self.state
    }

    /// Overlay of the last applied viewpoint, if any
    pub fn overlay(&self) -> Option<&OverlayState> {
        self.overlay.as_ref()
    }

    /// Import every viewpoint of a BCF archive, extracting entries to
    /// the configured directory first
    pub fn run(
        &mut self,
        archive_path: impl AsRef<Path>,
        host: &mut impl Host,
    ) -> Result<ImportReport, ImportError> {
        let archive_path = archive_path.as_ref();
        self.transition(ApplierState::Extracting);

        let extractor = ArchiveExtractor::new(archive_path, &self.config.extract_dir);
        let entries = extractor.extract().inspect_err(|err| {
            tracing::error!(error = %err, "BCF import aborted");
            self.state = ApplierState::Idle;
        })?;

        // Captured once: every entry shares the document's unit system
        let mut report = ImportReport::new(host.current_unit());

        for entry in &entries {
            self.transition(ApplierState::Decoding);
            let decoded = ViewpointDecoder::decode_entry(entry);
            if !self.config.keep_extracted {
                entry.remove();
            }
            self.process_entry(&entry.name, &entry.view_name, decoded, host, &mut report);
        }

        self.finish(&report);
        Ok(report)
    }

    /// Import every viewpoint of a BCF archive without writing entries to
    /// disk
    pub fn run_in_memory(
        &mut self,
        archive_path: impl AsRef<Path>,
        host: &mut impl Host,
    ) -> Result<ImportReport, ImportError> {
        self.transition(ApplierState::Extracting);

        let entries = read_entries(archive_path).inspect_err(|err| {
            tracing::error!(error = %err, "BCF import aborted");
            self.state = ApplierState::Idle;
        })?;

        let mut report = ImportReport::new(host.current_unit());

        for (name, view_name, content) in entries {
            self.transition(ApplierState::Decoding);
            let decoded = decode_viewpoint(&name, &content);
            self.process_entry(&name, &view_name, decoded, host, &mut report);
        }

        self.finish(&report);
        Ok(report)
    }

    /// React to the host activating a view: show the overlay only on
    /// viewpoint views. Returns the new visibility.
    pub fn on_view_activated(
        &mut self,
        view_name: &str,
        renderer: &mut impl OverlayRenderer,
    ) -> bool {
        let visible = self.overlay_visible(view_name);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.enabled = visible;
            renderer.set_overlay_enabled(visible);
        }
        visible
    }

    /// Whether the overlay belongs on the view with this name
    pub fn overlay_visible(&self, view_name: &str) -> bool {
        overlay_visible(view_name, &self.config.overlay_keyword)
    }

    fn process_entry(
        &mut self,
        entry: &str,
        view_name: &str,
        decoded: Result<Viewpoint, DecodeError>,
        host: &mut impl Host,
        report: &mut ImportReport,
    ) {
        let viewpoint = match decoded {
            Ok(viewpoint) => viewpoint,
            Err(err) => {
                tracing::warn!(entry, error = %err, "Skipping viewpoint");
                report.failures.push(err);
                return;
            }
        };

        self.transition(ApplierState::Reconstructing);
        let geometry = reconstruct_with(&viewpoint, report.scale, self.config.reconstruct_options());

        self.transition(ApplierState::Applying);
        self.apply(view_name, &geometry, host);

        report.applied.push(AppliedViewpoint {
            entry: entry.to_string(),
            view_name: view_name.to_string(),
            geometry,
        });
    }

    fn apply(&mut self, view_name: &str, geometry: &ReconstructedViewpoint, host: &mut impl Host) {
        host.push_view_projection();

        match &geometry.camera {
            ViewCamera::Perspective(pose) => {
                apply_pose(pose, host);
                host.set_parallel_projection(false);
                if let Some(fov) = pose.field_of_view {
                    host.set_field_of_view(fov);
                }
            }
            ViewCamera::Orthogonal(pose) => {
                apply_pose(pose, host);
                host.set_parallel_projection(true);
            }
            ViewCamera::None => {
                tracing::debug!(view = view_name, "Viewpoint has no camera");
            }
        }

        host.register_named_view(view_name);

        let extent = self.config.clip_extent;
        for plane in &geometry.clipping_planes {
            host.add_clipping_plane(plane.location, plane.direction, extent, extent);
        }

        let overlay = OverlayState::new(view_name, geometry.lines.clone());
        host.set_overlay(&overlay.title, &overlay.lines);
        self.overlay = Some(overlay);

        // The applied view is now the active one
        self.on_view_activated(view_name, host);

        tracing::debug!(
            view = view_name,
            parallel = geometry.camera.is_parallel(),
            clipping_planes = geometry.clipping_planes.len(),
            lines = geometry.lines.len(),
            "Applied viewpoint"
        );
    }

    fn finish(&mut self, report: &ImportReport) {
        self.transition(ApplierState::Done);
        tracing::info!(
            unit = ?report.unit,
            scale = report.scale,
            applied = report.applied.len(),
            failed = report.failures.len(),
            "BCF import finished"
        );
    }

    fn transition(&mut self, next: ApplierState) {
        tracing::trace!(from = ?self.state, to = ?next, "Applier state");
        self.state = next;
    }
}

fn apply_pose(pose: &CameraPose, host: &mut impl Host) {
    host.set_camera_up(pose.up_vector);
    host.set_camera_location(pose.location);
    host.set_camera_direction(pose.direction);
}
