// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import configuration loaded from environment variables.

use bcf_lite_geometry::ReconstructOptions;
use std::path::PathBuf;

/// Extent used for clipping planes when nothing else is configured
pub const DEFAULT_CLIP_EXTENT: f64 = 100.0;

/// View-name keyword that makes the overlay visible
pub const DEFAULT_OVERLAY_KEYWORD: &str = "viewpoint";

/// Import configuration.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Width and height given to every clipping plane, in host units.
    pub clip_extent: f64,
    /// Normalize camera and plane direction vectors before applying them.
    pub normalize_directions: bool,
    /// Directory extracted viewpoint files are written to.
    pub extract_dir: PathBuf,
    /// Leave extracted files on disk after decoding.
    pub keep_extracted: bool,
    /// The overlay is shown while the active view name contains this.
    pub overlay_keyword: String,
}

impl ImportConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            clip_extent: std::env::var("BCF_CLIP_EXTENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.clip_extent),
            normalize_directions: std::env::var("BCF_NORMALIZE_DIRECTIONS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.normalize_directions),
            extract_dir: std::env::var("BCF_EXTRACT_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.extract_dir),
            keep_extracted: std::env::var("BCF_KEEP_EXTRACTED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.keep_extracted),
            overlay_keyword: std::env::var("BCF_OVERLAY_KEYWORD")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.overlay_keyword),
        }
    }

    pub fn reconstruct_options(&self) -> ReconstructOptions {
        ReconstructOptions {
            normalize_directions: self.normalize_directions,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            clip_extent: DEFAULT_CLIP_EXTENT,
            normalize_directions: false,
            extract_dir: bcf_lite_core::default_extract_dir(),
            keep_extracted: false,
            overlay_keyword: DEFAULT_OVERLAY_KEYWORD.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
