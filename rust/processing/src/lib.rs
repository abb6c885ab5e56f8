// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BCF-Lite Processing
//!
//! Drives a BCF viewpoint import end to end against a host application.
//! The host supplies its viewport, unit system and overlay renderer through
//! the traits in [`host`]; [`ViewpointApplier`] does the rest.

pub mod applier;
pub mod config;
pub mod host;
pub mod overlay;

pub use applier::{AppliedViewpoint, ApplierState, ImportError, ImportReport, ViewpointApplier};
pub use config::{ImportConfig, DEFAULT_CLIP_EXTENT, DEFAULT_OVERLAY_KEYWORD};
pub use host::{Host, OverlayRenderer, UnitSystemHost, ViewportHost};
pub use overlay::{overlay_visible, OverlayState, TitleAnchor};
