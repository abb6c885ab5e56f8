// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BCF-Lite Core
//!
//! Reading side of BCF (BIM Collaboration Format) viewpoint import.
//!
//! ## Overview
//!
//! - **Archive extraction**: locate `.bcfv` entries inside a BCF zip and
//!   extract them under sanitized names ([`ArchiveExtractor`])
//! - **Viewpoint decoding**: VisualizationInfo XML to a [`Viewpoint`] model
//!   via [quick-xml](https://docs.rs/quick-xml) and serde
//! - **Units**: meters-to-host scale factors ([`scale_for`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bcf_lite_core::{ArchiveExtractor, ViewpointDecoder};
//!
//! let entries = ArchiveExtractor::with_temp_dir("issues.bcfzip").extract()?;
//! for entry in &entries {
//!     match ViewpointDecoder::decode_entry(entry) {
//!         Ok(viewpoint) => println!("{}: {:?}", entry.view_name, viewpoint.perspective_camera),
//!         Err(err) => eprintln!("skipping: {}", err),
//!     }
//! }
//! ```

pub mod archive;
pub mod decoder;
pub mod error;
pub mod schema;
pub mod units;
pub mod viewpoint;

pub use archive::{
    default_extract_dir, flatten_entry_name, is_viewpoint_entry, read_entries, ArchiveExtractor,
    ViewpointEntry, VIEWPOINT_EXTENSION,
};
pub use decoder::{decode_reader, decode_viewpoint, ViewpointDecoder};
pub use error::{ArchiveError, DecodeError, DecodeErrorKind};
pub use units::{scale_for, HostUnit};
pub use viewpoint::{
    CameraData, ClippingPlaneData, LineSegment2D, ScreenPoint, Triple, Viewpoint,
};
