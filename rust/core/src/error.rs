// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for archive extraction and viewpoint decoding

use std::path::PathBuf;
use thiserror::Error;

/// Container-level failures. Any of these aborts a whole import.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Cannot open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt archive {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to extract to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single viewpoint entry could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to decode viewpoint {entry}: {kind}")]
pub struct DecodeError {
    /// Name of the archive entry that failed
    pub entry: String,
    pub kind: DecodeErrorKind,
}

/// What went wrong while decoding a viewpoint entry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    #[error("content is not valid UTF-8")]
    InvalidUtf8,

    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("expected root element VisualizationInfo, found {0}")]
    WrongRoot(String),

    #[error("schema mismatch: {0}")]
    Schema(String),

    #[error("read failed: {0}")]
    Read(String),
}

impl DecodeError {
    pub fn new(entry: impl Into<String>, kind: DecodeErrorKind) -> Self {
        Self {
            entry: entry.into(),
            kind,
        }
    }
}
