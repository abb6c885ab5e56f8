// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BCF container extraction
//!
//! A BCF file is a plain zip archive. Every topic folder holds one or more
//! `.bcfv` viewpoint documents. [`ArchiveExtractor`] locates those entries
//! and writes them to a target directory under flattened names, so no
//! embedded path can ever place a file outside that directory.

use crate::error::ArchiveError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// File extension of viewpoint entries (compared case-insensitively)
pub const VIEWPOINT_EXTENSION: &str = ".bcfv";

/// Upper bound on the buffer reserved from an entry's declared size
const MAX_PREALLOC: u64 = 1 << 20;

/// One extracted viewpoint entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewpointEntry {
    /// Entry path inside the archive, exactly as stored
    pub name: String,
    /// Flattened entry path without extension, used as the named view key
    pub view_name: String,
    /// Location of the extracted file
    pub path: PathBuf,
}

impl ViewpointEntry {
    /// Open the extracted file as a buffered byte stream
    pub fn open(&self) -> std::io::Result<BufReader<File>> {
        Ok(BufReader::new(File::open(&self.path)?))
    }

    /// Read the whole extracted file
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }

    /// Remove the extracted file. Failures are ignored.
    pub fn remove(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            tracing::debug!(path = %self.path.display(), error = %err, "Could not remove extracted viewpoint");
        }
    }
}

/// Extracts `.bcfv` entries from a BCF archive
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    archive_path: PathBuf,
    target_dir: PathBuf,
}

impl ArchiveExtractor {
    pub fn new(archive_path: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            target_dir: target_dir.into(),
        }
    }

    /// Extractor writing into `<os temp dir>/bcf-lite`
    pub fn with_temp_dir(archive_path: impl Into<PathBuf>) -> Self {
        Self::new(archive_path, default_extract_dir())
    }

    /// Extract every viewpoint entry, in archive order
    ///
    /// Destination names are `<archive stem>-<flattened entry path>`. When
    /// two entries flatten to the same name (compared case-insensitively)
    /// the later one is written as `<archive stem>-<index>-<flattened>`,
    /// with `index` its position in the zip. An existing file at the
    /// destination is replaced. An archive without viewpoints yields an
    /// empty list.
    pub fn extract(&self) -> Result<Vec<ViewpointEntry>, ArchiveError> {
        std::fs::create_dir_all(&self.target_dir).map_err(|source| ArchiveError::Io {
            path: self.target_dir.clone(),
            source,
        })?;

        let key = archive_key(&self.archive_path);
        let mut archive = open_archive(&self.archive_path)?;
        let mut entries = Vec::new();
        let mut taken = HashSet::new();

        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|source| self.corrupt(source))?;

            if file.is_dir() || !is_viewpoint_entry(file.name()) {
                continue;
            }

            let name = file.name().to_string();
            let Some(flat) = non_empty_flat_name(&name) else {
                continue;
            };

            let file_name = unique_file_name(&mut taken, &key, index, &flat);
            let path = self.target_dir.join(file_name);
            write_entry(&mut file, &path)?;

            tracing::debug!(entry = %name, path = %path.display(), "Extracted viewpoint");
            entries.push(ViewpointEntry {
                view_name: strip_viewpoint_extension(&flat).to_string(),
                name,
                path,
            });
        }

        tracing::info!(
            archive = %self.archive_path.display(),
            viewpoints = entries.len(),
            "Extracted BCF archive"
        );
        Ok(entries)
    }

    fn corrupt(&self, source: zip::result::ZipError) -> ArchiveError {
        ArchiveError::Corrupt {
            path: self.archive_path.clone(),
            source,
        }
    }
}

/// Read every viewpoint entry into memory without touching the filesystem
///
/// Returns `(entry name, view name, content)` triples in archive order.
pub fn read_entries(
    archive_path: impl AsRef<Path>,
) -> Result<Vec<(String, String, Vec<u8>)>, ArchiveError> {
    let archive_path = archive_path.as_ref();
    let mut archive = open_archive(archive_path)?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|source| ArchiveError::Corrupt {
                path: archive_path.to_path_buf(),
                source,
            })?;

        if file.is_dir() || !is_viewpoint_entry(file.name()) {
            continue;
        }

        let name = file.name().to_string();
        let Some(flat) = non_empty_flat_name(&name) else {
            continue;
        };

        let mut content = Vec::with_capacity(capacity_hint(file.size()));
        file.read_to_end(&mut content)
            .map_err(|source| ArchiveError::Corrupt {
                path: archive_path.to_path_buf(),
                source: source.into(),
            })?;

        entries.push((name, strip_viewpoint_extension(&flat).to_string(), content));
    }

    Ok(entries)
}

/// Default extraction directory: `<os temp dir>/bcf-lite`
pub fn default_extract_dir() -> PathBuf {
    std::env::temp_dir().join("bcf-lite")
}

/// Check whether an entry name carries the viewpoint extension
#[inline]
pub fn is_viewpoint_entry(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(VIEWPOINT_EXTENSION)
}

/// Flatten an archive-internal path into a single file name
///
/// Separators (`/` and `\`) become `-`; empty, `.` and `..` segments are
/// dropped and drive colons are replaced. The result never contains a
/// path separator.
pub fn flatten_entry_name(name: &str) -> String {
    name.split(|c| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(|segment| segment.replace(':', "-"))
        .collect::<Vec<_>>()
        .join("-")
}

fn non_empty_flat_name(name: &str) -> Option<String> {
    let flat = flatten_entry_name(name);
    if flat.is_empty() {
        tracing::warn!(entry = %name, "Skipping viewpoint entry with unusable path");
        return None;
    }
    Some(flat)
}

/// Pick a destination name no earlier entry of this extraction uses
///
/// Names are compared lowercased so entries differing only in case never
/// share a file on case-insensitive filesystems.
fn unique_file_name(taken: &mut HashSet<String>, key: &str, index: usize, flat: &str) -> String {
    let mut file_name = format!("{key}-{flat}");
    let mut attempt = 0;
    while !taken.insert(file_name.to_lowercase()) {
        file_name = if attempt == 0 {
            format!("{key}-{index}-{flat}")
        } else {
            format!("{key}-{index}-{attempt}-{flat}")
        };
        attempt += 1;
    }
    file_name
}

/// Buffer size to reserve for an entry, trusting its declared size only
/// up to [`MAX_PREALLOC`]
fn capacity_hint(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}

fn strip_viewpoint_extension(flat: &str) -> &str {
    // ASCII lowercasing keeps byte offsets, so the suffix length is exact
    &flat[..flat.len() - VIEWPOINT_EXTENSION.len()]
}

fn archive_key(archive_path: &Path) -> String {
    let stem = archive_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let key = flatten_entry_name(&stem);
    if key.is_empty() {
        "bcf".to_string()
    } else {
        key
    }
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<File>, ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    zip::ZipArchive::new(file).map_err(|source| ArchiveError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn write_entry(reader: &mut impl Read, path: &Path) -> Result<(), ArchiveError> {
    let io_err = |source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    std::io::copy(reader, &mut writer).map_err(io_err)?;
    writer.flush().map_err(io_err)
}
