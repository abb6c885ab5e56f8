// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewpoint Decoder - VisualizationInfo documents to [`Viewpoint`]
//!
//! Decoding is two passes over the document: a streaming well-formedness
//! scan with [quick-xml](https://docs.rs/quick-xml) that also checks the
//! root element, followed by serde deserialization of the known subset.
//! Every failure is returned as a [`DecodeError`] naming the entry.

use crate::archive::ViewpointEntry;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::schema::{XmlVisualizationInfo, ROOT_ELEMENT};
use crate::viewpoint::Viewpoint;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Decodes viewpoint entries
pub struct ViewpointDecoder;

impl ViewpointDecoder {
    /// Decode an extracted archive entry
    pub fn decode_entry(entry: &ViewpointEntry) -> Result<Viewpoint, DecodeError> {
        let reader = entry
            .open()
            .map_err(|e| DecodeError::new(&entry.name, DecodeErrorKind::Read(e.to_string())))?;
        decode_reader(&entry.name, reader)
    }
}

/// Decode a viewpoint from a byte stream
pub fn decode_reader(entry: &str, mut reader: impl BufRead) -> Result<Viewpoint, DecodeError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::new(entry, DecodeErrorKind::Read(e.to_string())))?;
    decode_viewpoint(entry, &bytes)
}

/// Decode a viewpoint from the raw bytes of a `.bcfv` document
pub fn decode_viewpoint(entry: &str, bytes: &[u8]) -> Result<Viewpoint, DecodeError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| DecodeError::new(entry, DecodeErrorKind::InvalidUtf8))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let root = scan_document(text).map_err(|kind| DecodeError::new(entry, kind))?;
    if root != ROOT_ELEMENT {
        return Err(DecodeError::new(entry, DecodeErrorKind::WrongRoot(root)));
    }

    let info: XmlVisualizationInfo = quick_xml::de::from_str(text).map_err(|err| {
        let kind = match err {
            quick_xml::DeError::InvalidXml(e) => DecodeErrorKind::Xml(e.to_string()),
            other => DecodeErrorKind::Schema(other.to_string()),
        };
        DecodeError::new(entry, kind)
    })?;

    let viewpoint = Viewpoint::from(info);
    tracing::trace!(
        entry,
        perspective = viewpoint.perspective_camera.is_some(),
        orthogonal = viewpoint.orthogonal_camera.is_some(),
        clipping_planes = viewpoint.clipping_planes.len(),
        lines = viewpoint.lines.len(),
        "Decoded viewpoint"
    );
    Ok(viewpoint)
}

/// Walk the whole document, returning the local name of its root element
///
/// Fails on malformed markup, mismatched end tags, a second top-level
/// element and documents that end before every element is closed.
fn scan_document(text: &str) -> Result<String, DecodeErrorKind> {
    let mut reader = Reader::from_str(text);
    let mut root: Option<String> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    set_root(&mut root, e.local_name().as_ref())?;
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    set_root(&mut root, e.local_name().as_ref())?;
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(DecodeErrorKind::Xml(format!(
                    "{} at byte {}",
                    err,
                    reader.buffer_position()
                )))
            }
        }
    }

    if depth > 0 {
        return Err(DecodeErrorKind::Xml(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or_else(|| DecodeErrorKind::Xml("document has no root element".to_string()))
}

fn set_root(root: &mut Option<String>, name: &[u8]) -> Result<(), DecodeErrorKind> {
    let name = String::from_utf8_lossy(name);
    if root.is_some() {
        return Err(DecodeErrorKind::Xml(format!("second top-level element {name}")));
    }
    *root = Some(name.into_owned());
    Ok(())
}
