// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay state for the viewpoint title and annotation lines

use bcf_lite_core::{LineSegment2D, ScreenPoint};

/// Where the title is drawn, measured from the bottom-right corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleAnchor {
    pub from_right: i32,
    pub from_bottom: i32,
}

impl Default for TitleAnchor {
    fn default() -> Self {
        Self {
            from_right: 100,
            from_bottom: 30,
        }
    }
}

/// Overlay content for the most recently applied viewpoint
///
/// Replaced wholesale for every applied viewpoint; only `enabled`
/// changes in between.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub title: String,
    pub lines: Vec<LineSegment2D>,
    pub enabled: bool,
    pub anchor: TitleAnchor,
}

impl OverlayState {
    pub fn new(title: impl Into<String>, lines: Vec<LineSegment2D>) -> Self {
        Self {
            title: title.into(),
            lines,
            enabled: false,
            anchor: TitleAnchor::default(),
        }
    }

    /// Title position for a viewport of the given pixel size
    pub fn title_position(&self, width: i32, height: i32) -> ScreenPoint {
        ScreenPoint::new(width - self.anchor.from_right, height - self.anchor.from_bottom)
    }
}

/// Whether the overlay belongs on a view with this name
///
/// Case-insensitive substring match on `keyword`.
pub fn overlay_visible(view_name: &str, keyword: &str) -> bool {
    view_name
        .to_lowercase()
        .contains(&keyword.to_lowercase())
}
