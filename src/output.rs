//! Compiled-output model
//!
//! Mutable intermediate representation that accumulates layout facts (track
//! placements, total size) and linking facts (lock tables, brush links)
//! across the compiler stages, then serializes to the external renderer's
//! configuration format. One accumulator per compile invocation; nothing
//! persists between compiles.

use serde::Serialize;

use crate::layout::{Size, TrackInfo};
use crate::linking::{BrushLink, Channel, LocationLocks, LockEntry, ZoomLocks};

/// The document handed to the renderer translator: track placements plus the
/// lock/registry object set, shaped to be merged verbatim into the target
/// renderer's view-configuration document.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledOutput {
    /// Track placements in traversal order (depth-first, sibling order);
    /// array order does not correspond to visual z-order
    pub tracks: Vec<TrackInfo>,
    /// Total footprint, used by the host UI to size its container element
    pub size: Size,
    pub zoom_locks: ZoomLocks,
    pub location_locks: LocationLocks,
    pub brushes: Vec<BrushLink>,
}

impl CompiledOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the layout compiler's results
    pub fn set_layout(&mut self, tracks: Vec<TrackInfo>, size: Size) {
        self.tracks = tracks;
        self.size = size;
    }

    /// Zoom-lock group a view participates in, if any
    pub fn zoom_lock_group(&self, view_id: &str) -> Option<&str> {
        self.zoom_locks
            .locks_by_view_uid
            .get(view_id)
            .map(|s| s.as_str())
    }

    /// Location lock of a (view, channel) pair, if any
    pub fn location_lock(&self, view_id: &str, channel: Channel) -> Option<&LockEntry> {
        self.location_locks
            .locks_by_view_uid
            .get(view_id)
            .and_then(|c| c.get(channel))
    }

    /// Target view controlled by a brush, if the brush found a partner
    pub fn brush_target(&self, brush_view_id: &str) -> Option<&str> {
        self.brushes
            .iter()
            .find(|b| b.brush_view_id == brush_view_id)
            .and_then(|b| b.target_view_id.as_deref())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
