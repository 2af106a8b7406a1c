//! Input data model for the visualization specification tree
//!
//! The compiler consumes a specification that has already been validated and
//! template-resolved by upstream collaborators, so these types assume
//! structural validity (arrangement enums, numeric sizes) and do not
//! re-validate. Tracks that still lack a resolved width or height are treated
//! as configuration-incomplete by the layout compiler (warned about and
//! skipped), never as fatal errors.

use serde::{Deserialize, Serialize};

/// How a composite view arranges its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    Serial,
    Parallel,
    Horizontal,
    Vertical,
}

impl Arrangement {
    /// Children stack along the height axis (`parallel`/`vertical`)
    pub fn stacks_vertically(&self) -> bool {
        matches!(self, Arrangement::Parallel | Arrangement::Vertical)
    }

    /// Concatenating arrangements force separate placement and disqualify a
    /// subtree from collapsing into a single circular view
    pub fn is_concat(&self) -> bool {
        matches!(self, Arrangement::Horizontal | Arrangement::Vertical)
    }
}

/// Coordinate system a track is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Linear,
    Circular,
}

/// Visual mark of a track
///
/// Mark drawing itself is a renderer concern; the compiler only cares that
/// `brush` marks drive cross-view selection and `header` marks are the
/// synthetic title band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Point,
    Line,
    Bar,
    Area,
    Rect,
    Link,
    Text,
    Brush,
    Header,
}

/// An encoding channel that can participate in linking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::X, Channel::Y];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf-level visual specification for a single track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDef {
    /// View identifier, used as the key in lock tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub mark: Mark,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub layout: LayoutKind,
    /// Whether this track renders an x axis (adds a fixed axis band)
    #[serde(default)]
    pub x_axis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_linking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_linking_id: Option<String>,
    /// Zoom-lock group override; defaults to the channel linking id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_linking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl TrackDef {
    /// Synthetic header track for the title/subtitle band
    pub fn header(
        width: f64,
        height: f64,
        title: Option<String>,
        subtitle: Option<String>,
    ) -> Self {
        Self {
            id: None,
            mark: Mark::Header,
            width: Some(width),
            height: Some(height),
            layout: LayoutKind::Linear,
            x_axis: false,
            x_linking_id: None,
            y_linking_id: None,
            zoom_linking_id: None,
            title,
            subtitle,
        }
    }

    pub fn is_brush(&self) -> bool {
        self.mark == Mark::Brush
    }

    /// Linking identifier declared on the given channel, if any
    pub fn linking_id(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::X => self.x_linking_id.as_deref(),
            Channel::Y => self.y_linking_id.as_deref(),
        }
    }
}

/// A single track or several tracks overlaid on one bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    Overlay(OverlayGroup),
    Single(TrackDef),
}

impl TrackEntry {
    /// Declared width, falling back to the widest overlaid member
    pub fn declared_width(&self) -> Option<f64> {
        match self {
            TrackEntry::Single(t) => t.width,
            TrackEntry::Overlay(g) => g.declared_width(),
        }
    }

    /// Declared height, falling back to the tallest overlaid member
    pub fn declared_height(&self) -> Option<f64> {
        match self {
            TrackEntry::Single(t) => t.height,
            TrackEntry::Overlay(g) => g.declared_height(),
        }
    }
}

/// Multiple track definitions sharing one bounding box, rendered as
/// superimposed layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayGroup {
    pub tracks: Vec<TrackDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl OverlayGroup {
    pub fn declared_width(&self) -> Option<f64> {
        self.width
            .or_else(|| max_dimension(self.tracks.iter().filter_map(|t| t.width)))
    }

    pub fn declared_height(&self) -> Option<f64> {
        self.height
            .or_else(|| max_dimension(self.tracks.iter().filter_map(|t| t.height)))
    }

    /// Number of members that render an x axis
    pub fn x_axis_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.x_axis).count()
    }
}

fn max_dimension(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// A node in the specification tree: either a leaf group of tracks or a
/// composite view holding child views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewNode {
    Composite(CompositeView),
    Tracks(TrackGroupView),
}

impl ViewNode {
    pub fn spacing(&self) -> Option<f64> {
        match self {
            ViewNode::Composite(v) => v.spacing,
            ViewNode::Tracks(g) => g.spacing,
        }
    }

    /// Fraction of the total radius left empty at the center of a circular
    /// view, if overridden
    pub fn center_radius(&self) -> Option<f64> {
        match self {
            ViewNode::Composite(v) => v.center_radius,
            ViewNode::Tracks(g) => g.center_radius,
        }
    }
}

/// Internal node: child views plus an arrangement mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeView {
    pub arrangement: Arrangement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_radius: Option<f64>,
    pub views: Vec<ViewNode>,
}

/// Leaf node: one or more track entries stacked vertically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackGroupView {
    pub tracks: Vec<TrackEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_radius: Option<f64>,
}

/// Root of a specification: an optional title band plus the top-level view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(flatten)]
    pub view: ViewNode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn track(id: &str, width: f64, height: f64) -> TrackDef {
        TrackDef {
            id: Some(id.to_string()),
            mark: Mark::Bar,
            width: Some(width),
            height: Some(height),
            layout: LayoutKind::Linear,
            x_axis: false,
            x_linking_id: None,
            y_linking_id: None,
            zoom_linking_id: None,
            title: None,
            subtitle: None,
        }
    }

    #[test]
    fn test_deserialize_track_group() {
        let json = r#"{
            "tracks": [
                { "id": "t1", "mark": "bar", "width": 400, "height": 100 },
                { "id": "t2", "mark": "line", "width": 400, "height": 150, "xAxis": true }
            ],
            "spacing": 10
        }"#;

        let node: ViewNode = serde_json::from_str(json).unwrap();
        match node {
            ViewNode::Tracks(g) => {
                assert_eq!(g.tracks.len(), 2);
                assert_eq!(g.spacing, Some(10.0));
                match &g.tracks[1] {
                    TrackEntry::Single(t) => {
                        assert!(t.x_axis);
                        assert_eq!(t.mark, Mark::Line);
                    }
                    other => panic!("expected single track, got {other:?}"),
                }
            }
            other => panic!("expected track group, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_composite_view() {
        let json = r#"{
            "arrangement": "serial",
            "views": [
                { "tracks": [{ "id": "a", "mark": "point", "width": 200, "height": 200 }] },
                { "tracks": [{ "id": "b", "mark": "point", "width": 200, "height": 200 }] }
            ]
        }"#;

        let node: ViewNode = serde_json::from_str(json).unwrap();
        match node {
            ViewNode::Composite(v) => {
                assert_eq!(v.arrangement, Arrangement::Serial);
                assert_eq!(v.views.len(), 2);
            }
            other => panic!("expected composite view, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_overlay_entry() {
        let json = r#"{
            "tracks": [
                {
                    "tracks": [
                        { "id": "base", "mark": "bar", "width": 300, "height": 80 },
                        { "id": "sel", "mark": "brush", "xLinkingId": "link-1" }
                    ],
                    "width": 300,
                    "height": 80
                }
            ]
        }"#;

        let node: ViewNode = serde_json::from_str(json).unwrap();
        let ViewNode::Tracks(g) = node else {
            panic!("expected track group");
        };
        match &g.tracks[0] {
            TrackEntry::Overlay(o) => {
                assert_eq!(o.tracks.len(), 2);
                assert!(o.tracks[1].is_brush());
                assert_eq!(o.tracks[1].linking_id(Channel::X), Some("link-1"));
            }
            other => panic!("expected overlay group, got {other:?}"),
        }
    }

    #[test]
    fn test_root_spec_flattens_view() {
        let json = r#"{
            "title": "Example",
            "tracks": [{ "id": "t", "mark": "bar", "width": 100, "height": 40 }]
        }"#;

        let root: RootSpec = serde_json::from_str(json).unwrap();
        assert_eq!(root.title.as_deref(), Some("Example"));
        assert!(matches!(root.view, ViewNode::Tracks(_)));
    }

    #[test]
    fn test_overlay_dimension_fallback() {
        let group = OverlayGroup {
            tracks: vec![track("a", 120.0, 30.0), track("b", 200.0, 50.0)],
            width: None,
            height: None,
        };
        assert_eq!(group.declared_width(), Some(200.0));
        assert_eq!(group.declared_height(), Some(50.0));

        let explicit = OverlayGroup {
            width: Some(400.0),
            ..group
        };
        assert_eq!(explicit.declared_width(), Some(400.0));
    }

    #[test]
    fn test_arrangement_predicates() {
        assert!(Arrangement::Parallel.stacks_vertically());
        assert!(Arrangement::Vertical.stacks_vertically());
        assert!(!Arrangement::Serial.stacks_vertically());

        assert!(Arrangement::Horizontal.is_concat());
        assert!(Arrangement::Vertical.is_concat());
        assert!(!Arrangement::Parallel.is_concat());
    }
}
