//! Generic visitors over the view/track tree
//!
//! Both the layout compiler (circular-root detection) and the linking
//! resolver (linking-id discovery) walk the same tree; these visitors keep
//! the recursion in one place.

use crate::spec::{CompositeView, TrackDef, TrackEntry, ViewNode};

/// Visit every track definition in the subtree, depth-first in sibling
/// order. Overlaid members are visited individually.
pub fn visit_tracks<'a, F>(node: &'a ViewNode, f: &mut F)
where
    F: FnMut(&'a TrackDef),
{
    match node {
        ViewNode::Tracks(group) => {
            for entry in &group.tracks {
                match entry {
                    TrackEntry::Single(t) => f(t),
                    TrackEntry::Overlay(o) => {
                        for t in &o.tracks {
                            f(t);
                        }
                    }
                }
            }
        }
        ViewNode::Composite(view) => {
            for child in &view.views {
                visit_tracks(child, f);
            }
        }
    }
}

/// Visit every composite view in the subtree, including `node` itself when
/// it is composite.
pub fn visit_composites<'a, F>(node: &'a ViewNode, f: &mut F)
where
    F: FnMut(&'a CompositeView),
{
    if let ViewNode::Composite(view) = node {
        f(view);
        for child in &view.views {
            visit_composites(child, f);
        }
    }
}
