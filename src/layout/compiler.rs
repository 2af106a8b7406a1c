//! Recursive layout computation
//!
//! Walks the view tree once, depth-first in sibling order, producing one
//! `TrackInfo` per physical track slot. Linear placement accumulates running
//! width/height cursors per node; a subtree whose tracks are all circular is
//! claimed by exactly one ancestor (the circular root) and collapsed into
//! overlaid rings after its linear placement has been used for sizing. Grid
//! coordinates are assigned in a single pass at the end, once the true total
//! footprint is known.

use tracing::warn;

use crate::spec::{Arrangement, LayoutKind, RootSpec, TrackDef, TrackEntry, ViewNode};
use crate::traverse::{visit_composites, visit_tracks};

use super::config::LayoutConfig;
use super::types::{
    BoundingBox, CircularBand, CircularEligibility, GridPosition, Placement, Size, TrackInfo,
    GRID_COLUMNS,
};

/// Compute the full layout for a specification: an ordered sequence of track
/// placements plus the total footprint size.
pub fn compute(spec: &RootSpec, config: &LayoutConfig) -> (Vec<TrackInfo>, Size) {
    let mut infos = Vec::new();
    collect(
        &spec.view,
        &mut infos,
        0.0,
        0.0,
        CircularEligibility::Eligible,
        config,
    );

    let mut size = footprint(&infos);

    if spec.title.is_some() || spec.subtitle.is_some() {
        let band = spec.title.as_ref().map_or(0.0, |_| config.title_height)
            + spec.subtitle.as_ref().map_or(0.0, |_| config.subtitle_height);
        let shift = band + config.title_margin;
        size.height += shift;

        for info in &mut infos {
            info.bounds.y += shift;
        }

        let header = TrackDef::header(size.width, band, spec.title.clone(), spec.subtitle.clone());
        infos.insert(
            0,
            TrackInfo::new(vec![header], BoundingBox::new(0.0, 0.0, size.width, band)),
        );
    }

    normalize_grid(&mut infos, size);

    (infos, size)
}

/// Total footprint of a set of track placements
pub fn footprint(infos: &[TrackInfo]) -> Size {
    let mut size = Size::default();
    for info in infos {
        size.width = size.width.max(info.bounds.right());
        size.height = size.height.max(info.bounds.bottom());
    }
    size
}

/// Convert every absolute bounding box to 12-column grid coordinates.
///
/// Must run exactly once, after the total size is known; per-node sizes
/// during traversal are provisional.
pub fn normalize_grid(infos: &mut [TrackInfo], size: Size) {
    for info in infos {
        info.grid = GridPosition {
            x: grid_ratio(info.bounds.x, size.width),
            y: grid_ratio(info.bounds.y, size.height),
            w: grid_ratio(info.bounds.width, size.width),
            h: grid_ratio(info.bounds.height, size.height),
        };
    }
}

fn grid_ratio(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * GRID_COLUMNS
    } else {
        0.0
    }
}

/// Whether `node` claims the circular root of its subtree: eligibility has
/// not been consumed by an ancestor, every descendant track is circular, at
/// least one track exists, no composite in the subtree concatenates, and the
/// node itself is a track group or a serial/parallel composite.
fn is_circular_root(node: &ViewNode, eligibility: CircularEligibility) -> bool {
    if eligibility != CircularEligibility::Eligible {
        return false;
    }

    let own_arrangement_ok = match node {
        ViewNode::Tracks(_) => true,
        ViewNode::Composite(v) => {
            matches!(v.arrangement, Arrangement::Serial | Arrangement::Parallel)
        }
    };
    if !own_arrangement_ok {
        return false;
    }

    let mut any_track = false;
    let mut all_circular = true;
    visit_tracks(node, &mut |t| {
        any_track = true;
        if t.layout != LayoutKind::Circular {
            all_circular = false;
        }
    });
    if !any_track || !all_circular {
        return false;
    }

    let mut no_concat = true;
    visit_composites(node, &mut |v| {
        if v.arrangement.is_concat() {
            no_concat = false;
        }
    });
    no_concat
}

/// Recursively place a node's tracks at offset `(dx, dy)`, appending to
/// `out`, and return the node's own bounding box.
fn collect(
    node: &ViewNode,
    out: &mut Vec<TrackInfo>,
    dx: f64,
    dy: f64,
    eligibility: CircularEligibility,
    config: &LayoutConfig,
) -> BoundingBox {
    let mut cum_width: f64 = 0.0;
    let mut cum_height: f64 = 0.0;

    let claims_root = is_circular_root(node, eligibility);
    let child_eligibility = if claims_root {
        CircularEligibility::Claimed
    } else {
        eligibility
    };

    let first_index = out.len();

    match node {
        ViewNode::Tracks(group) => {
            let spacing = group.spacing.unwrap_or(0.0);

            // Genomic tracks must align horizontally: siblings share the
            // largest declared width rather than stretching proportionally.
            for entry in &group.tracks {
                if let Some(w) = entry.declared_width() {
                    cum_width = cum_width.max(w);
                }
            }

            let mut emitted = 0usize;
            for entry in &group.tracks {
                let Some(declared_height) = entry.declared_height() else {
                    warn!(
                        id = entry_id(entry).unwrap_or("<anon>"),
                        "track has no resolved height, skipping"
                    );
                    continue;
                };
                if entry.declared_width().is_none() {
                    warn!(
                        id = entry_id(entry).unwrap_or("<anon>"),
                        "track has no resolved width, skipping"
                    );
                    continue;
                }

                // The axis band is added once per slot, never once per
                // overlaid member.
                let (defs, axis_count) = match entry {
                    TrackEntry::Single(t) => (vec![t.clone()], usize::from(t.x_axis)),
                    TrackEntry::Overlay(o) => (o.tracks.clone(), o.x_axis_count()),
                };
                if defs.is_empty() {
                    warn!("overlay group has no member tracks, skipping");
                    continue;
                }

                let mut height = declared_height;
                if axis_count >= 1 {
                    height += config.axis_height;
                }

                if emitted > 0 {
                    cum_height += spacing;
                }

                let defs = defs
                    .into_iter()
                    .map(|mut d| {
                        d.width = Some(cum_width);
                        d.height = Some(height);
                        d
                    })
                    .collect();
                out.push(TrackInfo::new(
                    defs,
                    BoundingBox::new(dx, dy + cum_height, cum_width, height),
                ));

                cum_height += height;
                emitted += 1;
            }
        }
        ViewNode::Composite(view) => {
            let spacing = view.spacing.unwrap_or(config.view_spacing);

            if view.arrangement.stacks_vertically() {
                for (i, child) in view.views.iter().enumerate() {
                    if i > 0 {
                        cum_height += spacing;
                    }
                    let bb = collect(child, out, dx, dy + cum_height, child_eligibility, config);
                    cum_width = cum_width.max(bb.width);
                    cum_height += bb.height;
                }
            } else {
                for (i, child) in view.views.iter().enumerate() {
                    if i > 0 {
                        cum_width += spacing;
                    }
                    let bb = collect(child, out, dx + cum_width, dy, child_eligibility, config);
                    cum_height = cum_height.max(bb.height);
                    cum_width += bb.width;
                }
            }
        }
    }

    if claims_root {
        cum_height = circularize(
            &mut out[first_index..],
            dx,
            dy,
            cum_width,
            cum_height,
            node.spacing().unwrap_or(config.view_spacing),
            node.center_radius().unwrap_or(config.center_radius),
            config.circular_padding,
        );
    }

    BoundingBox::new(dx, dy, cum_width, cum_height)
}

fn entry_id(entry: &TrackEntry) -> Option<&str> {
    match entry {
        TrackEntry::Single(t) => t.id.as_deref(),
        TrackEntry::Overlay(o) => o.tracks.iter().find_map(|t| t.id.as_deref()),
    }
}

/// Convert the linearly placed tracks of a circular root into polar
/// parameters, then collapse them all onto one square bounding box.
///
/// The linear placement is used purely as intermediate sizing: each track's
/// vertical band maps to a radial band and its horizontal span maps to an
/// angular span, rescaled so that a spacing-derived gap appears at angle
/// zero. Circular tracks are conceptually overlaid rings, not tiled
/// rectangles, so every member ends up with an identical square bounding box
/// of side `2 * total_radius`. Returns the subtree's new height.
#[allow(clippy::too_many_arguments)]
fn circularize(
    tracks: &mut [TrackInfo],
    dx: f64,
    dy: f64,
    cum_width: f64,
    cum_height: f64,
    spacing: f64,
    center_radius: f64,
    padding: f64,
) -> f64 {
    if tracks.is_empty() || cum_width <= 0.0 || cum_height <= 0.0 {
        return cum_height;
    }

    let total_radius = cum_width / 2.0 + padding;
    let ring_size = total_radius * (1.0 - center_radius);
    let side = total_radius * 2.0;

    let spacing_angle = spacing / cum_width * 360.0;
    // Rescale angular spans to leave room for the spacing gap
    let rescale = (cum_width - spacing) / cum_width;

    for info in tracks.iter_mut() {
        let b = info.bounds;

        let outer_radius = total_radius - padding - ((b.y - dy) / cum_height) * ring_size;
        let inner_radius = total_radius - padding - ((b.bottom() - dy) / cum_height) * ring_size;
        let start_angle = spacing_angle + ((b.x - dx) / cum_width) * rescale * 360.0;
        let end_angle = ((b.right() - dx) / cum_width) * rescale * 360.0;

        info.placement = Placement::Circular(CircularBand {
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
        });
        info.bounds = BoundingBox::new(dx, dy, side, side);

        for def in &mut info.tracks {
            def.layout = LayoutKind::Circular;
            def.width = Some(side);
            def.height = Some(side);
        }
    }

    side
}
