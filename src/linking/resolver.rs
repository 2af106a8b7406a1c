//! Linking resolution
//!
//! Discovers groups of views sharing a linking identifier, classifies them
//! into zoom locks, location locks, and brush relationships, and derives a
//! consistent bidirectional axis mapping between linked views. The input
//! never pre-declares which view is the "source" of a shared scale; the
//! direction falls out of a second all-pairs pass once every view's linking
//! id is registered.
//!
//! This subsystem never fails: malformed or missing linking identifiers
//! degrade to "no sharing" for that channel, since linking is an enhancement
//! over an otherwise independently valid layout.

use std::collections::BTreeMap;

use tracing::warn;

use crate::layout::TrackInfo;
use crate::output::CompiledOutput;

use super::types::{
    BrushLink, Channel, ChannelLocks, LinkingInfo, LockEntry, LockRegistryEntry, LocationLocks,
    ZoomLocks,
};

/// Run the full linking resolution against an output model whose layout
/// facts are already populated.
pub fn resolve(output: &mut CompiledOutput) {
    let records = discover(&output.tracks);

    associate_brushes(&records, &mut output.brushes);
    build_zoom_locks(&records, &mut output.zoom_locks);
    build_location_locks(&records, &mut output.location_locks);
    resolve_axes(&mut output.location_locks.locks_by_view_uid);
}

/// Scan the laid-out tracks for channel-level linking declarations.
///
/// Overlaid members are scanned individually, so a brush overlaid on a plain
/// track produces its own record. Records on tracks without a view id cannot
/// participate in any lock table and are dropped with a warning.
pub fn discover(infos: &[TrackInfo]) -> Vec<LinkingInfo> {
    let mut records = Vec::new();

    for info in infos {
        for def in &info.tracks {
            for channel in Channel::ALL {
                let Some(link_id) = def.linking_id(channel) else {
                    continue;
                };
                let Some(view_id) = def.id.as_deref() else {
                    warn!(
                        link_id,
                        channel = %channel,
                        "linked track has no view id, treating as unlinked"
                    );
                    continue;
                };

                records.push(LinkingInfo {
                    view_id: view_id.to_string(),
                    link_id: link_id.to_string(),
                    channel,
                    is_brush: def.is_brush(),
                    zoom_linking_id: def
                        .zoom_linking_id
                        .clone()
                        .unwrap_or_else(|| link_id.to_string()),
                });
            }
        }
    }

    records
}

/// Pair each brush record with the first plain record sharing its linking
/// id. Brushes with no partner stay in the output unconnected.
pub fn associate_brushes(records: &[LinkingInfo], brushes: &mut Vec<BrushLink>) {
    for brush in records.iter().filter(|r| r.is_brush) {
        let target = records
            .iter()
            .find(|r| !r.is_brush && r.link_id == brush.link_id)
            .map(|r| r.view_id.clone());

        brushes.push(BrushLink {
            brush_view_id: brush.view_id.clone(),
            link_id: brush.link_id.clone(),
            channel: brush.channel,
            target_view_id: target,
        });
    }
}

/// Group plain records by zoom linking id into shared-scale locks.
pub fn build_zoom_locks(records: &[LinkingInfo], locks: &mut ZoomLocks) {
    for record in records.iter().filter(|r| !r.is_brush) {
        locks
            .locks_by_view_uid
            .insert(record.view_id.clone(), record.zoom_linking_id.clone());
    }

    for record in records {
        let entry = locks
            .locks_dict
            .entry(record.zoom_linking_id.clone())
            .or_insert_with(|| LockRegistryEntry::new(record.zoom_linking_id.clone()));
        if !record.is_brush {
            entry.add_view(record.view_id.clone());
        }
    }
}

/// Group plain records by linking id into shared-pan locks, with every axis
/// initially unresolved.
pub fn build_location_locks(records: &[LinkingInfo], locks: &mut LocationLocks) {
    for record in records.iter().filter(|r| !r.is_brush) {
        locks
            .locks_by_view_uid
            .entry(record.view_id.clone())
            .or_default()
            .set(record.channel, LockEntry::unresolved(record.link_id.clone()));
    }

    for record in records {
        let entry = locks
            .locks_dict
            .entry(record.link_id.clone())
            .or_insert_with(|| LockRegistryEntry::new(record.link_id.clone()));
        if !record.is_brush {
            entry.add_view(record.view_id.clone());
        }
    }
}

/// Second pass over the completed lock table: for every locked (view,
/// channel), scan all other views for one sharing its linking id and record
/// the partner's channel as this pair's source axis, symmetrically.
///
/// Must run only after every view is registered, since a view's axis mapping
/// depends on which other view shares its linking id. O(V²) in view count,
/// acceptable since view counts are in the tens. Pairs with no partner keep
/// `axis = None` and are left in place for diagnostic visibility.
pub fn resolve_axes(locks: &mut BTreeMap<String, ChannelLocks>) {
    let mut snapshot: Vec<(String, Channel, String)> = Vec::new();
    for (view_id, channels) in locks.iter() {
        for channel in Channel::ALL {
            if let Some(entry) = channels.get(channel) {
                snapshot.push((view_id.clone(), channel, entry.lock.clone()));
            }
        }
    }

    for (target_view, target_channel, link_id) in &snapshot {
        for (source_view, source_channel, source_link) in &snapshot {
            if source_view == target_view || source_link != link_id {
                continue;
            }
            if let Some(entry) = locks
                .get_mut(target_view)
                .and_then(|c| c.get_mut(*target_channel))
            {
                entry.axis = Some(*source_channel);
            }
            if let Some(entry) = locks
                .get_mut(source_view)
                .and_then(|c| c.get_mut(*source_channel))
            {
                entry.axis = Some(*target_channel);
            }
        }
    }
}
