//! Types describing view linking: lock tables, registry entries, and
//! brush relationships
//!
//! The serialized field names `locksByViewUid` and `locksDict` are a
//! contract with the external renderer's view-configuration format and must
//! stay bit-exact.

use std::collections::BTreeMap;

use serde::Serialize;

pub use crate::spec::Channel;

/// Default reference coordinate triple assigned to every lock participant,
/// preventing divergent initial scales before any user interaction.
pub const DEFAULT_LOCK_VALUES: [f64; 3] = [124625310.5, 124625310.5, 249250.621];

/// Derived linking record for one (view, channel) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkingInfo {
    pub view_id: String,
    pub link_id: String,
    pub channel: Channel,
    /// Whether the view's selection drives another view's domain
    pub is_brush: bool,
    pub zoom_linking_id: String,
}

/// One channel's location lock on a view: the linking id it participates in
/// plus the source axis on the partner view (resolved in a second pass)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockEntry {
    pub lock: String,
    /// `None` until axis resolution finds a partner; consumers treat an
    /// unresolved entry as unlinked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Channel>,
}

impl LockEntry {
    pub fn unresolved(lock: impl Into<String>) -> Self {
        Self {
            lock: lock.into(),
            axis: None,
        }
    }
}

/// Per-channel location locks of a single view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelLocks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<LockEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<LockEntry>,
}

impl ChannelLocks {
    pub fn get(&self, channel: Channel) -> Option<&LockEntry> {
        match channel {
            Channel::X => self.x.as_ref(),
            Channel::Y => self.y.as_ref(),
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> Option<&mut LockEntry> {
        match channel {
            Channel::X => self.x.as_mut(),
            Channel::Y => self.y.as_mut(),
        }
    }

    pub fn set(&mut self, channel: Channel, entry: LockEntry) {
        match channel {
            Channel::X => self.x = Some(entry),
            Channel::Y => self.y = Some(entry),
        }
    }
}

/// Registry entry for one linking id: its uid plus a per-view default
/// coordinate triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockRegistryEntry {
    pub uid: String,
    #[serde(flatten)]
    pub views: BTreeMap<String, [f64; 3]>,
}

impl LockRegistryEntry {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            views: BTreeMap::new(),
        }
    }

    pub fn add_view(&mut self, view_id: impl Into<String>) {
        self.views.insert(view_id.into(), DEFAULT_LOCK_VALUES);
    }
}

/// Shared-scale lock tables: every participant of a zoom group maps to the
/// group id, and the registry carries one entry per group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoomLocks {
    #[serde(rename = "locksByViewUid")]
    pub locks_by_view_uid: BTreeMap<String, String>,
    #[serde(rename = "locksDict")]
    pub locks_dict: BTreeMap<String, LockRegistryEntry>,
}

/// Shared-pan lock tables, resolved independently per channel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationLocks {
    #[serde(rename = "locksByViewUid")]
    pub locks_by_view_uid: BTreeMap<String, ChannelLocks>,
    #[serde(rename = "locksDict")]
    pub locks_dict: BTreeMap<String, LockRegistryEntry>,
}

/// Directed "brush controls view" relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushLink {
    pub brush_view_id: String,
    pub link_id: String,
    pub channel: Channel,
    /// A brush with no matching target is legal and renders unconnected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_view_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_tables_serialize_with_contract_field_names() {
        let mut locks = ZoomLocks::default();
        locks
            .locks_by_view_uid
            .insert("view-1".to_string(), "zoom-a".to_string());
        let mut entry = LockRegistryEntry::new("zoom-a");
        entry.add_view("view-1");
        locks.locks_dict.insert("zoom-a".to_string(), entry);

        let json = serde_json::to_string(&locks).unwrap();
        assert!(json.contains("\"locksByViewUid\""));
        assert!(json.contains("\"locksDict\""));
        assert!(json.contains("\"uid\":\"zoom-a\""));
        assert!(json.contains("124625310.5"));
    }

    #[test]
    fn test_unresolved_axis_not_serialized() {
        let entry = LockEntry::unresolved("link-1");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "{\"lock\":\"link-1\"}");

        let resolved = LockEntry {
            lock: "link-1".to_string(),
            axis: Some(Channel::Y),
        };
        let json = serde_json::to_string(&resolved).unwrap();
        assert!(json.contains("\"axis\":\"y\""));
    }

    #[test]
    fn test_channel_locks_accessors() {
        let mut locks = ChannelLocks::default();
        assert!(locks.get(Channel::X).is_none());

        locks.set(Channel::X, LockEntry::unresolved("a"));
        assert_eq!(locks.get(Channel::X).unwrap().lock, "a");

        locks.get_mut(Channel::X).unwrap().axis = Some(Channel::X);
        assert_eq!(locks.x.as_ref().unwrap().axis, Some(Channel::X));
    }
}
