//! Snapshot codec: flat entity collections ⇄ group-rooted file document.
//!
//! The snapshot file is a single JSON document with a top-level `groups`
//! list; each group node carries the group's own attributes plus nested
//! `contacts` and `devices` lists holding full entity objects, including
//! their original group id. A denormalized tree view of three flat
//! collections.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Contact, Device, Group, GroupOwner, GroupShare, Permission};

/// The full set of groups, contacts, and devices known at one point in
/// time — either fetched remotely or read from a file.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub groups: Vec<Group>,
    pub contacts: Vec<Contact>,
    pub devices: Vec<Device>,
}

// ── File document shape ─────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub groups: Vec<GroupNode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shared_with: Vec<GroupShare>,
    #[serde(default)]
    pub owner: Option<GroupOwner>,
    #[serde(default)]
    pub permissions: Permission,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

// ── Codec ───────────────────────────────────────────────────────────

/// Group the flat collections by group id.
///
/// Groups appear in the output in input order; members within a group
/// follow the input collections' order filtered by membership (stable,
/// never re-sorted).
pub fn encode(snapshot: &Snapshot) -> SnapshotDocument {
    let groups = snapshot
        .groups
        .iter()
        .map(|group| GroupNode {
            id: group.id.clone(),
            name: group.name.clone(),
            shared_with: group.shared_with.clone(),
            owner: group.owner.clone(),
            permissions: group.permissions,
            contacts: snapshot
                .contacts
                .iter()
                .filter(|c| c.group_id == group.id)
                .cloned()
                .collect(),
            devices: snapshot
                .devices
                .iter()
                .filter(|d| d.group_id == group.id)
                .cloned()
                .collect(),
        })
        .collect();
    SnapshotDocument { groups }
}

/// Flatten a document back into three flat collections, preserving each
/// member's recorded group id.
pub fn decode(document: SnapshotDocument) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for node in document.groups {
        snapshot.groups.push(Group {
            id: node.id,
            name: node.name,
            shared_with: node.shared_with,
            owner: node.owner,
            permissions: node.permissions,
        });
        snapshot.contacts.extend(node.contacts);
        snapshot.devices.extend(node.devices);
    }
    snapshot
}

// ── File serialization ──────────────────────────────────────────────

/// Render a snapshot as pretty-printed JSON for the export file.
pub fn to_json(snapshot: &Snapshot) -> Result<String, CoreError> {
    serde_json::to_string_pretty(&encode(snapshot))
        .map_err(|e| CoreError::Internal(format!("snapshot serialization failed: {e}")))
}

/// Parse a snapshot file. A document whose top-level shape is not a
/// `groups` list with the expected sub-fields fails with `SnapshotFormat`.
pub fn from_json(raw: &str) -> Result<Snapshot, CoreError> {
    let document: SnapshotDocument =
        serde_json::from_str(raw).map_err(|e| CoreError::SnapshotFormat {
            message: e.to_string(),
        })?;
    Ok(decode(document))
}
