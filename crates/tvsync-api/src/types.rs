//! Wire types for the TeamViewer Web API.
//!
//! Field names follow the service's snake-case JSON exactly
//! (`remotecontrol_id`, `groupid`, `online_state`, ...). Optional fields
//! the service may omit — owner, profile picture, shares, feature lists —
//! deserialize as `None` rather than erroring.

use serde::{Deserialize, Serialize};

// ── Ping ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub token_valid: bool,
}

// ── Devices ─────────────────────────────────────────────────────────

/// Envelope of `GET api/v1/devices`.
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    pub devices: Vec<DeviceRecord>,
}

/// One entry of the computers & contacts list that is a device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    /// Inventory-entry id, prefixed with 'd' by service convention.
    pub device_id: String,
    /// The dialable id used to start a remote control session.
    pub remotecontrol_id: String,
    pub groupid: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub online_state: Option<String>,
    /// Comma-separated feature tokens, e.g. `"chat, remote_control"`.
    #[serde(default)]
    pub supported_features: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<bool>,
}

/// Body of `POST api/v1/devices`.
#[derive(Debug, Serialize)]
pub struct DeviceCreate {
    pub remotecontrol_id: String,
    pub groupid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body of `PUT api/v1/devices/{id}`. Fields left `None` are untouched.
#[derive(Debug, Default, Serialize)]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupid: Option<String>,
}

impl DevicePatch {
    pub fn is_empty(&self) -> bool {
        self.alias.is_none()
            && self.description.is_none()
            && self.password.is_none()
            && self.groupid.is_none()
    }
}

// ── Contacts ────────────────────────────────────────────────────────

/// Envelope of `GET api/v1/contacts`.
#[derive(Debug, Deserialize)]
pub struct ContactList {
    pub contacts: Vec<ContactRecord>,
}

/// One entry of the computers & contacts list that is a contact.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRecord {
    /// Inventory-entry id, prefixed with 'c' by service convention.
    pub contact_id: String,
    /// User id of the contact, prefixed with 'u'.
    pub user_id: String,
    pub name: String,
    pub groupid: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub online_state: Option<String>,
    /// URL template containing `[size]` as a placeholder.
    #[serde(default)]
    pub profilepicture_url: Option<String>,
    #[serde(default)]
    pub supported_features: Option<String>,
}

// ── Groups ──────────────────────────────────────────────────────────

/// Envelope of `GET api/v1/groups`.
#[derive(Debug, Deserialize)]
pub struct GroupList {
    pub groups: Vec<GroupRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shared_with: Option<Vec<ShareRecord>>,
    /// Omitted when the owner is the current user.
    #[serde(default)]
    pub owner: Option<OwnerRecord>,
    /// `"read"`, `"readwrite"` or `"owned"`.
    #[serde(default)]
    pub permissions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareRecord {
    pub userid: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Option<String>,
    /// `true` while the user hasn't accepted the share yet.
    #[serde(default)]
    pub pending: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRecord {
    pub userid: String,
    pub name: String,
}

/// Body of `POST api/v1/groups`.
#[derive(Debug, Serialize)]
pub struct GroupCreate {
    pub name: String,
}

/// Body of `POST api/v1/groups/{id}/share_group`.
#[derive(Debug, Serialize)]
pub struct ShareGroupRequest {
    pub users: Vec<ShareUser>,
}

#[derive(Debug, Serialize)]
pub struct ShareUser {
    pub userid: String,
    /// `"read"` or `"readwrite"` — `"owned"` is never a valid request.
    pub permissions: String,
}

/// Body of `POST api/v1/groups/{id}/unshare_group`.
#[derive(Debug, Serialize)]
pub struct UnshareGroupRequest {
    pub users: Vec<String>,
}
