// ── Domain types for the computers & contacts inventory ──
//
// All ids are opaque, service-assigned strings. The service prefixes
// them by kind ('g', 'd', 'c', 'u'), but nothing here relies on that
// beyond equality comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

// ── Permissions ─────────────────────────────────────────────────────

/// Access level on a group.
///
/// `Owned` is only ever reported for groups the current user owns; it is
/// never valid as a requested share permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    #[default]
    Read,
    ReadWrite,
    Owned,
}

// ── Online state ────────────────────────────────────────────────────

/// Presence of a contact or device. Devices only ever report
/// `Online` or `Offline`; contacts use all four states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnlineState {
    Online,
    Busy,
    Away,
    #[default]
    Offline,
}

impl OnlineState {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

// ── Features ────────────────────────────────────────────────────────

/// A capability advertised by a device or contact.
///
/// The wire tokens are lower-case and not uniformly snake-cased
/// (`videocall`, not `video_call`), hence the explicit spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
pub enum Feature {
    #[strum(serialize = "chat")]
    Chat,
    #[strum(serialize = "remote_control")]
    RemoteControl,
    #[strum(serialize = "meeting")]
    Meeting,
    #[strum(serialize = "videocall")]
    VideoCall,
}

impl Feature {
    const ALL: [Feature; 4] = [
        Feature::Chat,
        Feature::RemoteControl,
        Feature::Meeting,
        Feature::VideoCall,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Bitset over [`Feature`]. Devices use only `Chat` and `RemoteControl`;
/// contacts may advertise all four. Serialized as a list of feature names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Feature>", into = "Vec<Feature>")]
pub struct FeatureSet(u8);

impl FeatureSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, feature: Feature) {
        self.0 |= feature.bit();
    }

    pub fn contains(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Parse a comma-separated wire token list (`"chat, remote_control"`).
    /// Unrecognized tokens are ignored, not mis-mapped.
    pub fn from_wire(raw: &str) -> Self {
        raw.split(',')
            .filter_map(|token| Feature::from_str(token.trim().to_lowercase().as_str()).ok())
            .collect()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = Self::empty();
        for feature in iter {
            set.insert(feature);
        }
        set
    }
}

impl From<Vec<Feature>> for FeatureSet {
    fn from(features: Vec<Feature>) -> Self {
        features.into_iter().collect()
    }
}

impl From<FeatureSet> for Vec<Feature> {
    fn from(set: FeatureSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|feat| format!("{feat:?}")).collect();
        write!(f, "{}", names.join(", "))
    }
}

// ── Groups ──────────────────────────────────────────────────────────

/// A user the group is shared with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupShare {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Permission,
    /// `true` while the user hasn't accepted the share yet.
    #[serde(default)]
    pub pending: bool,
}

/// Owner of a group. Absent means "the current user".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupOwner {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shared_with: Vec<GroupShare>,
    #[serde(default)]
    pub owner: Option<GroupOwner>,
    /// The current user's permission level on this group.
    #[serde(default)]
    pub permissions: Permission,
}

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Inventory-entry id, distinct from the dialable id below.
    pub id: String,
    /// The id a user dials to start a remote control session.
    pub remote_control_id: String,
    pub group_id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub online_state: OnlineState,
    #[serde(default)]
    pub supported_features: FeatureSet,
    #[serde(default)]
    pub assigned_to_current_user: bool,
}

// ── Contacts ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub group_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub online_state: OnlineState,
    /// URL template with a `[size]` placeholder; absent when the contact
    /// has no profile picture.
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub supported_features: FeatureSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_set_from_wire_ignores_unknown_tokens() {
        let set = FeatureSet::from_wire("chat, remote_control, teleport");
        assert!(set.contains(Feature::Chat));
        assert!(set.contains(Feature::RemoteControl));
        assert!(!set.contains(Feature::Meeting));
    }

    #[test]
    fn feature_set_from_wire_handles_case_and_spacing() {
        let set = FeatureSet::from_wire(" Chat ,VIDEOCALL");
        assert!(set.contains(Feature::Chat));
        assert!(set.contains(Feature::VideoCall));
    }

    #[test]
    fn feature_set_serializes_as_name_list() {
        let set: FeatureSet = [Feature::Chat, Feature::Meeting].into_iter().collect();
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["Chat","Meeting"]"#);

        let back: FeatureSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, set);
    }

    #[test]
    fn empty_feature_set_displays_empty() {
        assert_eq!(FeatureSet::empty().to_string(), "");
    }
}
