// ── Wire-to-domain type conversions ──
//
// Bridges raw `tvsync_api` records into domain types and back into
// request bodies. Token parsing is table-driven: canonical wire tokens
// map to enumerators, anything unrecognized falls back to a documented
// default instead of being silently mis-mapped.

use tvsync_api::types::{
    ContactRecord, DeviceCreate, DeviceRecord, GroupRecord, OwnerRecord, ShareGroupRequest,
    ShareRecord, ShareUser,
};

use crate::error::CoreError;
use crate::model::{
    Contact, Device, FeatureSet, Group, GroupOwner, GroupShare, OnlineState, Permission,
};

// ── Token tables ────────────────────────────────────────────────────

/// Map a wire online-state token. Unknown or absent → `Offline`.
pub fn online_state_from_wire(token: Option<&str>) -> OnlineState {
    match token.map(|t| t.trim().to_lowercase()).as_deref() {
        Some("online") => OnlineState::Online,
        Some("busy") => OnlineState::Busy,
        Some("away") => OnlineState::Away,
        _ => OnlineState::Offline,
    }
}

/// Map a wire permission token. Unknown or absent → `Read`.
///
/// The service emits both `readwrite` and `read-write` depending on the
/// endpoint; both are accepted.
pub fn permission_from_wire(token: Option<&str>) -> Permission {
    match token.map(|t| t.trim().to_lowercase()).as_deref() {
        Some("readwrite" | "read-write") => Permission::ReadWrite,
        Some("owned") => Permission::Owned,
        _ => Permission::Read,
    }
}

/// Map a wire feature list. Absent → empty set.
pub fn features_from_wire(raw: Option<&str>) -> FeatureSet {
    raw.map(FeatureSet::from_wire).unwrap_or_default()
}

/// Render a permission as its wire token for an outbound request.
///
/// `Owned` is refused unless explicitly allowed; share requests must
/// never carry it.
pub fn permission_to_wire(
    permission: Permission,
    allow_owned: bool,
) -> Result<&'static str, CoreError> {
    match permission {
        Permission::Read => Ok("read"),
        Permission::ReadWrite => Ok("readwrite"),
        Permission::Owned if allow_owned => Ok("owned"),
        Permission::Owned => Err(CoreError::InvalidShare),
    }
}

// ── Record → domain ─────────────────────────────────────────────────

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        Self {
            id: record.device_id,
            remote_control_id: record.remotecontrol_id,
            group_id: record.groupid,
            alias: record.alias,
            description: record.description,
            online_state: online_state_from_wire(record.online_state.as_deref()),
            supported_features: features_from_wire(record.supported_features.as_deref()),
            assigned_to_current_user: record.assigned_to.unwrap_or(false),
        }
    }
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Self {
            id: record.contact_id,
            user_id: record.user_id,
            name: record.name,
            group_id: record.groupid,
            description: record.description,
            online_state: online_state_from_wire(record.online_state.as_deref()),
            profile_picture_url: record.profilepicture_url,
            supported_features: features_from_wire(record.supported_features.as_deref()),
        }
    }
}

impl From<ShareRecord> for GroupShare {
    fn from(record: ShareRecord) -> Self {
        Self {
            user_id: record.userid,
            name: record.name,
            permissions: permission_from_wire(record.permissions.as_deref()),
            pending: record.pending,
        }
    }
}

impl From<OwnerRecord> for GroupOwner {
    fn from(record: OwnerRecord) -> Self {
        Self {
            user_id: record.userid,
            name: record.name,
        }
    }
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            shared_with: record
                .shared_with
                .unwrap_or_default()
                .into_iter()
                .map(GroupShare::from)
                .collect(),
            owner: record.owner.map(GroupOwner::from),
            permissions: permission_from_wire(record.permissions.as_deref()),
        }
    }
}

// ── Domain → request bodies ─────────────────────────────────────────

/// Build the create body for a device, referencing the *resolved* remote
/// group id rather than whatever id the device record carries.
pub fn device_create(device: &Device, group_id: &str) -> DeviceCreate {
    DeviceCreate {
        remotecontrol_id: device.remote_control_id.clone(),
        groupid: group_id.to_owned(),
        description: device.description.clone(),
        alias: device.alias.clone(),
        password: None,
    }
}

/// Build a share request, rejecting `Owned` before anything is sent.
pub fn share_request(users: &[(String, Permission)]) -> Result<ShareGroupRequest, CoreError> {
    let users = users
        .iter()
        .map(|(user_id, permission)| {
            Ok(ShareUser {
                userid: user_id.clone(),
                permissions: permission_to_wire(*permission, false)?.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;
    Ok(ShareGroupRequest { users })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Feature;

    #[test]
    fn online_state_table() {
        assert_eq!(online_state_from_wire(Some("Online")), OnlineState::Online);
        assert_eq!(online_state_from_wire(Some(" busy ")), OnlineState::Busy);
        assert_eq!(online_state_from_wire(Some("AWAY")), OnlineState::Away);
        assert_eq!(online_state_from_wire(Some("offline")), OnlineState::Offline);
        // Unknown and absent both fall back to Offline.
        assert_eq!(online_state_from_wire(Some("sleeping")), OnlineState::Offline);
        assert_eq!(online_state_from_wire(None), OnlineState::Offline);
    }

    #[test]
    fn permission_table_accepts_both_readwrite_spellings() {
        assert_eq!(
            permission_from_wire(Some("readwrite")),
            Permission::ReadWrite
        );
        assert_eq!(
            permission_from_wire(Some("read-write")),
            Permission::ReadWrite
        );
        assert_eq!(permission_from_wire(Some("owned")), Permission::Owned);
        assert_eq!(permission_from_wire(Some("whatever")), Permission::Read);
        assert_eq!(permission_from_wire(None), Permission::Read);
    }

    #[test]
    fn owned_is_rejected_in_share_requests() {
        let users = vec![("u1".to_owned(), Permission::Owned)];
        assert!(matches!(
            share_request(&users),
            Err(CoreError::InvalidShare)
        ));
    }

    #[test]
    fn share_request_renders_wire_tokens() {
        let users = vec![
            ("u1".to_owned(), Permission::Read),
            ("u2".to_owned(), Permission::ReadWrite),
        ];
        let request = share_request(&users).expect("valid request");
        assert_eq!(request.users[0].permissions, "read");
        assert_eq!(request.users[1].permissions, "readwrite");
    }

    #[test]
    fn device_record_conversion_fills_defaults() {
        let record = DeviceRecord {
            device_id: "d1".into(),
            remotecontrol_id: "r1".into(),
            groupid: "g1".into(),
            alias: None,
            description: None,
            online_state: None,
            supported_features: Some("chat, remote_control".into()),
            assigned_to: None,
        };
        let device = Device::from(record);
        assert_eq!(device.online_state, OnlineState::Offline);
        assert!(device.supported_features.contains(Feature::RemoteControl));
        assert!(!device.assigned_to_current_user);
    }

    #[test]
    fn group_record_conversion_treats_absent_owner_as_current_user() {
        let record = GroupRecord {
            id: "g1".into(),
            name: "Lab".into(),
            shared_with: None,
            owner: None,
            permissions: Some("owned".into()),
        };
        let group = Group::from(record);
        assert!(group.owner.is_none());
        assert!(group.shared_with.is_empty());
        assert_eq!(group.permissions, Permission::Owned);
    }
}
