// Scenario tests for the reconciliation engine and purge orchestrator,
// using wiremock as the remote service.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tvsync_api::ApiClient;
use tvsync_core::model::{Contact, Device, FeatureSet, Group, OnlineState, Permission};
use tvsync_core::{ImportOutcome, Inventory, PurgeOutcome, PurgeUi, Snapshot};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Inventory) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, Inventory::new(client))
}

fn group(id: &str, name: &str) -> Group {
    Group {
        id: id.into(),
        name: name.into(),
        shared_with: Vec::new(),
        owner: None,
        permissions: Permission::Owned,
    }
}

fn device(id: &str, rc_id: &str, group_id: &str) -> Device {
    Device {
        id: id.into(),
        remote_control_id: rc_id.into(),
        group_id: group_id.into(),
        alias: None,
        description: None,
        online_state: OnlineState::Offline,
        supported_features: FeatureSet::empty(),
        assigned_to_current_user: false,
    }
}

fn contact(id: &str, name: &str, group_id: &str) -> Contact {
    Contact {
        id: id.into(),
        user_id: format!("u-{id}"),
        name: name.into(),
        group_id: group_id.into(),
        description: None,
        online_state: OnlineState::Offline,
        profile_picture_url: None,
        supported_features: FeatureSet::empty(),
    }
}

/// Scripted confirmation answers; presentations are ignored.
struct ScriptedUi {
    answers: Vec<bool>,
}

impl ScriptedUi {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().rev().copied().collect(),
        }
    }
}

impl PurgeUi for ScriptedUi {
    fn present_devices(&mut self, _devices: &[Device]) {}
    fn present_contacts(&mut self, _contacts: &[Contact]) {}
    fn present_groups(&mut self, _groups: &[Group]) {}
    fn confirm(&mut self, _question: &str) -> bool {
        self.answers.pop().unwrap_or(false)
    }
}

// ── Import scenarios ────────────────────────────────────────────────

#[tokio::test]
async fn fresh_import_creates_group_then_device_with_remapped_id() {
    let (server, inventory) = setup().await;

    // The file recorded the group as g_old; the service assigns g900.
    Mock::given(method("POST"))
        .and(path("/api/v1/groups"))
        .and(body_json(json!({ "name": "Lab" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g900", "name": "Lab", "permissions": "owned"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The device must reference g900, never the stale g_old.
    Mock::given(method("POST"))
        .and(path("/api/v1/devices"))
        .and(body_json(json!({
            "remotecontrol_id": "123 456 789",
            "groupid": "g900"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_id": "d900",
            "remotecontrol_id": "123 456 789",
            "groupid": "g900"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut existing = Snapshot::default();
    let target = Snapshot {
        groups: vec![group("g_old", "Lab")],
        contacts: Vec::new(),
        devices: vec![device("d_old", "123 456 789", "g_old")],
    };

    let report = inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();

    assert_eq!(report.created_groups(), 1);
    assert_eq!(report.created_devices(), 1);
    assert_eq!(report.failed_devices(), 0);
    // The existing snapshot now carries the created entities.
    assert_eq!(existing.groups[0].id, "g900");
    assert_eq!(existing.devices[0].group_id, "g900");
}

#[tokio::test]
async fn name_matched_group_is_not_recreated_and_resolution_uses_its_id() {
    let (server, inventory) = setup().await;

    // No group mock mounted: a createGroup call would fail the import.
    Mock::given(method("POST"))
        .and(path("/api/v1/devices"))
        .and(body_json(json!({
            "remotecontrol_id": "r1",
            "groupid": "g1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_id": "d1", "remotecontrol_id": "r1", "groupid": "g1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut existing = Snapshot {
        groups: vec![group("g1", "Lab")],
        ..Snapshot::default()
    };
    let target = Snapshot {
        groups: vec![group("g_old", "Lab")],
        contacts: Vec::new(),
        devices: vec![device("d_old", "r1", "g_old")],
    };

    let report = inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();

    assert_eq!(report.created_groups(), 0);
    assert!(report
        .outcomes
        .contains(&ImportOutcome::GroupExists { name: "Lab".into() }));
    assert_eq!(existing.devices[0].group_id, "g1");
}

#[tokio::test]
async fn contacts_are_reported_skipped_never_created() {
    // No mocks at all: any request would fail the test.
    let (_server, inventory) = setup().await;

    let mut existing = Snapshot::default();
    let target = Snapshot {
        groups: Vec::new(),
        contacts: vec![contact("c1", "Sam", "g1")],
        devices: Vec::new(),
    };

    let report = inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();

    assert_eq!(report.skipped_contacts(), 1);
    assert!(report
        .outcomes
        .contains(&ImportOutcome::ContactSkipped { name: "Sam".into() }));
}

#[tokio::test]
async fn second_import_run_creates_nothing() {
    let (server, inventory) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g900", "name": "Lab"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_id": "d900", "remotecontrol_id": "r1", "groupid": "g900"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut existing = Snapshot::default();
    let target = Snapshot {
        groups: vec![group("g_old", "Lab")],
        contacts: Vec::new(),
        devices: vec![device("d_old", "r1", "g_old")],
    };

    inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();
    // Same target again: everything is recognized as already present,
    // and the .expect(1) mocks verify no further creation requests.
    let second = inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();

    assert_eq!(second.created_groups(), 0);
    assert_eq!(second.created_devices(), 0);
    assert!(second
        .outcomes
        .contains(&ImportOutcome::DeviceExists { remote_control_id: "r1".into() }));
}

#[tokio::test]
async fn group_creation_failure_aborts_the_import() {
    let (server, inventory) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // No device creation may be attempted after the abort.
    Mock::given(method("POST"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut existing = Snapshot::default();
    let target = Snapshot {
        groups: vec![group("g_old", "Lab")],
        contacts: Vec::new(),
        devices: vec![device("d_old", "r1", "g_old")],
    };

    let result = inventory.import(&mut existing, &target, |_| {}).await;
    assert!(result.is_err());
    assert!(existing.groups.is_empty());
}

#[tokio::test]
async fn single_device_failure_is_skipped_and_later_devices_proceed() {
    let (server, inventory) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/devices"))
        .and(body_json(json!({ "remotecontrol_id": "r1", "groupid": "g1" })))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "internal", "error_description": "boom"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/devices"))
        .and(body_json(json!({ "remotecontrol_id": "r2", "groupid": "g1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_id": "d2", "remotecontrol_id": "r2", "groupid": "g1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut existing = Snapshot {
        groups: vec![group("g1", "Lab")],
        ..Snapshot::default()
    };
    let target = Snapshot {
        groups: vec![group("g1", "Lab")],
        contacts: Vec::new(),
        devices: vec![device("dx", "r1", "g1"), device("dy", "r2", "g1")],
    };

    let report = inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();

    assert_eq!(report.failed_devices(), 1);
    assert_eq!(report.created_devices(), 1);
    assert_eq!(existing.devices.len(), 1);
    assert_eq!(existing.devices[0].remote_control_id, "r2");
}

#[tokio::test]
async fn device_with_unresolvable_group_is_skipped_not_fatal() {
    let (_server, inventory) = setup().await;

    let mut existing = Snapshot::default();
    // The device references a group the file never defines.
    let target = Snapshot {
        groups: Vec::new(),
        contacts: Vec::new(),
        devices: vec![device("dx", "r1", "g_missing")],
    };

    let report = inventory
        .import(&mut existing, &target, |_| {})
        .await
        .unwrap();

    assert_eq!(report.failed_devices(), 1);
    match &report.outcomes[0] {
        ImportOutcome::DeviceFailed { reason, .. } => {
            assert!(reason.contains("g_missing"), "reason: {reason}");
        }
        other => panic!("expected DeviceFailed, got {other:?}"),
    }
}

// ── Purge scenarios ─────────────────────────────────────────────────

#[tokio::test]
async fn purge_devices_deletes_in_listing_order() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [
                { "device_id": "d1", "remotecontrol_id": "r1", "groupid": "g1" },
                { "device_id": "d2", "remotecontrol_id": "r2", "groupid": "g1" }
            ]
        })))
        .mount(&server)
        .await;
    for id in ["d1", "d2"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/devices/{id}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut ui = ScriptedUi::new(&[true]);
    let outcome = inventory.purge_devices(&mut ui).await.unwrap();
    assert_eq!(outcome, PurgeOutcome::Purged(2));
}

#[tokio::test]
async fn declined_confirmation_aborts_without_deleting() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [
                { "device_id": "d1", "remotecontrol_id": "r1", "groupid": "g1" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/devices/d1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut ui = ScriptedUi::new(&[false]);
    let outcome = inventory.purge_devices(&mut ui).await.unwrap();
    assert_eq!(outcome, PurgeOutcome::Aborted);
}

#[tokio::test]
async fn aborting_the_devices_stage_aborts_the_whole_group_purge() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": [] })))
        .mount(&server)
        .await;
    // Later stages must never be reached.
    Mock::given(method("GET"))
        .and(path("/api/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contacts": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let mut ui = ScriptedUi::new(&[false]);
    let outcome = inventory.purge_groups(&mut ui).await.unwrap();
    assert_eq!(outcome, PurgeOutcome::Aborted);
}

#[tokio::test]
async fn full_group_purge_runs_all_three_stages() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [{ "device_id": "d1", "remotecontrol_id": "r1", "groupid": "g1" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [{
                "contact_id": "c1", "user_id": "u1", "name": "Sam", "groupid": "g1"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [{ "id": "g1", "name": "Lab" }]
        })))
        .mount(&server)
        .await;
    for p in [
        "/api/v1/devices/d1",
        "/api/v1/contacts/c1",
        "/api/v1/groups/g1",
    ] {
        Mock::given(method("DELETE"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut ui = ScriptedUi::new(&[true, true, true]);
    let outcome = inventory.purge_groups(&mut ui).await.unwrap();
    assert_eq!(outcome, PurgeOutcome::Purged(1));
}

// ── Fetch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_snapshot_collects_all_three_kinds() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [{
                "device_id": "d1", "remotecontrol_id": "r1", "groupid": "g1",
                "online_state": "Online", "supported_features": "chat, remote_control"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contacts": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [{ "id": "g1", "name": "Lab", "permissions": "owned" }]
        })))
        .mount(&server)
        .await;

    let snapshot = inventory.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.groups.len(), 1);
    assert_eq!(snapshot.devices.len(), 1);
    assert!(snapshot.contacts.is_empty());
    assert!(snapshot.devices[0].online_state.is_online());
    assert_eq!(snapshot.groups[0].permissions, Permission::Owned);
}
