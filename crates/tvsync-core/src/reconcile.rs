//! Reconciliation engine.
//!
//! Given a live snapshot of the remote inventory and a target snapshot
//! decoded from a file, create exactly the missing groups and devices in
//! dependency order: all group creations complete before any device
//! creation is attempted, and each new device references the *current*
//! remote id of its group, which for a freshly created group differs
//! from the id recorded in the file.
//!
//! Contacts are never created; the service offers no contact-creation
//! endpoint usable here. They are reported as skipped.

use tracing::{info, warn};
use tvsync_api::ApiClient;

use crate::convert::device_create;
use crate::error::CoreError;
use crate::model::{Device, Group};
use crate::snapshot::Snapshot;

// ── Outcomes ────────────────────────────────────────────────────────

/// Per-item result of one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    GroupCreated { name: String, id: String },
    GroupExists { name: String },
    DeviceCreated { remote_control_id: String, id: String, group_id: String },
    DeviceExists { remote_control_id: String },
    DeviceFailed { remote_control_id: String, reason: String },
    ContactSkipped { name: String },
}

/// Ordered log of everything the engine decided or did.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    pub fn skipped_contacts(&self) -> usize {
        self.count(|o| matches!(o, ImportOutcome::ContactSkipped { .. }))
    }

    pub fn failed_devices(&self) -> usize {
        self.count(|o| matches!(o, ImportOutcome::DeviceFailed { .. }))
    }

    pub fn created_groups(&self) -> usize {
        self.count(|o| matches!(o, ImportOutcome::GroupCreated { .. }))
    }

    pub fn created_devices(&self) -> usize {
        self.count(|o| matches!(o, ImportOutcome::DeviceCreated { .. }))
    }

    fn count(&self, predicate: impl Fn(&ImportOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

// ── Matching ────────────────────────────────────────────────────────

// The id-OR-name (groups) and id-OR-remote-control-id (devices) match is
// deliberately permissive: it avoids duplicate-by-rename collisions at
// the cost of masking genuine name collisions across unrelated groups.
// Kept for compatibility with the service's own dedup behavior; a
// stricter matcher would be a behavior change.

fn group_already_present(existing: &[Group], candidate: &Group) -> bool {
    existing
        .iter()
        .any(|g| g.id == candidate.id || g.name == candidate.name)
}

fn device_already_present(existing: &[Device], candidate: &Device) -> bool {
    existing
        .iter()
        .any(|d| d.id == candidate.id || d.remote_control_id == candidate.remote_control_id)
}

/// Resolve a device's recorded group id to the current remote group id.
///
/// Two-step indirection: the recorded id names a group in the *target*
/// snapshot; that group's name is then looked up in the *existing*
/// collection, which after the group phase contains every target group
/// (pre-existing or just created). A miss on either step means the
/// import file references a group it never defines — corrupt or from
/// another account.
fn resolve_group_id(
    target_groups: &[Group],
    existing_groups: &[Group],
    recorded_group_id: &str,
) -> Result<String, CoreError> {
    let name = target_groups
        .iter()
        .find(|g| g.id == recorded_group_id)
        .map(|g| g.name.as_str())
        .ok_or_else(|| CoreError::UnresolvedGroup {
            group_id: recorded_group_id.to_owned(),
        })?;
    existing_groups
        .iter()
        .find(|g| g.name == name)
        .map(|g| g.id.clone())
        .ok_or_else(|| CoreError::UnresolvedGroup {
            group_id: recorded_group_id.to_owned(),
        })
}

// ── Driver ──────────────────────────────────────────────────────────

/// Run one import: create missing groups, then missing devices, then
/// report skipped contacts.
///
/// `existing` is extended in place with every created entity, so a
/// second run over the same target finds everything already present.
/// `on_outcome` is invoked for each item as it is decided, before the
/// next remote call is issued.
///
/// A group-creation failure aborts the whole import: every later device
/// creation could depend on the missing group. Device failures —
/// including an unresolvable group reference — are downgraded to
/// per-item skip-and-report and do not stop the remaining devices.
pub async fn import(
    client: &ApiClient,
    existing: &mut Snapshot,
    target: &Snapshot,
    mut on_outcome: impl FnMut(&ImportOutcome),
) -> Result<ImportReport, CoreError> {
    let mut report = ImportReport::default();
    let mut record = |report: &mut ImportReport, outcome: ImportOutcome| {
        on_outcome(&outcome);
        report.outcomes.push(outcome);
    };

    // Group phase. Must complete before any device creation.
    for group in &target.groups {
        if group_already_present(&existing.groups, group) {
            info!(name = %group.name, "group already present");
            record(&mut report, ImportOutcome::GroupExists {
                name: group.name.clone(),
            });
            continue;
        }

        let created: Group = client.create_group(&group.name).await?.into();
        info!(name = %created.name, id = %created.id, "group created");
        record(&mut report, ImportOutcome::GroupCreated {
            name: created.name.clone(),
            id: created.id.clone(),
        });
        existing.groups.push(created);
    }

    // Device phase.
    for device in &target.devices {
        if device_already_present(&existing.devices, device) {
            info!(remote_control_id = %device.remote_control_id, "device already present");
            record(&mut report, ImportOutcome::DeviceExists {
                remote_control_id: device.remote_control_id.clone(),
            });
            continue;
        }

        let group_id =
            match resolve_group_id(&target.groups, &existing.groups, &device.group_id) {
                Ok(id) => id,
                Err(e) => {
                    warn!(remote_control_id = %device.remote_control_id, error = %e,
                        "skipping device");
                    record(&mut report, ImportOutcome::DeviceFailed {
                        remote_control_id: device.remote_control_id.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

        match client.create_device(&device_create(device, &group_id)).await {
            Ok(created) => {
                let created: Device = created.into();
                info!(remote_control_id = %created.remote_control_id, id = %created.id,
                    "device created");
                record(&mut report, ImportOutcome::DeviceCreated {
                    remote_control_id: created.remote_control_id.clone(),
                    id: created.id.clone(),
                    group_id: created.group_id.clone(),
                });
                existing.devices.push(created);
            }
            Err(e) => {
                warn!(remote_control_id = %device.remote_control_id, error = %e,
                    "device creation failed, skipping");
                record(&mut report, ImportOutcome::DeviceFailed {
                    remote_control_id: device.remote_control_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // Contact import is unsupported upstream: report and skip, never create.
    for contact in &target.contacts {
        warn!(name = %contact.name, "contact import is not supported, skipping");
        record(&mut report, ImportOutcome::ContactSkipped {
            name: contact.name.clone(),
        });
    }

    Ok(report)
}
