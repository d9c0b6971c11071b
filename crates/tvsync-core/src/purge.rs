//! Bulk deletion orchestrator.
//!
//! Each stage fetches the full collection for one entity kind, hands it
//! to the caller for display, gates on an explicit confirmation, then
//! deletes every member sequentially in listing order. A declined
//! confirmation aborts the stage — and, in the chained group purge, the
//! remainder. Deleting a group cascades service-side to its members,
//! which is why the chained purge clears devices and contacts first.

use tracing::info;
use tvsync_api::ApiClient;

use crate::error::CoreError;
use crate::model::{Contact, Device, Group};

/// Presentation and confirmation hooks for purge runs.
///
/// Implemented by the CLI over the terminal, and by tests with scripted
/// answers. Core never touches stdin/stdout itself.
pub trait PurgeUi {
    fn present_devices(&mut self, devices: &[Device]);
    fn present_contacts(&mut self, contacts: &[Contact]);
    fn present_groups(&mut self, groups: &[Group]);

    /// An explicit affirmative is required; anything else aborts.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Result of one purge stage (or a chain of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// Every member was deleted; carries the count.
    Purged(usize),
    /// The user declined a confirmation; nothing further was deleted.
    Aborted,
}

/// Delete every device, confirmation-gated.
pub async fn purge_devices(
    client: &ApiClient,
    ui: &mut impl PurgeUi,
) -> Result<PurgeOutcome, CoreError> {
    let devices: Vec<Device> = client
        .list_devices()
        .await?
        .into_iter()
        .map(Device::from)
        .collect();
    ui.present_devices(&devices);

    if !ui.confirm("Delete ALL devices?") {
        return Ok(PurgeOutcome::Aborted);
    }
    for device in &devices {
        info!(id = %device.id, "deleting device");
        client.delete_device(&device.id).await?;
    }
    Ok(PurgeOutcome::Purged(devices.len()))
}

/// Delete every contact, confirmation-gated.
pub async fn purge_contacts(
    client: &ApiClient,
    ui: &mut impl PurgeUi,
) -> Result<PurgeOutcome, CoreError> {
    let contacts: Vec<Contact> = client
        .list_contacts()
        .await?
        .into_iter()
        .map(Contact::from)
        .collect();
    ui.present_contacts(&contacts);

    if !ui.confirm("Delete ALL contacts?") {
        return Ok(PurgeOutcome::Aborted);
    }
    for contact in &contacts {
        info!(id = %contact.id, "deleting contact");
        client.delete_contact(&contact.id).await?;
    }
    Ok(PurgeOutcome::Purged(contacts.len()))
}

/// Delete everything: the devices stage, then the contacts stage, then
/// the groups themselves, each behind its own confirmation. Aborting any
/// stage aborts the remainder.
pub async fn purge_groups(
    client: &ApiClient,
    ui: &mut impl PurgeUi,
) -> Result<PurgeOutcome, CoreError> {
    if purge_devices(client, ui).await? == PurgeOutcome::Aborted {
        return Ok(PurgeOutcome::Aborted);
    }
    if purge_contacts(client, ui).await? == PurgeOutcome::Aborted {
        return Ok(PurgeOutcome::Aborted);
    }

    let groups: Vec<Group> = client
        .list_groups()
        .await?
        .into_iter()
        .map(Group::from)
        .collect();
    ui.present_groups(&groups);

    if !ui.confirm("Delete ALL groups?") {
        return Ok(PurgeOutcome::Aborted);
    }
    for group in &groups {
        info!(id = %group.id, name = %group.name, "deleting group");
        client.delete_group(&group.id).await?;
    }
    Ok(PurgeOutcome::Purged(groups.len()))
}
