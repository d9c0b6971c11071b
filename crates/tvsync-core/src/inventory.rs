//! Top-level facade over the Web API client.
//!
//! `Inventory` owns the one `ApiClient` for a run; it is explicitly
//! constructed at the top level and passed by reference, never ambient
//! state. Every remote operation is awaited to completion before the
//! next is issued — no concurrency, no batching, no retries.

use tvsync_api::ApiClient;

use crate::error::CoreError;
use crate::model::{Contact, Device, Group};
use crate::purge::{self, PurgeOutcome, PurgeUi};
use crate::reconcile::{self, ImportOutcome, ImportReport};
use crate::snapshot::Snapshot;

pub struct Inventory {
    client: ApiClient,
}

impl Inventory {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Verify the token against the ping endpoint.
    ///
    /// Returns the service's verdict; transport or status failures are
    /// authorization errors.
    pub async fn authorize(&self) -> Result<bool, CoreError> {
        Ok(self.client.ping().await?)
    }

    /// Fetch the full current remote state, one entity kind at a time.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, CoreError> {
        let devices: Vec<Device> = self
            .client
            .list_devices()
            .await?
            .into_iter()
            .map(Device::from)
            .collect();
        let contacts: Vec<Contact> = self
            .client
            .list_contacts()
            .await?
            .into_iter()
            .map(Contact::from)
            .collect();
        let groups: Vec<Group> = self
            .client
            .list_groups()
            .await?
            .into_iter()
            .map(Group::from)
            .collect();
        Ok(Snapshot {
            groups,
            contacts,
            devices,
        })
    }

    /// Reconcile a target snapshot against the existing one, creating
    /// whatever is missing. See [`reconcile::import`].
    pub async fn import(
        &self,
        existing: &mut Snapshot,
        target: &Snapshot,
        on_outcome: impl FnMut(&ImportOutcome),
    ) -> Result<ImportReport, CoreError> {
        reconcile::import(&self.client, existing, target, on_outcome).await
    }

    pub async fn purge_devices(&self, ui: &mut impl PurgeUi) -> Result<PurgeOutcome, CoreError> {
        purge::purge_devices(&self.client, ui).await
    }

    pub async fn purge_contacts(&self, ui: &mut impl PurgeUi) -> Result<PurgeOutcome, CoreError> {
        purge::purge_contacts(&self.client, ui).await
    }

    pub async fn purge_groups(&self, ui: &mut impl PurgeUi) -> Result<PurgeOutcome, CoreError> {
        purge::purge_groups(&self.client, ui).await
    }
}
