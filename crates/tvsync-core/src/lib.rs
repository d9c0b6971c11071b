//! Business logic for the tvsync workspace.
//!
//! This crate owns everything between the raw Web API client and the
//! terminal:
//!
//! - **Domain model** ([`model`]) — `Group`, `Device`, `Contact` and their
//!   supporting enums, with opaque service-assigned string ids.
//! - **Conversion** ([`convert`]) — table-driven mapping between wire
//!   records and domain types, with documented unknown→default fallbacks.
//! - **Snapshot codec** ([`snapshot`]) — flat collections ⇄ the
//!   group-rooted JSON export/import file.
//! - **Reconciliation engine** ([`reconcile`]) — diff a target snapshot
//!   against the live one and create only what is missing, groups before
//!   devices, with foreign keys remapped to current remote ids.
//! - **Purge orchestrator** ([`purge`]) — staged, confirmation-gated bulk
//!   deletion.
//! - **[`Inventory`]** — facade owning the one `ApiClient` for a run.

pub mod convert;
pub mod error;
pub mod inventory;
pub mod model;
pub mod purge;
pub mod reconcile;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use inventory::Inventory;
pub use purge::{PurgeOutcome, PurgeUi};
pub use reconcile::{ImportOutcome, ImportReport};
pub use snapshot::Snapshot;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Contact, Device, Feature, FeatureSet, Group, GroupOwner, GroupShare, OnlineState, Permission,
};
