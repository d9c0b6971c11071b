//! `tvsync import` — reconcile a snapshot file against the live inventory.
//!
//! The source file resolves `--file`, then `import.json`, then
//! `export.json` in the working directory. Outcomes print as the engine
//! produces them; skipped contacts require an explicit acknowledgment at
//! the end so a silent partial import never goes unnoticed.

use std::path::{Path, PathBuf};

use tracing::info;
use tvsync_core::{ImportOutcome, Inventory, snapshot};

use crate::cli::{GlobalOpts, ImportArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    inventory: &Inventory,
    args: &ImportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let path = resolve_import_file(args.file.as_deref()).ok_or(CliError::NoImportFile)?;
    info!(path = %path.display(), "reading snapshot");

    let raw = std::fs::read_to_string(&path)?;
    let target = snapshot::from_json(&raw).map_err(CliError::from)?;

    let mut existing = inventory.fetch_snapshot().await.map_err(CliError::from)?;

    let report = inventory
        .import(&mut existing, &target, print_outcome)
        .await
        .map_err(CliError::from)?;

    output::success(&format!(
        "Import finished: {} groups and {} devices created",
        report.created_groups(),
        report.created_devices()
    ));
    if report.failed_devices() > 0 {
        output::warning(&format!(
            "{} device(s) could not be created -- see the lines above",
            report.failed_devices()
        ));
    }
    if report.skipped_contacts() > 0 {
        util::acknowledge(
            &format!(
                "{} contact(s) were skipped: contacts join via invitation and \
                 cannot be created by import.",
                report.skipped_contacts()
            ),
            global.yes,
        )?;
    }
    Ok(())
}

/// `--file` wins; otherwise the first of `import.json`, `export.json`
/// that exists in the working directory.
fn resolve_import_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    ["import.json", "export.json"]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

fn print_outcome(outcome: &ImportOutcome) {
    match outcome {
        ImportOutcome::GroupCreated { name, id } => {
            output::success(&format!("created group '{name}' ({id})"));
        }
        ImportOutcome::GroupExists { name } => {
            println!("group '{name}' already present");
        }
        ImportOutcome::DeviceCreated {
            remote_control_id,
            id,
            group_id,
        } => {
            output::success(&format!(
                "created device {remote_control_id} ({id}) in group {group_id}"
            ));
        }
        ImportOutcome::DeviceExists { remote_control_id } => {
            println!("device {remote_control_id} already present");
        }
        ImportOutcome::DeviceFailed {
            remote_control_id,
            reason,
        } => {
            output::error(&format!("device {remote_control_id} failed: {reason}"));
        }
        ImportOutcome::ContactSkipped { name } => {
            output::warning(&format!("skipped contact '{name}'"));
        }
    }
}
