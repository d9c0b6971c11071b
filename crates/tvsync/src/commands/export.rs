//! `tvsync export` — dump the remote inventory to a snapshot file.

use tracing::info;
use tvsync_core::{Inventory, snapshot};

use crate::cli::ExportArgs;
use crate::error::CliError;
use crate::output;

pub async fn handle(inventory: &Inventory, args: &ExportArgs) -> Result<(), CliError> {
    let snap = inventory.fetch_snapshot().await.map_err(CliError::from)?;

    println!("{}", output::device_table(&snap.devices));
    println!("{}", output::contact_table(&snap.contacts));
    println!("{}", output::group_table(&snap.groups));

    let json = snapshot::to_json(&snap).map_err(CliError::from)?;
    std::fs::write(&args.file, json)?;

    info!(path = %args.file.display(), "snapshot written");
    output::success(&format!(
        "Exported {} groups, {} devices, {} contacts to {}",
        snap.groups.len(),
        snap.devices.len(),
        snap.contacts.len(),
        args.file.display()
    ));
    Ok(())
}
