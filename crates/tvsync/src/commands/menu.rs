//! Interactive menu: the default mode when no subcommand is given.

use dialoguer::Select;
use tvsync_core::Inventory;

use crate::cli::{ExportArgs, GlobalOpts, ImportArgs, PurgeTarget};
use crate::commands::{export, import, purge};
use crate::error::CliError;

const CHOICES: &[&str] = &[
    "Export inventory to export.json",
    "Import snapshot (import.json / export.json)",
    "Purge all devices",
    "Purge all contacts",
    "Purge everything (devices, contacts, groups)",
    "Quit",
];

/// Loop until the user quits or an operation fails.
pub async fn run(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    loop {
        let Some(choice) = Select::new()
            .with_prompt("Select an operation")
            .items(CHOICES)
            .default(0)
            .interact_opt()
            .map_err(|e| CliError::Internal(e.to_string()))?
        else {
            return Ok(());
        };

        match choice {
            0 => {
                let args = ExportArgs {
                    file: "export.json".into(),
                };
                export::handle(inventory, &args).await?;
            }
            1 => {
                let args = ImportArgs { file: None };
                import::handle(inventory, &args, global).await?;
            }
            2 => purge::handle(inventory, PurgeTarget::Devices, global).await?,
            3 => purge::handle(inventory, PurgeTarget::Contacts, global).await?,
            4 => purge::handle(inventory, PurgeTarget::Groups, global).await?,
            _ => return Ok(()),
        }
    }
}
