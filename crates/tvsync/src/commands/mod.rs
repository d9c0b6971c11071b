//! Command dispatch: bridges CLI args → core operations → output.

pub mod export;
pub mod import;
pub mod menu;
pub mod purge;
pub mod util;

use tvsync_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an inventory-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Export(args) => export::handle(inventory, &args).await,
        Command::Import(args) => import::handle(inventory, &args, global).await,
        Command::Purge(args) => purge::handle(inventory, args.target, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
