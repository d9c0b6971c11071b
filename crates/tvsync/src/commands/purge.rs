//! `tvsync purge` — confirmation-gated bulk deletion.

use tvsync_core::{Contact, Device, Group, Inventory, PurgeOutcome, PurgeUi};

use crate::cli::{GlobalOpts, PurgeTarget};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

/// Terminal implementation of the purge hooks: tables for display,
/// dialoguer for the gates. `--yes` auto-approves every gate.
pub struct TerminalUi {
    yes: bool,
}

impl TerminalUi {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }
}

impl PurgeUi for TerminalUi {
    fn present_devices(&mut self, devices: &[Device]) {
        println!("{}", output::device_table(devices));
    }

    fn present_contacts(&mut self, contacts: &[Contact]) {
        println!("{}", output::contact_table(contacts));
    }

    fn present_groups(&mut self, groups: &[Group]) {
        println!("{}", output::group_table(groups));
    }

    fn confirm(&mut self, question: &str) -> bool {
        util::confirm(question, self.yes)
    }
}

pub async fn handle(
    inventory: &Inventory,
    target: PurgeTarget,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut ui = TerminalUi::new(global.yes);

    let outcome = match target {
        PurgeTarget::Devices => inventory.purge_devices(&mut ui).await,
        PurgeTarget::Contacts => inventory.purge_contacts(&mut ui).await,
        PurgeTarget::Groups => inventory.purge_groups(&mut ui).await,
    }
    .map_err(CliError::from)?;

    match outcome {
        PurgeOutcome::Purged(count) => {
            output::success(&format!("Deleted {count} item(s)"));
        }
        PurgeOutcome::Aborted => {
            output::warning("Aborted -- nothing further was deleted");
        }
    }
    Ok(())
}
