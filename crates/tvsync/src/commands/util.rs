//! Shared helpers for command handlers.

use std::io::BufRead;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> bool {
    if yes_flag {
        return true;
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Block until the user presses ENTER, unless `--yes` was passed.
pub fn acknowledge(message: &str, yes_flag: bool) -> Result<(), CliError> {
    if yes_flag {
        return Ok(());
    }
    println!("{message}");
    println!("Press ENTER to continue.");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
