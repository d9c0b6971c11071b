//! Clap derive structures for the `tvsync` CLI.
//!
//! Defines the command tree and global flags. Running with no subcommand
//! drops into the interactive menu.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tvsync -- export, import, and purge a TeamViewer inventory
#[derive(Debug, Parser)]
#[command(
    name = "tvsync",
    version,
    about = "Manage a TeamViewer computers & contacts inventory from the command line",
    long_about = "Export the remote inventory (devices, contacts, groups) to a JSON \
        snapshot, curate it, and import it back -- creating only the missing groups \
        and devices, in dependency order. Bulk deletion is confirmation-gated.\n\n\
        With no subcommand, an interactive menu offers the same operations.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API token (prefer the token file or the environment variable)
    #[arg(long, env = "TVSYNC_API_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Path to the plaintext token file
    #[arg(long, default_value = "authorization.token", global = true)]
    pub token_file: PathBuf,

    /// Web API base URL
    #[arg(long, env = "TVSYNC_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TVSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Skip confirmation prompts and acknowledgments
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export remote devices, contacts, and groups to a snapshot file
    #[command(alias = "ex")]
    Export(ExportArgs),

    /// Import a snapshot file, creating missing groups and devices
    #[command(alias = "im")]
    Import(ImportArgs),

    /// Delete whole collections, each behind its own confirmation
    Purge(PurgeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Destination snapshot file
    #[arg(long, short = 'f', default_value = "export.json")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Source snapshot file; defaults to import.json, then export.json
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PurgeArgs {
    #[command(subcommand)]
    pub target: PurgeTarget,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum PurgeTarget {
    /// Delete all devices
    Devices,
    /// Delete all contacts
    Contacts,
    /// Delete all groups (devices and contacts go first, each gated)
    Groups,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
