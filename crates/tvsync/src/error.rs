//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use tvsync_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authorization ────────────────────────────────────────────────
    #[error("Authorization failed: {message}")]
    #[diagnostic(
        code(tvsync::auth_failed),
        help(
            "The token was rejected by the service.\n\
             Create a script token in the Management Console and try again."
        )
    )]
    AuthFailed { message: String },

    #[error("No API token available")]
    #[diagnostic(
        code(tvsync::no_token),
        help(
            "Provide a token with --token, the TVSYNC_API_TOKEN environment \
             variable,\nor a token file (default: ./authorization.token)."
        )
    )]
    NoToken,

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Web API")]
    #[diagnostic(
        code(tvsync::connection_failed),
        help("Check network connectivity and the --base-url value.\nReason: {reason}")
    )]
    ConnectionFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(tvsync::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Snapshot files ───────────────────────────────────────────────
    #[error("Snapshot file is not in the expected format: {message}")]
    #[diagnostic(
        code(tvsync::snapshot_format),
        help("The file must be a JSON document with a top-level \"groups\" list.")
    )]
    SnapshotFormat { message: String },

    #[error("No snapshot file found to import")]
    #[diagnostic(
        code(tvsync::no_import_file),
        help(
            "Pass --file, or place import.json or export.json in the working directory."
        )
    )]
    NoImportFile,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tvsync::validation))]
    Validation { field: String, reason: String },

    // ── IO / internal ────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(tvsync::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoToken => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::ApiError {
                status: Some(404), ..
            }
            | Self::SnapshotFormat { .. }
            | Self::NoImportFile => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::SnapshotFormat { message } => CliError::SnapshotFormat { message },

            CoreError::UnresolvedGroup { group_id } => CliError::SnapshotFormat {
                message: format!("group '{group_id}' is referenced but never defined"),
            },

            CoreError::InvalidShare => CliError::Validation {
                field: "permissions".into(),
                reason: "'Owned' cannot be requested as a share permission".into(),
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
