// ── Core error types ──
//
// User-facing errors from tvsync-core. Consumers never see raw transport
// errors directly; the `From<tvsync_api::Error>` impl translates them
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection / authorization ──────────────────────────────────
    #[error("Cannot reach the Web API: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authorization failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Remote operations ───────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Snapshot files ──────────────────────────────────────────────
    #[error("Snapshot file has an unexpected structure: {message}")]
    SnapshotFormat { message: String },

    // ── Reconciliation ──────────────────────────────────────────────
    /// An import record references a group absent from both the import
    /// set and the resolved existing set — a corrupt or cross-account
    /// import file.
    #[error("Group '{group_id}' cannot be resolved from the import file")]
    UnresolvedGroup { group_id: String },

    // ── Shares ──────────────────────────────────────────────────────
    /// `Owned` was requested as a share permission, which the service
    /// never accepts.
    #[error("'Owned' is not a valid permission for a share request")]
    InvalidShare,

    // ── Internal errors ─────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tvsync_api::Error> for CoreError {
    fn from(err: tvsync_api::Error) -> Self {
        match err {
            tvsync_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tvsync_api::Error::Transport(ref e) => {
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            tvsync_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                reason: format!("invalid URL: {e}"),
            },
            tvsync_api::Error::Api {
                status, message, ..
            } => {
                if status == 401 {
                    CoreError::AuthenticationFailed { message }
                } else {
                    CoreError::Api {
                        message,
                        status: Some(status),
                    }
                }
            }
            tvsync_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
