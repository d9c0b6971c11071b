//! Configuration loading and token resolution.
//!
//! Layered via figment: built-in defaults, then the TOML config file at
//! the platform config dir, then `TVSYNC_*` environment variables. The
//! token itself resolves through a separate chain: CLI flag / env var,
//! token file, config file, interactive prompt.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tvsync_api::DEFAULT_BASE_URL;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Web API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// API token (plaintext — prefer the token file or env var).
    pub token: Option<String>,

    /// Path to the plaintext token file.
    pub token_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            token: None,
            token_file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tvsync", "tvsync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tvsync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from defaults + file + environment, then apply
/// CLI flag overrides.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("TVSYNC_"));

    let mut config: Config = figment
        .extract()
        .map_err(|e| CliError::Validation {
            field: "config".into(),
            reason: e.to_string(),
        })?;

    if let Some(ref base_url) = global.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }

    debug!(base_url = %config.base_url, timeout = config.timeout, "configuration loaded");
    Ok(config)
}

// ── Token resolution ────────────────────────────────────────────────

/// Read a token from a plaintext file. Whitespace is trimmed; an empty
/// or missing file counts as no token.
fn read_token_file(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Resolve the API token through the chain: `--token` flag / env var,
/// token file, config file, interactive prompt.
///
/// The prompt offers to persist the entered token to the token file so
/// the next run does not ask again. Non-interactive sessions with no
/// token anywhere fail with [`CliError::NoToken`].
pub fn resolve_token(global: &GlobalOpts, config: &Config) -> Result<SecretString, CliError> {
    if let Some(ref token) = global.token {
        debug!("token resolved from flag or environment");
        return Ok(SecretString::from(token.clone()));
    }

    if let Some(token) = read_token_file(&global.token_file) {
        debug!(path = %global.token_file.display(), "token resolved from token file");
        return Ok(SecretString::from(token));
    }
    if let Some(ref path) = config.token_file {
        if let Some(token) = read_token_file(path) {
            debug!(path = %path.display(), "token resolved from configured token file");
            return Ok(SecretString::from(token));
        }
    }

    if let Some(ref token) = config.token {
        debug!("token resolved from config file");
        return Ok(SecretString::from(token.clone()));
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NoToken);
    }
    prompt_for_token(&global.token_file)
}

/// Ask for the token on the terminal and offer to save it.
fn prompt_for_token(token_file: &Path) -> Result<SecretString, CliError> {
    let token: String = dialoguer::Password::new()
        .with_prompt("API token")
        .interact()
        .map_err(|_| CliError::NoToken)?;

    let token = token.trim().to_owned();
    if token.is_empty() {
        return Err(CliError::NoToken);
    }

    let save = dialoguer::Confirm::new()
        .with_prompt(format!("Save token to {}?", token_file.display()))
        .default(false)
        .interact()
        .unwrap_or(false);
    if save {
        std::fs::write(token_file, &token)?;
    }

    Ok(SecretString::from(token))
}
