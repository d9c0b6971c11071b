// Transport configuration for building reqwest::Client instances.
//
// The Web API speaks JSON over a public CA-signed endpoint, so the only
// knobs are the request timeout and the default header set (Accept plus
// the bearer token).

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` carrying the bearer token as a default
    /// header on every request. The header is marked sensitive so it
    /// never shows up in debug logs.
    pub fn build_client(&self, token: &SecretString) -> Result<reqwest::Client, crate::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| crate::Error::Authentication {
                message: format!("token is not a valid header value: {e}"),
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("tvsync/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(crate::Error::Transport)
    }
}
