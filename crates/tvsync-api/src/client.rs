// Hand-crafted async HTTP client for the TeamViewer Web API (v1).
//
// Base path: api/v1/
// Auth: bearer token, injected as a default header by TransportConfig.

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::types::{
    ContactList, ContactRecord, DeviceCreate, DeviceList, DevicePatch, DeviceRecord, GroupCreate,
    GroupList, GroupRecord, PingResponse, ShareGroupRequest, UnshareGroupRequest,
};
use crate::{Error, TransportConfig};

/// Default production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://webapi.teamviewer.com/";

// ── Error response shape from the Web API ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the TeamViewer Web API.
///
/// Owns nothing beyond the HTTP session; every operation is a single
/// request/response with no caching and no retries — retry policy, if
/// any, belongs to the caller.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with a slash so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Join a relative path (e.g. `"api/v1/devices"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // char-based truncation: a byte slice could split a
                // multi-byte character and panic.
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            let message = err
                .error_description
                .or(err.error)
                .unwrap_or_else(|| status.to_string());
            Error::Api {
                status: status.as_u16(),
                message,
                code: err.error_code,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Authorization ────────────────────────────────────────────────

    /// Check the token against `api/v1/ping`.
    ///
    /// Returns the service's `token_valid` verdict. A non-success status
    /// is an authorization failure outright.
    pub async fn ping(&self) -> Result<bool, Error> {
        let url = self.url("api/v1/ping")?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("ping failed with status {status}"),
            });
        }

        let body = resp.text().await?;
        let ping: PingResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;
        Ok(ping.token_valid)
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, Error> {
        let list: DeviceList = self.get("api/v1/devices").await?;
        Ok(list.devices)
    }

    pub async fn create_device(&self, body: &DeviceCreate) -> Result<DeviceRecord, Error> {
        self.post("api/v1/devices", body).await
    }

    /// Update mutable device fields. A patch with nothing set is a no-op
    /// and never leaves the process.
    pub async fn update_device(&self, device_id: &str, patch: &DevicePatch) -> Result<(), Error> {
        if patch.is_empty() {
            return Ok(());
        }
        self.put(&format!("api/v1/devices/{device_id}"), patch).await
    }

    pub async fn delete_device(&self, device_id: &str) -> Result<(), Error> {
        self.delete(&format!("api/v1/devices/{device_id}")).await
    }

    // ── Contacts ─────────────────────────────────────────────────────

    pub async fn list_contacts(&self) -> Result<Vec<ContactRecord>, Error> {
        let list: ContactList = self.get("api/v1/contacts").await?;
        Ok(list.contacts)
    }

    pub async fn delete_contact(&self, contact_id: &str) -> Result<(), Error> {
        self.delete(&format!("api/v1/contacts/{contact_id}")).await
    }

    // ── Groups ───────────────────────────────────────────────────────

    pub async fn list_groups(&self) -> Result<Vec<GroupRecord>, Error> {
        let list: GroupList = self.get("api/v1/groups").await?;
        Ok(list.groups)
    }

    pub async fn create_group(&self, name: &str) -> Result<GroupRecord, Error> {
        self.post(
            "api/v1/groups",
            &GroupCreate {
                name: name.to_owned(),
            },
        )
        .await
    }

    pub async fn rename_group(&self, group_id: &str, new_name: &str) -> Result<(), Error> {
        self.put(
            &format!("api/v1/groups/{group_id}"),
            &GroupCreate {
                name: new_name.to_owned(),
            },
        )
        .await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<(), Error> {
        self.delete(&format!("api/v1/groups/{group_id}")).await
    }

    pub async fn share_group(
        &self,
        group_id: &str,
        request: &ShareGroupRequest,
    ) -> Result<(), Error> {
        self.post_no_response(&format!("api/v1/groups/{group_id}/share_group"), request)
            .await
    }

    pub async fn unshare_group(&self, group_id: &str, user_ids: Vec<String>) -> Result<(), Error> {
        self.post_no_response(
            &format!("api/v1/groups/{group_id}/unshare_group"),
            &UnshareGroupRequest { users: user_ids },
        )
        .await
    }
}
