//! Service boundary: the remote monitoring API
//!
//! Request and response bodies mirror the JSON the backend speaks. The
//! [`ServiceBoundary`] trait is what the controller talks to; [`HttpService`]
//! implements it over any [`HttpClient`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZWatchError};
use crate::io::{HttpClient, HttpRequest, HttpResponse};
use crate::record::{decode_histories, CheckRecord, UrlHistory};
use crate::session::Credential;

/// Body of `/login` and `/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Successful `/login` or `/register` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub token: String,
}

/// Body of `/check` and `/addsite`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

/// `/check` response: a single-shot probe of one URL
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub data: Option<CheckRecord>,
}

/// `/addsite` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSiteResponse {
    #[serde(default)]
    pub success: bool,
}

/// Operations offered by the monitoring service
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(test, mockall::automock)]
pub trait ServiceBoundary: Send + Sync {
    async fn login(&self, identity: &str, password: &str) -> Result<Credential>;

    async fn register(&self, identity: &str, password: &str) -> Result<Credential>;

    async fn check(&self, url: &str) -> Result<CheckResponse>;

    /// Returns the service's `success` flag
    async fn add_site(&self, token: &str, url: &str) -> Result<bool>;

    async fn get_log(&self, token: &str) -> Result<Vec<UrlHistory>>;
}

/// [`ServiceBoundary`] over JSON/HTTP
pub struct HttpService {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HttpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpService")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpService {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created HttpService at {}", base_url);
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        bearer: Option<&str>,
    ) -> Result<HttpResponse> {
        let body = serde_json::to_string(body)?;
        let mut request = HttpRequest::post_json(self.url(path), body);
        if let Some(token) = bearer {
            request = request.with_bearer(token);
        }
        self.http.send(request).await
    }

    async fn authenticate(&self, path: &str, identity: &str, password: &str) -> Result<Credential> {
        let request = AuthRequest {
            username: identity.to_string(),
            password: password.to_string(),
        };
        let response = self.post(path, &request, None).await?;
        if !response.is_success() {
            tracing::debug!("{} rejected: status={}", path, response.status);
            return Err(ZWatchError::Auth {
                status: response.status,
            });
        }

        let parsed: AuthResponse = decode(path, &response)?;
        Credential::new(parsed.username, parsed.token).ok_or_else(|| {
            ZWatchError::Decode(format!("{} returned an incomplete credential", path))
        })
    }
}

fn decode<T: for<'de> Deserialize<'de>>(path: &str, response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body)
        .map_err(|e| ZWatchError::Decode(format!("{} body: {}", path, e)))
}

/// Decode a body that may hold any JSON value
///
/// The backend answers some internal failures with a bare `500` and a 200
/// status. A JSON body of the wrong shape decodes to `T::default()`; only a
/// body that is not JSON at all is an error.
fn decode_or_default<T: for<'de> Deserialize<'de> + Default>(
    path: &str,
    response: &HttpResponse,
) -> Result<T> {
    let value: serde_json::Value = decode(path, response)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!("{} body has an unexpected shape: {}", path, e);
        T::default()
    }))
}

fn require_success(path: &str, response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        tracing::debug!("{} failed: status={}", path, response.status);
        Err(ZWatchError::Request {
            endpoint: path.to_string(),
            status: response.status,
        })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ServiceBoundary for HttpService {
    async fn login(&self, identity: &str, password: &str) -> Result<Credential> {
        self.authenticate("/login", identity, password).await
    }

    async fn register(&self, identity: &str, password: &str) -> Result<Credential> {
        self.authenticate("/register", identity, password).await
    }

    async fn check(&self, url: &str) -> Result<CheckResponse> {
        let request = UrlRequest {
            url: url.to_string(),
        };
        let response = self.post("/check", &request, None).await?;
        require_success("/check", &response)?;
        decode_or_default("/check", &response)
    }

    async fn add_site(&self, token: &str, url: &str) -> Result<bool> {
        let request = UrlRequest {
            url: url.to_string(),
        };
        let response = self.post("/addsite", &request, Some(token)).await?;
        require_success("/addsite", &response)?;
        let parsed: AddSiteResponse = decode_or_default("/addsite", &response)?;
        Ok(parsed.success)
    }

    async fn get_log(&self, token: &str) -> Result<Vec<UrlHistory>> {
        let request = HttpRequest::get(self.url("/getlog")).with_bearer(token);
        let response = self.http.send(request).await?;
        require_success("/getlog", &response)?;
        decode_histories(&response.body)
            .map_err(|e| ZWatchError::Decode(format!("/getlog body: {}", e)))
    }
}
