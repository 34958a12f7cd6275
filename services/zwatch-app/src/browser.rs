//! Browser adapters for the client core
//!
//! With the `csr` feature the controller talks to the page origin through
//! `gloo-net`, keeps the credential in `localStorage` and asks before logout
//! with `window.confirm`. Without it (native builds, `cargo test`) the same
//! components run against an in-memory store and a transport that always
//! reports a network error.

use std::sync::Arc;

use zwatch_core::controller::{Confirm, Controller};
use zwatch_core::timeline::Rect;
use zwatch_core::{build_controller, ClientConfig};

/// Controller wired to the browser environment
pub fn controller() -> Controller {
    #[cfg(feature = "csr")]
    {
        let config = ClientConfig::default().with_api_base(&page_origin());
        build_controller(
            config,
            Arc::new(GlooHttpClient),
            Arc::new(LocalStorageStore),
            Arc::new(WindowConfirm),
        )
    }

    #[cfg(not(feature = "csr"))]
    {
        build_controller(
            ClientConfig::default(),
            Arc::new(DetachedHttpClient),
            Arc::new(zwatch_core::store::MemoryStore::new()),
            Arc::new(WindowConfirm),
        )
    }
}

/// Viewport bounding box of the element an event fired on
pub fn target_rect(ev: &leptos::ev::MouseEvent) -> Option<Rect> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let element = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
        let rect = element.get_bounding_client_rect();
        Some(Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        })
    }

    #[cfg(not(feature = "csr"))]
    {
        let _ = ev;
        None
    }
}

/// Logout gate backed by `window.confirm`
#[derive(Debug, Default)]
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|window| window.confirm_with_message(prompt).ok())
                .unwrap_or(false)
        }

        #[cfg(not(feature = "csr"))]
        {
            tracing::debug!("No browser to confirm '{}'", prompt);
            false
        }
    }
}

#[cfg(feature = "csr")]
fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| ClientConfig::default().api_base)
}

#[cfg(feature = "csr")]
pub use self::web::{GlooHttpClient, LocalStorageStore};

#[cfg(feature = "csr")]
mod web {
    use async_trait::async_trait;
    use gloo_net::http::Request;
    use zwatch_core::io::{HttpClient, HttpRequest, HttpResponse, Method};
    use zwatch_core::store::CredentialStore;
    use zwatch_core::{Result, ZWatchError};

    /// Durable store over `window.localStorage`
    #[derive(Debug, Default)]
    pub struct LocalStorageStore;

    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ZWatchError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ZWatchError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ZWatchError::Storage("localStorage unavailable".to_string()))
    }

    impl CredentialStore for LocalStorageStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            local_storage()?
                .get_item(key)
                .map_err(|e| ZWatchError::Storage(format!("{:?}", e)))
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| ZWatchError::Storage(format!("{:?}", e)))
        }

        fn remove(&self, key: &str) -> Result<()> {
            local_storage()?
                .remove_item(key)
                .map_err(|e| ZWatchError::Storage(format!("{:?}", e)))
        }
    }

    /// `fetch`-based transport
    #[derive(Debug, Default)]
    pub struct GlooHttpClient;

    #[async_trait(?Send)]
    impl HttpClient for GlooHttpClient {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            tracing::debug!("{} {}", request.method, request.url);
            let failed = |e: gloo_net::Error| {
                ZWatchError::Network(format!("{} {} failed: {}", request.method, request.url, e))
            };

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            };
            if let Some(authorization) = request.authorization() {
                builder = builder.header("Authorization", &authorization);
            }
            let response = match &request.json_body {
                Some(body) => {
                    builder
                        .header("Content-Type", "application/json")
                        .body(body.as_str())
                        .map_err(failed)?
                        .send()
                        .await
                }
                None => builder.send().await,
            }
            .map_err(failed)?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ZWatchError::Network(format!("Reading response body: {}", e)))?;

            tracing::debug!("{} {} -> {}", request.method, request.url, status);
            Ok(HttpResponse { status, body })
        }
    }
}

/// Transport for builds without a browser; every request fails
#[cfg(not(feature = "csr"))]
#[derive(Debug, Default)]
pub struct DetachedHttpClient;

#[cfg(not(feature = "csr"))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl zwatch_core::io::HttpClient for DetachedHttpClient {
    async fn send(
        &self,
        request: zwatch_core::io::HttpRequest,
    ) -> zwatch_core::Result<zwatch_core::io::HttpResponse> {
        Err(zwatch_core::ZWatchError::Network(format!(
            "{} {}: no browser transport",
            request.method, request.url
        )))
    }
}
