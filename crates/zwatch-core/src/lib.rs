//! ZWatch - client core for the ZWatch website-uptime monitor
//!
//! Holds everything that does not depend on a particular front end: the
//! session state machine, latency parsing and classification, the log
//! timeline model and the interaction controller. The browser app and the
//! command-line client both drive [`controller::Controller`] and supply their
//! own [`store::CredentialStore`], [`io::HttpClient`] and
//! [`controller::Confirm`].

pub mod api;
pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod io;
pub mod latency;
pub mod record;
pub mod session;
pub mod store;
pub mod timeline;

pub use config::{load_config, ClientConfig};
pub use error::{Result, ZWatchError};

use std::sync::Arc;

use crate::api::HttpService;
use crate::controller::{Confirm, Controller};
use crate::io::HttpClient;
use crate::store::CredentialStore;

/// Wire a controller to the HTTP service described by `config`
pub fn build_controller(
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn CredentialStore>,
    confirm: Arc<dyn Confirm>,
) -> Controller {
    let service = Arc::new(HttpService::new(&config.api_base, http));
    tracing::debug!("Controller targets {}", config.api_base);
    Controller::new(service, store, confirm, config)
}
