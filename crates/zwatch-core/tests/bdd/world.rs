//! BDD test world for the ZWatch client core

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use cucumber::World;
use zwatch_core::api::{CheckResponse, ServiceBoundary};
use zwatch_core::controller::{Action, AppState, Confirm, Controller, Deferred, Slot};
use zwatch_core::record::{CheckRecord, CheckStatus, UrlHistory};
use zwatch_core::session::Credential;
use zwatch_core::store::MemoryStore;
use zwatch_core::timeline::TimelineModel;
use zwatch_core::{ClientConfig, ZWatchError};

/// How the fake service answers `/login` and `/register`
#[derive(Debug, Clone)]
pub enum AuthReply {
    Accept { token: String },
    Reject { status: u16 },
    Unreachable,
}

impl Default for AuthReply {
    fn default() -> Self {
        AuthReply::Accept {
            token: "jwt-test".to_string(),
        }
    }
}

/// Scripted in-process stand-in for the monitoring service
#[derive(Debug, Default)]
pub struct FakeService {
    pub calls: Mutex<Vec<String>>,
    pub auth: Mutex<AuthReply>,
    pub histories: Mutex<Vec<UrlHistory>>,
    pub log_failure: Mutex<Option<u16>>,
    pub check_record: Mutex<Option<CheckRecord>>,
    pub accept_sites: AtomicBool,
}

impl FakeService {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    fn authenticate(&self, identity: &str) -> zwatch_core::Result<Credential> {
        match self.auth.lock().unwrap().clone() {
            AuthReply::Accept { token } => Credential::new(identity, token)
                .ok_or_else(|| ZWatchError::Decode("incomplete credential".to_string())),
            AuthReply::Reject { status } => Err(ZWatchError::Auth { status }),
            AuthReply::Unreachable => Err(ZWatchError::Network("connection refused".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl ServiceBoundary for FakeService {
    async fn login(&self, identity: &str, _password: &str) -> zwatch_core::Result<Credential> {
        self.record("login");
        self.authenticate(identity)
    }

    async fn register(&self, identity: &str, _password: &str) -> zwatch_core::Result<Credential> {
        self.record("register");
        self.authenticate(identity)
    }

    async fn check(&self, url: &str) -> zwatch_core::Result<CheckResponse> {
        self.record("check");
        Ok(CheckResponse {
            url: url.to_string(),
            data: self.check_record.lock().unwrap().clone(),
        })
    }

    async fn add_site(&self, _token: &str, url: &str) -> zwatch_core::Result<bool> {
        self.record("addsite");
        let accepted = self.accept_sites.load(Ordering::SeqCst);
        if accepted {
            self.histories
                .lock()
                .unwrap()
                .push(UrlHistory::new(url, Vec::new()));
        }
        Ok(accepted)
    }

    async fn get_log(&self, _token: &str) -> zwatch_core::Result<Vec<UrlHistory>> {
        self.record("getlog");
        if let Some(status) = *self.log_failure.lock().unwrap() {
            return Err(ZWatchError::Request {
                endpoint: "/getlog".to_string(),
                status,
            });
        }
        Ok(self.histories.lock().unwrap().clone())
    }
}

/// Answers the logout prompt with a fixed reply and remembers what it was asked
#[derive(Debug, Default)]
pub struct RecordingConfirm {
    pub answer: AtomicBool,
    pub prompts: Mutex<Vec<String>>,
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default, World)]
pub struct ZWatchWorld {
    pub store: Arc<MemoryStore>,
    pub service: Arc<FakeService>,
    pub confirm: Arc<RecordingConfirm>,
    pub controller: Option<Controller>,
    pub state: Option<AppState>,
    pub deferred: Vec<Deferred>,

    // Latency and classification
    pub parsed_latency: Option<f64>,
    pub record: Option<CheckRecord>,

    // Pure rendering
    pub rendered: Option<TimelineModel>,
}

impl ZWatchWorld {
    /// Build the controller and restore the session, as an app would on load
    pub fn start(&mut self) {
        let controller = Controller::new(
            Arc::clone(&self.service) as Arc<dyn ServiceBoundary>,
            Arc::clone(&self.store) as Arc<dyn zwatch_core::store::CredentialStore>,
            Arc::clone(&self.confirm) as Arc<dyn Confirm>,
            ClientConfig::default(),
        );
        let (state, deferred) = controller.start();
        self.controller = Some(controller);
        self.state = Some(state);
        self.deferred = deferred;
    }

    pub fn controller(&self) -> Controller {
        self.controller.clone().expect("client not started")
    }

    pub fn state(&self) -> &AppState {
        self.state.as_ref().expect("client not started")
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.state.as_mut().expect("client not started")
    }

    pub async fn dispatch(&mut self, action: Action) {
        if self.controller.is_none() {
            self.start();
        }
        let controller = self.controller();
        let deferred = controller.dispatch(self.state_mut(), action).await;
        self.deferred.extend(deferred);
    }

    /// Run every pending deferred action of the given kind, ignoring delays
    pub async fn run_deferred(&mut self, wanted: fn(&Action) -> bool) {
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|d| wanted(&d.action));
        self.deferred = rest;
        for deferred in due {
            self.dispatch(deferred.action).await;
        }
    }
}

pub fn slot_named(name: &str) -> Slot {
    match name {
        "login" => Slot::Login,
        "register" => Slot::Register,
        "check" => Slot::QuickCheck,
        "add-site" => Slot::AddSite,
        other => panic!("unknown notice slot '{other}'"),
    }
}

/// Parse a compact check list such as `up:120ms, down:-, up:1.5s`
pub fn parse_checks(checks: &str) -> Vec<CheckRecord> {
    checks
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (status, latency) = entry.split_once(':').unwrap_or((entry, "-"));
            let latency = (latency != "-").then_some(latency);
            CheckRecord::new(CheckStatus::from_wire(status), latency)
        })
        .collect()
}
