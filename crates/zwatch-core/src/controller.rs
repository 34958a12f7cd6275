//! Interaction controller: user actions against the service boundary
//!
//! A dispatch runs in three phases so hosts can overlap requests:
//!
//! 1. [`AppState::begin`] marks in-flight work and snapshots the credential
//!    into a [`Context`].
//! 2. [`Controller::handle`] talks to the service and the credential store and
//!    returns an [`Outcome`]. It never touches `AppState`.
//! 3. [`AppState::apply`] folds the outcome in and hands back the
//!    [`Deferred`] actions (timeline reloads, notice expiry) for the host to
//!    schedule.
//!
//! [`Controller::dispatch`] runs all three back to back for sequential hosts.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ServiceBoundary;
use crate::config::ClientConfig;
use crate::error::ZWatchError;
use crate::record::CheckRecord;
use crate::session::{self, Credential, Session, ViewState};
use crate::store::CredentialStore;
use crate::timeline::{self, CubeRef, Rect, TimelineModel, Tooltip};

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

/// Synchronous yes/no gate shown before logging out
#[cfg_attr(test, mockall::automock)]
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Which form of the auth panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// A user action or a deferred follow-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchTab(AuthTab),
    Login { identity: String, password: String },
    Register { identity: String, password: String },
    Logout,
    QuickCheck { url: String },
    AddSite { url: String },
    RefreshLogs,
    ExpireNotice { slot: Slot, seq: u64 },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SwitchTab(_) => "switch_tab",
            Action::Login { .. } => "login",
            Action::Register { .. } => "register",
            Action::Logout => "logout",
            Action::QuickCheck { .. } => "quick_check",
            Action::AddSite { .. } => "add_site",
            Action::RefreshLogs => "refresh_logs",
            Action::ExpireNotice { .. } => "expire_notice",
        }
    }
}

/// Where an inline message is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Login,
    Register,
    QuickCheck,
    AddSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A self-clearing inline message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// Result area of the quick-check form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheckPanel {
    #[default]
    Idle,
    Checking,
    Result { url: String, record: CheckRecord },
}

/// Snapshot taken when an action begins
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub credential: Option<Credential>,
    /// Sequence number of the timeline load this action starts, if any
    pub timeline_seq: u64,
}

/// A state change produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Session(Session),
    Tab(AuthTab),
    Notice {
        slot: Slot,
        kind: NoticeKind,
        text: String,
    },
    ClearNotice {
        slot: Slot,
        seq: u64,
    },
    Check(CheckPanel),
    Timeline {
        seq: u64,
        model: TimelineModel,
    },
    SiteAdded,
}

/// An action to run after a delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred {
    pub after: Duration,
    pub action: Action,
}

/// Everything a handler wants changed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub updates: Vec<Update>,
    pub deferred: Vec<Deferred>,
}

impl Outcome {
    fn none() -> Self {
        Self::default()
    }

    fn update(update: Update) -> Self {
        Self {
            updates: vec![update],
            deferred: Vec::new(),
        }
    }

    fn error(slot: Slot, text: impl Into<String>) -> Self {
        Self::update(Update::Notice {
            slot,
            kind: NoticeKind::Error,
            text: text.into(),
        })
    }

    fn success(slot: Slot, text: impl Into<String>) -> Self {
        Self::update(Update::Notice {
            slot,
            kind: NoticeKind::Success,
            text: text.into(),
        })
    }

    fn with(mut self, update: Update) -> Self {
        self.updates.push(update);
        self
    }

    fn then(mut self, after: Duration, action: Action) -> Self {
        self.deferred.push(Deferred { after, action });
        self
    }
}

/// The complete client-side state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub session: Session,
    pub tab: AuthTab,
    pub check: CheckPanel,
    pub timeline: TimelineModel,
    pub tooltip: Tooltip,
    /// Bumped whenever the host should clear the add-site input
    pub sites_added: u64,
    notices: BTreeMap<Slot, Notice>,
    notice_ttl: Duration,
    next_notice_seq: u64,
    timeline_seq: u64,
}

impl AppState {
    pub fn new(session: Session, notice_ttl: Duration) -> Self {
        Self {
            session,
            tab: AuthTab::default(),
            check: CheckPanel::default(),
            timeline: TimelineModel::default(),
            tooltip: Tooltip::default(),
            sites_added: 0,
            notices: BTreeMap::new(),
            notice_ttl,
            next_notice_seq: 0,
            timeline_seq: 0,
        }
    }

    pub fn view(&self) -> ViewState {
        self.session.view()
    }

    pub fn notice(&self, slot: Slot) -> Option<&Notice> {
        self.notices.get(&slot)
    }

    /// The newest login or register notice
    ///
    /// Both slots belong to the session rather than to either view, so this
    /// stays visible across the switch from the auth forms to the dashboard.
    pub fn auth_notice(&self) -> Option<&Notice> {
        [Slot::Login, Slot::Register]
            .iter()
            .filter_map(|slot| self.notices.get(slot))
            .max_by_key(|notice| notice.seq)
    }

    /// Visible notices, in slot order
    pub fn notices(&self) -> impl Iterator<Item = (Slot, &Notice)> {
        self.notices.iter().map(|(slot, notice)| (*slot, notice))
    }

    /// Phase one: record in-flight work and snapshot what the handler needs
    pub fn begin(&mut self, action: &Action) -> Context {
        let credential = self.session.credential().cloned();
        match action {
            Action::QuickCheck { url } if !url.trim().is_empty() => {
                self.check = CheckPanel::Checking;
            }
            Action::RefreshLogs => {
                self.timeline_seq += 1;
                if credential.is_some() {
                    self.timeline = TimelineModel::Loading;
                    self.tooltip.hide();
                }
            }
            _ => {}
        }
        Context {
            credential,
            timeline_seq: self.timeline_seq,
        }
    }

    /// Phase three: fold an outcome in, returning the follow-ups to schedule
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Deferred> {
        let mut deferred = outcome.deferred;
        for update in outcome.updates {
            match update {
                Update::Session(session) => {
                    if !session.is_authenticated() {
                        // Nothing in flight may repopulate a signed-out timeline.
                        self.timeline_seq += 1;
                        self.timeline = TimelineModel::PleaseLogin;
                        self.tooltip.hide();
                    }
                    self.session = session;
                }
                Update::Tab(tab) => self.tab = tab,
                Update::Notice { slot, kind, text } => {
                    self.next_notice_seq += 1;
                    let seq = self.next_notice_seq;
                    self.notices.insert(slot, Notice { seq, kind, text });
                    deferred.push(Deferred {
                        after: self.notice_ttl,
                        action: Action::ExpireNotice { slot, seq },
                    });
                }
                Update::ClearNotice { slot, seq } => {
                    if self.notices.get(&slot).is_some_and(|n| n.seq == seq) {
                        self.notices.remove(&slot);
                    }
                }
                Update::Check(panel) => self.check = panel,
                Update::Timeline { seq, model } => {
                    if seq == self.timeline_seq {
                        self.timeline = model;
                        self.tooltip.hide();
                    } else {
                        tracing::debug!(
                            "Discarding superseded timeline load {} (latest {})",
                            seq,
                            self.timeline_seq
                        );
                    }
                }
                Update::SiteAdded => self.sites_added += 1,
            }
        }
        deferred
    }

    /// Pointer entered a cube: show its details in the shared tooltip
    pub fn hover(&mut self, at: CubeRef, rect: Rect) {
        if let Some(cube) = self.timeline.cube(at) {
            self.tooltip.show(cube, &rect);
        }
    }

    /// Pointer left a cube
    pub fn unhover(&mut self) {
        self.tooltip.hide();
    }
}

/// Routes actions to their handlers
#[derive(Clone)]
pub struct Controller {
    service: Arc<dyn ServiceBoundary>,
    store: Arc<dyn CredentialStore>,
    confirm: Arc<dyn Confirm>,
    config: ClientConfig,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .finish()
    }
}

impl Controller {
    pub fn new(
        service: Arc<dyn ServiceBoundary>,
        store: Arc<dyn CredentialStore>,
        confirm: Arc<dyn Confirm>,
        config: ClientConfig,
    ) -> Self {
        Self {
            service,
            store,
            confirm,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the initial state from durable storage
    ///
    /// A restored session starts with an immediate timeline load.
    pub fn start(&self) -> (AppState, Vec<Deferred>) {
        let session = Session::restore(self.store.as_ref(), &self.config.storage);
        let mut deferred = Vec::new();
        if session.is_authenticated() {
            deferred.push(Deferred {
                after: Duration::ZERO,
                action: Action::RefreshLogs,
            });
        }
        (AppState::new(session, self.config.notice_ttl), deferred)
    }

    /// Begin, handle and apply one action in sequence
    pub async fn dispatch(&self, state: &mut AppState, action: Action) -> Vec<Deferred> {
        let context = state.begin(&action);
        let outcome = self.handle(action, context).await;
        state.apply(outcome)
    }

    /// Phase two: run the handler for `action`
    pub async fn handle(&self, action: Action, context: Context) -> Outcome {
        tracing::debug!("Handling action '{}'", action.name());
        match action {
            Action::SwitchTab(tab) => Outcome::update(Update::Tab(tab)),
            Action::Login { identity, password } => self.login(&identity, &password).await,
            Action::Register { identity, password } => self.register(&identity, &password).await,
            Action::Logout => self.logout(&context),
            Action::QuickCheck { url } => self.quick_check(&url).await,
            Action::AddSite { url } => self.add_site(&url, &context).await,
            Action::RefreshLogs => self.refresh_logs(&context).await,
            Action::ExpireNotice { slot, seq } => Outcome::update(Update::ClearNotice { slot, seq }),
        }
    }

    async fn login(&self, identity: &str, password: &str) -> Outcome {
        let identity = identity.trim();
        if let Err(e) = session::validate_login(identity, password) {
            return Outcome::error(Slot::Login, e.to_string());
        }

        match self.service.login(identity, password).await {
            Ok(credential) => self.signed_in(Slot::Login, "Login successful!", credential),
            Err(e) => {
                tracing::warn!("Login failed for '{}': {}", identity, e);
                Outcome::error(
                    Slot::Login,
                    auth_failure_text(&e, "Login failed. Please check your credentials."),
                )
            }
        }
    }

    async fn register(&self, identity: &str, password: &str) -> Outcome {
        let identity = identity.trim();
        if let Err(e) = session::validate_register(identity, password) {
            return Outcome::error(Slot::Register, e.to_string());
        }

        match self.service.register(identity, password).await {
            Ok(credential) => {
                self.signed_in(Slot::Register, "Registration successful!", credential)
            }
            Err(e) => {
                tracing::warn!("Registration failed for '{}': {}", identity, e);
                Outcome::error(
                    Slot::Register,
                    auth_failure_text(&e, "Registration failed. Username may already exist."),
                )
            }
        }
    }

    fn signed_in(&self, slot: Slot, text: &str, credential: Credential) -> Outcome {
        let session = Session::sign_in(self.store.as_ref(), &self.config.storage, credential);
        Outcome::success(slot, text)
            .with(Update::Session(session))
            .then(self.config.auth_redirect_delay, Action::RefreshLogs)
    }

    fn logout(&self, context: &Context) -> Outcome {
        if context.credential.is_none() {
            return Outcome::none();
        }
        if !self.confirm.confirm(LOGOUT_PROMPT) {
            tracing::debug!("Logout cancelled");
            return Outcome::none();
        }
        let session = Session::sign_out(self.store.as_ref(), &self.config.storage);
        Outcome::update(Update::Session(session))
    }

    async fn quick_check(&self, url: &str) -> Outcome {
        let url = url.trim();
        if url.is_empty() {
            return Outcome::error(Slot::QuickCheck, "Please enter a URL");
        }

        match self.service.check(url).await {
            Ok(response) => match response.data {
                Some(record) => {
                    let url = if response.url.is_empty() {
                        url.to_string()
                    } else {
                        response.url
                    };
                    tracing::debug!("Check {}: {} {:?}", url, record.status, record.latency);
                    Outcome::update(Update::Check(CheckPanel::Result { url, record }))
                }
                None => Outcome::error(Slot::QuickCheck, "No data received")
                    .with(Update::Check(CheckPanel::Idle)),
            },
            Err(e) => {
                tracing::warn!("Check of {} failed: {}", url, e);
                Outcome::error(Slot::QuickCheck, failure_text(&e, "Check failed"))
                    .with(Update::Check(CheckPanel::Idle))
            }
        }
    }

    async fn add_site(&self, url: &str, context: &Context) -> Outcome {
        let url = url.trim();
        if url.is_empty() {
            return Outcome::error(Slot::AddSite, "Please enter a URL");
        }
        let Some(credential) = &context.credential else {
            return Outcome::error(Slot::AddSite, "Please login first");
        };

        match self.service.add_site(credential.token(), url).await {
            Ok(true) => {
                tracing::info!("Added site {}", url);
                Outcome::success(Slot::AddSite, "Site added successfully!")
                    .with(Update::SiteAdded)
                    .then(self.config.add_site_reload_delay, Action::RefreshLogs)
            }
            Ok(false) => {
                tracing::warn!("Service declined to add {}", url);
                Outcome::error(Slot::AddSite, "Failed to add site")
            }
            Err(e) => {
                tracing::warn!("Adding {} failed: {}", url, e);
                Outcome::error(Slot::AddSite, failure_text(&e, "Failed to add site"))
            }
        }
    }

    async fn refresh_logs(&self, context: &Context) -> Outcome {
        let model = timeline::load(context.credential.as_ref(), self.service.as_ref()).await;
        Outcome::update(Update::Timeline {
            seq: context.timeline_seq,
            model,
        })
    }
}

fn auth_failure_text(err: &ZWatchError, rejected: &str) -> String {
    if err.is_transport() {
        "Network error. Please try again.".to_string()
    } else {
        rejected.to_string()
    }
}

fn failure_text(err: &ZWatchError, rejected: &str) -> String {
    if err.is_transport() {
        "Network error".to_string()
    } else {
        rejected.to_string()
    }
}
