//! Log timeline: from check histories to an interactive visual model
//!
//! [`render`] is pure: the same histories always produce the same model.
//! [`load`] fetches the histories for a credential and renders them, folding
//! every failure into an empty-state variant. Each refresh replaces the whole
//! model.

use crate::api::ServiceBoundary;
use crate::classify::{classify, VisualClass};
use crate::error::ZWatchError;
use crate::record::{CheckRecord, CheckStatus, UrlHistory};
use crate::session::Credential;

pub const PLEASE_LOGIN_MESSAGE: &str = "Please login to view logs";
pub const LOADING_MESSAGE: &str = "Loading logs...";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load logs";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub const EMPTY_SET_MESSAGE: &str = "No logs yet. Add a site to start monitoring.";
pub const EMPTY_URL_MESSAGE: &str = "No logs for this URL yet.";
pub const UNKNOWN_URL: &str = "Unknown URL";
pub const MISSING_LATENCY: &str = "N/A";

/// Vertical gap between a hovered cube and the tooltip anchor, in pixels
pub const TOOLTIP_OFFSET_PX: f64 = 10.0;

/// One drawn check record
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub class: VisualClass,
    pub status: CheckStatus,
    /// Raw latency string as received
    pub latency: Option<String>,
}

impl Cube {
    pub fn from_record(record: &CheckRecord) -> Self {
        Self {
            class: classify(record),
            status: record.status,
            latency: record.latency.clone(),
        }
    }

    pub fn latency_label(&self) -> &str {
        self.latency.as_deref().unwrap_or(MISSING_LATENCY)
    }
}

/// Header, count and cubes of one monitored URL
#[derive(Debug, Clone, PartialEq)]
pub struct UrlGroup {
    pub url: String,
    pub cubes: Vec<Cube>,
}

impl UrlGroup {
    pub fn from_history(history: &UrlHistory) -> Self {
        Self {
            url: history.url.clone(),
            cubes: history.records.iter().map(Cube::from_record).collect(),
        }
    }

    pub fn title(&self) -> &str {
        if self.url.is_empty() {
            UNKNOWN_URL
        } else {
            &self.url
        }
    }

    pub fn count(&self) -> usize {
        self.cubes.len()
    }

    pub fn count_label(&self) -> String {
        format!("{} checks", self.count())
    }

    /// Per-URL empty-state text, shown instead of cubes
    pub fn empty_state(&self) -> Option<&'static str> {
        self.cubes.is_empty().then_some(EMPTY_URL_MESSAGE)
    }
}

/// Why a timeline could not be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    /// The service answered with a non-success status
    Rejected,
    /// No usable answer came back
    Network,
}

/// Everything the timeline area can show
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimelineModel {
    #[default]
    PleaseLogin,
    Loading,
    Unavailable(LoadFailure),
    /// No monitored URLs at all
    Empty,
    Groups(Vec<UrlGroup>),
}

impl TimelineModel {
    /// The single empty-state text, if this model is not a grid
    pub fn empty_state(&self) -> Option<&'static str> {
        match self {
            TimelineModel::PleaseLogin => Some(PLEASE_LOGIN_MESSAGE),
            TimelineModel::Loading => Some(LOADING_MESSAGE),
            TimelineModel::Unavailable(LoadFailure::Rejected) => Some(LOAD_FAILED_MESSAGE),
            TimelineModel::Unavailable(LoadFailure::Network) => Some(NETWORK_ERROR_MESSAGE),
            TimelineModel::Empty => Some(EMPTY_SET_MESSAGE),
            TimelineModel::Groups(_) => None,
        }
    }

    pub fn groups(&self) -> &[UrlGroup] {
        match self {
            TimelineModel::Groups(groups) => groups,
            _ => &[],
        }
    }

    pub fn cube(&self, at: CubeRef) -> Option<&Cube> {
        self.groups().get(at.group)?.cubes.get(at.index)
    }
}

/// Build the visual model for a full set of histories
pub fn render(histories: &[UrlHistory]) -> TimelineModel {
    if histories.is_empty() {
        return TimelineModel::Empty;
    }
    TimelineModel::Groups(histories.iter().map(UrlGroup::from_history).collect())
}

/// Fetch and render the timeline for the given credential
///
/// Without a credential the service is not called.
pub async fn load(credential: Option<&Credential>, service: &dyn ServiceBoundary) -> TimelineModel {
    let Some(credential) = credential else {
        return TimelineModel::PleaseLogin;
    };

    match service.get_log(credential.token()).await {
        Ok(histories) => {
            tracing::debug!("Loaded {} url histories", histories.len());
            render(&histories)
        }
        Err(e) => {
            tracing::warn!("Failed to load logs: {}", e);
            TimelineModel::Unavailable(failure_kind(&e))
        }
    }
}

fn failure_kind(err: &ZWatchError) -> LoadFailure {
    if err.is_transport() {
        LoadFailure::Network
    } else {
        LoadFailure::Rejected
    }
}

/// Position of a cube inside a [`TimelineModel::Groups`] model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeRef {
    pub group: usize,
    pub index: usize,
}

/// On-screen bounding box of a cube, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Tooltip anchor: horizontally centred on the cube, just above it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
}

impl TooltipPosition {
    pub fn above(rect: &Rect) -> Self {
        Self {
            left: rect.left + rect.width / 2.0,
            top: rect.top - TOOLTIP_OFFSET_PX,
        }
    }
}

/// What the tooltip shows for a hovered cube
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub status: CheckStatus,
    pub latency: String,
}

impl TooltipContent {
    pub fn status_class(&self) -> &'static str {
        if self.status == CheckStatus::Up {
            "status-up"
        } else {
            "status-down"
        }
    }
}

/// The single shared hover tooltip
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    content: Option<TooltipContent>,
    position: TooltipPosition,
}

impl Tooltip {
    /// Show details for `cube`, anchored to its bounding box
    pub fn show(&mut self, cube: &Cube, rect: &Rect) {
        self.content = Some(TooltipContent {
            status: cube.status,
            latency: cube.latency_label().to_string(),
        });
        self.position = TooltipPosition::above(rect);
    }

    pub fn hide(&mut self) {
        self.content = None;
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn position(&self) -> TooltipPosition {
        self.position
    }
}
