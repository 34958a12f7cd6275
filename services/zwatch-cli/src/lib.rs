//! ZWatch CLI - drives the client controller from a terminal
//!
//! Each invocation restores the session from the credential file, runs one
//! action to completion (including any follow-up timeline load) and reports
//! the resulting notices, check result and timeline as text.

pub mod prompt;
pub mod render;
pub mod store;

use std::io::Write;

use clap::Subcommand;
use zwatch_core::controller::{Action, AppState, CheckPanel, Controller, Deferred, NoticeKind};
use zwatch_core::session::ViewState;
use zwatch_core::timeline::TimelineModel;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Log in and store the issued token
    Login { username: String, password: String },
    /// Create an account and log in
    Register { username: String, password: String },
    /// Forget the stored credential
    Logout {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Probe a URL once
    Check { url: String },
    /// Start monitoring a URL
    AddSite { url: String },
    /// Show the check timeline of every monitored URL
    Logs,
    /// Print the signed-in username
    Whoami,
}

impl Command {
    fn action(&self) -> Option<Action> {
        match self {
            Command::Login { username, password } => Some(Action::Login {
                identity: username.clone(),
                password: password.clone(),
            }),
            Command::Register { username, password } => Some(Action::Register {
                identity: username.clone(),
                password: password.clone(),
            }),
            Command::Logout { .. } => Some(Action::Logout),
            Command::Check { url } => Some(Action::QuickCheck { url: url.clone() }),
            Command::AddSite { url } => Some(Action::AddSite { url: url.clone() }),
            Command::Logs => Some(Action::RefreshLogs),
            Command::Whoami => None,
        }
    }

    fn shows_timeline(&self) -> bool {
        matches!(
            self,
            Command::Login { .. } | Command::Register { .. } | Command::AddSite { .. } | Command::Logs
        )
    }
}

/// Run one command; returns `false` when it surfaced an error
pub async fn run(
    controller: &Controller,
    command: &Command,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> std::io::Result<bool> {
    let (mut state, _) = controller.start();
    let before = state.view();

    let Some(action) = command.action() else {
        return whoami(&state, out, err);
    };

    let deferred = controller.dispatch(&mut state, action).await;
    settle(controller, &mut state, deferred).await;

    let mut ok = true;
    for (_, notice) in state.notices() {
        match notice.kind {
            NoticeKind::Success => writeln!(out, "{}", notice.text)?,
            NoticeKind::Error => {
                writeln!(err, "{}", notice.text)?;
                ok = false;
            }
        }
    }

    if let CheckPanel::Result { url, record } = &state.check {
        write!(out, "{}", render::check(url, record))?;
    }

    if let Command::Logout { .. } = command {
        match (before, state.view()) {
            (ViewState::Authenticated, ViewState::Unauthenticated) => writeln!(out, "Logged out")?,
            (ViewState::Authenticated, ViewState::Authenticated) => writeln!(out, "Logout cancelled")?,
            _ => writeln!(out, "Not logged in")?,
        }
    }

    if command.shows_timeline() {
        match &state.timeline {
            TimelineModel::PleaseLogin if !matches!(command, Command::Logs) => {}
            model @ (TimelineModel::PleaseLogin | TimelineModel::Unavailable(_)) => {
                write!(err, "{}", render::timeline(model))?;
                ok = false;
            }
            model => write!(out, "{}", render::timeline(model))?,
        }
    }

    Ok(ok)
}

/// Follow deferred timeline loads until none remain
///
/// Notice expiry is ignored; the process reports notices and exits.
async fn settle(controller: &Controller, state: &mut AppState, mut pending: Vec<Deferred>) {
    loop {
        pending.retain(|d| !matches!(d.action, Action::ExpireNotice { .. }));
        if pending.is_empty() {
            break;
        }
        let next = pending.remove(0);
        if !next.after.is_zero() {
            tracing::debug!("Waiting {:?} before {}", next.after, next.action.name());
            tokio::time::sleep(next.after).await;
        }
        let more = controller.dispatch(state, next.action).await;
        pending.extend(more);
    }
}

fn whoami(state: &AppState, out: &mut dyn Write, err: &mut dyn Write) -> std::io::Result<bool> {
    match state.session.credential() {
        Some(credential) => {
            writeln!(out, "{}", credential.identity())?;
            Ok(true)
        }
        None => {
            writeln!(err, "Not logged in")?;
            Ok(false)
        }
    }
}
