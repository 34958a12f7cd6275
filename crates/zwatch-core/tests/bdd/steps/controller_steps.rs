//! BDD step definitions for the interaction controller feature

use std::sync::atomic::Ordering;
use std::time::Duration;

use cucumber::{given, then, when};

use zwatch_core::controller::{Action, CheckPanel};
use zwatch_core::record::{CheckRecord, CheckStatus, UrlHistory};

use crate::world::{parse_checks, ZWatchWorld};

#[given(expr = "the service probes report {string} with latency {string}")]
fn probes_report(world: &mut ZWatchWorld, status: String, latency: String) {
    *world.service.check_record.lock().unwrap() = Some(CheckRecord::new(
        CheckStatus::from_wire(&status),
        Some(&latency),
    ));
}

#[given("the service probes report nothing")]
fn probes_report_nothing(world: &mut ZWatchWorld) {
    *world.service.check_record.lock().unwrap() = None;
}

#[given(expr = "the service {word} new sites")]
fn service_site_policy(world: &mut ZWatchWorld, policy: String) {
    let accept = match policy.as_str() {
        "accepts" => true,
        "declines" => false,
        other => panic!("unknown policy '{other}'"),
    };
    world.service.accept_sites.store(accept, Ordering::SeqCst);
}

#[when(expr = "the user quick-checks {string}")]
async fn quick_checks(world: &mut ZWatchWorld, url: String) {
    world.dispatch(Action::QuickCheck { url }).await;
}

#[when(expr = "the user adds site {string}")]
async fn adds_site(world: &mut ZWatchWorld, url: String) {
    world.dispatch(Action::AddSite { url }).await;
}

#[when(expr = "a slow refresh is overtaken by one that sees {string} checks for {string}")]
async fn overlapping_refreshes(world: &mut ZWatchWorld, checks: String, url: String) {
    let controller = world.controller();

    let slow = world.state_mut().begin(&Action::RefreshLogs);
    let slow_outcome = controller.handle(Action::RefreshLogs, slow).await;

    world
        .service
        .histories
        .lock()
        .unwrap()
        .push(UrlHistory::new(url, parse_checks(&checks)));
    let fast = world.state_mut().begin(&Action::RefreshLogs);
    let fast_outcome = controller.handle(Action::RefreshLogs, fast).await;

    let fast_deferred = world.state_mut().apply(fast_outcome);
    let slow_deferred = world.state_mut().apply(slow_outcome);
    world.deferred.extend(fast_deferred);
    world.deferred.extend(slow_deferred);
}

#[then(expr = "the check result shows {string} for {string} with latency {string}")]
fn check_result(world: &mut ZWatchWorld, status: String, url: String, latency: String) {
    match &world.state().check {
        CheckPanel::Result { url: shown, record } => {
            assert_eq!(shown, &url);
            assert_eq!(record.status.as_str(), status);
            assert_eq!(record.latency.as_deref(), Some(latency.as_str()));
        }
        other => panic!("expected a check result, got {other:?}"),
    }
}

#[then("the check panel is idle")]
fn check_idle(world: &mut ZWatchWorld) {
    assert_eq!(world.state().check, CheckPanel::Idle);
}

#[then(expr = "a timeline load is scheduled after {int} ms")]
fn load_scheduled(world: &mut ZWatchWorld, millis: u64) {
    let after = Duration::from_millis(millis);
    assert!(
        world
            .deferred
            .iter()
            .any(|d| d.action == Action::RefreshLogs && d.after == after),
        "no load scheduled after {millis} ms: {:?}",
        world.deferred
    );
}

#[then("no timeline load is scheduled")]
fn no_load_scheduled(world: &mut ZWatchWorld) {
    assert!(!world
        .deferred
        .iter()
        .any(|d| d.action == Action::RefreshLogs));
}

#[then("the add-site input is cleared")]
fn add_site_cleared(world: &mut ZWatchWorld) {
    assert_eq!(world.state().sites_added, 1);
}
