//! BDD step definitions for the log timeline feature

use cucumber::{given, then, when};

use zwatch_core::controller::Action;
use zwatch_core::record::UrlHistory;
use zwatch_core::timeline::{self, CubeRef, Rect, TimelineModel};

use crate::world::{parse_checks, ZWatchWorld};

fn timeline(world: &ZWatchWorld) -> &TimelineModel {
    world
        .rendered
        .as_ref()
        .unwrap_or_else(|| &world.state().timeline)
}

#[given(expr = "the service has checks {string} for {string}")]
fn service_has_checks(world: &mut ZWatchWorld, checks: String, url: String) {
    world
        .service
        .histories
        .lock()
        .unwrap()
        .push(UrlHistory::new(url, parse_checks(&checks)));
}

#[given(expr = "the service monitors {string} with no checks yet")]
fn service_has_empty_history(world: &mut ZWatchWorld, url: String) {
    world
        .service
        .histories
        .lock()
        .unwrap()
        .push(UrlHistory::new(url, Vec::new()));
}

#[given(expr = "the service fails log requests with status {int}")]
fn service_fails_logs(world: &mut ZWatchWorld, status: u16) {
    *world.service.log_failure.lock().unwrap() = Some(status);
}

#[when("the histories are rendered")]
fn histories_rendered(world: &mut ZWatchWorld) {
    let histories = world.service.histories.lock().unwrap().clone();
    world.rendered = Some(timeline::render(&histories));
}

#[when("the timeline is refreshed")]
async fn timeline_refreshed(world: &mut ZWatchWorld) {
    world.dispatch(Action::RefreshLogs).await;
}

#[when("the scheduled timeline loads run")]
async fn scheduled_loads_run(world: &mut ZWatchWorld) {
    world
        .run_deferred(|action| *action == Action::RefreshLogs)
        .await;
}

#[then(expr = "the timeline shows {int} group(s)")]
fn group_count(world: &mut ZWatchWorld, count: usize) {
    assert_eq!(timeline(world).groups().len(), count);
}

#[then(expr = "group {int} is titled {string} with label {string}")]
fn group_title(world: &mut ZWatchWorld, index: usize, title: String, label: String) {
    let group = &timeline(world).groups()[index - 1];
    assert_eq!(group.title(), title);
    assert_eq!(group.count_label(), label);
}

#[then(expr = "group {int} shows cubes {string}")]
fn group_cubes(world: &mut ZWatchWorld, index: usize, classes: String) {
    let group = &timeline(world).groups()[index - 1];
    let actual: Vec<&str> = group.cubes.iter().map(|c| c.class.css_class()).collect();
    let expected: Vec<&str> = classes.split_whitespace().collect();
    assert_eq!(actual, expected);
}

#[then(expr = "group {int} reads {string}")]
fn group_empty_state(world: &mut ZWatchWorld, index: usize, text: String) {
    let group = &timeline(world).groups()[index - 1];
    assert_eq!(group.empty_state(), Some(text.as_str()));
}

#[then(expr = "the timeline reads {string}")]
fn timeline_empty_state(world: &mut ZWatchWorld, text: String) {
    assert_eq!(timeline(world).empty_state(), Some(text.as_str()));
}

#[when(expr = "the user hovers cube {int} of group {int}")]
fn hover_cube(world: &mut ZWatchWorld, cube: usize, group: usize) {
    let rect = Rect {
        left: 100.0,
        top: 200.0,
        width: 12.0,
        height: 12.0,
    };
    world.state_mut().hover(
        CubeRef {
            group: group - 1,
            index: cube - 1,
        },
        rect,
    );
}

#[when("the pointer leaves the cube")]
fn pointer_leaves(world: &mut ZWatchWorld) {
    world.state_mut().unhover();
}

#[then(expr = "the tooltip shows status {string} and latency {string}")]
fn tooltip_shows(world: &mut ZWatchWorld, status: String, latency: String) {
    let content = world.state().tooltip.content().expect("tooltip hidden");
    assert_eq!(content.status.as_str(), status);
    assert_eq!(content.latency, latency);
}

#[then("the tooltip sits centred just above the cube")]
fn tooltip_position(world: &mut ZWatchWorld) {
    let position = world.state().tooltip.position();
    assert_eq!(position.left, 106.0);
    assert_eq!(position.top, 190.0);
}

#[then("the tooltip is hidden")]
fn tooltip_hidden(world: &mut ZWatchWorld) {
    assert!(!world.state().tooltip.is_visible());
}
