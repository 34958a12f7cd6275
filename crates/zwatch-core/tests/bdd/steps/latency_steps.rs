//! BDD step definitions for latency parsing and classification

use cucumber::{given, then, when};

use zwatch_core::classify::classify;
use zwatch_core::latency::parse_latency;
use zwatch_core::record::{CheckRecord, CheckStatus};

use crate::world::ZWatchWorld;

#[when(expr = "the latency {string} is parsed")]
fn latency_parsed(world: &mut ZWatchWorld, latency: String) {
    world.parsed_latency = Some(parse_latency(Some(&latency)));
}

#[when("an absent latency is parsed")]
fn absent_latency_parsed(world: &mut ZWatchWorld) {
    world.parsed_latency = Some(parse_latency(None));
}

#[then(expr = "the result is {float} milliseconds")]
fn result_is(world: &mut ZWatchWorld, expected: f64) {
    let actual = world.parsed_latency.expect("nothing parsed");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[given(expr = "a {string} check with latency {string}")]
fn check_with_latency(world: &mut ZWatchWorld, status: String, latency: String) {
    world.record = Some(CheckRecord::new(
        CheckStatus::from_wire(&status),
        Some(&latency),
    ));
}

#[given(expr = "a {string} check without latency")]
fn check_without_latency(world: &mut ZWatchWorld, status: String) {
    world.record = Some(CheckRecord::new(CheckStatus::from_wire(&status), None));
}

#[then(expr = "it is drawn as {string}")]
fn drawn_as(world: &mut ZWatchWorld, class: String) {
    let record = world.record.as_ref().expect("no record");
    assert_eq!(classify(record).css_class(), class);
}
