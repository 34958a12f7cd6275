//! BDD step definitions for the session feature

use std::sync::atomic::Ordering;

use cucumber::{given, then, when};

use zwatch_core::controller::{Action, LOGOUT_PROMPT};
use zwatch_core::session::ViewState;
use zwatch_core::store::CredentialStore;

use crate::world::{slot_named, AuthReply, ZWatchWorld};

#[given("the credential store is empty")]
fn store_empty(_world: &mut ZWatchWorld) {}

#[given(expr = "the credential store holds identity {string} and token {string}")]
fn store_holds_credential(world: &mut ZWatchWorld, identity: String, token: String) {
    world.store.set("zwatch_username", &identity).unwrap();
    world.store.set("zwatch_token", &token).unwrap();
}

#[given(expr = "the credential store holds only identity {string}")]
fn store_holds_identity(world: &mut ZWatchWorld, identity: String) {
    world.store.set("zwatch_username", &identity).unwrap();
}

#[given(expr = "the credential store holds only token {string}")]
fn store_holds_token(world: &mut ZWatchWorld, token: String) {
    world.store.set("zwatch_token", &token).unwrap();
}

#[given(expr = "the user is signed in as {string} with token {string}")]
fn signed_in(world: &mut ZWatchWorld, identity: String, token: String) {
    store_holds_credential(world, identity, token);
    world.start();
    world.deferred.clear();
}

#[given(expr = "the service accepts credentials and issues token {string}")]
fn service_accepts(world: &mut ZWatchWorld, token: String) {
    *world.service.auth.lock().unwrap() = AuthReply::Accept { token };
}

#[given(expr = "the service rejects credentials with status {int}")]
fn service_rejects(world: &mut ZWatchWorld, status: u16) {
    *world.service.auth.lock().unwrap() = AuthReply::Reject { status };
}

#[given("the service is unreachable")]
fn service_unreachable(world: &mut ZWatchWorld) {
    *world.service.auth.lock().unwrap() = AuthReply::Unreachable;
}

#[given(expr = "the user will {word} the logout prompt")]
fn logout_answer(world: &mut ZWatchWorld, answer: String) {
    let yes = match answer.as_str() {
        "accept" => true,
        "decline" => false,
        other => panic!("unknown answer '{other}'"),
    };
    world.confirm.answer.store(yes, Ordering::SeqCst);
}

#[when("the client starts")]
fn client_starts(world: &mut ZWatchWorld) {
    world.start();
}

#[when(expr = "the user logs in as {string} with password {string}")]
async fn logs_in(world: &mut ZWatchWorld, identity: String, password: String) {
    world.dispatch(Action::Login { identity, password }).await;
}

#[when(expr = "the user registers as {string} with password {string}")]
async fn registers(world: &mut ZWatchWorld, identity: String, password: String) {
    world.dispatch(Action::Register { identity, password }).await;
}

#[when("the user logs out")]
async fn logs_out(world: &mut ZWatchWorld) {
    world.dispatch(Action::Logout).await;
}

#[then(expr = "the view is {word}")]
fn view_is(world: &mut ZWatchWorld, view: String) {
    let expected = match view.as_str() {
        "authenticated" => ViewState::Authenticated,
        "unauthenticated" => ViewState::Unauthenticated,
        other => panic!("unknown view '{other}'"),
    };
    assert_eq!(world.state().view(), expected);
}

#[then(expr = "the signed-in identity is {string}")]
fn signed_in_identity(world: &mut ZWatchWorld, identity: String) {
    let credential = world.state().session.credential().expect("not signed in");
    assert_eq!(credential.identity(), identity);
}

#[then(expr = "the store holds identity {string} and token {string}")]
fn store_has(world: &mut ZWatchWorld, identity: String, token: String) {
    assert_eq!(world.store.get("zwatch_username").unwrap(), Some(identity));
    assert_eq!(world.store.get("zwatch_token").unwrap(), Some(token));
}

#[then("the store holds no credential")]
fn store_cleared(world: &mut ZWatchWorld) {
    assert_eq!(world.store.get("zwatch_username").unwrap(), None);
    assert_eq!(world.store.get("zwatch_token").unwrap(), None);
}

#[then(expr = "the service received {int} {word} request(s)")]
fn service_calls(world: &mut ZWatchWorld, count: usize, endpoint: String) {
    assert_eq!(world.service.calls_to(&endpoint), count);
}

#[then(expr = "the {word} notice reads {string}")]
fn notice_reads(world: &mut ZWatchWorld, slot: String, text: String) {
    let notice = world
        .state()
        .notice(slot_named(&slot))
        .unwrap_or_else(|| panic!("no {slot} notice"));
    assert_eq!(notice.text, text);
}

#[then(expr = "the {word} notice is cleared")]
fn notice_cleared(world: &mut ZWatchWorld, slot: String) {
    assert!(world.state().notice(slot_named(&slot)).is_none());
}

#[then("the user was asked to confirm logout")]
fn asked_to_confirm(world: &mut ZWatchWorld) {
    let prompts = world.confirm.prompts.lock().unwrap();
    assert_eq!(prompts.as_slice(), [LOGOUT_PROMPT]);
}

#[then("the user was not asked anything")]
fn not_asked(world: &mut ZWatchWorld) {
    assert!(world.confirm.prompts.lock().unwrap().is_empty());
}

#[when("the notices expire")]
async fn notices_expire(world: &mut ZWatchWorld) {
    world
        .run_deferred(|action| matches!(action, Action::ExpireNotice { .. }))
        .await;
}
