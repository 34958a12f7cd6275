//! Inline self-clearing messages

use leptos::prelude::*;
use zwatch_core::controller::{Notice, Slot};

use crate::dispatch::Dispatcher;

fn message(notice: Notice) -> impl IntoView {
    let class = format!("message {}", notice.kind.css_class());
    view! { <div class=class>{notice.text}</div> }
}

/// Shows the current notice of `slot`, if any
#[component]
pub fn NoticeLine(slot: Slot) -> impl IntoView {
    let state = expect_context::<Dispatcher>().state();
    let notice = Memo::new(move |_| state.with(|s| s.notice(slot).cloned()));

    move || notice.get().map(message)
}

/// Login and register messages, shown above whichever view is active
#[component]
pub fn AuthNotice() -> impl IntoView {
    let notice = expect_context::<Dispatcher>().auth_notice();

    move || notice.get().map(message)
}
