//! One-off URL probe

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use zwatch_core::controller::{Action, CheckPanel, Slot};
use zwatch_core::timeline::MISSING_LATENCY;

use crate::components::notice::NoticeLine;
use crate::components::status_badge::StatusBadge;
use crate::dispatch::Dispatcher;

#[component]
pub fn QuickCheck() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let check = dispatcher.check();
    let (url, set_url) = signal(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        dispatcher.dispatch(Action::QuickCheck {
            url: url.get_untracked(),
        });
    };

    let result = move || match check.get() {
        CheckPanel::Idle => ().into_any(),
        CheckPanel::Checking => view! { <p class="checking">"Checking..."</p> }.into_any(),
        CheckPanel::Result { url, record } => {
            let latency = record
                .latency
                .clone()
                .unwrap_or_else(|| MISSING_LATENCY.to_string());
            view! {
                <div class="check-result">
                    <p><strong>"URL: "</strong>{url}</p>
                    <p><strong>"Status: "</strong><StatusBadge status=record.status /></p>
                    <p><strong>"Latency: "</strong>{latency}</p>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <section class="quick-check">
            <h2>"Quick Check"</h2>
            <form on:submit=on_submit>
                <input
                    type="url"
                    placeholder="https://example.com"
                    prop:value=url
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
                <button type="submit">"Check"</button>
            </form>
            <NoticeLine slot=Slot::QuickCheck />
            {result}
        </section>
    }
}
