//! Register a URL for monitoring

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use zwatch_core::controller::{Action, Slot};

use crate::components::notice::NoticeLine;
use crate::dispatch::Dispatcher;

#[component]
pub fn AddSite() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let state = dispatcher.state();
    let (url, set_url) = signal(String::new());

    // Clear the input after each accepted site.
    let added = Memo::new(move |_| state.with(|s| s.sites_added));
    Effect::new(move |_| {
        if added.get() > 0 {
            set_url.set(String::new());
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        dispatcher.dispatch(Action::AddSite {
            url: url.get_untracked(),
        });
    };

    view! {
        <section class="add-site">
            <h2>"Add Site"</h2>
            <form on:submit=on_submit>
                <input
                    type="url"
                    placeholder="https://example.com"
                    prop:value=url
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
            <NoticeLine slot=Slot::AddSite />
        </section>
    }
}
