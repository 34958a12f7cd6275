//! Login / register panel shown while signed out

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use zwatch_core::controller::{Action, AuthTab};

use crate::dispatch::Dispatcher;

#[component]
pub fn AuthPanel() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let tab = dispatcher.tab();

    let tab_button = move |label: &'static str, target: AuthTab| {
        let class = move || if tab.get() == target { "tab active" } else { "tab" };
        view! {
            <button
                type="button"
                class=class
                on:click=move |_| dispatcher.dispatch(Action::SwitchTab(target))
            >
                {label}
            </button>
        }
    };

    view! {
        <section class="auth-panel">
            <div class="tabs">
                {tab_button("Login", AuthTab::Login)}
                {tab_button("Register", AuthTab::Register)}
            </div>
            {move || match tab.get() {
                AuthTab::Login => view! { <CredentialsForm tab=AuthTab::Login /> }.into_any(),
                AuthTab::Register => view! { <CredentialsForm tab=AuthTab::Register /> }.into_any(),
            }}
        </section>
    }
}

/// Username/password form; the tab decides which action it submits
///
/// Its messages go to the auth notice in `App`, which outlives this form.
#[component]
fn CredentialsForm(tab: AuthTab) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let (identity, set_identity) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let (submit_label, password_hint) = match tab {
        AuthTab::Login => ("Login", "Password"),
        AuthTab::Register => ("Register", "Password (min 6 characters)"),
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let identity = identity.get_untracked();
        let password = password.get_untracked();
        let action = match tab {
            AuthTab::Login => Action::Login { identity, password },
            AuthTab::Register => Action::Register { identity, password },
        };
        dispatcher.dispatch(action);
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Username"
                prop:value=identity
                on:input=move |ev| set_identity.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder=password_hint
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit">{submit_label}</button>
        </form>
    }
}
