//! Main App component

use leptos::prelude::*;
use zwatch_core::controller::Action;
use zwatch_core::session::ViewState;

use crate::browser;
use crate::components::add_site::AddSite;
use crate::components::auth_panel::AuthPanel;
use crate::components::notice::AuthNotice;
use crate::components::quick_check::QuickCheck;
use crate::components::timeline::Timeline;
use crate::components::tooltip::Tooltip;
use crate::dispatch::Dispatcher;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let dispatcher = Dispatcher::new(browser::controller());
    provide_context(dispatcher);
    let state = dispatcher.state();

    let authenticated = move || state.with(|s| s.view() == ViewState::Authenticated);
    let identity = move || {
        state.with(|s| {
            s.session
                .credential()
                .map(|c| c.identity().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <main class="zwatch">
            <header>
                <h1>"ZWatch"</h1>
                <Show when=authenticated>
                    <div class="user-info">
                        <span>"Signed in as "<strong>{identity}</strong></span>
                        <button type="button" on:click=move |_| dispatcher.dispatch(Action::Logout)>
                            "Logout"
                        </button>
                    </div>
                </Show>
            </header>
            <AuthNotice />
            <Show when=authenticated fallback=|| view! { <AuthPanel /> }>
                <QuickCheck />
                <AddSite />
                <Timeline />
                <Tooltip />
            </Show>
        </main>
    }
}
