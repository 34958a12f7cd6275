//! Per-URL check grid

use leptos::prelude::*;
use zwatch_core::controller::Action;
use zwatch_core::timeline::{CubeRef, UrlGroup};

use crate::browser::target_rect;
use crate::dispatch::Dispatcher;

#[component]
pub fn Timeline() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let timeline = dispatcher.timeline();

    let body = move || {
        let model = timeline.get();
        match model.empty_state() {
            Some(text) => view! { <p class="empty-state">{text}</p> }.into_any(),
            None => model
                .groups()
                .iter()
                .enumerate()
                .map(|(index, group)| view! { <GroupRow index=index group=group.clone() /> })
                .collect::<Vec<_>>()
                .into_any(),
        }
    };

    view! {
        <section class="timeline">
            <div class="timeline-header">
                <h2>"Check History"</h2>
                <button type="button" on:click=move |_| dispatcher.dispatch(Action::RefreshLogs)>
                    "Refresh"
                </button>
            </div>
            {body}
        </section>
    }
}

#[component]
fn GroupRow(index: usize, group: UrlGroup) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let title = group.title().to_string();
    let count = group.count_label();

    let cubes = match group.empty_state() {
        Some(text) => view! { <p class="empty-url">{text}</p> }.into_any(),
        None => group
            .cubes
            .iter()
            .enumerate()
            .map(|(cube, c)| {
                let at = CubeRef { group: index, index: cube };
                view! {
                    <span
                        class=format!("cube {}", c.class.css_class())
                        on:mouseenter=move |ev| {
                            if let Some(rect) = target_rect(&ev) {
                                dispatcher.hover(at, rect);
                            }
                        }
                        on:mouseleave=move |_| dispatcher.unhover()
                    ></span>
                }
            })
            .collect::<Vec<_>>()
            .into_any(),
    };

    view! {
        <div class="url-group">
            <div class="url-header">
                <span class="url-title">{title}</span>
                <span class="url-count">{count}</span>
            </div>
            <div class="cubes">{cubes}</div>
        </div>
    }
}
