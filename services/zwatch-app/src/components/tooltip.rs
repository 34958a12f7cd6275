//! Shared hover tooltip

use leptos::prelude::*;
use zwatch_core::timeline::TooltipPosition;

use crate::dispatch::Dispatcher;

/// Inline style anchoring the tooltip's bottom-centre at `position`
pub fn anchor_style(position: TooltipPosition) -> String {
    format!(
        "position: fixed; left: {}px; top: {}px; transform: translate(-50%, -100%);",
        position.left, position.top
    )
}

#[component]
pub fn Tooltip() -> impl IntoView {
    let state = expect_context::<Dispatcher>().state();

    move || {
        state.with(|s| {
            s.tooltip.content().map(|content| {
                let style = anchor_style(s.tooltip.position());
                let status_class = content.status_class();
                let status = content.status.to_string();
                let latency = content.latency.clone();
                view! {
                    <div class="tooltip" style=style>
                        <div>"Status: "<span class=status_class>{status}</span></div>
                        <div>"Latency: "{latency}</div>
                    </div>
                }
            })
        })
    }
}
