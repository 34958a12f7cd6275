//! Status badge component

use leptos::prelude::*;
use zwatch_core::record::CheckStatus;

/// Foreground and background colours for a check status
pub fn badge_colors(status: CheckStatus) -> (&'static str, &'static str) {
    match status {
        CheckStatus::Up => ("#155724", "#d4edda"),
        CheckStatus::Down => ("#721c24", "#f8d7da"),
        CheckStatus::Unknown => ("#383d41", "#e2e3e5"),
    }
}

/// A colored badge showing Up (green), Down (red), or Unknown (gray)
#[component]
pub fn StatusBadge(status: CheckStatus) -> impl IntoView {
    let (color, bg) = badge_colors(status);

    let style = format!(
        "display: inline-block; padding: 0.25em 0.6em; border-radius: 0.25rem; \
         font-size: 0.85em; font-weight: 600; color: {}; background-color: {};",
        color, bg
    );

    view! {
        <span class=format!("status-{}", status) style=style>{status.label()}</span>
    }
}
