//! Plain-text rendering of the visual model

use zwatch_core::classify::VisualClass;
use zwatch_core::record::CheckRecord;
use zwatch_core::timeline::{TimelineModel, MISSING_LATENCY};

/// One line per URL header, one line of cubes beneath it
pub fn timeline(model: &TimelineModel) -> String {
    if let Some(text) = model.empty_state() {
        return format!("{}\n", text);
    }

    let mut out = String::new();
    for group in model.groups() {
        let row = match group.empty_state() {
            Some(text) => text.to_string(),
            None => group.cubes.iter().map(|c| c.class.glyph()).collect(),
        };
        out.push_str(&format!(
            "{}  ({})\n  {}\n",
            group.title(),
            group.count_label(),
            row
        ));
    }
    out.push_str(&legend());
    out.push('\n');
    out
}

fn legend() -> String {
    [VisualClass::Up, VisualClass::Slow, VisualClass::Down]
        .iter()
        .map(|class| format!("{} {}", class.glyph(), class))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Quick-check result block
pub fn check(url: &str, record: &CheckRecord) -> String {
    format!(
        "{}\n  Status:  {}\n  Latency: {}\n",
        url,
        record.status.label(),
        record.latency.as_deref().unwrap_or(MISSING_LATENCY)
    )
}
