//! Output formatting for CLI display.

use waybill::display::CarView;
use waybill::lifecycle::StageCounts;
use waybill::text::{Direction, looks_corrupted};

/// One list row: id, stage, title, destination, agent.
pub(super) fn format_car(view: &CarView) -> String {
    let mut line = format!("{:>6}  {:<12}  {}", view.id, view.stage.label(), or_dash(&view.title));
    if !view.destination.is_empty() {
        line.push_str(&format!(" → {}", view.destination));
    }
    if !view.agent.is_empty() {
        line.push_str(&format!("  [{}]", view.agent));
    }
    line
}

/// Dashboard counts, one stage per line.
pub(super) fn format_stats(counts: &StageCounts) -> String {
    [
        ("all", counts.all),
        ("new", counts.new),
        ("warehouse", counts.warehouse),
        ("shipping", counts.shipping),
        ("unclassified", counts.unclassified),
    ]
    .iter()
    .map(|(label, n)| format!("{label:<12}  {n:>5}"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// A recovered value with its status and direction, tab-separated.
pub(super) fn format_recovery(recovered: &str) -> String {
    let status = if looks_corrupted(recovered) {
        "corrupted"
    } else {
        "ok"
    };
    let direction = match Direction::of(recovered) {
        Direction::Ltr => "ltr",
        Direction::Rtl => "rtl",
    };
    format!("{recovered}\t{status}\t{direction}")
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
