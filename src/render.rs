use crate::models::{Address, StatusEvent};
use crate::normalize::{NormalizedResult, parse_timestamp};

/// Display format for status timestamps, e.g. "01 3, 2024 - 08:15 AM".
const TIMESTAMP_FORMAT: &str = "%m %-d, %Y - %I:%M %p";

/// Format a status timestamp for display. Unparseable timestamps are
/// shown verbatim rather than dropped.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

pub fn format_address(address: &Address) -> String {
    format!("{} {}", address.city, address.zip_code)
}

fn format_row(event: &StatusEvent) -> String {
    format!(
        "{}  {} - {}",
        format_timestamp(&event.date_updated),
        event.status_display,
        event.status_description,
    )
}

/// Render the full result block: headline, origin and destination
/// lines, and one timeline row per event, most recent first.
pub fn render_result(result: &NormalizedResult) -> String {
    let latest = result.latest();
    let mut out = String::new();

    out.push_str(&format!("{}\n", latest.status_display));
    out.push_str(&format!(
        "{} ({})\n",
        latest.status_description,
        format_timestamp(&latest.date_updated)
    ));
    out.push_str(&format!("From: {}\n", format_address(result.origin())));
    out.push_str(&format!("To: {}\n", format_address(result.destination())));
    out.push('\n');

    for event in result.timeline() {
        out.push_str(&format_row(event));
        out.push('\n');
    }

    out
}
