use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;

use crate::models::{Address, StatusEvent, TrackingResult};

/// Internal/noise states hidden from the end user.
static EXCLUDED_STATUSES: Lazy<Vec<&str>> =
    Lazy::new(|| vec!["Approved", "Rider Assign", "For Approval"]);

/// A tracking result whose statuses have been sorted most-recent-first
/// and purged of internal states. Only constructed non-empty.
#[derive(Debug, Clone)]
pub struct NormalizedResult {
    pub statuses: Vec<StatusEvent>,
    pub consignee: Address,
    pub shipper: Address,
}

impl NormalizedResult {
    /// Most recent surviving event, shown as the headline.
    pub fn latest(&self) -> &StatusEvent {
        &self.statuses[0]
    }

    /// "From" party. Consignee-as-origin is the upstream convention.
    pub fn origin(&self) -> &Address {
        &self.consignee
    }

    /// "To" party.
    pub fn destination(&self) -> &Address {
        &self.shipper
    }

    pub fn timeline(&self) -> &[StatusEvent] {
        &self.statuses
    }
}

/// Sort statuses descending by `date_updated`, drop excluded states,
/// and carry the party addresses through. Returns `None` when nothing
/// survives; the caller must then keep whatever it was displaying.
pub fn normalize(result: TrackingResult) -> Option<NormalizedResult> {
    let mut statuses = result.statuses;
    statuses.sort_by_key(|s| std::cmp::Reverse(parse_timestamp(&s.date_updated)));
    statuses.retain(|s| !EXCLUDED_STATUSES.contains(&s.status_display.as_str()));

    if statuses.is_empty() {
        return None;
    }

    Some(NormalizedResult {
        statuses,
        consignee: result.consignee.address,
        shipper: result.shipper.address,
    })
}

/// Parse a status timestamp. Accepts RFC 3339, a plain date-time, or a
/// bare date. Unparseable strings order last.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
