use serde::{Deserialize, Serialize};

/// One status change in a shipment's lifecycle, as returned by the
/// tracking API. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub id: String,
    pub request_id: String,
    pub status_display: String,      // e.g., "Delivered", "In Transit"
    pub status_description: String,  // Descriptive message
    pub date_updated: String,        // Timestamp string, parsed for ordering
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub zip_code: String,
}

/// A party (consignee or shipper) with its address snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub address: Address,
}

/// Tracking API response for one query (partial, only fields we need).
/// `statuses` is unordered as received; ordering is imposed client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingResult {
    pub statuses: Vec<StatusEvent>,
    pub consignee: Party,
    pub shipper: Party,
}

/// Tracking API error response body, when present.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
