//! Common HTTP plumbing: response envelope, validated JSON extractor,
//! date-time parsing.

pub mod validated_json;

pub use validated_json::ValidatedJson;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper
///
/// All REST endpoints return data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on error: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request was processed successfully
    pub success: bool,
    /// Payload. `null` on error
    pub data: Option<T>,
    /// Error description. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Failure that still carries a payload (e.g. a conflict naming the
    /// rooms that are no longer available).
    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

/// Parse a timezone-normalized instant from a request parameter.
///
/// Accepts RFC 3339 (`2025-06-01T14:00:00Z`) or a plain date
/// (`2025-06-01`, midnight UTC).
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(format!(
        "invalid instant '{}': expected RFC 3339 or YYYY-MM-DD",
        value
    ))
}

// ── Tests ──────────────────────────────────────────────────────
