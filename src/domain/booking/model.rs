//! Booking ledger entry

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::date_range::DateRange;

/// Guest contact details. Opaque to the booking core; shape is validated at
/// the HTTP boundary only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A committed reservation of one or more rooms for a date interval.
///
/// Entries for the same room are pairwise non-overlapping on `period`; the
/// reservation service enforces that before every append. Entries whose
/// check-out has passed stay in the ledger for history; cancellation removes
/// them.
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique, externally visible reference
    pub id: Uuid,
    /// Owning hotel
    pub hotel_id: String,
    /// Reserved rooms; non-empty, sorted, deduplicated, all of one hotel
    pub room_ids: Vec<String>,
    /// Stay interval `[check_in, check_out)`
    pub period: DateRange,
    /// Total price for the whole stay
    pub total_price: Decimal,
    pub guest: GuestContact,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        hotel_id: impl Into<String>,
        room_ids: Vec<String>,
        period: DateRange,
        total_price: Decimal,
        guest: GuestContact,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id: hotel_id.into(),
            room_ids,
            period,
            total_price,
            guest,
            created_at: Utc::now(),
        }
    }

    pub fn covers_room(&self, room_id: &str) -> bool {
        self.room_ids.iter().any(|id| id == room_id)
    }

    /// Whether the stay is entirely in the past at `now` (no longer affects
    /// current availability; kept for history).
    pub fn retired_at(&self, now: DateTime<Utc>) -> bool {
        self.period.ended_by(now)
    }
}

// ── Tests ──────────────────────────────────────────────────────
