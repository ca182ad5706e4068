//! Room domain entity

use rust_decimal::Decimal;

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCategory {
    Single,
    Double,
    Suite,
}

impl RoomCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Suite => "Suite",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Single" => Self::Single,
            "Double" => Self::Double,
            "Suite" => Self::Suite,
            _ => Self::Single,
        }
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical hotel room.
///
/// Identity and pricing are owned by the room-management collaborator; this
/// core only reads them. `occupied` is a derived read model refreshed by the
/// reservation service and the expiry sweeper; the booking ledger stays
/// authoritative for availability decisions.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique room ID
    pub id: String,
    /// Owning hotel
    pub hotel_id: String,
    /// Room number, unique within the hotel
    pub room_number: String,
    /// Category (Single/Double/Suite)
    pub category: RoomCategory,
    /// Price per night
    pub price: Decimal,
    /// Derived occupancy flag, never authoritative on its own
    pub occupied: bool,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        hotel_id: impl Into<String>,
        room_number: impl Into<String>,
        category: RoomCategory,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            hotel_id: hotel_id.into(),
            room_number: room_number.into(),
            category,
            price,
            occupied: false,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn new_room_is_vacant() {
        let r = Room::new("RM-101", "HTL-1", "101", RoomCategory::Double, Decimal::new(12000, 2));
        assert!(!r.occupied);
        assert_eq!(r.hotel_id, "HTL-1");
        assert_eq!(r.category, RoomCategory::Double);
    }

    #[test]
    fn category_display_roundtrip() {
        for category in &[RoomCategory::Single, RoomCategory::Double, RoomCategory::Suite] {
            let s = category.as_str();
            let parsed = RoomCategory::from_str(s);
            assert_eq!(&parsed, category);
        }
    }

    #[test]
    fn unknown_category_defaults_to_single() {
        assert_eq!(RoomCategory::from_str("Penthouse"), RoomCategory::Single);
    }
}
