//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingRepository, DomainError, DomainResult, RepositoryProvider, Room, RoomCategory,
    RoomRepository,
};

/// In-memory store backing both the room registry and the booking ledger.
///
/// Bookings are indexed per room so `entries_for_room` does not scan the
/// whole ledger. Index maintenance for a given room happens under the
/// reservation service's room locks, so entries for one room never race.
pub struct InMemoryStorage {
    rooms: DashMap<String, Room>,
    bookings: DashMap<Uuid, Booking>,
    room_index: DashMap<String, Vec<Uuid>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            bookings: DashMap::new(),
            room_index: DashMap::new(),
        }
    }

    /// Register a handful of rooms for local development.
    pub fn seed_demo_data(&self) {
        let rooms = [
            ("RM-101", "HTL-DEMO", "101", RoomCategory::Single, Decimal::new(9000, 2)),
            ("RM-102", "HTL-DEMO", "102", RoomCategory::Double, Decimal::new(12000, 2)),
            ("RM-103", "HTL-DEMO", "103", RoomCategory::Double, Decimal::new(12000, 2)),
            ("RM-201", "HTL-DEMO", "201", RoomCategory::Suite, Decimal::new(24000, 2)),
        ];
        for (id, hotel, number, category, price) in rooms {
            self.rooms
                .insert(id.to_string(), Room::new(id, hotel, number, category, price));
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for InMemoryStorage {
    async fn save(&self, room: Room) -> DomainResult<()> {
        debug!("Saving room: {}", room.id);

        if self.rooms.contains_key(&room.id) {
            return Err(DomainError::Validation(format!(
                "Room already exists: {}",
                room.id
            )));
        }
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(id).map(|r| r.clone()))
    }

    async fn find_by_hotel(&self, hotel_id: &str) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.value().clone())
            .collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    async fn set_occupied(&self, id: &str, occupied: bool) -> DomainResult<()> {
        if let Some(mut room) = self.rooms.get_mut(id) {
            room.occupied = occupied;
            Ok(())
        } else {
            Err(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: id.to_string(),
            })
        }
    }

    async fn find_occupied(&self) -> DomainResult<Vec<Room>> {
        Ok(self
            .rooms
            .iter()
            .filter(|r| r.occupied)
            .map(|r| r.value().clone())
            .collect())
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for InMemoryStorage {
    async fn append(&self, booking: Booking) -> DomainResult<()> {
        debug!("Appending booking: {}", booking.id);

        let id = booking.id;
        let room_ids = booking.room_ids.clone();
        self.bookings.insert(id, booking);
        for room_id in room_ids {
            let mut index = self.room_index.entry(room_id).or_default();
            if !index.contains(&id) {
                index.push(id);
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn entries_for_room(&self, room_id: &str) -> DomainResult<Vec<Booking>> {
        let ids: Vec<Uuid> = match self.room_index.get(room_id) {
            Some(ids) => ids.value().clone(),
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| self.bookings.get(id).map(|b| b.clone()))
            .collect())
    }

    async fn remove(&self, id: Uuid) -> DomainResult<Booking> {
        debug!("Removing booking: {}", id);

        let (_, booking) = self.bookings.remove(&id).ok_or(DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: id.to_string(),
        })?;
        for room_id in &booking.room_ids {
            if let Some(mut index) = self.room_index.get_mut(room_id) {
                index.retain(|entry| entry != &id);
            }
        }
        Ok(booking)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self.bookings.iter().map(|b| b.value().clone()).collect();
        bookings.sort_by_key(|b| b.created_at);
        Ok(bookings)
    }
}

// ── RepositoryProvider impl ─────────────────────────────────────

impl RepositoryProvider for InMemoryStorage {
    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────
