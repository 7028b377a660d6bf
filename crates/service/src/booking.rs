//! Denormalized bookings.
//!
//! A `Booking` embeds value copies of a guest, a hotel and rooms. Nothing
//! here keeps those copies in sync with the originals: `compose_booking`
//! copies whatever the stores hold at that moment, and `check_staleness`
//! only reports drift. The stores are read one after another without a
//! shared lock, so a concurrent edit to an original may or may not be seen.

use models::{Booking, Guest, Hotel, Record, Room};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::repository::EntityRepository;

/// Booking request expressed as references into the other stores.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub guest_id: String,
    pub hotel_id: String,
    #[serde(default)]
    pub room_ids: Vec<String>,
}

/// Resolve a draft into an unsaved `Booking` holding copies of the current
/// guest, hotel and rooms. Room order follows `room_ids`.
pub async fn compose_booking(
    draft: &BookingDraft,
    guests: &dyn EntityRepository<Guest>,
    hotels: &dyn EntityRepository<Hotel>,
    rooms: &dyn EntityRepository<Room>,
) -> Result<Booking, ServiceError> {
    let guest = guests
        .get_by_id(&draft.guest_id)
        .await
        .ok_or_else(|| ServiceError::not_found(Guest::ENTITY))?;
    let hotel = hotels
        .get_by_id(&draft.hotel_id)
        .await
        .ok_or_else(|| ServiceError::not_found(Hotel::ENTITY))?;

    let mut booked_rooms = Vec::with_capacity(draft.room_ids.len());
    for id in &draft.room_ids {
        let room = rooms
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::NotFound(format!("{} {} not found", Room::ENTITY, id)))?;
        booked_rooms.push(room);
    }

    Ok(Booking { id: String::new(), guest, hotel, booked_rooms })
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CopyState {
    /// Embedded copy equals the current original.
    Current,
    /// Original still exists but has been edited since.
    Diverged,
    /// Original has been deleted.
    Missing,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RoomCopyState {
    pub room_id: String,
    pub state: CopyState,
}

/// Drift report for one booking's embedded copies.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Staleness {
    pub guest: CopyState,
    pub hotel: CopyState,
    pub rooms: Vec<RoomCopyState>,
}

impl Staleness {
    pub fn is_current(&self) -> bool {
        self.guest == CopyState::Current
            && self.hotel == CopyState::Current
            && self.rooms.iter().all(|r| r.state == CopyState::Current)
    }
}

fn compare<T: Record + PartialEq>(copy: &T, original: Option<T>) -> CopyState {
    match original {
        None => CopyState::Missing,
        Some(o) if &o == copy => CopyState::Current,
        Some(_) => CopyState::Diverged,
    }
}

/// Compare a booking's embedded copies against the originals. Read-only.
pub async fn check_staleness(
    booking: &Booking,
    guests: &dyn EntityRepository<Guest>,
    hotels: &dyn EntityRepository<Hotel>,
    rooms: &dyn EntityRepository<Room>,
) -> Staleness {
    let guest = compare(&booking.guest, guests.get_by_id(booking.guest.id()).await);
    let hotel = compare(&booking.hotel, hotels.get_by_id(booking.hotel.id()).await);

    let mut room_states = Vec::with_capacity(booking.booked_rooms.len());
    for room in &booking.booked_rooms {
        room_states.push(RoomCopyState {
            room_id: room.id.clone(),
            state: compare(room, rooms.get_by_id(room.id()).await),
        });
    }

    Staleness { guest, hotel, rooms: room_states }
}
