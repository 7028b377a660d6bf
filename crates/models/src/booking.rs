use serde::{Deserialize, Serialize};

use crate::guest::Guest;
use crate::hotel::Hotel;
use crate::record::impl_record;
use crate::room::Room;

/// A reservation. `guest`, `hotel` and `booked_rooms` are copies frozen at the
/// time the booking was written; edits to the originals do not reach them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Booking {
    pub id: String,
    pub guest: Guest,
    pub hotel: Hotel,
    pub booked_rooms: Vec<Room>,
}

impl_record!(Booking, "booking");

impl Booking {
    pub fn has_room_type(&self, room_type: &str) -> bool {
        self.booked_rooms.iter().any(|r| r.is_type(room_type))
    }
}
