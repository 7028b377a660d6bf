use serde::{Deserialize, Serialize};

use crate::record::impl_record;
use crate::room::Room;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    /// Embedded room copies, in the order they were supplied.
    pub rooms: Vec<Room>,
}

impl_record!(Hotel, "hotel");

impl Hotel {
    pub fn has_room_type(&self, room_type: &str) -> bool {
        self.rooms.iter().any(|r| r.is_type(room_type))
    }
}
