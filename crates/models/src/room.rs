use serde::{Deserialize, Serialize};

use crate::record::impl_record;

/// A bookable room. `price` is expected to be non-negative but is not checked.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Room {
    pub id: String,
    pub room_type: String,
    pub price: f64,
    pub facilities: Vec<String>,
}

impl_record!(Room, "room");

impl Room {
    /// Case-insensitive room type comparison.
    pub fn is_type(&self, room_type: &str) -> bool {
        self.room_type.eq_ignore_ascii_case(room_type)
    }
}
