//! Entity types for the reservation API.
//!
//! Every entity carries a store-assigned opaque string `id`. A `Booking`
//! holds value copies of the guest, hotel and rooms it was created from,
//! not references to them.

pub mod record;
pub mod hotel;
pub mod room;
pub mod guest;
pub mod booking;

pub use booking::Booking;
pub use guest::Guest;
pub use hotel::Hotel;
pub use record::Record;
pub use room::Room;
