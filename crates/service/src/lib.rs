//! Service layer for the reservation API.
//! - `storage`: whole-file JSON snapshots and the generic lock-guarded entity store.
//! - `repository`: the capability trait the HTTP layer consumes stores through.
//! - `security`: two-stage (SHA-512 then Argon2id) API secret verification.
//! - `booking`: helpers for building and auditing denormalized bookings.

pub mod errors;
pub mod storage;
pub mod repository;
pub mod security;
pub mod booking;

pub use repository::EntityRepository;
pub use storage::entity_store::EntityStore;
