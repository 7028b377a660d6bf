//! Storage layer for service crate
//!
//! `snapshot` reads and rewrites whole JSON files; `entity_store` keeps one
//! entity type in memory under a mutex and writes through on every mutation.

pub mod snapshot;
pub mod entity_store;
