use std::sync::Arc;

use configs::AppConfig;
use models::{Booking, Guest, Hotel, Record, Room};
use service::security::ApiCredential;
use service::{EntityRepository, EntityStore};

use crate::errors::StartupError;

/// Shared handler state: one independently locked store per entity type plus
/// the configured API credential. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub hotels: Arc<dyn EntityRepository<Hotel>>,
    pub rooms: Arc<dyn EntityRepository<Room>>,
    pub guests: Arc<dyn EntityRepository<Guest>>,
    pub bookings: Arc<dyn EntityRepository<Booking>>,
    pub credential: ApiCredential,
}

async fn open<T: Record>(path: std::path::PathBuf) -> Result<Arc<dyn EntityRepository<T>>, StartupError> {
    let store: Arc<dyn EntityRepository<T>> = EntityStore::<T>::new(path)
        .await
        .map_err(|source| StartupError::Store { entity: T::ENTITY, source })?;
    Ok(store)
}

impl AppState {
    /// Load every snapshot. Any decode failure aborts startup.
    pub async fn open(cfg: &AppConfig) -> Result<Self, StartupError> {
        let storage = &cfg.storage;
        Ok(Self {
            hotels: open(storage.hotels_path()).await?,
            rooms: open(storage.rooms_path()).await?,
            guests: open(storage.guests_path()).await?,
            bookings: open(storage.bookings_path()).await?,
            credential: ApiCredential::new(&cfg.security.api_secret_hash, &cfg.security.api_secret_salt),
        })
    }
}

/// Lets the generic CRUD handlers pick the store for their entity type.
pub trait RepoFor<T: Record> {
    fn repo(&self) -> &dyn EntityRepository<T>;
}

macro_rules! repo_for {
    ($ty:ty, $field:ident) => {
        impl RepoFor<$ty> for AppState {
            fn repo(&self) -> &dyn EntityRepository<$ty> {
                &*self.$field
            }
        }
    };
}

repo_for!(Hotel, hotels);
repo_for!(Room, rooms);
repo_for!(Guest, guests);
repo_for!(Booking, bookings);
