use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use models::Record;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::snapshot;

/// Lock-guarded, write-through table of one entity type backed by a JSON file.
///
/// Every operation holds the same mutex for its whole duration, including the
/// snapshot rewrite, so operations on one store never interleave. After a
/// mutation returns `Ok`, loading the file reproduces the in-memory list.
///
/// When the rewrite fails the mutation is *not* rolled back: the caller gets
/// `ServiceError::Persist`, the change stays visible, and the next successful
/// mutation brings the file back in line.
///
/// # Examples
/// ```
/// use models::Guest;
/// use service::EntityStore;
/// let path = std::env::temp_dir().join(format!("doc_guests_{}.json", uuid::Uuid::new_v4()));
/// let store = tokio_test::block_on(EntityStore::<Guest>::new(&path)).unwrap();
/// let ada = Guest { name: "Ada".into(), mobile_number: "+441234".into(), ..Default::default() };
/// let created = tokio_test::block_on(store.create(ada)).unwrap();
/// assert!(!created.id.is_empty());
/// assert_eq!(tokio_test::block_on(store.get_by_id(&created.id)), Some(created));
/// ```
pub struct EntityStore<T> {
    records: Mutex<Vec<T>>,
    file_path: PathBuf,
}

impl<T: Record> EntityStore<T> {
    /// Load the snapshot at `path`, creating an empty one if missing.
    ///
    /// Fails on an undecodable snapshot or on duplicate identifiers in it.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let records: Vec<T> = snapshot::load(&file_path).await?;

        {
            let mut seen = HashSet::with_capacity(records.len());
            if let Some(dup) = records.iter().find(|r| !seen.insert(r.id())) {
                return Err(ServiceError::Decode(format!(
                    "{}: duplicate {} id {}",
                    file_path.display(),
                    T::ENTITY,
                    dup.id()
                )));
            }
        }

        info!(entity = T::ENTITY, path = %file_path.display(), count = records.len(), "store loaded");
        Ok(Arc::new(Self { records: Mutex::new(records), file_path }))
    }

    async fn persist(&self, records: &[T], op: &'static str, id: &str) -> Result<(), ServiceError> {
        match snapshot::save(records, &self.file_path).await {
            Ok(()) => {
                debug!(entity = T::ENTITY, op, %id, count = records.len(), "snapshot written");
                Ok(())
            }
            Err(e) => {
                warn!(entity = T::ENTITY, op, %id, error = %e, "snapshot write failed; memory ahead of disk");
                Err(e)
            }
        }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.records.lock().await.clone()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<T> {
        let records = self.records.lock().await;
        records.iter().find(|r| r.id() == id).cloned()
    }

    /// Assign a fresh id (ignoring any on `candidate`), append and persist.
    pub async fn create(&self, mut candidate: T) -> Result<T, ServiceError> {
        let mut records = self.records.lock().await;
        let mut id = Uuid::new_v4().to_string();
        while records.iter().any(|r| r.id() == id) {
            id = Uuid::new_v4().to_string();
        }
        candidate.set_id(id);
        records.push(candidate.clone());
        self.persist(&records, "create", candidate.id()).await?;
        Ok(candidate)
    }

    /// Replace the fields of record `id`, keeping its id. `Ok(None)` if absent.
    pub async fn update(&self, id: &str, mut candidate: T) -> Result<Option<T>, ServiceError> {
        let mut records = self.records.lock().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        candidate.set_id(slot.id().to_string());
        *slot = candidate.clone();
        self.persist(&records, "update", id).await?;
        Ok(Some(candidate))
    }

    /// Remove record `id`, keeping survivors in order. `Ok(false)` if absent.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut records = self.records.lock().await;
        let Some(pos) = records.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };
        records.remove(pos);
        self.persist(&records, "delete", id).await?;
        Ok(true)
    }
}
