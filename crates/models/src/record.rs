use serde::{de::DeserializeOwned, Serialize};

/// Identity contract shared by every persisted entity.
///
/// Identifiers are assigned by the store on create and are never taken from
/// the caller; `set_id` exists only for the store to stamp them.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Entity name used in logs and not-found messages.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal) => {
        impl $crate::record::Record for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

pub(crate) use impl_record;
