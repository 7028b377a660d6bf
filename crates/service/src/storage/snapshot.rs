//! Whole-file JSON snapshots of a homogeneous record collection.
//!
//! The codec does no locking of its own; callers serialize access per path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, io::AsyncWriteExt};

use crate::errors::ServiceError;

/// Load every record stored at `path`.
///
/// A missing file is created holding the empty collection and yields an empty
/// vector. An existing but empty file also yields an empty vector. Anything
/// else must decode as a JSON array of `T`.
pub async fn load<T>(path: &Path) -> Result<Vec<T>, ServiceError>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ServiceError::Persist(format!("{}: {e}", parent.display())))?;
    }

    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => match create_empty::<T>(path).await {
            Ok(()) => return Ok(Vec::new()),
            // lost a creation race; read what the winner wrote
            Err(e) if e.kind() == ErrorKind::AlreadyExists => fs::read(path)
                .await
                .map_err(|e| ServiceError::Persist(format!("{}: {e}", path.display())))?,
            Err(e) => return Err(ServiceError::Persist(format!("{}: {e}", path.display()))),
        },
        Err(e) => return Err(ServiceError::Persist(format!("{}: {e}", path.display()))),
    };

    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(format!("{}: {e}", path.display())))
}

/// Overwrite `path` with the full collection, pretty-printed.
///
/// The bytes go to a sibling temp file which is synced and renamed over
/// `path`, so readers see either the old snapshot or the new one. The parent
/// directory is synced afterwards so the rename itself survives a crash.
pub async fn save<T: Serialize>(records: &[T], path: &Path) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(records).map_err(|e| ServiceError::Encode(e.to_string()))?;
    let tmp = temp_path(path);
    write_synced(&tmp, &data)
        .await
        .map_err(|e| ServiceError::Persist(format!("{}: {e}", tmp.display())))?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::Persist(format!("{}: {e}", path.display())));
    }
    sync_parent(path)
        .await
        .map_err(|e| ServiceError::Persist(format!("sync directory of {}: {e}", path.display())))
}

#[cfg(unix)]
async fn sync_parent(path: &Path) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::File::open(dir).await?.sync_all().await
}

// directories cannot be opened for syncing here
#[cfg(not(unix))]
async fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

async fn create_empty<T: Serialize>(path: &Path) -> std::io::Result<()> {
    let empty: Vec<T> = Vec::new();
    let data = serde_json::to_vec_pretty(&empty)?;
    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(path).await?;
    file.write_all(&data).await?;
    file.sync_all().await
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
