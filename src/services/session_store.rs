use crate::error::StoreError;
use crate::models::SessionId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Trait for storing the last uploaded image bytes of each session
///
/// The stored value is the raw upload, so it can be decoded again after
/// the decoded copy has been dropped.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store (or replace) the snapshot for a session
    async fn save(&self, key: &SessionId, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Fetch the snapshot for a session, if any
    async fn load(&self, key: &SessionId) -> Result<Option<Vec<u8>>, StoreError>;

    /// Remove the snapshot for a session; clearing a missing key is not an error
    async fn clear(&self, key: &SessionId) -> Result<(), StoreError>;
}

/// Snapshots held at once by [`InMemorySessionStore::new`]
pub const DEFAULT_MAX_SESSIONS: usize = 256;

#[derive(Default)]
struct Snapshots {
    entries: HashMap<SessionId, (u64, Arc<Vec<u8>>)>,
    /// Save counter; lower means saved earlier
    next: u64,
}

/// In-memory snapshot storage
///
/// Holds at most `capacity` sessions. Saving a new session into a full
/// store forgets the session saved longest ago.
pub struct InMemorySessionStore {
    snapshots: Arc<RwLock<Snapshots>>,
    capacity: usize,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(Snapshots::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.entries.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, key: &SessionId, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut snapshots = self.snapshots.write().await;

        if !snapshots.entries.contains_key(key) && snapshots.entries.len() >= self.capacity {
            let oldest = snapshots
                .entries
                .iter()
                .min_by_key(|(_, (saved, _))| *saved)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                snapshots.entries.remove(&oldest);
                tracing::debug!(session = %oldest, "Evicted snapshot");
            }
        }

        let saved = snapshots.next;
        snapshots.next += 1;
        snapshots.entries.insert(key.clone(), (saved, Arc::new(bytes)));
        Ok(())
    }

    async fn load(&self, key: &SessionId) -> Result<Option<Vec<u8>>, StoreError> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots
            .entries
            .get(key)
            .map(|(_, bytes)| bytes.as_ref().clone()))
    }

    async fn clear(&self, key: &SessionId) -> Result<(), StoreError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.entries.remove(key);
        Ok(())
    }
}

/// Snapshot storage with one file per session under a directory
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.img", key.as_str()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, key: &SessionId, bytes: Vec<u8>) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Readers only ever see a complete snapshot
        let path = self.path_for(key);
        let tmp = path.with_extension("img.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved snapshot");
        Ok(())
    }

    async fn load(&self, key: &SessionId) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self, key: &SessionId) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
