use crate::index::{OwnerId, UserIndex};
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The owner has no index yet. Recoverable: callers provision a fresh
    /// empty index on this.
    #[error("user index not found for owner {0}")]
    NotFound(OwnerId),
    /// The stored index record could not be decoded.
    #[error("malformed index record for owner {0}")]
    Malformed(OwnerId, #[source] serde_json::Error),
    /// The backing store failed for a reason unrelated to absence.
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

/// Durable load/save of one owner's index. Each call is scoped to exactly
/// one owner's record.
pub trait UserIndexRepository: Send + Sync {
    fn find(&self, owner_id: OwnerId) -> Result<UserIndex, RepositoryError>;
    /// First write for a new owner.
    fn create(&self, user_index: &UserIndex) -> Result<(), RepositoryError>;
    /// Full overwrite of an existing owner's index state.
    fn update(&self, user_index: &UserIndex) -> Result<(), RepositoryError>;
}

/// Map-backed repository. Used by tests and tools that don't need the
/// index to survive the process.
#[derive(Default)]
pub struct MemoryRepository {
    indexes: Mutex<HashMap<OwnerId, UserIndex>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserIndexRepository for MemoryRepository {
    fn find(&self, owner_id: OwnerId) -> Result<UserIndex, RepositoryError> {
        self.indexes
            .lock()
            .get(&owner_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(owner_id))
    }

    fn create(&self, user_index: &UserIndex) -> Result<(), RepositoryError> {
        self.indexes
            .lock()
            .insert(user_index.owner_id, user_index.clone());
        Ok(())
    }

    fn update(&self, user_index: &UserIndex) -> Result<(), RepositoryError> {
        self.indexes
            .lock()
            .insert(user_index.owner_id, user_index.clone());
        Ok(())
    }
}
