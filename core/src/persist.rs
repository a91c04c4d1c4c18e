use crate::analyzer::Analyzer;
use crate::index::{Index, OwnerId, UserIndex};
use crate::repository::{RepositoryError, UserIndexRepository};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of one owner's index: the term -> id-list mapping plus
/// the analyzer's persistence tag. Filter chains are never stored, only
/// re-derived from the tag on load.
#[derive(Debug, Serialize, Deserialize)]
struct IndexRecord {
    index: Index,
    #[serde(default)]
    analyzer: Option<String>,
}

/// sled-backed repository. One record per owner, keyed by the owner id in
/// big-endian bytes, value is the JSON-encoded [`IndexRecord`].
pub struct SledRepository {
    db: sled::Db,
}

impl SledRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let db = sled::open(path).map_err(|e| RepositoryError::Storage(e.into()))?;
        Ok(Self { db })
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    fn key(owner_id: OwnerId) -> [u8; 8] {
        owner_id.to_be_bytes()
    }

    fn encode(user_index: &UserIndex) -> Result<Vec<u8>, RepositoryError> {
        let record = IndexRecord {
            index: user_index.index.clone(),
            analyzer: Some(user_index.analyzer.name().to_string()),
        };
        serde_json::to_vec(&record)
            .map_err(|e| RepositoryError::Malformed(user_index.owner_id, e))
    }
}

impl UserIndexRepository for SledRepository {
    fn find(&self, owner_id: OwnerId) -> Result<UserIndex, RepositoryError> {
        let bytes = self
            .db
            .get(Self::key(owner_id))
            .map_err(|e| RepositoryError::Storage(e.into()))?
            .ok_or(RepositoryError::NotFound(owner_id))?;
        let record: IndexRecord = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Malformed(owner_id, e))?;
        // A missing or unknown analyzer tag degrades to the unfiltered
        // default; only an undecodable index body is an error.
        let analyzer = record
            .analyzer
            .as_deref()
            .map(Analyzer::from_name)
            .unwrap_or_default();
        Ok(UserIndex {
            owner_id,
            index: record.index,
            analyzer,
        })
    }

    fn create(&self, user_index: &UserIndex) -> Result<(), RepositoryError> {
        let bytes = Self::encode(user_index)?;
        self.db
            .insert(Self::key(user_index.owner_id), bytes)
            .map_err(|e| RepositoryError::Storage(e.into()))?;
        Ok(())
    }

    fn update(&self, user_index: &UserIndex) -> Result<(), RepositoryError> {
        let bytes = Self::encode(user_index)?;
        self.db
            .insert(Self::key(user_index.owner_id), bytes)
            .map_err(|e| RepositoryError::Storage(e.into()))?;
        Ok(())
    }
}
