use crate::analyzer::Analyzer;
use crate::index::{Document, OwnerId, UserIndex};
use crate::repository::{RepositoryError, UserIndexRepository};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Entry point for document search. Binds the pure [`UserIndex`] to a
/// durable repository and serializes all operations against one owner, so
/// the load-mutate-store cycle of concurrent writers cannot drop updates.
/// Operations on different owners never contend.
///
/// No index is cached across calls: every operation reloads the owner's
/// index from the repository and discards it after persisting.
pub struct SearchService<R> {
    repo: R,
    owner_locks: Mutex<HashMap<OwnerId, Arc<Mutex<()>>>>,
}

impl<R: UserIndexRepository> SearchService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            owner_locks: Mutex::new(HashMap::new()),
        }
    }

    fn owner_lock(&self, owner_id: OwnerId) -> Arc<Mutex<()>> {
        self.owner_locks
            .lock()
            .entry(owner_id)
            .or_default()
            .clone()
    }

    /// Load the owner's index, provisioning a fresh empty one on first
    /// use. New indexes get the English analyzer, persisted by tag.
    fn find_or_create(&self, owner_id: OwnerId) -> Result<UserIndex> {
        match self.repo.find(owner_id) {
            Ok(user_index) => Ok(user_index),
            Err(RepositoryError::NotFound(_)) => {
                let user_index = UserIndex::new(owner_id, Analyzer::English);
                self.repo
                    .create(&user_index)
                    .with_context(|| format!("failed to create index for owner {owner_id}"))?;
                tracing::debug!(owner_id, "provisioned empty user index");
                Ok(user_index)
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to find index for owner {owner_id}"))
            }
        }
    }

    /// Return the ids of the owner's documents matching any analyzed query
    /// term. An owner with no index yet gets one and sees zero results.
    pub fn search(&self, owner_id: OwnerId, query: &str) -> Result<Vec<String>> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock();

        let user_index = self.find_or_create(owner_id)?;
        let ids = user_index.search(query);
        tracing::debug!(owner_id, hits = ids.len(), "search");
        Ok(ids)
    }

    /// Index a document for the owner and persist the result. On a
    /// persistence failure the in-memory mutation is discarded; the caller
    /// decides whether to retry the whole operation.
    pub fn insert(&self, owner_id: OwnerId, document: &Document) -> Result<()> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock();

        let mut user_index = self.find_or_create(owner_id)?;
        user_index.insert(document);
        self.repo
            .update(&user_index)
            .with_context(|| format!("failed to update index for owner {owner_id}"))?;
        tracing::debug!(owner_id, document_id = %document.id, "inserted document");
        Ok(())
    }

    /// Remove a document from the owner's index. The supplied content must
    /// be the content that was indexed. Unlike search/insert this does not
    /// provision a missing index: the find error surfaces instead.
    pub fn delete(&self, owner_id: OwnerId, document: &Document) -> Result<()> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock();

        let mut user_index = self
            .repo
            .find(owner_id)
            .with_context(|| format!("failed to find index for owner {owner_id}"))?;
        user_index.delete(document);
        self.repo
            .update(&user_index)
            .with_context(|| format!("failed to update index for owner {owner_id}"))?;
        tracing::debug!(owner_id, document_id = %document.id, "deleted document");
        Ok(())
    }
}
