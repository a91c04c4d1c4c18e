use crate::analyzer::Analyzer;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type OwnerId = u64;

/// Inverted index: term -> document ids containing that term. Ids are
/// kept in insertion order with no duplicates; a term whose list would
/// become empty is removed outright, so no key ever maps to an empty list.
pub type Index = HashMap<String, Vec<String>>;

/// A searchable document. The id is caller-assigned and must stay stable
/// across insert/delete calls for the same logical document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
}

/// One owner's inverted index plus the analyzer its documents were
/// indexed with. The analyzer is fixed at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIndex {
    pub owner_id: OwnerId,
    pub index: Index,
    pub analyzer: Analyzer,
}

impl UserIndex {
    pub fn new(owner_id: OwnerId, analyzer: Analyzer) -> Self {
        Self {
            owner_id,
            index: Index::new(),
            analyzer,
        }
    }

    /// Add a document's terms to the index. Idempotent per term: an id
    /// already present in a term's list is left alone.
    pub fn insert(&mut self, document: &Document) {
        for term in self.analyzer.analyze(&document.content) {
            let ids = self.index.entry(term).or_default();
            if !ids.iter().any(|id| id == &document.id) {
                ids.push(document.id.clone());
            }
        }
    }

    /// Remove a document from the index. The caller must supply the same
    /// content that was indexed; the terms to retract are re-derived from
    /// it. Deleting an unknown term or a never-inserted document is a
    /// silent no-op.
    pub fn delete(&mut self, document: &Document) {
        for term in self.analyzer.analyze(&document.content) {
            let Some(ids) = self.index.get_mut(&term) else {
                continue;
            };
            if let Some(pos) = ids.iter().position(|id| id == &document.id) {
                ids.remove(pos);
            }
            if ids.is_empty() {
                self.index.remove(&term);
            }
        }
    }

    /// Return the ids of documents containing any analyzed query term,
    /// deduplicated. Order is unspecified. An empty query (or one that is
    /// entirely stop words under the configured analyzer) yields an empty
    /// result.
    pub fn search(&self, query: &str) -> Vec<String> {
        let mut matches: HashSet<&str> = HashSet::new();
        for term in self.analyzer.analyze(query) {
            if let Some(ids) = self.index.get(&term) {
                matches.extend(ids.iter().map(String::as_str));
            }
        }
        matches.into_iter().map(String::from).collect()
    }
}
