use std::sync::Arc;
use std::thread;
use tasksearch_core::{
    Document, MemoryRepository, OwnerId, RepositoryError, SearchService, UserIndex,
    UserIndexRepository,
};

fn doc(id: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn search_provisions_an_empty_index_on_first_use() {
    let service = SearchService::new(MemoryRepository::new());

    let hits = service.search(1, "anything").unwrap();
    assert!(hits.is_empty());

    // The index now exists, so a delete no longer fails with not-found.
    service.delete(1, &doc("42", "anything")).unwrap();
}

#[test]
fn insert_then_search_round_trip() {
    let service = SearchService::new(MemoryRepository::new());

    service.insert(1, &doc("t-1", "Write the quarterly report")).unwrap();
    service.insert(1, &doc("t-2", "Report the broken build")).unwrap();

    let mut hits = service.search(1, "report").unwrap();
    hits.sort();
    assert_eq!(hits, vec!["t-1", "t-2"]);

    let hits = service.search(1, "quarterly").unwrap();
    assert_eq!(hits, vec!["t-1"]);
}

#[test]
fn owners_are_isolated() {
    let service = SearchService::new(MemoryRepository::new());

    service.insert(1, &doc("t-1", "shared vocabulary")).unwrap();
    service.insert(2, &doc("t-9", "shared vocabulary")).unwrap();

    assert_eq!(service.search(1, "vocabulary").unwrap(), vec!["t-1"]);
    assert_eq!(service.search(2, "vocabulary").unwrap(), vec!["t-9"]);
}

#[test]
fn delete_retracts_a_document() {
    let service = SearchService::new(MemoryRepository::new());
    let document = doc("t-1", "ephemeral note");

    service.insert(1, &document).unwrap();
    assert_eq!(service.search(1, "ephemeral").unwrap(), vec!["t-1"]);

    service.delete(1, &document).unwrap();
    assert!(service.search(1, "ephemeral").unwrap().is_empty());
}

#[test]
fn delete_does_not_provision_a_missing_index() {
    let service = SearchService::new(MemoryRepository::new());

    let err = service.delete(99, &doc("t-1", "whatever")).unwrap_err();
    let repo_err = err.downcast_ref::<RepositoryError>().unwrap();
    assert!(matches!(repo_err, RepositoryError::NotFound(99)));
}

/// Repository whose writes always fail; reads delegate to an inner map.
struct BrokenWrites {
    inner: MemoryRepository,
}

impl UserIndexRepository for BrokenWrites {
    fn find(&self, owner_id: OwnerId) -> Result<UserIndex, RepositoryError> {
        self.inner.find(owner_id)
    }

    fn create(&self, user_index: &UserIndex) -> Result<(), RepositoryError> {
        self.inner.create(user_index)
    }

    fn update(&self, _user_index: &UserIndex) -> Result<(), RepositoryError> {
        Err(RepositoryError::Storage(anyhow::anyhow!("disk on fire")))
    }
}

#[test]
fn persistence_failure_surfaces_from_insert() {
    let service = SearchService::new(BrokenWrites {
        inner: MemoryRepository::new(),
    });

    let err = service.insert(1, &doc("t-1", "doomed")).unwrap_err();
    assert!(err.to_string().contains("owner 1"));

    // The failed mutation was discarded, nothing was indexed.
    assert!(service.search(1, "doomed").unwrap().is_empty());
}

#[test]
fn concurrent_inserts_against_different_owners_do_not_interfere() {
    let service = Arc::new(SearchService::new(MemoryRepository::new()));

    let handles: Vec<_> = (0..4u64)
        .map(|owner| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for n in 0..25 {
                    let document = doc(&format!("t-{owner}-{n}"), "busy fox");
                    service.insert(owner, &document).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for owner in 0..4u64 {
        let hits = service.search(owner, "fox").unwrap();
        assert_eq!(hits.len(), 25, "owner {owner}");
        assert!(hits.iter().all(|id| id.starts_with(&format!("t-{owner}-"))));
    }
}

#[test]
fn concurrent_inserts_against_one_owner_lose_no_updates() {
    let service = Arc::new(SearchService::new(MemoryRepository::new()));

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for n in 0..25 {
                    let document = doc(&format!("t-{worker}-{n}"), "busy fox");
                    service.insert(1, &document).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.search(1, "fox").unwrap().len(), 100);
}
