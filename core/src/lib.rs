pub mod analyzer;
pub mod index;
pub mod persist;
pub mod repository;
pub mod service;

pub use analyzer::{tokenize, Analyzer};
pub use index::{Document, Index, OwnerId, UserIndex};
pub use persist::SledRepository;
pub use repository::{MemoryRepository, RepositoryError, UserIndexRepository};
pub use service::SearchService;
