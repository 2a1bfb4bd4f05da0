mod embedded;
#[cfg(test)]
pub mod memory;
mod postgres;
#[cfg(test)]
pub mod testing;

pub use postgres::PostgresRepository;

use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::models::{NewNote, Note, NotePatch};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("no note matched the given ID")]
    NotFound,

    #[error("a uniqueness constraint rejected the write")]
    DuplicateKey,

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<tokio_postgres::Error> for RepositoryError {
    fn from(e: tokio_postgres::Error) -> Self {
        if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            Self::DuplicateKey
        } else {
            Self::Storage(e.to_string())
        }
    }
}

/// CRUD access to stored notes.
///
/// Implementations must detect title collisions at write time through the
/// store's own constraint, never by looking titles up first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Inserts a note with a fresh ID and `created_at == updated_at`.
    async fn create(&self, note: NewNote) -> Result<Note, RepositoryError>;

    /// Applies the supplied fields and refreshes `updated_at`.
    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note, RepositoryError>;

    /// Removing an unknown ID succeeds.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Note, RepositoryError>;

    /// All notes, oldest first.
    async fn fetch_all(&self) -> Result<Vec<Note>, RepositoryError>;
}
