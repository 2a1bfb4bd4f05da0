use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::{NewNote, Note, NotePatch},
    repository::{NoteRepository, RepositoryError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("no note was found with the ID")]
    NotFound,

    #[error("an existing note was found with the title provided")]
    TitleTaken,

    #[error("an internal error occurred")]
    Internal,
}

/// Business rules over a [`NoteRepository`]: storage failures come out as
/// [`ServiceError`] kinds and nothing storage-specific leaks past this point.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub const fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, note: NewNote) -> Result<Note, ServiceError> {
        self.repo.create(note).await.map_err(|e| match e {
            RepositoryError::DuplicateKey => {
                tracing::debug!("note title already taken");
                ServiceError::TitleTaken
            }
            e => internal("creating a note", &e),
        })
    }

    pub async fn update_note(&self, id: Uuid, patch: NotePatch) -> Result<Note, ServiceError> {
        self.repo.update(id, patch).await.map_err(|e| match e {
            RepositoryError::DuplicateKey => {
                tracing::debug!("note {} cannot take an existing title", id);
                ServiceError::TitleTaken
            }
            RepositoryError::NotFound => {
                tracing::debug!("note {} not found for update", id);
                ServiceError::NotFound
            }
            e @ RepositoryError::Storage(_) => {
                internal(&format!("updating note with id {id}"), &e)
            }
        })
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| internal(&format!("deleting note with id {id}"), &e))
    }

    pub async fn fetch_note_by_id(&self, id: Uuid) -> Result<Note, ServiceError> {
        self.repo.fetch_by_id(id).await.map_err(|e| match e {
            RepositoryError::NotFound => {
                tracing::debug!("note {} not found", id);
                ServiceError::NotFound
            }
            e => internal(&format!("fetching note with id {id}"), &e),
        })
    }

    pub async fn fetch_notes(&self) -> Result<Vec<Note>, ServiceError> {
        self.repo
            .fetch_all()
            .await
            .map_err(|e| internal("fetching notes", &e))
    }
}

fn internal(action: &str, e: &RepositoryError) -> ServiceError {
    tracing::error!("an error occurred while {}: {}", action, e);
    ServiceError::Internal
}
