//! In-process `NoteRepository` used to drive the HTTP layer in tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use super::{NoteRepository, RepositoryError};
use crate::models::{NewNote, Note, NotePatch};

#[derive(Default)]
pub struct InMemoryRepository {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryRepository {
    fn notes(&self) -> MutexGuard<'_, Vec<Note>> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.notes().len()
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn create(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let mut notes = self.notes();
        if notes.iter().any(|existing| existing.title == note.title) {
            return Err(RepositoryError::DuplicateKey);
        }

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: note.title,
            description: note.description,
            created_at: now,
            updated_at: now,
        };
        notes.push(note.clone());

        Ok(note)
    }

    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note, RepositoryError> {
        let mut notes = self.notes();

        if let Some(title) = &patch.title {
            if notes.iter().any(|other| other.id != id && &other.title == title) {
                return Err(RepositoryError::DuplicateKey);
            }
        }

        let note = notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(description) = patch.description {
            note.description = description;
        }
        note.updated_at = Utc::now().max(note.updated_at + TimeDelta::microseconds(1));

        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.notes().retain(|note| note.id != id);
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Note, RepositoryError> {
        self.notes()
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn fetch_all(&self) -> Result<Vec<Note>, RepositoryError> {
        Ok(self.notes().clone())
    }
}
