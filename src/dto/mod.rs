use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{NewNote, Note, NotePatch};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: Uuid,
    /// Unique note title
    pub title: String,
    /// Note body
    pub description: String,
    /// Creation time (RFC 3339)
    pub created_at: DateTime<Utc>,
    /// Last modification time (RFC 3339)
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            description: note.description,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title, must not be taken by another note
    pub title: String,
    /// Note body
    pub description: String,
}

impl CreateNoteRequest {
    /// Returns `None` when either field is blank.
    pub fn into_new_note(self) -> Option<NewNote> {
        Some(NewNote {
            title: non_blank(self.title)?,
            description: non_blank(self.description)?,
        })
    }
}

/// A field of a partial update: left out, sent as `null`, or sent with a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present, absence comes from `#[serde(default)]`
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New note title
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    /// New note body
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
}

impl UpdateNoteRequest {
    /// Returns `None` when a field is explicitly `null` or blank.
    pub fn into_patch(self) -> Option<NotePatch> {
        Some(NotePatch {
            title: patch_field(self.title)?,
            description: patch_field(self.description)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable error description
    pub message: String,
}

/// PostgreSQL text columns cannot hold NUL.
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() || value.contains('\0') {
        None
    } else {
        Some(value)
    }
}

fn patch_field(field: Patch<String>) -> Option<Option<String>> {
    match field {
        Patch::Absent => Some(None),
        Patch::Null => None,
        Patch::Value(value) => non_blank(value).map(Some),
    }
}
