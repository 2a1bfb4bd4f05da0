use async_trait::async_trait;
use chrono::Utc;
use tokio_postgres::{Client, NoTls, Row, types::ToSql};
use uuid::Uuid;

use super::{NoteRepository, RepositoryError, embedded::migrations};
use crate::models::{NewNote, Note, NotePatch};

const NOTE_COLUMNS: &str = "id, title, description, created_at, updated_at";

pub struct PostgresRepository {
    client: Client,
}

impl PostgresRepository {
    pub async fn connect(config: &tokio_postgres::Config) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = config.connect(NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Result<Note, tokio_postgres::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl NoteRepository for PostgresRepository {
    async fn create(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        let row = self
            .client
            .query_one(
                &format!(
                    "INSERT INTO notes ({NOTE_COLUMNS}) VALUES ($1, $2, $3, $4, $4) \
                     RETURNING {NOTE_COLUMNS}"
                ),
                &[&id, &note.title, &note.description, &created_at],
            )
            .await?;

        Ok(note_from_row(&row)?)
    }

    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note, RepositoryError> {
        let updated_at = Utc::now();

        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(4);
        params.push(&id);
        params.push(&updated_at);
        // Strictly later than the stored value even if the clock stalls or steps back
        let mut assignments =
            vec!["updated_at = GREATEST($2, updated_at + interval '1 microsecond')".to_string()];

        if let Some(title) = &patch.title {
            params.push(title);
            assignments.push(format!("title = ${}", params.len()));
        }

        if let Some(description) = &patch.description {
            params.push(description);
            assignments.push(format!("description = ${}", params.len()));
        }

        let row = self
            .client
            .query_opt(
                &format!(
                    "UPDATE notes SET {} WHERE id = $1 RETURNING {NOTE_COLUMNS}",
                    assignments.join(", ")
                ),
                &params,
            )
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(note_from_row(&row)?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        tracing::debug!("deleted {} row(s) for note {}", rows, id);

        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Note, RepositoryError> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"),
                &[&id],
            )
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(note_from_row(&row)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Note>, RepositoryError> {
        let rows = self
            .client
            .query(
                &format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at ASC, id ASC"),
                &[],
            )
            .await?;

        Ok(rows
            .iter()
            .map(note_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
