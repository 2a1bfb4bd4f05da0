//! Throwaway PostgreSQL servers for tests.
//!
//! Each [`TestDatabase`] downloads (once, then cached) and starts its own
//! embedded server on a free port with a temporary data directory, runs the
//! migrations and hands out a connected [`PostgresRepository`]. The server is
//! stopped and its data removed when the fixture is dropped.
//!
//! Setup failures fail the test. Set `SKIP_TEST_CLUSTER=1` in environments
//! that cannot run PostgreSQL (for example when tests run as root).

use std::sync::Arc;

use postgresql_embedded::PostgreSQL;

use super::PostgresRepository;

const DATABASE: &str = "postgres";

pub struct TestDatabase {
    pub repo: Arc<PostgresRepository>,
    _postgres: PostgreSQL,
}

impl TestDatabase {
    pub async fn start() -> Option<Self> {
        match Self::try_start().await {
            Ok(database) => Some(database),
            Err(reason) => handle_setup_failure(&reason),
        }
    }

    async fn try_start() -> Result<Self, String> {
        let mut postgres = PostgreSQL::default();
        postgres
            .setup()
            .await
            .map_err(|e| format!("postgres setup failed: {e}"))?;
        postgres
            .start()
            .await
            .map_err(|e| format!("postgres start failed: {e}"))?;

        let settings = postgres.settings();
        let mut config = tokio_postgres::Config::new();
        config
            .host(&settings.host)
            .port(settings.port)
            .user(&settings.username)
            .password(&settings.password)
            .dbname(DATABASE);

        let mut repo = PostgresRepository::connect(&config)
            .await
            .map_err(|e| format!("failed to connect: {e}"))?;
        repo.migrate()
            .await
            .map_err(|e| format!("failed to migrate: {e}"))?;

        Ok(Self {
            repo: Arc::new(repo),
            _postgres: postgres,
        })
    }
}

fn should_skip() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_setup_failure<T>(reason: &str) -> Option<T> {
    if should_skip() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("embedded postgres setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
