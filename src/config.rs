use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_postgres_user")]
    pub postgres_user: String,
    #[serde(default = "default_postgres_password")]
    pub postgres_password: String,
    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,
    #[serde(default = "default_postgres_db")]
    pub postgres_db: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_postgres_user() -> String {
    "postgres".to_string()
}

fn default_postgres_password() -> String {
    "password".to_string()
}

fn default_postgres_host() -> String {
    "localhost".to_string()
}

const fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_db() -> String {
    "postgres".to_string()
}

const fn default_server_port() -> u16 {
    8080
}

impl Config {
    pub fn database(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .user(&self.postgres_user)
            .password(&self.postgres_password)
            .dbname(&self.postgres_db);
        config
    }
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try config file
    if Path::new(&config_path).exists() {
        tracing::info!("Loading configuration from '{}'", config_path);
        let contents = fs::read_to_string(&config_path)?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to environment variables
    tracing::info!(
        "Config file '{}' not found, loading configuration from environment variables",
        config_path
    );
    envy::from_env::<Config>().map_err(|e| {
        format!("Failed to load configuration from environment variables: {e}").into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.postgres_user, "postgres");
        assert_eq!(config.postgres_host, "localhost");
        assert_eq!(config.postgres_port, 5432);
        assert_eq!(config.postgres_db, "postgres");
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn environment_variables_override_defaults() {
        let config: Config = envy::from_iter([
            ("POSTGRES_HOST".to_string(), "db".to_string()),
            ("POSTGRES_PORT".to_string(), "6543".to_string()),
            ("SERVER_PORT".to_string(), "9000".to_string()),
        ])
        .unwrap();

        assert_eq!(config.postgres_host, "db");
        assert_eq!(config.postgres_port, 6543);
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.postgres_password, "password");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = envy::from_iter::<_, Config>([(
            "POSTGRES_PORT".to_string(),
            "not-a-port".to_string(),
        )]);

        assert!(result.is_err());
    }

    #[test]
    fn yaml_file_keys_match_environment_names() {
        let config: Config =
            serde_yaml::from_str("postgres_host: db.internal\npostgres_db: notes\n").unwrap();

        assert_eq!(config.postgres_host, "db.internal");
        assert_eq!(config.postgres_db, "notes");
        assert_eq!(config.postgres_user, "postgres");
    }

    #[test]
    fn database_config_carries_connection_parameters() {
        let config: Config = serde_yaml::from_str("postgres_host: db\npostgres_port: 6543\n").unwrap();
        let database = config.database();

        assert_eq!(database.get_ports(), &[6543]);
        assert_eq!(database.get_user(), Some("postgres"));
        assert_eq!(database.get_dbname(), Some("postgres"));
        assert_eq!(database.get_password(), Some(&b"password"[..]));
    }
}
