use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Name of the variable holding the database location.
pub const DB_NAME: &str = "DB_NAME";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the SQLite database file.
    pub database: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.  Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    ///
    /// | Env Var   | Default  |
    /// |-----------|----------|
    /// | `DB_NAME` | required |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = lookup(DB_NAME)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(DB_NAME))?;

        let mut database = PathBuf::from(name);
        if database.extension().is_none() {
            database.set_extension("db");
        }

        Ok(Config { database })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}
