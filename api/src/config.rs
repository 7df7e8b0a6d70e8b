use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_idle_timeout: Duration,
    /// Log every SQL statement through SQLx
    pub db_logging: bool,
    /// Create the `benefits` table and its indexes at startup if missing
    pub db_sync_schema: bool,
    /// Insert sample benefits when the table is empty
    pub db_seed: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.sqlite?mode=rwc".to_string()),
            port: env_or("PORT", 3000),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            db_min_connections: env_or("DB_MIN_CONNECTIONS", 0),
            db_acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 30)),
            db_idle_timeout: Duration::from_secs(env_or("DB_IDLE_TIMEOUT_SECS", 10)),
            db_logging: env_flag("DB_LOGGING", false),
            db_sync_schema: env_flag("DB_SYNC_SCHEMA", true),
            db_seed: env_flag("DB_SEED", false),
        }
    }

    /// In-memory SQLite: every pooled connection must be the same one
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparseable config value");
            default
        }),
        Err(_) => default,
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|raw| parse_flag(&raw))
        .unwrap_or(default)
}

/// "true", "1" and "yes" (any case) enable a flag; everything else disables it
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
