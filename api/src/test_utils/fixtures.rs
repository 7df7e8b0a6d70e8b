//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::time::Duration;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::adapters::sql;
use crate::config::Config;
use crate::domain::entities::{Benefit, BenefitId};

/// Create a stored, active test benefit with id 1
pub fn test_benefit() -> Benefit {
    Benefit {
        id: Some(BenefitId(1)),
        ..test_benefit_named("Vale Refeição")
    }
}

/// Create an unsaved, active benefit with a specific name
pub fn test_benefit_named(name: &str) -> Benefit {
    let now = Utc::now();
    Benefit {
        id: None,
        name: name.to_string(),
        description: Some(format!("Descrição de {}", name)),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Create an unsaved, inactive benefit
pub fn inactive_benefit(name: &str) -> Benefit {
    Benefit {
        is_active: false,
        ..test_benefit_named(name)
    }
}

/// Config pointing at a private in-memory SQLite database
pub fn memory_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        db_max_connections: 1,
        db_min_connections: 1,
        db_acquire_timeout: Duration::from_secs(5),
        db_idle_timeout: Duration::from_secs(60),
        db_logging: false,
        db_sync_schema: true,
        db_seed: false,
    }
}

/// Fresh in-memory database with the schema in place
pub async fn memory_db() -> DatabaseConnection {
    let db = sql::connect(&memory_config())
        .await
        .expect("Failed to open in-memory database");
    sql::sync_schema(&db)
        .await
        .expect("Failed to create schema");
    db
}
