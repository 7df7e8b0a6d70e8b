//! Connection pool setup and schema sync

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
};

use crate::config::Config;
use crate::entity::benefits;

/// Idle timeout and lifetime for the single in-memory connection.
///
/// Recycling that connection would drop the database with it. The pool adds
/// these to `Instant::now()`, so they must stay finite.
const IN_MEMORY_KEEPALIVE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Pool options for `config`
pub fn connect_options(config: &Config) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .idle_timeout(config.db_idle_timeout)
        .sqlx_logging(config.db_logging);

    // The pool must hold exactly one in-memory connection for its whole life
    if config.is_in_memory() {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_KEEPALIVE)
            .max_lifetime(IN_MEMORY_KEEPALIVE);
    }

    options
}

/// Open the connection pool described by `config` and make sure the
/// database answers.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let options = connect_options(config);
    let db = Database::connect(options).await?;
    db.ping().await?;

    tracing::info!(
        backend = ?db.get_database_backend(),
        max_connections = config.db_max_connections,
        "Database connected"
    );

    Ok(db)
}

/// Create the `benefits` table and its indexes if they do not exist yet
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(benefits::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(benefits::Entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    tracing::debug!("Schema synchronized");
    Ok(())
}
