use sea_orm::sea_query::OnConflict;
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, SqlxSqliteConnector, Statement,
    TryInsertResult,
};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::entities::{locations, prelude::*};
use crate::models::Place;

pub mod migrator;
pub mod records;

pub use records::{CachedRecord, ChildRecord};

/// Read or write failure against the persistent store.
///
/// The unique-key conflict on a place insert is not an error; see
/// [`Store::insert_place`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to prepare database: {0}")]
    Setup(String),
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path) = sqlite_file_path(db_url) {
            prepare_sqlite_file(path).await?;
        }

        let conn = if is_sqlite_memory(db_url) {
            connect_sqlite_memory(db_url, max_connections, min_connections).await?
        } else {
            let mut opt = ConnectOptions::new(db_url.to_string());
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .connect_timeout(Duration::from_secs(10))
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600))
                .sqlx_logging(false);

            Database::connect(opt).await?
        };

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Rows of kind `R` stored under `key`, in insertion order. An empty
    /// result is a cache miss, not an error.
    pub async fn find<R: CachedRecord>(&self, key: &R::Key) -> Result<Vec<R>, StoreError> {
        let rows = R::Entity::find()
            .filter(R::key_column().eq(key.clone()))
            .order_by_asc(R::order_column())
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(R::from_model).collect())
    }

    /// Inserts a place unless one with the same `search_query` already
    /// exists. Returns the new row id, or `None` when the insert was ignored.
    pub async fn insert_place(&self, place: &Place) -> Result<Option<i32>, StoreError> {
        let active_model = locations::ActiveModel {
            search_query: Set(place.search_query.clone()),
            formatted_query: Set(place.formatted_query.clone()),
            latitude: Set(place.latitude),
            longitude: Set(place.longitude),
            ..Default::default()
        };

        let result = Locations::insert(active_model)
            .on_conflict(
                OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.conn)
            .await?;

        match result {
            TryInsertResult::Inserted(res) => Ok(Some(res.last_insert_id)),
            TryInsertResult::Conflicted | TryInsertResult::Empty => {
                debug!(search_query = %place.search_query, "Place already stored, insert ignored");
                Ok(None)
            }
        }
    }

    /// Appends child records scoped to `location_id`. No conflict handling.
    pub async fn insert_many<R: ChildRecord>(
        &self,
        location_id: i32,
        records: &[R],
    ) -> Result<(), StoreError>
    where
        <R::Entity as EntityTrait>::Model: IntoActiveModel<<R::Entity as EntityTrait>::ActiveModel>,
    {
        if records.is_empty() {
            return Ok(());
        }

        let models: Vec<<R::Entity as EntityTrait>::ActiveModel> = records
            .iter()
            .map(|record| record.to_active_model(location_id))
            .collect();

        R::Entity::insert_many(models)
            .exec_without_returning(&self.conn)
            .await?;

        debug!(
            kind = %R::KIND,
            location_id,
            rows = records.len(),
            "Stored child records"
        );

        Ok(())
    }
}

fn is_sqlite_memory(db_url: &str) -> bool {
    db_url
        .strip_prefix("sqlite:")
        .is_some_and(|rest| rest.contains(":memory:") || rest.contains("mode=memory"))
}

/// Filesystem path of a file-backed SQLite URL, if `db_url` is one.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    if is_sqlite_memory(db_url) {
        return None;
    }
    let rest = db_url.strip_prefix("sqlite:")?;

    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then_some(path)
}

/// An in-memory database lives only as long as its connection, so the pool
/// never reaps or recycles connections.
async fn connect_sqlite_memory(
    db_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection, StoreError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(db_url)
        .await
        .map_err(|e| StoreError::Setup(format!("in-memory sqlite: {e}")))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn prepare_sqlite_file(path: &str) -> Result<(), StoreError> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }
    if !path.exists() {
        std::fs::File::create(path)
            .map_err(|e| StoreError::Setup(format!("{}: {e}", path.display())))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite:data/cityscope.db"),
            Some("data/cityscope.db")
        );
        assert_eq!(
            sqlite_file_path("sqlite://data/cityscope.db?mode=rwc"),
            Some("data/cityscope.db")
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/city"), None);
    }

    #[test]
    fn test_is_sqlite_memory() {
        assert!(is_sqlite_memory("sqlite::memory:"));
        assert!(is_sqlite_memory("sqlite://cache?mode=memory&cache=shared"));
        assert!(!is_sqlite_memory("sqlite:data/cityscope.db"));
        assert!(!is_sqlite_memory("postgres://localhost/city"));
    }

    #[tokio::test]
    async fn test_memory_store_keeps_schema_without_recycling() {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1).await.unwrap();

        let options = store.conn.get_sqlite_connection_pool().options();
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);

        let places = store.find::<Place>(&"Seattle".to_string()).await.unwrap();
        assert!(places.is_empty());
    }
}
