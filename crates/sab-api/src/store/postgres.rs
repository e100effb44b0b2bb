//! PostgreSQL address store.
//!
//! All queries run against the `addresses` table created by the embedded
//! migration in `migrations/`. Rows are insert-only; `seq` records
//! insertion order and is never exposed.

use async_trait::async_trait;
use sab_core::{Address, AddressId, NewAddress, StorageError};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::AddressStore;
use crate::config::AppConfig;

/// Connect to Postgres and apply migrations.
///
/// Returns `None` if no `DATABASE_URL` is configured (in-memory mode).
/// Returns `Err` if the URL is set but the connection or a migration
/// fails; the caller treats that as fatal.
pub async fn init_pool(config: &AppConfig) -> Result<Option<PgPool>, sqlx::Error> {
    let url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!(
                "DATABASE_URL not set; running with the in-memory store. \
                 Addresses will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_connect_timeout)
        .connect(url)
        .await?;
    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// Address store backed by a Postgres connection pool.
///
/// Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgAddressStore {
    pool: PgPool,
    default_country: String,
}

impl PgAddressStore {
    /// Wrap an initialized pool.
    pub fn new(pool: PgPool, default_country: impl Into<String>) -> Self {
        Self {
            pool,
            default_country: default_country.into(),
        }
    }
}

#[async_trait]
impl AddressStore for PgAddressStore {
    async fn list(&self) -> Result<Vec<Address>, StorageError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            "SELECT id, address_line1, city, state, country, pin_code
             FROM addresses ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn create(&self, new: NewAddress) -> Result<Address, StorageError> {
        let record = new.into_address(AddressId::new(), &self.default_country);

        sqlx::query(
            "INSERT INTO addresses (id, address_line1, city, state, country, pin_code)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id.as_uuid())
        .bind(&record.address_line1)
        .bind(&record.city)
        .bind(&record.state)
        .bind(&record.country)
        .bind(&record.pin_code)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(record)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(storage_error)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Classify a SQLx failure: connectivity problems are `Unavailable`,
/// everything else is a rejection by the database.
fn storage_error(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StorageError::Unavailable(err.to_string()),
        _ => StorageError::Rejected(err.to_string()),
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    address_line1: String,
    city: String,
    state: String,
    country: String,
    pin_code: String,
}

/// Required fields are guaranteed non-empty by the table's `CHECK`
/// constraints, so every row maps to a record.
impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address {
            id: AddressId::from_uuid(row.id),
            address_line1: row.address_line1,
            city: row.city,
            state: row.state,
            country: row.country,
            pin_code: row.pin_code,
        }
    }
}
