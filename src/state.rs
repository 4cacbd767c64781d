//! Application state shared by the league handlers

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no database URL was configured.
    pub db_pool: Option<SqlitePool>,
}

impl AppState {
    pub fn new(db_pool: Option<SqlitePool>) -> Self {
        Self { db_pool }
    }

    pub fn is_configured(&self) -> bool {
        self.db_pool.is_some()
    }

    /// Check out one connection for the current request. It goes back to the
    /// pool when dropped, whichever way the handler returns.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, ApiError> {
        let pool = self.db_pool.as_ref().ok_or(ApiError::ConnectionUnavailable)?;
        Ok(pool.acquire().await?)
    }
}
