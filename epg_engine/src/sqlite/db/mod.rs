//! # SQLite database methods
//!
//! This module contains the "low-level" SQLite interactions. They are plain functions (rather than stateful structs)
//! that accept a `&mut SqliteConnection`, so callers can obtain a connection from a pool or run several calls inside
//! one transaction without any other changes.
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod orders;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
