//! Persistence store collaborator
//!
//! The store is provisioned at startup and gates it: if the SQLite file
//! cannot be opened, the process does not start. It carries no schema yet and
//! the relay core never reads or writes it.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::Result;

/// Open the SQLite store, creating the file if missing
pub async fn open(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    tracing::info!(path = %path.display(), "store opened");
    Ok(pool)
}
