// Copyright 2025 Lablup Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SQLite-backed persistence for users and stored SFTP credentials.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub mod connections;
pub mod error;
pub mod schema;
pub mod users;

pub use connections::{CreateError, Credential};
pub use error::{StoreError, StoreResult};
pub use users::User;

/// Open the database pool, creating the database file when missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database URL: {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open database at {database_url}"))
}

/// Apply the schema. Safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in schema::STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to apply database schema")?;
    }
    Ok(())
}
