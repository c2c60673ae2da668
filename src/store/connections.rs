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

//! Stored SFTP connection credentials.
//!
//! One row per `(owner, remote username, host)` triple. Uniqueness is a
//! database constraint, so the duplicate check and the insert cannot race.

use std::fmt;
use thiserror::Error;

use sqlx::SqlitePool;

use crate::sftp::{ConnectivityProbe, SftpError};

use super::error::{StoreError, StoreResult};

/// A stored SFTP credential, owned by one application user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub user_id: i64,
    pub host: String,
    pub username: String,
    pub password: String,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.host)
    }
}

/// Failures specific to checked credential creation.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("a credential for that user and host already exists")]
    Duplicate,

    #[error("the remote server did not accept the credentials: {0}")]
    Unreachable(#[source] SftpError),

    #[error(transparent)]
    Store(StoreError),
}

/// Insert a credential. `Duplicate` when the `(owner, username, host)`
/// triple is already present.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    host: &str,
    username: &str,
    password: &str,
) -> StoreResult<Credential> {
    sqlx::query_as::<_, Credential>(
        "INSERT INTO connections (user_id, host, username, password)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, user_id, host, username, password",
    )
    .bind(user_id)
    .bind(host)
    .bind(username)
    .bind(password)
    .fetch_one(pool)
    .await
    .map_err(StoreError::from_sqlx)
}

/// All credentials belonging to one user. Order is not significant; listing
/// sorts by host then username for stable pages.
pub async fn list(pool: &SqlitePool, user_id: i64) -> StoreResult<Vec<Credential>> {
    sqlx::query_as::<_, Credential>(
        "SELECT id, user_id, host, username, password FROM connections
         WHERE user_id = ?1 ORDER BY host, username",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(StoreError::from)
}

/// Fetch one credential by its identifying triple.
pub async fn get(
    pool: &SqlitePool,
    user_id: i64,
    username: &str,
    host: &str,
) -> StoreResult<Credential> {
    sqlx::query_as::<_, Credential>(
        "SELECT id, user_id, host, username, password FROM connections
         WHERE user_id = ?1 AND username = ?2 AND host = ?3",
    )
    .bind(user_id)
    .bind(username)
    .bind(host)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound)
}

/// Overwrite all three mutable fields of an existing credential.
/// `Duplicate` when the new triple collides with a different row.
pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    username: &str,
    host: &str,
    new_host: &str,
    new_username: &str,
    new_password: &str,
) -> StoreResult<Credential> {
    sqlx::query_as::<_, Credential>(
        "UPDATE connections SET host = ?1, username = ?2, password = ?3
         WHERE user_id = ?4 AND username = ?5 AND host = ?6
         RETURNING id, user_id, host, username, password",
    )
    .bind(new_host)
    .bind(new_username)
    .bind(new_password)
    .bind(user_id)
    .bind(username)
    .bind(host)
    .fetch_optional(pool)
    .await
    .map_err(StoreError::from_sqlx)?
    .ok_or(StoreError::NotFound)
}

/// Remove a credential. `NotFound` when the triple does not match a row;
/// the store is unchanged in that case.
pub async fn delete(
    pool: &SqlitePool,
    user_id: i64,
    username: &str,
    host: &str,
) -> StoreResult<()> {
    let result = sqlx::query(
        "DELETE FROM connections WHERE user_id = ?1 AND username = ?2 AND host = ?3",
    )
    .bind(user_id)
    .bind(username)
    .bind(host)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Create a credential after checking for duplicates and probing the remote
/// server. Nothing is persisted when the probe fails. The final insert can
/// still report `Duplicate` through the unique index if a concurrent
/// request won the race.
pub async fn create_checked(
    pool: &SqlitePool,
    probe: &dyn ConnectivityProbe,
    user_id: i64,
    host: &str,
    username: &str,
    password: &str,
) -> Result<Credential, CreateError> {
    match get(pool, user_id, username, host).await {
        Ok(_) => return Err(CreateError::Duplicate),
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(CreateError::Store(e)),
    }

    probe
        .probe(host, username, password)
        .await
        .map_err(CreateError::Unreachable)?;

    match create(pool, user_id, host, username, password).await {
        Ok(credential) => Ok(credential),
        Err(StoreError::Duplicate) => Err(CreateError::Duplicate),
        Err(e) => Err(CreateError::Store(e)),
    }
}
