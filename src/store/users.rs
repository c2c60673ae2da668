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

//! Application user accounts.

use sqlx::SqlitePool;

use crate::auth::password;

use super::error::{StoreError, StoreResult};

/// A registered application user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Create a user from an already-hashed password.
pub async fn create(pool: &SqlitePool, username: &str, password_hash: &str) -> StoreResult<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES (?1, ?2)
         RETURNING id, username, password_hash",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(StoreError::from_sqlx)
}

/// Look a user up by id. `None` for ids that no longer exist (stale session
/// cookies).
pub async fn get(pool: &SqlitePool, id: i64) -> StoreResult<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, username, password_hash FROM users WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(StoreError::from)
}

/// Verify a login attempt. Returns the user on success, `None` on a wrong
/// password or unknown username. Unknown usernames still run a hash
/// verification so the two failures take comparable time.
pub async fn verify_login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) if password::verify_password(password, &user.password_hash) => Ok(Some(user)),
        Some(_) => {
            tracing::debug!(user = %username, "login failed: incorrect password");
            Ok(None)
        }
        None => {
            let _ = password::verify_password(password, password::dummy_hash());
            tracing::debug!(user = %username, "login failed: user not found");
            Ok(None)
        }
    }
}
