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

//! Credential creation must probe the remote server first and persist
//! nothing when the probe fails.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use websftp::auth;
use websftp::sftp::{ConnectivityProbe, SftpError, SftpResult};
use websftp::store::{self, connections, users, CreateError};

struct ReachableServer;

#[async_trait]
impl ConnectivityProbe for ReachableServer {
    async fn probe(&self, _host: &str, _username: &str, _password: &str) -> SftpResult<()> {
        Ok(())
    }
}

struct UnreachableServer;

#[async_trait]
impl ConnectivityProbe for UnreachableServer {
    async fn probe(&self, host: &str, _username: &str, _password: &str) -> SftpResult<()> {
        Err(SftpError::Connection(format!("failed to connect to {host}:22")))
    }
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    store::init_schema(&pool).await.expect("schema");
    pool
}

async fn test_user(pool: &SqlitePool) -> users::User {
    let hash = auth::hash_password("app-password").unwrap();
    users::create(pool, "owner", &hash).await.unwrap()
}

#[tokio::test]
async fn test_failed_probe_prevents_persistence() {
    let pool = test_pool().await;
    let owner = test_user(&pool).await;

    let result = connections::create_checked(
        &pool,
        &UnreachableServer,
        owner.id,
        "34.56.78.39",
        "anna",
        "secret",
    )
    .await;

    assert!(matches!(result, Err(CreateError::Unreachable(_))));
    assert!(connections::list(&pool, owner.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_probe_persists() {
    let pool = test_pool().await;
    let owner = test_user(&pool).await;

    let credential = connections::create_checked(
        &pool,
        &ReachableServer,
        owner.id,
        "34.56.78.39",
        "anna",
        "secret",
    )
    .await
    .unwrap();

    assert_eq!(credential.to_string(), "anna@34.56.78.39");
    assert_eq!(connections::list(&pool, owner.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_check_runs_before_probe() {
    let pool = test_pool().await;
    let owner = test_user(&pool).await;

    connections::create(&pool, owner.id, "34.56.78.39", "anna", "secret")
        .await
        .unwrap();

    // An existing triple is reported as a duplicate even when the server
    // is unreachable, so the probe never runs for it.
    let result = connections::create_checked(
        &pool,
        &UnreachableServer,
        owner.id,
        "34.56.78.39",
        "anna",
        "secret",
    )
    .await;

    assert!(matches!(result, Err(CreateError::Duplicate)));
    assert_eq!(connections::list(&pool, owner.id).await.unwrap().len(), 1);
}
