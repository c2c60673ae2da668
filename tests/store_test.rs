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

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use websftp::auth;
use websftp::store::{self, connections, users, StoreError};

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    store::init_schema(&pool).await.expect("schema");
    pool
}

async fn test_user(pool: &SqlitePool, name: &str) -> users::User {
    let hash = auth::hash_password("app-password").unwrap();
    users::create(pool, name, &hash).await.unwrap()
}

#[tokio::test]
async fn test_duplicate_credential_rejected() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    connections::create(&pool, owner.id, "34.56.78.39", "anna", "secret")
        .await
        .unwrap();

    let second = connections::create(&pool, owner.id, "34.56.78.39", "anna", "other").await;
    assert!(matches!(second, Err(StoreError::Duplicate)));

    let all = connections::list(&pool, owner.id).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].password, "secret");
}

#[tokio::test]
async fn test_same_triple_different_owner_is_allowed() {
    let pool = test_pool().await;
    let first = test_user(&pool, "first").await;
    let second = test_user(&pool, "second").await;

    connections::create(&pool, first.id, "host", "anna", "pw")
        .await
        .unwrap();
    connections::create(&pool, second.id, "host", "anna", "pw")
        .await
        .unwrap();

    assert_eq!(connections::list(&pool, first.id).await.unwrap().len(), 1);
    assert_eq!(connections::list(&pool, second.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_credential_display() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    let credential = connections::create(&pool, owner.id, "34.56.78.39", "anna", "secret")
        .await
        .unwrap();

    assert_eq!(credential.to_string(), "anna@34.56.78.39");
}

#[tokio::test]
async fn test_get_and_not_found() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    connections::create(&pool, owner.id, "host-a", "anna", "pw")
        .await
        .unwrap();

    let found = connections::get(&pool, owner.id, "anna", "host-a").await.unwrap();
    assert_eq!(found.host, "host-a");

    let missing = connections::get(&pool, owner.id, "anna", "host-b").await;
    assert!(matches!(missing, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_leaves_store_unchanged() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    connections::create(&pool, owner.id, "host-a", "anna", "pw")
        .await
        .unwrap();

    let result = connections::delete(&pool, owner.id, "nobody", "nowhere").await;
    assert!(matches!(result, Err(StoreError::NotFound)));

    assert_eq!(connections::list(&pool, owner.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_existing() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    connections::create(&pool, owner.id, "host-a", "anna", "pw")
        .await
        .unwrap();
    connections::delete(&pool, owner.id, "anna", "host-a")
        .await
        .unwrap();

    assert!(connections::list(&pool, owner.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_rewrites_all_fields() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    connections::create(&pool, owner.id, "old-host", "old-user", "old-pw")
        .await
        .unwrap();

    let updated = connections::update(
        &pool, owner.id, "old-user", "old-host", "new-host", "new-user", "new-pw",
    )
    .await
    .unwrap();

    assert_eq!(updated.host, "new-host");
    assert_eq!(updated.username, "new-user");
    assert_eq!(updated.password, "new-pw");

    let missing = connections::get(&pool, owner.id, "old-user", "old-host").await;
    assert!(matches!(missing, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_update_collision_with_other_row() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    connections::create(&pool, owner.id, "host-a", "anna", "pw")
        .await
        .unwrap();
    connections::create(&pool, owner.id, "host-b", "bert", "pw")
        .await
        .unwrap();

    let collision = connections::update(
        &pool, owner.id, "bert", "host-b", "host-a", "anna", "pw",
    )
    .await;
    assert!(matches!(collision, Err(StoreError::Duplicate)));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let pool = test_pool().await;
    let owner = test_user(&pool, "owner").await;

    let result = connections::update(
        &pool, owner.id, "ghost", "nowhere", "host", "user", "pw",
    )
    .await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_username_uniqueness_for_users() {
    let pool = test_pool().await;
    test_user(&pool, "anna").await;

    let hash = auth::hash_password("pw").unwrap();
    let duplicate = users::create(&pool, "anna", &hash).await;
    assert!(matches!(duplicate, Err(StoreError::Duplicate)));
}

#[tokio::test]
async fn test_verify_login() {
    let pool = test_pool().await;
    let hash = auth::hash_password("correct horse").unwrap();
    users::create(&pool, "anna", &hash).await.unwrap();

    let ok = users::verify_login(&pool, "anna", "correct horse").await.unwrap();
    assert!(ok.is_some());

    let wrong = users::verify_login(&pool, "anna", "battery staple").await.unwrap();
    assert!(wrong.is_none());

    let unknown = users::verify_login(&pool, "nobody", "anything").await.unwrap();
    assert!(unknown.is_none());
}
