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

//! SQLite schema. Applied idempotently at startup.

pub const CREATE_USERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

pub const CREATE_CONNECTIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS connections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    host TEXT NOT NULL,
    username TEXT NOT NULL,
    password TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
)";

// One credential per (owner, remote account, host); enforced here so two
// concurrent creates cannot both slip past an application-level check.
pub const CREATE_CONNECTIONS_UNIQUE_INDEX: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS idx_connections_owner_target
ON connections(user_id, username, host)";

pub const STATEMENTS: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_CONNECTIONS_TABLE,
    CREATE_CONNECTIONS_UNIQUE_INDEX,
];
