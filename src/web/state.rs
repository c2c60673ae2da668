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

//! Shared application state for the HTTP layer.

use anyhow::{Context, Result};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use data_encoding::HEXLOWER_PERMISSIVE;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Settings;
use crate::sftp::SftpConnector;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub connector: Arc<SftpConnector>,
    key: Key,
}

impl AppState {
    pub fn new(pool: SqlitePool, connector: Arc<SftpConnector>, key: Key) -> Self {
        Self {
            pool,
            connector,
            key,
        }
    }

    /// Build the state a running server uses: connector from the host-key
    /// policy and timeout, cookie key from the configured secret.
    pub fn from_settings(pool: SqlitePool, settings: &Settings) -> Result<Self> {
        let connector = Arc::new(SftpConnector::new(
            settings.host_key_policy(),
            settings.connect_timeout(),
        ));
        Ok(Self::new(pool, connector, cookie_key(settings)?))
    }
}

// Lets SignedCookieJar pull its key straight out of the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}

fn cookie_key(settings: &Settings) -> Result<Key> {
    match &settings.secret_key {
        Some(hex) => {
            let bytes = HEXLOWER_PERMISSIVE
                .decode(hex.trim().as_bytes())
                .context("secret_key must be hex-encoded")?;
            anyhow::ensure!(
                bytes.len() >= 32,
                "secret_key must decode to at least 32 bytes, got {}",
                bytes.len()
            );
            Ok(Key::derive_from(&bytes))
        }
        None => {
            tracing::warn!("no secret_key configured; sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_key_from_hex() {
        let settings = Settings {
            secret_key: Some("aa".repeat(32)),
            ..Settings::default()
        };
        assert!(cookie_key(&settings).is_ok());
    }

    #[test]
    fn test_cookie_key_rejects_short_secret() {
        let settings = Settings {
            secret_key: Some("aabb".to_string()),
            ..Settings::default()
        };
        assert!(cookie_key(&settings).is_err());
    }

    #[test]
    fn test_cookie_key_rejects_non_hex() {
        let settings = Settings {
            secret_key: Some("zz".repeat(32)),
            ..Settings::default()
        };
        assert!(cookie_key(&settings).is_err());
    }
}
