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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::sftp::HostKeyPolicy;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub listen: SocketAddr,

    /// SQLite database location.
    pub database_url: String,

    /// Hex-encoded cookie-signing key (at least 32 bytes once decoded).
    /// When absent a fresh key is generated at startup, which invalidates
    /// all sessions on restart.
    pub secret_key: Option<String>,

    /// Accept any remote host key instead of verifying against
    /// known_hosts. Off unless explicitly enabled.
    pub accept_any_host_key: bool,

    /// Override for the known_hosts file used during verification.
    pub known_hosts_file: Option<PathBuf>,

    /// TCP connect timeout for remote SFTP servers, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".parse().expect("valid default address"),
            database_url: "sqlite://websftp.db".to_string(),
            secret_key: None,
            accept_any_host_key: false,
            known_hosts_file: None,
            connect_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Host-key policy derived from the configured flags.
    pub fn host_key_policy(&self) -> HostKeyPolicy {
        HostKeyPolicy::from_settings(self.accept_any_host_key, self.known_hosts_file.clone())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.listen.port(), 8080);
        assert!(!settings.accept_any_host_key);
        assert_eq!(settings.connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("listen: 0.0.0.0:9090\n").unwrap();
        assert_eq!(settings.listen.port(), 9090);
        assert_eq!(settings.database_url, "sqlite://websftp.db");
        assert!(!settings.accept_any_host_key);
    }

    #[test]
    fn test_host_key_opt_out() {
        let settings: Settings = serde_yaml::from_str("accept_any_host_key: true\n").unwrap();
        assert!(matches!(
            settings.host_key_policy(),
            HostKeyPolicy::AcceptAny
        ));
    }
}
