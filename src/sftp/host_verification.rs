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

//! Host key verification policy.
//!
//! The policy is an explicit per-connector value, never a process-wide
//! default: callers construct it from configuration, and accepting any host
//! key is a loud opt-out rather than something that happens silently.

use directories::BaseDirs;
use russh::keys::known_hosts::{check_known_hosts, check_known_hosts_path};
use russh::keys::PublicKey;
use std::path::PathBuf;

use super::error::{SftpError, SftpResult};

/// How a server's host key is checked during the SSH handshake.
#[derive(Debug, Clone)]
pub enum HostKeyPolicy {
    /// Verify against a known_hosts file; `None` means the OpenSSH default
    /// (`~/.ssh/known_hosts`).
    KnownHosts { path: Option<PathBuf> },
    /// Accept every host key. Explicit opt-out for test environments.
    AcceptAny,
}

impl HostKeyPolicy {
    /// Build a policy from configuration values.
    pub fn from_settings(accept_any: bool, known_hosts_file: Option<PathBuf>) -> Self {
        if accept_any {
            Self::AcceptAny
        } else {
            Self::KnownHosts {
                path: known_hosts_file,
            }
        }
    }

    /// Verify a host key according to this policy.
    ///
    /// Returns `Ok(false)` for an unknown host, which the transport layer
    /// turns into a rejected connection.
    pub fn verify(&self, host: &str, port: u16, server_key: &PublicKey) -> SftpResult<bool> {
        match self {
            Self::AcceptAny => {
                tracing::debug!(%host, port, "host key checking disabled by policy");
                Ok(true)
            }
            Self::KnownHosts { path: Some(path) } => {
                check_known_hosts_path(host, port, server_key, path).map_err(|e| {
                    SftpError::host_key_verification(host, port, e.to_string())
                })
            }
            Self::KnownHosts { path: None } => check_known_hosts(host, port, server_key)
                .map_err(|e| SftpError::host_key_verification(host, port, e.to_string())),
        }
    }
}

impl Default for HostKeyPolicy {
    fn default() -> Self {
        Self::KnownHosts { path: None }
    }
}

/// Default known_hosts location, for diagnostics.
pub fn default_known_hosts_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".ssh").join("known_hosts"))
}
