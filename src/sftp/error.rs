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

//! Error types for SFTP operations.

use thiserror::Error;

/// Errors raised while talking to a remote SFTP server.
#[derive(Debug, Error)]
pub enum SftpError {
    /// TCP-level connection failure (refused, unresolved, timed out).
    #[error("connection failed: {0}")]
    Connection(String),

    /// SSH transport error from russh.
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// SFTP protocol error from russh-sftp.
    #[error("SFTP error: {0}")]
    Sftp(#[from] russh_sftp::client::error::Error),

    /// The server rejected the supplied password.
    #[error("authentication failed for {username}@{host}")]
    Auth { host: String, username: String },

    /// The server's host key did not pass the configured policy.
    #[error("host key verification failed for {host}:{port}: {reason}")]
    HostKeyVerification {
        host: String,
        port: u16,
        reason: String,
    },

    /// Local I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SftpError {
    pub fn host_key_verification(
        host: impl Into<String>,
        port: u16,
        reason: impl Into<String>,
    ) -> Self {
        Self::HostKeyVerification {
            host: host.into(),
            port,
            reason: reason.into(),
        }
    }
}

/// Result type for SFTP operations.
pub type SftpResult<T> = std::result::Result<T, SftpError>;
