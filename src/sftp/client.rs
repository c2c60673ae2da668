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

//! One-shot SFTP client.
//!
//! A connection lives for exactly one operation: connect, authenticate with
//! a password, run a single listing or file read over the `sftp` subsystem,
//! then disconnect. Connections are never pooled or reused.

use russh::client::{self, Config, Handle, Handler};
use russh::keys::PublicKey;
use russh::Disconnect;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::browse::RemoteEntry;

use super::error::{SftpError, SftpResult};
use super::host_verification::HostKeyPolicy;

const DEFAULT_SSH_PORT: u16 = 22;

/// Split an optional `:port` suffix off a host string. Hosts are otherwise
/// opaque; anything that does not parse as a port stays part of the host.
pub fn split_host_port(host: &str) -> (&str, u16) {
    if let Some((name, port)) = host.rsplit_once(':') {
        if let Ok(port) = port.parse::<u16>() {
            return (name, port);
        }
    }
    (host, DEFAULT_SSH_PORT)
}

/// Factory for short-lived SFTP sessions, carrying the host-key policy and
/// connect timeout from configuration.
#[derive(Debug, Clone)]
pub struct SftpConnector {
    policy: HostKeyPolicy,
    connect_timeout: Duration,
}

impl SftpConnector {
    pub fn new(policy: HostKeyPolicy, connect_timeout: Duration) -> Self {
        Self {
            policy,
            connect_timeout,
        }
    }

    /// Open an SSH connection, authenticate, and start the SFTP subsystem.
    pub async fn connect(
        &self,
        host: &str,
        username: &str,
        password: &str,
    ) -> SftpResult<SftpClient> {
        let (host_name, port) = split_host_port(host);
        let addr = format!("{host_name}:{port}");

        let config = Arc::new(Config {
            inactivity_timeout: Some(Duration::from_secs(300)),
            ..Default::default()
        });
        let handler = ClientHandler {
            host: host_name.to_string(),
            port,
            policy: self.policy.clone(),
        };

        tracing::debug!(%addr, %username, "connecting");

        let stream = timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| SftpError::Connection(format!("connection timed out to {addr}")))?
            .map_err(|e| SftpError::Connection(format!("failed to connect to {addr}: {e}")))?;

        let mut handle = client::connect_stream(config, stream, handler).await?;

        let auth_result = handle.authenticate_password(username, password).await?;
        if !auth_result.success() {
            return Err(SftpError::Auth {
                host: host_name.to_string(),
                username: username.to_string(),
            });
        }

        let channel = handle.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = russh_sftp::client::SftpSession::new(channel.into_stream()).await?;

        tracing::debug!(%addr, "SFTP session established");

        Ok(SftpClient {
            handle,
            sftp,
            host: host_name.to_string(),
        })
    }
}

/// An established SFTP session. Dropping the client closes the transport;
/// callers should still `disconnect()` for an orderly shutdown.
pub struct SftpClient {
    handle: Handle<ClientHandler>,
    sftp: russh_sftp::client::SftpSession,
    host: String,
}

impl SftpClient {
    /// List one remote directory: a single round trip, names and sizes only.
    pub async fn list_dir(&self, path: &str) -> SftpResult<Vec<RemoteEntry>> {
        tracing::debug!(host = %self.host, %path, "listing directory");

        let entries = self
            .sftp
            .read_dir(path)
            .await?
            .filter(|entry| {
                let name = entry.file_name();
                name != "." && name != ".."
            })
            .map(|entry| RemoteEntry {
                size: entry.metadata().size.unwrap_or(0),
                name: entry.file_name(),
            })
            .collect();

        Ok(entries)
    }

    /// Read one remote file fully into memory. No partial reads, no size
    /// limit; the caller owns the buffer.
    pub async fn read_file(&self, path: &str) -> SftpResult<Vec<u8>> {
        tracing::debug!(host = %self.host, %path, "reading file");

        let mut remote_file = self.sftp.open(path).await?;
        let mut contents = Vec::new();
        remote_file.read_to_end(&mut contents).await?;

        Ok(contents)
    }

    /// Close the session. Called at the end of every operation.
    pub async fn disconnect(self) -> SftpResult<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "")
            .await
            .map_err(SftpError::from)
    }
}

impl std::fmt::Debug for SftpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SftpClient")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct ClientHandler {
    host: String,
    port: u16,
    policy: HostKeyPolicy,
}

impl Handler for ClientHandler {
    type Error = SftpError;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        self.policy.verify(&self.host, self.port, server_public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host_port_default() {
        assert_eq!(split_host_port("34.56.78.39"), ("34.56.78.39", 22));
        assert_eq!(split_host_port("files.example.com"), ("files.example.com", 22));
    }

    #[test]
    fn test_split_host_port_explicit() {
        assert_eq!(split_host_port("example.com:2222"), ("example.com", 2222));
    }

    #[test]
    fn test_split_host_port_non_numeric_suffix() {
        // Not a port, so it stays part of the host.
        assert_eq!(split_host_port("weird:name"), ("weird:name", 22));
    }
}
