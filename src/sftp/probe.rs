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

//! Connectivity probing.
//!
//! Credential creation verifies the remote server accepts the supplied
//! credentials before anything is persisted. The trait seam lets tests
//! substitute a probe that never touches the network.

use async_trait::async_trait;

use super::client::SftpConnector;
use super::error::SftpResult;

/// Checks that an SFTP session can be established with the given
/// credentials.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self, host: &str, username: &str, password: &str) -> SftpResult<()>;
}

#[async_trait]
impl ConnectivityProbe for SftpConnector {
    async fn probe(&self, host: &str, username: &str, password: &str) -> SftpResult<()> {
        let client = self.connect(host, username, password).await?;
        client.disconnect().await
    }
}
