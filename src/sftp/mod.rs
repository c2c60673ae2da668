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

//! SFTP client module based on russh and russh-sftp.
//!
//! Every remote operation runs over a fresh, short-lived session: connect,
//! authenticate with a password, perform one SFTP call, disconnect. Host
//! key verification follows an explicit [`HostKeyPolicy`].

pub mod client;
pub mod error;
pub mod host_verification;
pub mod probe;

pub use client::{split_host_port, SftpClient, SftpConnector};
pub use error::{SftpError, SftpResult};
pub use host_verification::HostKeyPolicy;
pub use probe::ConnectivityProbe;
