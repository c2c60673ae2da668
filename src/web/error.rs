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

//! Handler error type and its HTTP mapping.
//!
//! Bodies stay terse and plain-text; the interesting detail goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::sftp::SftpError;
use crate::store::StoreError;

use super::extract::TargetParseError;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sftp(#[from] SftpError),

    #[error(transparent)]
    BadTarget(#[from] TargetParseError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "SFTP connection not found.").into_response()
            }
            WebError::Store(StoreError::Duplicate) => {
                (StatusCode::CONFLICT, "SFTP connection already exists.").into_response()
            }
            WebError::Store(e) => {
                tracing::error!(error = %e, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
            }
            WebError::Sftp(e) => {
                tracing::warn!(error = %e, "remote SFTP operation failed");
                (StatusCode::BAD_GATEWAY, "Can't connect to remote server.").into_response()
            }
            WebError::BadTarget(_) => {
                (StatusCode::BAD_REQUEST, "Malformed connection reference.").into_response()
            }
            WebError::Render(e) => {
                tracing::error!(error = %e, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
            }
            WebError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
            }
        }
    }
}
