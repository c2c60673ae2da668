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

//! Remote browsing and file download.
//!
//! Each request opens a fresh SFTP session, performs one remote call, and
//! disconnects. Downloads buffer the whole file before responding.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::browse::{self, token, ListedEntry};
use crate::sftp::SftpClient;
use crate::store::{self, Credential};
use crate::web::error::WebError;
use crate::web::extract::{BrowseTarget, CurrentUser};
use crate::web::state::AppState;

#[derive(Template)]
#[template(path = "browse.html")]
struct BrowsePage {
    connections: Vec<Credential>,
    username: String,
    host: String,
    current_directory: String,
    previous_dir: String,
    folders: Vec<ListedEntry>,
    files: Vec<ListedEntry>,
}

/// GET `/open_connection/{username}@{host}:{dir_token}/`
pub async fn open_connection(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> Result<Html<String>, WebError> {
    let target: BrowseTarget = target.parse()?;
    let credential = store::connections::get(
        &state.pool,
        user.id,
        &target.connection.username,
        &target.connection.host,
    )
    .await?;

    let current_dir = token::decode(&target.token);

    let client = state
        .connector
        .connect(&credential.host, &credential.username, &credential.password)
        .await?;
    let entries = client.list_dir(&current_dir).await?;
    release(client).await;

    let listing = browse::build_listing(&current_dir, entries);
    let connections = store::connections::list(&state.pool, user.id).await?;

    let page = BrowsePage {
        connections,
        username: credential.username,
        host: credential.host,
        current_directory: format!("{current_dir}/"),
        previous_dir: listing.parent_token,
        folders: listing.folders,
        files: listing.files,
    };
    Ok(Html(page.render()?))
}

/// GET `/get_file/{username}@{host}:{path_token}/`
pub async fn get_file(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> Result<Response, WebError> {
    let target: BrowseTarget = target.parse()?;
    let credential = store::connections::get(
        &state.pool,
        user.id,
        &target.connection.username,
        &target.connection.host,
    )
    .await?;

    let path = token::decode(&target.token);

    let client = state
        .connector
        .connect(&credential.host, &credential.username, &credential.password)
        .await?;
    let contents = client.read_file(&path).await?;
    release(client).await;

    let filename = browse::file_name(&path);
    let disposition = HeaderValue::from_str(&format!("attachment; filename={filename}"))
        .map_err(|e| anyhow::anyhow!("unrepresentable filename {filename:?}: {e}"))?;

    let headers: [(HeaderName, HeaderValue); 2] = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((StatusCode::OK, headers, contents).into_response())
}

/// Sessions are single-use; a failed goodbye is not worth surfacing after
/// the operation already succeeded.
async fn release(client: SftpClient) {
    if let Err(e) = client.disconnect().await {
        tracing::debug!(error = %e, "error while closing SFTP session");
    }
}
