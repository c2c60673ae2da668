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

//! Credential management: list, add, edit, delete.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::store::{self, CreateError, Credential};
use crate::web::error::WebError;
use crate::web::extract::{ConnectionRef, CurrentUser};
use crate::web::state::AppState;

#[derive(Template)]
#[template(path = "connections.html")]
struct ConnectionsPage {
    connections: Vec<Credential>,
}

#[derive(Template)]
#[template(path = "add_connection.html")]
struct AddConnectionPage;

#[derive(Template)]
#[template(path = "edit_connection.html")]
struct EditConnectionPage {
    reference: String,
    host: String,
    username: String,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionForm {
    host: String,
    username: String,
    password: String,
}

/// GET `/connections/`
pub async fn list_connections(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Html<String>, WebError> {
    let connections = store::connections::list(&state.pool, user.id).await?;
    Ok(Html(ConnectionsPage { connections }.render()?))
}

/// GET `/add/`
pub async fn add_page(_user: CurrentUser) -> Result<Html<String>, WebError> {
    Ok(Html(AddConnectionPage.render()?))
}

/// POST `/add/`. Probes the remote server before anything is saved.
pub async fn add_submit(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<ConnectionForm>,
) -> Result<Response, WebError> {
    let created = store::connections::create_checked(
        &state.pool,
        state.connector.as_ref(),
        user.id,
        &form.host,
        &form.username,
        &form.password,
    )
    .await;

    match created {
        Ok(credential) => {
            tracing::info!(credential = %credential, "connection added");
            Ok(Redirect::to("/").into_response())
        }
        Err(CreateError::Duplicate) => Ok("SFTP connection already exists.".into_response()),
        Err(CreateError::Unreachable(e)) => {
            tracing::warn!(error = %e, host = %form.host, "connectivity probe failed");
            Ok("SFTP connection can't be established.".into_response())
        }
        Err(CreateError::Store(e)) => Err(e.into()),
    }
}

/// GET `/edit/{username}@{host}/`
pub async fn edit_page(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(cred): Path<String>,
) -> Result<Html<String>, WebError> {
    let reference: ConnectionRef = cred.parse()?;
    let credential =
        store::connections::get(&state.pool, user.id, &reference.username, &reference.host)
            .await?;

    Ok(Html(
        EditConnectionPage {
            reference: reference.to_string(),
            host: credential.host,
            username: credential.username,
        }
        .render()?,
    ))
}

/// POST `/edit/{username}@{host}/`
pub async fn edit_submit(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(cred): Path<String>,
    Form(form): Form<ConnectionForm>,
) -> Result<Response, WebError> {
    let reference: ConnectionRef = cred.parse()?;

    let updated = store::connections::update(
        &state.pool,
        user.id,
        &reference.username,
        &reference.host,
        &form.host,
        &form.username,
        &form.password,
    )
    .await;

    match updated {
        Ok(credential) => {
            tracing::info!(credential = %credential, "connection updated");
            Ok(Redirect::to("/").into_response())
        }
        Err(store::StoreError::Duplicate) => Ok("SFTP connection already exists.".into_response()),
        Err(e) => Err(e.into()),
    }
}

/// GET `/del/{username}@{host}/`
pub async fn delete_connection(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(cred): Path<String>,
) -> Result<Response, WebError> {
    let reference: ConnectionRef = cred.parse()?;
    store::connections::delete(&state.pool, user.id, &reference.username, &reference.host).await?;

    tracing::info!(credential = %reference, "connection deleted");
    Ok(Redirect::to("/").into_response())
}
