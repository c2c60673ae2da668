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

//! Landing page, login/logout, and registration.

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::auth;
use crate::store::{self, StoreError};
use crate::web::error::WebError;
use crate::web::extract::{expired_session_cookie, session_cookie, CurrentUser};
use crate::web::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage;

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterPage {
    registered: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    username: String,
    password1: String,
    password2: String,
}

/// `/`. Sends authenticated users to their connection list.
pub async fn index(user: Option<CurrentUser>) -> Result<Response, WebError> {
    if user.is_some() {
        return Ok(Redirect::to("/connections/").into_response());
    }
    Ok(Html(IndexPage.render()?).into_response())
}

/// GET `/login/`
pub async fn login_page() -> Result<Html<String>, WebError> {
    Ok(Html(LoginPage.render()?))
}

/// POST `/login/`
pub async fn login_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match store::users::verify_login(&state.pool, &form.username, &form.password).await? {
        Some(user) => {
            tracing::info!(user = %user.username, "login successful");
            let jar = jar.add(session_cookie(user.id));
            Ok((jar, Redirect::to("/")).into_response())
        }
        None => Ok((StatusCode::UNAUTHORIZED, "Invalid login details given.").into_response()),
    }
}

/// `/logout/`
pub async fn logout(jar: SignedCookieJar) -> Response {
    let jar = jar.remove(expired_session_cookie());
    (jar, Redirect::to("/")).into_response()
}

/// GET `/register/`
pub async fn register_page() -> Result<Html<String>, WebError> {
    Ok(Html(
        RegisterPage {
            registered: false,
            error: None,
        }
        .render()?,
    ))
}

/// POST `/register/`
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Html<String>, WebError> {
    let page = |registered: bool, error: Option<String>| -> Result<Html<String>, WebError> {
        Ok(Html(RegisterPage { registered, error }.render()?))
    };

    if form.username.trim().is_empty() {
        return page(false, Some("Username must not be empty.".to_string()));
    }
    if form.password1 != form.password2 {
        return page(false, Some("The two password fields did not match.".to_string()));
    }
    if form.password1.is_empty() {
        return page(false, Some("Password must not be empty.".to_string()));
    }

    let password_hash = auth::hash_password(&form.password1)?;

    match store::users::create(&state.pool, form.username.trim(), &password_hash).await {
        Ok(user) => {
            tracing::info!(user = %user.username, "account registered");
            page(true, None)
        }
        Err(StoreError::Duplicate) => {
            page(false, Some("A user with that username already exists.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
