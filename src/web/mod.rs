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

//! HTTP surface: routes, handlers, session extraction.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use state::AppState;

use handlers::{connections, files, pages};

/// Build the application router. Everything past login/register requires an
/// authenticated session; the `CurrentUser` extractor enforces that per
/// handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login/", get(pages::login_page).post(pages::login_submit))
        .route("/logout/", get(pages::logout))
        .route(
            "/register/",
            get(pages::register_page).post(pages::register_submit),
        )
        .route("/connections/", get(connections::list_connections))
        .route(
            "/add/",
            get(connections::add_page).post(connections::add_submit),
        )
        .route(
            "/edit/:cred/",
            get(connections::edit_page).post(connections::edit_submit),
        )
        .route("/del/:cred/", get(connections::delete_connection))
        .route("/open_connection/:target/", get(files::open_connection))
        .route("/get_file/:target/", get(files::get_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
