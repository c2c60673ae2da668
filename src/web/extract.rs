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

//! Request extractors: the session gate and route-segment parsing.
//!
//! Connection routes identify a credential as `username@host`; browse and
//! download routes append `:token`. The token is split off at the *last*
//! `:` so hosts carrying a port keep working.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::store;

use super::state::AppState;

pub const SESSION_COOKIE: &str = "websftp_session";

/// Session cookie carrying the signed user id.
pub fn session_cookie(user_id: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie used to clear the session on logout.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// The authenticated application user. Extraction fails with a redirect to
/// the login page when there is no valid session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = SignedCookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login/"))?;

        let user_id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i64>().ok())
            .ok_or_else(|| Redirect::to("/login/"))?;

        match store::users::get(&state.pool, user_id).await {
            Ok(Some(user)) => Ok(CurrentUser {
                id: user.id,
                username: user.username,
            }),
            Ok(None) => Err(Redirect::to("/login/")),
            Err(e) => {
                tracing::error!(error = %e, "session lookup failed");
                Err(Redirect::to("/login/"))
            }
        }
    }
}

/// A route segment did not parse as `username@host[:token]`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed connection reference")]
pub struct TargetParseError;

/// Identifies one stored credential: `username@host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRef {
    pub username: String,
    pub host: String,
}

impl FromStr for ConnectionRef {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (username, host) = s.split_once('@').ok_or(TargetParseError)?;
        if username.is_empty() || host.is_empty() {
            return Err(TargetParseError);
        }
        Ok(Self {
            username: username.to_string(),
            host: host.to_string(),
        })
    }
}

impl fmt::Display for ConnectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.host)
    }
}

/// A credential reference plus a path token: `username@host:token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseTarget {
    pub connection: ConnectionRef,
    pub token: String,
}

impl FromStr for BrowseTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (connection, token) = s.rsplit_once(':').ok_or(TargetParseError)?;
        if token.is_empty() {
            return Err(TargetParseError);
        }
        Ok(Self {
            connection: connection.parse()?,
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_ref_parse() {
        let r: ConnectionRef = "anna@34.56.78.39".parse().unwrap();
        assert_eq!(r.username, "anna");
        assert_eq!(r.host, "34.56.78.39");
        assert_eq!(r.to_string(), "anna@34.56.78.39");
    }

    #[test]
    fn test_connection_ref_rejects_malformed() {
        assert!("no-at-sign".parse::<ConnectionRef>().is_err());
        assert!("@host".parse::<ConnectionRef>().is_err());
        assert!("user@".parse::<ConnectionRef>().is_err());
    }

    #[test]
    fn test_browse_target_parse() {
        let t: BrowseTarget = "anna@34.56.78.39:.".parse().unwrap();
        assert_eq!(t.connection.host, "34.56.78.39");
        assert_eq!(t.token, ".");

        let t: BrowseTarget = "anna@34.56.78.39:.^reports^2023".parse().unwrap();
        assert_eq!(t.token, ".^reports^2023");
    }

    #[test]
    fn test_browse_target_host_with_port() {
        // The token splits at the last colon, so a host:port survives.
        let t: BrowseTarget = "anna@example.com:2222:.^data".parse().unwrap();
        assert_eq!(t.connection.host, "example.com:2222");
        assert_eq!(t.token, ".^data");
    }

    #[test]
    fn test_browse_target_rejects_missing_token() {
        assert!("anna@host".parse::<BrowseTarget>().is_err());
        assert!("anna@host:".parse::<BrowseTarget>().is_err());
    }
}
