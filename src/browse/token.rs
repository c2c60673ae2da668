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

//! Path tokens: a remote path travels inside a single URL path segment, so
//! every `/` is swapped for a substitute character.
//!
//! Paths that themselves contain the substitute character are out of
//! contract; no escaping is performed.

/// Character standing in for `/` inside URL path segments.
pub const SEPARATOR_SUBSTITUTE: char = '^';

/// Encode a remote path into a URL-safe token.
pub fn encode(path: &str) -> String {
    path.replace('/', &SEPARATOR_SUBSTITUTE.to_string())
}

/// Decode a token back into a remote path.
pub fn decode(token: &str) -> String {
    token.replace(SEPARATOR_SUBSTITUTE, "/")
}
