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

use websftp::browse::{self, token, EntryKind, RemoteEntry};

fn entry(name: &str, size: u64) -> RemoteEntry {
    RemoteEntry {
        name: name.to_string(),
        size,
    }
}

#[test]
fn test_token_round_trip() {
    for path in [
        ".",
        "a/b/c",
        "reports/2023/summary.pdf",
        "name with spaces/file.txt",
        "",
    ] {
        assert_eq!(token::decode(&token::encode(path)), path);
    }
}

#[test]
fn test_classification() {
    assert_eq!(browse::classify(&entry("data", 0)), EntryKind::Folder);
    assert_eq!(browse::classify(&entry("report.txt", 0)), EntryKind::File);
    assert_eq!(browse::classify(&entry("image.png", 1024)), EntryKind::File);
}

#[test]
fn test_parent_token() {
    assert_eq!(browse::parent_token("a/b/c"), token::encode("a/b"));
    assert_eq!(browse::parent_token("."), token::encode("."));
}

#[test]
fn test_download_filename() {
    assert_eq!(browse::file_name("reports/2023/summary.pdf"), "summary.pdf");
}

#[test]
fn test_listing_child_tokens() {
    let listing = browse::build_listing(
        "./projects",
        vec![entry("src", 0), entry("notes.md", 120)],
    );

    assert_eq!(listing.folders.len(), 1);
    assert_eq!(listing.folders[0].token, token::encode("./projects/src"));
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].token, token::encode("./projects/notes.md"));
    assert_eq!(listing.parent_token, token::encode("."));
}
