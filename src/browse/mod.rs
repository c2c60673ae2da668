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

//! Directory listing classification and navigation tokens.
//!
//! A remote entry counts as a folder when its size is zero and its name has
//! no `.` in it; everything else is a file. An empty file without a dot in
//! its name is therefore shown as a folder. Long-standing behavior, kept
//! as is.

pub mod token;

/// One item from a remote directory listing, as the SFTP layer reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub size: u64,
}

/// Classification of a remote entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File,
}

/// A classified entry with the token of its full remote path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub size: u64,
    pub token: String,
}

/// A browseable view of one remote directory.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub folders: Vec<ListedEntry>,
    pub files: Vec<ListedEntry>,
    pub parent_token: String,
}

/// Classify a single remote entry.
pub fn classify(entry: &RemoteEntry) -> EntryKind {
    if entry.size == 0 && !entry.name.contains('.') {
        EntryKind::Folder
    } else {
        EntryKind::File
    }
}

/// Token of the parent directory of `dir_path`. The listing root `.` is its
/// own parent.
pub fn parent_token(dir_path: &str) -> String {
    if dir_path == "." {
        return token::encode(".");
    }
    match dir_path.rfind('/') {
        Some(idx) => token::encode(&dir_path[..idx]),
        None => token::encode("."),
    }
}

/// Name of the file a remote path points at: the part after the last `/`.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Partition remote entries into folders and files, attaching each entry's
/// child-path token.
pub fn build_listing(dir_path: &str, entries: Vec<RemoteEntry>) -> Listing {
    let mut listing = Listing {
        parent_token: parent_token(dir_path),
        ..Listing::default()
    };

    for entry in entries {
        let kind = classify(&entry);
        let child = ListedEntry {
            token: token::encode(&format!("{}/{}", dir_path, entry.name)),
            name: entry.name,
            size: entry.size,
        };
        match kind {
            EntryKind::Folder => listing.folders.push(child),
            EntryKind::File => listing.files.push(child),
        }
    }

    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64) -> RemoteEntry {
        RemoteEntry {
            name: name.to_string(),
            size,
        }
    }

    #[test]
    fn test_classification_heuristic() {
        assert_eq!(classify(&entry("data", 0)), EntryKind::Folder);
        assert_eq!(classify(&entry("report.txt", 0)), EntryKind::File);
        assert_eq!(classify(&entry("image.png", 1024)), EntryKind::File);
        // The documented quirk: empty dot-less file looks like a folder.
        assert_eq!(classify(&entry("README", 0)), EntryKind::Folder);
    }

    #[test]
    fn test_parent_token() {
        assert_eq!(parent_token("a/b/c"), token::encode("a/b"));
        assert_eq!(parent_token("."), token::encode("."));
        assert_eq!(parent_token("top"), token::encode("."));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("reports/2023/summary.pdf"), "summary.pdf");
        assert_eq!(file_name("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_build_listing_partitions_and_tokens() {
        let listing = build_listing(
            ".",
            vec![entry("data", 0), entry("report.txt", 0), entry("image.png", 1024)],
        );

        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].name, "data");
        assert_eq!(listing.folders[0].token, token::encode("./data"));

        assert_eq!(listing.files.len(), 2);
        assert_eq!(listing.files[0].token, token::encode("./report.txt"));
        assert_eq!(listing.parent_token, token::encode("."));
    }

    #[test]
    fn test_build_listing_nested_parent() {
        let listing = build_listing("a/b/c", vec![]);
        assert_eq!(listing.parent_token, token::encode("a/b"));
    }
}
