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

//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Expand tilde (~) in path to home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if path_str.starts_with("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(path_str.replacen('~', &home, 1));
            }
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_with_home() {
        std::env::set_var("HOME", "/home/tester");
        let expanded = expand_tilde(Path::new("~/.config/websftp/config.yaml"));
        assert_eq!(
            expanded,
            PathBuf::from("/home/tester/.config/websftp/config.yaml")
        );
    }

    #[test]
    fn test_absolute_path_untouched() {
        let expanded = expand_tilde(Path::new("/etc/websftp.yaml"));
        assert_eq!(expanded, PathBuf::from("/etc/websftp.yaml"));
    }
}
