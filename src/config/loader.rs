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

//! Configuration loading and priority management.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::Settings;
use super::utils::expand_tilde;

impl Settings {
    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path).await.with_context(|| {
            format!(
                "Failed to read configuration file at {}",
                expanded_path.display()
            )
        })?;

        let settings: Settings = serde_yaml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse YAML configuration file at {}",
                expanded_path.display()
            )
        })?;

        Ok(settings)
    }

    /// Load configuration with priority order:
    /// 1. Explicit --config path (if exists and different from default)
    /// 2. Current directory websftp.yaml
    /// 3. XDG config directory ($XDG_CONFIG_HOME/websftp/config.yaml or
    ///    ~/.config/websftp/config.yaml)
    /// 4. Built-in defaults
    pub async fn load_with_priority(cli_config_path: &Path) -> Result<Self> {
        let default_config_path = PathBuf::from("~/.config/websftp/config.yaml");
        let expanded_cli_path = expand_tilde(cli_config_path);
        let expanded_default_path = expand_tilde(&default_config_path);

        let is_custom_config = expanded_cli_path != expanded_default_path;

        if is_custom_config && expanded_cli_path.exists() {
            tracing::debug!(
                "Using explicitly specified config file: {:?}",
                expanded_cli_path
            );
            return Self::load(&expanded_cli_path).await;
        } else if is_custom_config {
            tracing::debug!(
                "Custom config file not found, continuing with other sources: {:?}",
                expanded_cli_path
            );
        }

        if let Some(path) = Self::find_standard_config() {
            tracing::debug!("Loading config from {:?}", path);
            return Self::load(&path).await;
        }

        tracing::debug!("No config file found, using default configuration");
        Ok(Self::default())
    }

    /// First existing config file among the standard locations.
    fn find_standard_config() -> Option<PathBuf> {
        let current_dir_config = PathBuf::from("websftp.yaml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        let xdg_base = env::var("XDG_CONFIG_HOME").map(PathBuf::from).ok().or_else(|| {
            env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .ok()
        })?;

        let xdg_config = xdg_base.join("websftp").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/websftp.yaml"))
            .await
            .unwrap();
        assert_eq!(settings.listen.port(), 8080);
    }

    #[tokio::test]
    async fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen: 127.0.0.1:7070\nconnect_timeout_secs: 5").unwrap();

        let settings = Settings::load(file.path()).await.unwrap();
        assert_eq!(settings.listen.port(), 7070);
        assert_eq!(settings.connect_timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen: [not an address").unwrap();

        assert!(Settings::load(file.path()).await.is_err());
    }
}
