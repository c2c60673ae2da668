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

use anyhow::{Context, Result};
use clap::Parser;

use websftp::web::AppState;
use websftp::{store, utils, web, Cli, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let mut settings = Settings::load_with_priority(&cli.config)
        .await
        .context("failed to load configuration")?;
    if let Some(listen) = cli.listen {
        settings.listen = listen;
    }
    if settings.accept_any_host_key {
        tracing::warn!(
            "host key verification is DISABLED by configuration; remote servers are not authenticated"
        );
    } else {
        let known_hosts = settings
            .known_hosts_file
            .clone()
            .or_else(websftp::sftp::host_verification::default_known_hosts_path);
        if let Some(path) = known_hosts {
            tracing::info!("verifying remote host keys against {}", path.display());
        }
    }

    let pool = store::connect(&settings.database_url).await?;
    store::init_schema(&pool).await?;

    let state = AppState::from_settings(pool, &settings)
        .context("failed to build application state")?;

    let listener = tokio::net::TcpListener::bind(settings.listen)
        .await
        .with_context(|| format!("failed to bind {}", settings.listen))?;

    tracing::info!("listening on http://{}", settings.listen);

    axum::serve(listener, web::router(state))
        .await
        .context("server error")?;

    Ok(())
}
