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

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "websftp",
    version,
    about = "Web-based SFTP file manager",
    long_about = "websftp serves a small web interface for storing SFTP server credentials and\nbrowsing/downloading files from those servers. Every remote operation opens a\nfresh SSH session, performs one SFTP call, and closes it."
)]
pub struct Cli {
    #[arg(
        long,
        default_value = "~/.config/websftp/config.yaml",
        help = "Configuration file path [default: ~/.config/websftp/config.yaml]\nConfig loading priority:\n  1. This flag's value (if it exists)\n  2. Current directory (./websftp.yaml)\n  3. User config ($XDG_CONFIG_HOME/websftp/config.yaml)\n  4. Built-in defaults"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'l',
        long,
        help = "Listen address, overrides the configured value (e.g. 127.0.0.1:8080)"
    )]
    pub listen: Option<SocketAddr>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}
