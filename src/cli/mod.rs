// CLI module for folio-relay
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;

/// folio-relay - Portfolio assistant chat relay
#[derive(Parser, Debug, Default)]
#[command(name = "folio-relay", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.folio-relay/config.toml)
    #[arg(short, long, env = "FOLIO_RELAY_CONFIG")]
    pub config: Option<String>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}
