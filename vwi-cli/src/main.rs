//! VWI CLI - Command line tool for querying vegetation and water index data.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "vwi-cli",
    version,
    about = "Vegetation and water index query toolkit"
)]
struct Cli {
    /// Base URL of the index backend (overrides the config file)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// JSON client configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: vwi_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = vwi_cmd::config::load_config(cli.config.as_deref(), cli.api_base.as_deref())?;
    log::debug!("Using API base {}", config.api_base);
    vwi_cmd::run(cli.command, config).await
}
