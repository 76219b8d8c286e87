//! Syncscope Server Binary
//!
//! Dashboard backend for a repository synchronization daemon running under systemd.

use anyhow::Result;
use clap::Parser;
use syncscope_config::{ConfigLoader, SyncscopeConfig};
use syncscope_server::{apply_cli_overrides, Cli, Server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Print sample configuration if requested
    if cli.print_config {
        println!("{}", SyncscopeConfig::generate_sample());
        return Ok(());
    }

    // File (or defaults), then environment, then flags
    let mut config = ConfigLoader::new().load(cli.config.as_ref())?;
    apply_cli_overrides(&mut config, &cli)?;

    let server = Server::new(config)?;
    server.start().await
}
