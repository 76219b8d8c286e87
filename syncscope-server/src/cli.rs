//! Command line interface

use anyhow::{anyhow, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use syncscope_config::SyncscopeConfig;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind address, either `host:port` or just `host`
    #[arg(short, long)]
    pub bind: Option<String>,

    /// systemd unit to observe
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Repository list file
    #[arg(long, value_name = "FILE")]
    pub repo_list: Option<PathBuf>,

    /// Print a sample configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Apply CLI argument overrides to configuration.
///
/// Flags win over the file and the environment. The result is validated again.
pub fn apply_cli_overrides(config: &mut SyncscopeConfig, cli: &Cli) -> Result<()> {
    if let Some(bind) = &cli.bind {
        let (address, port) = parse_bind(bind)?;
        config.server.bind_address = address;
        if let Some(port) = port {
            config.server.port = port;
        }
    }

    if let Some(unit) = &cli.unit {
        config.service.unit = unit.clone();
    }

    if let Some(path) = &cli.repo_list {
        config.registry.list_path = path.clone();
    }

    config.validate_all()?;
    Ok(())
}

fn parse_bind(bind: &str) -> Result<(String, Option<u16>)> {
    if let Ok(addr) = bind.parse::<SocketAddr>() {
        return Ok((addr.ip().to_string(), Some(addr.port())));
    }

    // Bare IPv6 addresses contain colons but no port
    if bind.parse::<std::net::IpAddr>().is_ok() || !bind.contains(':') {
        return Ok((bind.to_string(), None));
    }

    let (host, port) = bind
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("Invalid bind address '{}'", bind))?;
    let port = port
        .parse::<u16>()
        .map_err(|e| anyhow!("Invalid bind address '{}': {}", bind, e))?;
    Ok((host.to_string(), Some(port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("syncscope-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let mut config = SyncscopeConfig::default();
        apply_cli_overrides(&mut config, &parse(&[])).unwrap();

        assert_eq!(config.server.socket_address(), "127.0.0.1:3002");
        assert_eq!(config.service.unit, "github-sync.service");
    }

    #[test]
    fn test_bind_with_port() {
        let mut config = SyncscopeConfig::default();
        apply_cli_overrides(&mut config, &parse(&["--bind", "0.0.0.0:8080"])).unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_bind_host_only_keeps_port() {
        let mut config = SyncscopeConfig::default();
        apply_cli_overrides(&mut config, &parse(&["-b", "localhost"])).unwrap();

        assert_eq!(config.server.bind_address, "localhost");
        assert_eq!(config.server.port, 3002);
    }

    #[test]
    fn test_bind_hostname_with_port() {
        let mut config = SyncscopeConfig::default();
        apply_cli_overrides(&mut config, &parse(&["-b", "localhost:4000"])).unwrap();

        assert_eq!(config.server.bind_address, "localhost");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let mut config = SyncscopeConfig::default();
        assert!(apply_cli_overrides(&mut config, &parse(&["-b", "localhost:http"])).is_err());
    }

    #[test]
    fn test_unit_and_repo_list() {
        let mut config = SyncscopeConfig::default();
        let cli = parse(&["--unit", "mirror.service", "--repo-list", "/srv/sync/repos"]);
        apply_cli_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.service.unit, "mirror.service");
        assert_eq!(config.registry.list_path, PathBuf::from("/srv/sync/repos"));
    }

    #[test]
    fn test_unsafe_unit_is_rejected() {
        let mut config = SyncscopeConfig::default();
        let cli = parse(&["--unit=--all"]);
        assert!(apply_cli_overrides(&mut config, &cli).is_err());
    }
}
