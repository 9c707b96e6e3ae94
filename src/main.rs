use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use url::Url;

use semver_gateway::config::GatewayConfig;
use semver_gateway::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "semver-gateway")]
#[command(version, about = "Serve an IPFS package directory with semver resolution")]
struct Cli {
    /// JSON config file; flags override its values
    #[arg(long, env = "SEMVER_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// URL of the IPFS API
    #[arg(long, env = "IPFS_API")]
    ipfs_api: Option<Url>,

    /// URL of the IPFS gateway
    #[arg(long, env = "IPFS_GATEWAY")]
    ipfs_gateway: Option<Url>,

    /// Address to listen on
    #[arg(long, env = "ADDR")]
    addr: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn gateway_config(&self) -> anyhow::Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => GatewayConfig::default(),
        };

        if let Some(url) = &self.ipfs_api {
            config.ipfs_api = url.clone();
        }
        if let Some(url) = &self.ipfs_gateway {
            config.ipfs_gateway = url.clone();
        }
        if let Some(addr) = &self.addr {
            config.addr = addr.clone();
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_format, cli.log_file.as_deref())?;
    let config = cli.gateway_config()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(semver_gateway::http::serve(config))
}
