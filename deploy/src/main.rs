//! `deploy`: deploys the migration contract and whatever it depends on.
use std::path::{Path, PathBuf};

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use eyre::WrapErr;
use migrate_deploy::{
    config::{Config, NamedAccounts, Role},
    sequencer::deploy_migration,
    store::DeploymentStore,
    stylus::StylusContext,
};
use tracing_subscriber::EnvFilter;

/// Deploys the ticket migration contract, deploying mocks for every
/// dependency the network does not configure.
#[derive(Parser, Debug)]
#[command(name = "deploy", version, about)]
struct Cli {
    /// Network of the configuration file to deploy to.
    #[arg(long, default_value = "localhost")]
    network: String,

    /// Path to the network configuration.
    #[arg(long, default_value = "network.toml")]
    config: PathBuf,

    /// Directory deployments are recorded in, one subdirectory per network.
    #[arg(long, default_value = "deployments")]
    deployments: PathBuf,

    /// Key of the deploying account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let network = config.network(&cli.network)?.clone();
    let usdc_decimals = network.usdc_decimals;

    let signer: PrivateKeySigner =
        cli.private_key.parse().wrap_err("invalid PRIVATE_KEY")?;
    let named_accounts =
        NamedAccounts::resolve(&config, network.chain_id, &[signer.address()])?;
    let store = DeploymentStore::open(cli.deployments.join(&cli.network))?;

    let root = cli.config.parent().unwrap_or(Path::new("."));
    let mut ctx = StylusContext::connect(
        network,
        &config.build,
        root,
        cli.private_key,
        signer.address(),
        named_accounts,
        store,
    )
    .await?;

    let addresses = deploy_migration(&mut ctx, usdc_decimals).await?;

    for role in [
        Role::Deployer,
        Role::Erc1820Registry,
        Role::PoolDaiToken,
        Role::PoolUsdcToken,
        Role::PoolDaiPod,
        Role::PoolUsdcPod,
        Role::V3Token,
    ] {
        println!("{role:>16}: {}", addresses.get(role));
    }
    println!("{:>16}: {}", "migration", addresses.migration);

    Ok(())
}
