//! Deployment through `cargo stylus deploy`.
use std::{
    path::{Path, PathBuf},
    process::Output,
    str::FromStr,
};

use alloy::{
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder},
    transports::http::reqwest::Url,
};
use eyre::{bail, ensure, Context, ContextCompat};
use regex::Regex;
use tokio::process::Command;

use crate::{
    config::{BuildConfig, NamedAccounts, NetworkConfig},
    context::{ConstructorArg, ContractKind, Deployed, DeploymentContext},
    store::DeploymentStore,
};

/// One invocation of `cargo stylus deploy`.
#[derive(Clone, Debug)]
pub struct StylusDeploy {
    rpc_url: String,
    private_key: String,
    crate_dir: Option<PathBuf>,
    deployer_address: Option<Address>,
    constructor_args: Vec<String>,
    no_verify: bool,
}

impl StylusDeploy {
    /// Deploys the crate in the current directory to `rpc_url`, signing with
    /// `private_key`.
    #[must_use]
    pub fn new(rpc_url: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            private_key: private_key.into(),
            crate_dir: None,
            deployer_address: None,
            constructor_args: Vec::new(),
            no_verify: true,
        }
    }

    /// Deploys the crate in `dir` instead of the current directory.
    #[must_use]
    pub fn in_crate(mut self, dir: impl Into<PathBuf>) -> Self {
        self.crate_dir = Some(dir.into());
        self
    }

    /// Runs the constructor with `args` through the StylusDeployer at
    /// `deployer`.
    #[must_use]
    pub fn with_constructor(mut self, deployer: Address, args: Vec<String>) -> Self {
        self.deployer_address = Some(deployer);
        self.constructor_args = args;
        self
    }

    /// Toggles `--no-verify`.
    #[must_use]
    pub fn no_verify(mut self, no_verify: bool) -> Self {
        self.no_verify = no_verify;
        self
    }

    /// Arguments passed to `cargo`.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "stylus".into(),
            "deploy".into(),
            "-e".into(),
            self.rpc_url.clone(),
            "--private-key".into(),
            self.private_key.clone(),
        ];
        if self.no_verify {
            args.push("--no-verify".into());
        }
        if let Some(deployer) = self.deployer_address {
            args.push("--experimental-deployer-address".into());
            args.push(deployer.to_string());
            args.push("--experimental-constructor-args".into());
            args.extend(self.constructor_args.iter().cloned());
        }
        args
    }

    /// Runs the deployment.
    ///
    /// # Errors
    ///
    /// If `cargo stylus` cannot be run, exits with an error, or its output
    /// does not name the deployed contract.
    pub async fn run(&self) -> eyre::Result<Deployed> {
        let mut command = Command::new("cargo");
        command.args(self.args());
        if let Some(dir) = &self.crate_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .context("failed to execute `cargo stylus deploy` command")?;
        check_status(&output)?;

        parse_deploy_output(&String::from_utf8_lossy(&output.stdout))
    }
}

fn check_status(output: &Output) -> eyre::Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("deployment failed: {stderr}");
    }
    Ok(())
}

/// Extracts the transaction hash and contract address printed by
/// `cargo stylus deploy`.
///
/// # Errors
///
/// If either value is missing from `stdout`.
pub fn parse_deploy_output(stdout: &str) -> eyre::Result<Deployed> {
    // The pattern matches the contract address that is preceded by ANSI
    // escape codes (`cargo stylus deploy` outputs colored text).
    let contract_addr_regex = Regex::new(
        r"deployed code at address:\s*(?:\x1B\[[0-9;]*[a-zA-Z])*(0x[a-fA-F0-9]{40})",
    )
    .context("failed to create contract addr regex")?;
    let tx_hash_regex = Regex::new(r"0x[a-fA-F0-9]{64}")
        .context("failed to create tx hash regex")?;

    let contract_addr = contract_addr_regex
        .captures(stdout)
        .and_then(|cap| cap.get(1))
        .context(format!("no contract address found in output {stdout}"))?
        .as_str();
    let address = Address::from_str(contract_addr).context(format!(
        "failed to parse contract address from string: {contract_addr}"
    ))?;

    let tx_hash = tx_hash_regex
        .find(stdout)
        .map(|m| TxHash::from_str(m.as_str()))
        .transpose()
        .context("failed to parse transaction hash")?;

    Ok(Deployed { address, tx_hash })
}

/// [`DeploymentContext`] deploying the crates under
/// [`BuildConfig::deployables`] to a Stylus node.
#[derive(Debug)]
pub struct StylusContext {
    network: NetworkConfig,
    deployables: PathBuf,
    no_verify: bool,
    private_key: String,
    signer: Address,
    named_accounts: NamedAccounts,
    store: DeploymentStore,
}

impl StylusContext {
    /// Connects to `network` and checks it serves the configured chain.
    ///
    /// `deployables` is resolved against `root`, the directory of the
    /// configuration file.
    ///
    /// # Errors
    ///
    /// If the node cannot be reached or reports another chain id.
    pub async fn connect(
        network: NetworkConfig,
        build: &BuildConfig,
        root: &Path,
        private_key: String,
        signer: Address,
        named_accounts: NamedAccounts,
        store: DeploymentStore,
    ) -> eyre::Result<Self> {
        let url: Url = network
            .url
            .parse()
            .wrap_err_with(|| format!("invalid RPC url {}", network.url))?;
        let chain_id = ProviderBuilder::new()
            .on_http(url)
            .get_chain_id()
            .await
            .wrap_err_with(|| format!("failed to reach {}", network.url))?;
        ensure!(
            chain_id == network.chain_id,
            "node at {} serves chain {chain_id}, expected {}",
            network.url,
            network.chain_id
        );

        Ok(Self {
            network,
            deployables: root.join(&build.deployables),
            no_verify: build.no_verify,
            private_key,
            signer,
            named_accounts,
            store,
        })
    }
}

impl DeploymentContext for StylusContext {
    fn chain_id(&self) -> u64 {
        self.network.chain_id
    }

    fn named_accounts(&self) -> &NamedAccounts {
        &self.named_accounts
    }

    fn store(&self) -> &DeploymentStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut DeploymentStore {
        &mut self.store
    }

    async fn deploy_contract(
        &mut self,
        contract: ContractKind,
        args: &[ConstructorArg],
        from: Address,
    ) -> eyre::Result<Deployed> {
        ensure!(
            self.signer == from,
            "no signer available for {from}"
        );

        let mut deploy =
            StylusDeploy::new(&self.network.url, &self.private_key)
                .in_crate(self.deployables.join(contract.crate_name()))
                .no_verify(self.no_verify);
        if !args.is_empty() {
            let deployer = self.network.stylus_deployer.context(
                "a StylusDeployer address is required to run constructors",
            )?;
            let args = args.iter().map(ToString::to_string).collect();
            deploy = deploy.with_constructor(deployer, args);
        }

        deploy.run().await
    }
}
