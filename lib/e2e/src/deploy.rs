use std::path::PathBuf;

use alloy::{
    primitives::Address, providers::Provider,
    rpc::types::TransactionReceipt,
};
use eyre::{Context, ContextCompat};
use migrate_deploy::stylus::StylusDeploy;

use crate::system::{env, Wallet, DEPLOYER_ADDRESS};

/// A deployed contract.
#[derive(Clone, Debug)]
pub struct DeploymentReceipt {
    /// Address of the deployed contract.
    pub contract_address: Address,
    /// Receipt of the deployment transaction.
    pub receipt: TransactionReceipt,
}

/// A basic smart contract deployer.
pub struct Deployer {
    rpc_url: String,
    private_key: String,
    wallet: Wallet,
    crate_dir: Option<PathBuf>,
    ctr_args: Option<Vec<String>>,
}

impl Deployer {
    pub(crate) fn new(rpc_url: String, private_key: String, wallet: Wallet) -> Self {
        Self { rpc_url, private_key, wallet, crate_dir: None, ctr_args: None }
    }

    /// Deploy the contract of the crate at `dir` instead of the current
    /// crate. Relative paths start at the current crate's manifest directory.
    #[must_use]
    pub fn in_crate(mut self, dir: impl Into<PathBuf>) -> Deployer {
        self.crate_dir = Some(dir.into());
        self
    }

    /// Add solidity constructor arguments to the deployer.
    #[must_use]
    pub fn with_constructor(mut self, ctr_args: Vec<String>) -> Deployer {
        self.ctr_args = Some(ctr_args);
        self
    }

    /// Deploy and activate the contract implemented as `#[entrypoint]` in the
    /// selected crate.
    /// Consumes currently configured deployer.
    ///
    /// # Errors
    ///
    /// May error if:
    ///
    /// - `DEPLOYER_ADDRESS` is unset while constructor arguments are given.
    /// - `cargo stylus deploy` fails.
    /// - The deployment receipt cannot be fetched.
    pub async fn deploy(self) -> eyre::Result<DeploymentReceipt> {
        let mut deploy = StylusDeploy::new(self.rpc_url, self.private_key);
        if let Some(dir) = self.crate_dir {
            deploy = deploy.in_crate(dir);
        }
        if let Some(ctr_args) = self.ctr_args {
            let deployer: Address = env(DEPLOYER_ADDRESS)?
                .parse()
                .wrap_err("invalid DEPLOYER_ADDRESS")?;
            deploy = deploy.with_constructor(deployer, ctr_args);
        }

        let deployed = deploy.run().await?;
        let tx_hash =
            deployed.tx_hash.context("no deployment transaction hash")?;
        let receipt = self
            .wallet
            .get_transaction_receipt(tx_hash)
            .await?
            .context("transaction receipt not found")?;

        Ok(DeploymentReceipt { contract_address: deployed.address, receipt })
    }
}
