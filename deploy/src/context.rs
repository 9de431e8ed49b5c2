//! Chain access used by the sequencer.
use std::fmt;

use alloy::primitives::{Address, TxHash};
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::{config::NamedAccounts, store::DeploymentStore};

/// Contracts the sequencer knows how to deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    /// Minimal ERC-1820 interface registry.
    Erc1820Registry,
    /// Hook token with a public `mint`.
    Erc777Mintable,
    /// Hook token with a declared collateral value.
    MockPod,
    /// ERC-20 with a public `mint`.
    Erc20Mintable,
    /// ERC-721 with a public `mint`.
    Erc721Mintable,
    /// The ticket migration contract.
    MigrateV2ToV3,
}

impl ContractKind {
    /// Name of the deployable crate implementing this contract.
    #[must_use]
    pub fn crate_name(self) -> &'static str {
        match self {
            ContractKind::Erc1820Registry => "erc1820-registry",
            ContractKind::Erc777Mintable => "erc777-mintable",
            ContractKind::MockPod => "mock-pod",
            ContractKind::Erc20Mintable => "erc20-mintable",
            ContractKind::Erc721Mintable => "erc721-mintable",
            ContractKind::MigrateV2ToV3 => "migrate-v2-to-v3",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One constructor argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstructorArg {
    /// An `address` parameter.
    Address(Address),
    /// An unsigned integer parameter of up to 64 bits.
    Uint(u64),
}

impl From<Address> for ConstructorArg {
    fn from(address: Address) -> Self {
        ConstructorArg::Address(address)
    }
}

impl From<u8> for ConstructorArg {
    fn from(value: u8) -> Self {
        ConstructorArg::Uint(value.into())
    }
}

impl fmt::Display for ConstructorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorArg::Address(address) => fmt::Display::fmt(address, f),
            ConstructorArg::Uint(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// What a raw deployment produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployed {
    /// Address of the new contract.
    pub address: Address,
    /// Hash of the deployment transaction, when known.
    pub tx_hash: Option<TxHash>,
}

/// A recorded deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Address of the deployed contract.
    pub address: Address,
    /// What was deployed.
    pub contract: ContractKind,
    /// Constructor arguments, in order.
    pub args: Vec<ConstructorArg>,
    /// Hash of the deployment transaction, when known.
    pub tx_hash: Option<TxHash>,
}

/// Options of [`DeploymentContext::deploy`].
#[derive(Clone, Debug)]
pub struct DeployOptions {
    /// Contract to deploy.
    pub contract: ContractKind,
    /// Constructor arguments, in order.
    pub args: Vec<ConstructorArg>,
    /// Deploying account.
    pub from: Address,
    /// Reuse the deployment already recorded under the same name, if any.
    pub skip_if_already_deployed: bool,
}

/// Everything the sequencer needs from the chain it deploys to.
#[allow(async_fn_in_trait)]
pub trait DeploymentContext {
    /// Chain id of the target network.
    fn chain_id(&self) -> u64;

    /// Named accounts resolved for [`DeploymentContext::chain_id`].
    fn named_accounts(&self) -> &NamedAccounts;

    /// Deployments made so far.
    fn store(&self) -> &DeploymentStore;

    /// Mutable access to the deployments made so far.
    fn store_mut(&mut self) -> &mut DeploymentStore;

    /// Deploys `contract` with constructor `args` on behalf of `from`,
    /// without consulting or updating the store.
    ///
    /// # Errors
    ///
    /// If the deployment fails.
    async fn deploy_contract(
        &mut self,
        contract: ContractKind,
        args: &[ConstructorArg],
        from: Address,
    ) -> eyre::Result<Deployed>;

    /// Deploys a contract and records it under `name`.
    ///
    /// With [`DeployOptions::skip_if_already_deployed`] set, an existing
    /// record under `name` is returned instead and nothing is deployed.
    ///
    /// # Errors
    ///
    /// If the deployment fails or cannot be recorded.
    async fn deploy(
        &mut self,
        name: &str,
        options: DeployOptions,
    ) -> eyre::Result<Deployment> {
        if options.skip_if_already_deployed {
            if let Some(existing) = self.store().get(name) {
                tracing::info!(
                    name,
                    address = %existing.address,
                    "reusing deployment"
                );
                return Ok(existing.clone());
            }
        }

        tracing::info!(name, contract = %options.contract, "deploying");
        let deployed = self
            .deploy_contract(options.contract, &options.args, options.from)
            .await
            .wrap_err_with(|| format!("failed to deploy {name}"))?;

        let deployment = Deployment {
            address: deployed.address,
            contract: options.contract,
            args: options.args,
            tx_hash: deployed.tx_hash,
        };
        self.store_mut().record(name, deployment.clone())?;
        tracing::info!(name, address = %deployment.address, "deployed");

        Ok(deployment)
    }
}
