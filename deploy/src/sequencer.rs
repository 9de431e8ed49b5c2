//! Dependency-ordered deployment of the migration contract.
use alloy::primitives::Address;

use crate::{
    config::Role,
    context::{ConstructorArg, ContractKind, DeployOptions, DeploymentContext},
};

/// Decimals of every mock ticket and of the mock pods' collateral.
pub const MOCK_DECIMALS: u8 = 18;

/// Name the bootstrapped ERC-1820 registry is recorded under.
pub const REGISTRY_DEPLOYMENT: &str = "ERC1820Registry";

/// Name the migration contract is recorded under.
pub const MIGRATION_DEPLOYMENT: &str = "MigrateV2ToV3";

/// Constructor arguments of a fallback mock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackArgs {
    /// No constructor.
    None,
    /// The ERC-1820 registry hooks are looked up in.
    Registry,
}

/// Mock deployed for a role with no configured address.
#[derive(Clone, Copy, Debug)]
pub struct Fallback {
    /// Role the mock stands in for.
    pub role: Role,
    /// Name the mock is recorded under.
    pub name: &'static str,
    /// Mock to deploy.
    pub contract: ContractKind,
    /// Constructor arguments of the mock.
    pub args: FallbackArgs,
}

/// Fallbacks of every migration dependency, in deployment order.
pub const FALLBACKS: [Fallback; 5] = [
    Fallback {
        role: Role::PoolDaiToken,
        name: "PoolDaiToken",
        contract: ContractKind::Erc777Mintable,
        args: FallbackArgs::Registry,
    },
    Fallback {
        role: Role::PoolUsdcToken,
        name: "PoolUsdcToken",
        contract: ContractKind::Erc777Mintable,
        args: FallbackArgs::Registry,
    },
    Fallback {
        role: Role::PoolDaiPod,
        name: "PoolDaiPod",
        contract: ContractKind::MockPod,
        args: FallbackArgs::Registry,
    },
    Fallback {
        role: Role::PoolUsdcPod,
        name: "PoolUsdcPod",
        contract: ContractKind::MockPod,
        args: FallbackArgs::Registry,
    },
    Fallback {
        role: Role::V3Token,
        name: "V3Token",
        contract: ContractKind::Erc20Mintable,
        args: FallbackArgs::None,
    },
];

/// Addresses wired into a deployed migration contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MigrationAddresses {
    pub deployer: Address,
    pub registry: Address,
    pub pool_dai_token: Address,
    pub pool_usdc_token: Address,
    pub pool_dai_pod: Address,
    pub pool_usdc_pod: Address,
    pub v3_token: Address,
    /// The migration contract itself.
    pub migration: Address,
}

impl MigrationAddresses {
    /// Address resolved for `role`.
    #[must_use]
    pub fn get(&self, role: Role) -> Address {
        match role {
            Role::Deployer => self.deployer,
            Role::Erc1820Registry => self.registry,
            Role::PoolDaiToken => self.pool_dai_token,
            Role::PoolUsdcToken => self.pool_usdc_token,
            Role::PoolDaiPod => self.pool_dai_pod,
            Role::PoolUsdcPod => self.pool_usdc_pod,
            Role::V3Token => self.v3_token,
        }
    }
}

/// Resolves every dependency of the migration contract, deploying mocks for
/// the unconfigured ones, then deploys the migration contract.
///
/// `usdc_decimals` is the precision of Pool Usdc amounts and of the Usdc
/// pod's collateral value, fixed in the migration contract at construction.
/// Mock sources carry [`MOCK_DECIMALS`].
///
/// Every deployment skips names already recorded in the context's store, so
/// rerunning against the same store deploys nothing. Records made before a
/// failure are kept.
///
/// # Errors
///
/// If the deployer is not configured or a deployment fails.
pub async fn deploy_migration(
    ctx: &mut impl DeploymentContext,
    usdc_decimals: u8,
) -> eyre::Result<MigrationAddresses> {
    let deployer = ctx.named_accounts().require(Role::Deployer)?;
    tracing::info!(
        chain_id = ctx.chain_id(),
        %deployer,
        usdc_decimals,
        "deploying migration"
    );

    let registry = match ctx.named_accounts().get(Role::Erc1820Registry) {
        Some(registry) => registry,
        None => {
            ctx.deploy(
                REGISTRY_DEPLOYMENT,
                DeployOptions {
                    contract: ContractKind::Erc1820Registry,
                    args: vec![],
                    from: deployer,
                    skip_if_already_deployed: true,
                },
            )
            .await?
            .address
        }
    };

    let mut resolved = [Address::ZERO; FALLBACKS.len()];
    for (slot, fallback) in resolved.iter_mut().zip(FALLBACKS) {
        *slot = match ctx.named_accounts().get(fallback.role) {
            Some(address) => address,
            None => {
                let args = match fallback.args {
                    FallbackArgs::None => vec![],
                    FallbackArgs::Registry => vec![ConstructorArg::Address(registry)],
                };
                ctx.deploy(
                    fallback.name,
                    DeployOptions {
                        contract: fallback.contract,
                        args,
                        from: deployer,
                        skip_if_already_deployed: true,
                    },
                )
                .await?
                .address
            }
        };
    }
    let [pool_dai_token, pool_usdc_token, pool_dai_pod, pool_usdc_pod, v3_token] =
        resolved;

    let migration = ctx
        .deploy(
            MIGRATION_DEPLOYMENT,
            DeployOptions {
                contract: ContractKind::MigrateV2ToV3,
                args: vec![
                    pool_dai_token.into(),
                    pool_usdc_token.into(),
                    pool_dai_pod.into(),
                    pool_usdc_pod.into(),
                    v3_token.into(),
                    usdc_decimals.into(),
                    registry.into(),
                    deployer.into(),
                ],
                from: deployer,
                skip_if_already_deployed: true,
            },
        )
        .await?
        .address;

    Ok(MigrationAddresses {
        deployer,
        registry,
        pool_dai_token,
        pool_usdc_token,
        pool_dai_pod,
        pool_usdc_pod,
        v3_token,
        migration,
    })
}
