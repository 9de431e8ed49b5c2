//! `fork-test`: migrates real ticket holders against forked mainnet state.
//!
//! Expects a node forking mainnet at `FORK_RPC_URL` that accepts
//! `hardhat_impersonateAccount`, and a migration contract already recorded in
//! `deployments/fork` by `deploy --network fork`.
use alloy::{
    network::TransactionBuilder,
    primitives::{address, uint, Address, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    sol,
    transports::http::reqwest::Url,
};
use eyre::{bail, ensure, ContextCompat, WrapErr};
use migrate_deploy::{
    config::{Config, NamedAccounts, Role},
    sequencer::MIGRATION_DEPLOYMENT,
    store::DeploymentStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FORK_RPC_URL: &str = "FORK_RPC_URL";
const DEFAULT_FORK_RPC_URL: &str = "http://127.0.0.1:8545";
const NETWORK: &str = "fork";

const V3_HOLDER: Address = address!("caacebe2fdac9d3783563b9b80c714df82705226");
const POOL_DAI_HOLDER: Address =
    address!("42e6746f6c76782ea0184bb5ab74dfec3d041391");
const POOL_USDC_HOLDER: Address =
    address!("57bba930e24d2b2c16202f586a8ea09f51bd218d");
const DAI_POD_HOLDER: Address =
    address!("8E347d882538db71D9Df856B1B139cdBAdf9e6A6");
const USDC_POD_HOLDER: Address =
    address!("dEAA2a690a4B34504658dab1c4d4a015D253040F");

/// Gas money sent to each legacy holder (0.5 ETH).
const GAS_MONEY: U256 = uint!(500_000_000_000_000_000_U256);
/// V3 paid per six-decimal ticket unit (0.000001 ether).
const USDC_RATIO: U256 = uint!(1_000_000_000_000_U256);

sol!(
    #[sol(rpc)]
    contract V3Ticket {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
    }
);

sol!(
    #[sol(rpc)]
    contract LegacyTicket {
        function balanceOf(address owner) external view returns (uint256);
        function balanceOfUnderlying(address user) external view returns (uint256);
        function send(address recipient, uint256 amount, bytes data) external;
    }
);

/// What the V3 payout of a leg is measured against.
#[derive(Clone, Copy, Debug)]
enum Basis {
    /// Ticket balance.
    Balance,
    /// Collateral value of the pod shares.
    Underlying,
}

/// One holder migrating its whole balance of one legacy ticket.
struct Leg {
    name: &'static str,
    role: Role,
    holder: Address,
    basis: Basis,
    ratio: U256,
}

const LEGS: [Leg; 4] = [
    Leg {
        name: "Pool Dai",
        role: Role::PoolDaiToken,
        holder: POOL_DAI_HOLDER,
        basis: Basis::Balance,
        ratio: U256::from_limbs([1, 0, 0, 0]),
    },
    Leg {
        name: "Pool Usdc",
        role: Role::PoolUsdcToken,
        holder: POOL_USDC_HOLDER,
        basis: Basis::Balance,
        ratio: USDC_RATIO,
    },
    Leg {
        name: "Dai Pod",
        role: Role::PoolDaiPod,
        holder: DAI_POD_HOLDER,
        basis: Basis::Underlying,
        ratio: U256::from_limbs([1, 0, 0, 0]),
    },
    Leg {
        name: "Usdc Pod",
        role: Role::PoolUsdcPod,
        holder: USDC_POD_HOLDER,
        basis: Basis::Underlying,
        ratio: USDC_RATIO,
    },
];

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let url: Url = std::env::var(FORK_RPC_URL)
        .unwrap_or_else(|_| DEFAULT_FORK_RPC_URL.to_string())
        .parse()
        .wrap_err("invalid FORK_RPC_URL")?;
    let provider = ProviderBuilder::new().connect_http(url).erased();

    let config = Config::load("network.toml")?;
    let network = config.network(NETWORK)?;
    let signers = provider.get_accounts().await?;
    let accounts = NamedAccounts::resolve(&config, network.chain_id, &signers)?;

    let store = DeploymentStore::open(format!("deployments/{NETWORK}"))?;
    let migrate = store
        .get(MIGRATION_DEPLOYMENT)
        .with_context(|| {
            format!("no {MIGRATION_DEPLOYMENT} deployment, run `deploy --network {NETWORK}` first")
        })?
        .address;

    for holder in [V3_HOLDER, POOL_DAI_HOLDER, POOL_USDC_HOLDER, DAI_POD_HOLDER, USDC_POD_HOLDER] {
        provider
            .raw_request::<_, serde_json::Value>("hardhat_impersonateAccount".into(), (holder,))
            .await
            .wrap_err_with(|| format!("failed to impersonate {holder}"))?;
    }

    for leg in &LEGS {
        let tx = TransactionRequest::default()
            .with_from(V3_HOLDER)
            .with_to(leg.holder)
            .with_value(GAS_MONEY);
        provider.send_transaction(tx).await?.watch().await?;
    }

    let v3 = V3Ticket::new(accounts.require(Role::V3Token)?, provider.clone());
    let reserve = v3.balanceOf(V3_HOLDER).call().await?;
    info!("Transferring {reserve} V3 tickets...");
    let receipt =
        v3.transfer(migrate, reserve).from(V3_HOLDER).send().await?.get_receipt().await?;
    ensure!(receipt.status(), "V3 reserve transfer reverted");

    for leg in &LEGS {
        migrate_leg(&provider, &v3, &accounts, migrate, leg).await?;
    }

    info!("All tickets migrated");
    Ok(())
}

async fn migrate_leg(
    provider: &DynProvider,
    v3: &V3Ticket::V3TicketInstance<DynProvider>,
    accounts: &NamedAccounts,
    migrate: Address,
    leg: &Leg,
) -> eyre::Result<()> {
    info!("Converting {} tickets...", leg.name);

    let ticket = LegacyTicket::new(accounts.require(leg.role)?, provider.clone());
    let balance = ticket.balanceOf(leg.holder).call().await?;
    let basis = match leg.basis {
        Basis::Balance => balance,
        Basis::Underlying => ticket.balanceOfUnderlying(leg.holder).call().await?,
    };
    let v3_before = v3.balanceOf(leg.holder).call().await?;

    let receipt = ticket
        .send(migrate, balance, Bytes::new())
        .from(leg.holder)
        .send()
        .await?
        .get_receipt()
        .await?;
    if !receipt.status() {
        bail!("{} migration reverted in {}", leg.name, receipt.transaction_hash);
    }

    let left = ticket.balanceOf(leg.holder).call().await?;
    ensure!(left.is_zero(), "{} holder still has {left} tickets", leg.name);

    let received = v3.balanceOf(leg.holder).call().await?.saturating_sub(v3_before);
    let expected = basis * leg.ratio;
    ensure!(
        received == expected,
        "{} holder received {received} V3, expected {expected}",
        leg.name
    );

    Ok(())
}
