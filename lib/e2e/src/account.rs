use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{uint, Address, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::Context;
use migrate_deploy::{
    config::{BuildConfig, NamedAccounts, NetworkConfig, Role},
    sequencer::MOCK_DECIMALS,
    store::DeploymentStore,
    stylus::StylusContext,
};
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    deploy::Deployer,
    system::{env, Wallet, DEPLOYER_ADDRESS, RPC_URL_ENV_VAR_NAME},
};

const MASTER_PRIVATE_KEY: &str =
    "0xb6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";
const DEFAULT_FUNDING_ETH: U256 = uint!(100_000_000_000_000_000_U256);

/// Type that corresponds to a test account.
#[derive(Clone, Debug)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
    /// The account's wallet -- an `alloy` provider signing with `signer`.
    pub wallet: Wallet,
    url: Url,
}

impl Account {
    /// Create a new account with a default funding of [`DEFAULT_FUNDING_ETH`].
    ///
    /// # Errors
    ///
    /// May fail if `RPC_URL` is not set or funding the newly created account
    /// fails.
    pub async fn new() -> eyre::Result<Self> {
        AccountFactory::create().await
    }

    /// Get a hex-encoded String representing this account's private key.
    #[must_use]
    pub fn pk(&self) -> String {
        alloy::hex::encode(self.signer.to_bytes())
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The rpc endpoint this account's provider is connected to.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Create a configurable smart contract deployer on behalf of this account.
    #[must_use]
    pub fn as_deployer(&self) -> Deployer {
        Deployer::new(self.url().to_string(), self.pk(), self.wallet.clone())
    }

    /// Create a deployment context that deploys the crates under
    /// `deployables` on behalf of this account, recording deployments in
    /// memory only. Relative paths start at the current crate's manifest
    /// directory.
    ///
    /// # Errors
    ///
    /// May fail if `DEPLOYER_ADDRESS` is unset or the node cannot be reached.
    pub async fn deployment_context(
        &self,
        deployables: impl Into<PathBuf>,
    ) -> eyre::Result<StylusContext> {
        let stylus_deployer: Address = env(DEPLOYER_ADDRESS)?
            .parse()
            .wrap_err("invalid DEPLOYER_ADDRESS")?;
        let network = NetworkConfig {
            url: self.url().to_string(),
            chain_id: self.wallet.get_chain_id().await?,
            stylus_deployer: Some(stylus_deployer),
            usdc_decimals: MOCK_DECIMALS,
        };
        let build = BuildConfig { deployables: deployables.into(), no_verify: true };
        let named_accounts =
            NamedAccounts::default().with(Role::Deployer, self.address());

        StylusContext::connect(
            network,
            &build,
            Path::new("."),
            self.pk(),
            self.address(),
            named_accounts,
            DeploymentStore::in_memory(),
        )
        .await
    }
}

fn connect(signer: PrivateKeySigner, url: Url) -> Wallet {
    ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url)
        .erased()
}

/// A unit struct used as a synchronization mechanism in
/// [`AccountFactory::lock`].
struct AccountFactory;

impl AccountFactory {
    /// Get access to the factory in a synchronized manner.
    async fn lock() -> MutexGuard<'static, Self> {
        /// Accounts get funded from a single master wallet, so account
        /// creation must be serialized to keep its nonce in order.
        static SYNC_ACCOUNT_FACTORY: Lazy<Mutex<AccountFactory>> =
            Lazy::new(|| Mutex::new(AccountFactory));

        SYNC_ACCOUNT_FACTORY.lock().await
    }

    /// Create a new account and fund it from the master wallet.
    async fn create() -> eyre::Result<Account> {
        let _lock = AccountFactory::lock().await;

        let signer = PrivateKeySigner::random();

        let url: Url = env(RPC_URL_ENV_VAR_NAME)?
            .parse()
            .wrap_err("failed to parse RPC_URL string into a URL")?;

        let master = PrivateKeySigner::from_str(MASTER_PRIVATE_KEY)
            .wrap_err("failed to create master signer")?;
        let master_wallet = connect(master.clone(), url.clone());

        let tx = TransactionRequest::default()
            .with_from(master.address())
            .with_to(signer.address())
            .with_value(DEFAULT_FUNDING_ETH);

        master_wallet
            .send_transaction(tx)
            .await?
            .watch()
            .await
            .wrap_err("account's wallet wasn't funded")?;

        let wallet = connect(signer.clone(), url.clone());
        Ok(Account { signer, wallet, url })
    }
}
