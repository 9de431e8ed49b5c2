//! `network.toml`: build settings, networks and named accounts.
use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use serde::Deserialize;
use thiserror::Error;

/// Key of the named-account entry used when no chain-specific entry exists.
pub const DEFAULT_ENTRY: &str = "default";

/// Errors raised while loading or resolving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file cannot be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The requested network has no `[networks.<name>]` section.
    #[error("network `{0}` is not configured")]
    UnknownNetwork(String),
    /// A named account points past the end of the signers.
    #[error("signer index {index} of `{role}` is out of range ({signers} signers available)")]
    #[allow(missing_docs)]
    SignerOutOfRange { role: Role, index: usize, signers: usize },
    /// A required role is not configured.
    #[error("named account `{0}` is required but not configured")]
    MissingAccount(Role),
}

/// Logical roles an address can be wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Account deploying every contract and owning the migration contract.
    Deployer,
    /// Pool Dai ticket.
    PoolDaiToken,
    /// Pool Usdc ticket.
    PoolUsdcToken,
    /// Pool Dai pod.
    PoolDaiPod,
    /// Pool Usdc pod.
    PoolUsdcPod,
    /// V3 ticket paid out by the migration.
    V3Token,
    /// ERC-1820 interface registry.
    Erc1820Registry,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Deployer => "deployer",
            Role::PoolDaiToken => "pool_dai_token",
            Role::PoolUsdcToken => "pool_usdc_token",
            Role::PoolDaiPod => "pool_dai_pod",
            Role::PoolUsdcPod => "pool_usdc_pod",
            Role::V3Token => "v3_token",
            Role::Erc1820Registry => "erc1820_registry",
        };
        f.pad(name)
    }
}

/// A named-account entry: a literal address or an index into the signers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AccountEntry {
    /// Index into the signers.
    Signer(usize),
    /// Literal address.
    Address(Address),
}

/// `[build]` section.
#[derive(Clone, Debug, Deserialize)]
pub struct BuildConfig {
    /// Directory holding one deployable crate per contract kind, relative to
    /// the configuration file.
    #[serde(default = "BuildConfig::default_deployables")]
    pub deployables: PathBuf,
    /// Skip the `cargo stylus` verification of the deployed wasm.
    #[serde(default = "BuildConfig::default_no_verify")]
    pub no_verify: bool,
}

impl BuildConfig {
    fn default_deployables() -> PathBuf {
        PathBuf::from("deployables")
    }

    fn default_no_verify() -> bool {
        true
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            deployables: Self::default_deployables(),
            no_verify: Self::default_no_verify(),
        }
    }
}

/// `[networks.<name>]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint.
    pub url: String,
    /// Chain id named accounts are resolved against.
    pub chain_id: u64,
    /// Address of the StylusDeployer contract used for contracts with a
    /// constructor.
    #[serde(default)]
    pub stylus_deployer: Option<Address>,
    /// Decimals of Pool Usdc amounts and of the Usdc pod's collateral value.
    #[serde(default = "NetworkConfig::default_usdc_decimals")]
    pub usdc_decimals: u8,
}

impl NetworkConfig {
    fn default_usdc_decimals() -> u8 {
        18
    }
}

/// Parsed `network.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// `[build]` section.
    #[serde(default)]
    pub build: BuildConfig,
    /// Networks by name.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Role to entries keyed by chain id or [`DEFAULT_ENTRY`].
    #[serde(default)]
    pub named_accounts: BTreeMap<Role, BTreeMap<String, AccountEntry>>,
}

impl Config {
    /// Loads the configuration at `path`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Io`] - If the file cannot be read.
    /// * [`ConfigError::Parse`] - If the file is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Io { path: path.to_path_buf(), source }
        })?;
        raw.parse()
    }

    /// Returns the network called `name`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::UnknownNetwork`] - If no such network is configured.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Named accounts resolved for one chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedAccounts {
    accounts: BTreeMap<Role, Address>,
}

impl NamedAccounts {
    /// Resolves every role of `config` for `chain_id`.
    ///
    /// A chain-specific entry wins over the [`DEFAULT_ENTRY`]; a role with
    /// neither stays absent.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::SignerOutOfRange`] - If an entry points past the end
    ///   of `signers`.
    pub fn resolve(
        config: &Config,
        chain_id: u64,
        signers: &[Address],
    ) -> Result<Self, ConfigError> {
        let chain_key = chain_id.to_string();
        let mut accounts = BTreeMap::new();

        for (&role, entries) in &config.named_accounts {
            let Some(entry) =
                entries.get(&chain_key).or_else(|| entries.get(DEFAULT_ENTRY))
            else {
                continue;
            };

            let address = match *entry {
                AccountEntry::Address(address) => address,
                AccountEntry::Signer(index) => {
                    *signers.get(index).ok_or(ConfigError::SignerOutOfRange {
                        role,
                        index,
                        signers: signers.len(),
                    })?
                }
            };
            accounts.insert(role, address);
        }

        Ok(Self { accounts })
    }

    /// Returns the address of `role`, if configured.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<Address> {
        self.accounts.get(&role).copied()
    }

    /// Returns the address of `role`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::MissingAccount`] - If `role` is not configured.
    pub fn require(&self, role: Role) -> Result<Address, ConfigError> {
        self.get(role).ok_or(ConfigError::MissingAccount(role))
    }

    /// Sets `role` to `address`.
    #[must_use]
    pub fn with(mut self, role: Role, address: Address) -> Self {
        self.accounts.insert(role, address);
        self
    }
}
