use alloy::providers::DynProvider;
use eyre::Context;

/// Environment variable holding the devnet's JSON-RPC endpoint.
pub(crate) const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// Environment variable holding the address of the StylusDeployer contract.
pub(crate) const DEPLOYER_ADDRESS: &str = "DEPLOYER_ADDRESS";

/// Convenience type alias that represents an Ethereum wallet: a provider
/// signing every transaction with a test account's key.
pub type Wallet = DynProvider;

/// Load the `name` environment variable.
pub(crate) fn env(name: &str) -> eyre::Result<String> {
    std::env::var(name).wrap_err(format!("failed to load {name}"))
}
