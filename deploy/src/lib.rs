//! Deployment of the ticket migration contracts.
//!
//! [`sequencer::deploy_migration`] resolves every dependency of the migration
//! contract, either from the named accounts in `network.toml` or by deploying
//! a mock, and then deploys the migration contract itself. Chain access goes
//! through a [`context::DeploymentContext`], so the sequencer runs unchanged
//! against a Stylus node ([`stylus::StylusContext`]) or an in-memory double.
pub mod config;
pub mod context;
pub mod sequencer;
pub mod store;
pub mod stylus;

pub use config::{Config, NamedAccounts, NetworkConfig, Role};
pub use context::{
    ContractKind, Deployed, DeployOptions, Deployment, DeploymentContext,
};
pub use sequencer::{deploy_migration, MigrationAddresses};
pub use store::DeploymentStore;
