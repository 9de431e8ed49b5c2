//! End-to-end test helpers: funded accounts, contract deployment and
//! assertions on receipts and reverts.
mod account;
mod deploy;
mod error;
mod event;
mod system;

pub use account::Account;
pub use deploy::{Deployer, DeploymentReceipt};
pub use e2e_proc::test;
pub use error::Revert;
pub use event::EventExt;
pub use system::Wallet;

/// Sends a transaction and returns its pending handle.
#[macro_export]
macro_rules! send {
    ($e:expr) => {
        $e.send().await
    };
}

/// Sends a transaction and waits until it is mined, returning its hash.
#[macro_export]
macro_rules! watch {
    ($e:expr) => {
        $e.send().await?.watch().await
    };
}

/// Sends a transaction and returns its receipt once mined.
#[macro_export]
macro_rules! receipt {
    ($e:expr) => {
        $e.send().await?.get_receipt().await
    };
}
