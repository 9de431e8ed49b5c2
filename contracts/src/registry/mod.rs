//! Minimal ERC-1820 pseudo-introspection registry.
//!
//! Accounts (or their managers) register which contract implements a given
//! interface on their behalf. Hook tokens look up the
//! [`TOKENS_RECIPIENT_INTERFACE_HASH`] implementer of a recipient before
//! notifying it of incoming tokens.
//!
//! Only the parts of [ERC-1820] observed by hook tokens are implemented:
//! there is no ERC-165 cache and implementers are not asked to acknowledge
//! their registration.
//!
//! [ERC-1820]: https://eips.ethereum.org/EIPS/eip-1820
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, B256};
pub use sol::*;
use stylus_sdk::{
    call::MethodError,
    evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageMap},
};

pub mod abi;

/// Interface hash under which hook token recipients are registered,
/// `keccak256("ERC777TokensRecipient")`.
pub const TOKENS_RECIPIENT_INTERFACE_HASH: B256 = B256::new(
    keccak_const::Keccak256::new().update(b"ERC777TokensRecipient").finalize(),
);

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `implementer` is registered for `interface_hash` on
        /// behalf of `account`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event InterfaceImplementerSet(
            address indexed account,
            bytes32 indexed interface_hash,
            address indexed implementer
        );

        /// Emitted when the manager of `account` changes.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event ManagerChanged(address indexed account, address indexed new_manager);
    }

    sol! {
        /// The `caller` is not the manager of `account`.
        ///
        /// * `account` - Account whose registrations were being changed.
        /// * `caller` - Account that attempted the change.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1820NotManager(address account, address caller);
    }
}

/// An error that occurred in the implementation of an [`Erc1820Registry`].
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The caller is not the manager of the account.
    NotManager(ERC1820NotManager),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`Erc1820Registry`] contract.
#[storage]
pub struct Erc1820Registry {
    /// Maps accounts to a mapping of interface hashes to implementers.
    pub(crate) interfaces: StorageMap<Address, StorageMap<B256, StorageAddress>>,
    /// Maps accounts to their managers. Unset means self-managed.
    pub(crate) managers: StorageMap<Address, StorageAddress>,
}

/// Interface of an [`Erc1820Registry`] contract.
pub trait IErc1820Registry {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the implementer of `interface_hash` for `account`, or
    /// [`Address::ZERO`] when none is registered.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `account` - Queried account. [`Address::ZERO`] means the caller.
    /// * `interface_hash` - Keccak-256 hash of the interface name.
    #[must_use]
    fn get_interface_implementer(
        &self,
        account: Address,
        interface_hash: B256,
    ) -> Address;

    /// Registers `implementer` for `interface_hash` on behalf of `account`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `account` - Account to register for. [`Address::ZERO`] means the
    ///   caller.
    /// * `interface_hash` - Keccak-256 hash of the interface name.
    /// * `implementer` - Contract implementing the interface for `account`.
    ///
    /// # Errors
    ///
    /// * [`Error::NotManager`] - If the caller is not the manager of
    ///   `account`.
    ///
    /// # Events
    ///
    /// * [`InterfaceImplementerSet`].
    fn set_interface_implementer(
        &mut self,
        account: Address,
        interface_hash: B256,
        implementer: Address,
    ) -> Result<(), Self::Error>;

    /// Returns the manager of `account`. Accounts manage themselves until a
    /// manager is set.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `account` - Queried account.
    #[must_use]
    fn get_manager(&self, account: Address) -> Address;

    /// Hands the management of `account` over to `new_manager`. Setting
    /// [`Address::ZERO`] or `account` itself resets it to self-management.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `account` - Account whose manager changes.
    /// * `new_manager` - The next manager of `account`.
    ///
    /// # Errors
    ///
    /// * [`Error::NotManager`] - If the caller is not the current manager of
    ///   `account`.
    ///
    /// # Events
    ///
    /// * [`ManagerChanged`].
    fn set_manager(
        &mut self,
        account: Address,
        new_manager: Address,
    ) -> Result<(), Self::Error>;
}

#[public]
#[implements(IErc1820Registry<Error = Error>)]
impl Erc1820Registry {}

#[public]
impl IErc1820Registry for Erc1820Registry {
    type Error = Error;

    fn get_interface_implementer(
        &self,
        account: Address,
        interface_hash: B256,
    ) -> Address {
        let account = if account.is_zero() { msg::sender() } else { account };
        self.interfaces.getter(account).get(interface_hash)
    }

    fn set_interface_implementer(
        &mut self,
        account: Address,
        interface_hash: B256,
        implementer: Address,
    ) -> Result<(), Self::Error> {
        let account = if account.is_zero() { msg::sender() } else { account };
        self.only_manager(account)?;

        self.interfaces.setter(account).setter(interface_hash).set(implementer);
        evm::log(InterfaceImplementerSet {
            account,
            interface_hash,
            implementer,
        });

        Ok(())
    }

    fn get_manager(&self, account: Address) -> Address {
        let manager = self.managers.get(account);
        if manager.is_zero() {
            account
        } else {
            manager
        }
    }

    fn set_manager(
        &mut self,
        account: Address,
        new_manager: Address,
    ) -> Result<(), Self::Error> {
        self.only_manager(account)?;

        let stored =
            if new_manager == account { Address::ZERO } else { new_manager };
        self.managers.setter(account).set(stored);

        let new_manager =
            if new_manager.is_zero() { account } else { new_manager };
        evm::log(ManagerChanged { account, new_manager });

        Ok(())
    }
}

impl Erc1820Registry {
    /// Checks that [`msg::sender`] manages `account`.
    fn only_manager(&self, account: Address) -> Result<(), Error> {
        let caller = msg::sender();
        if self.get_manager(account) != caller {
            return Err(Error::NotManager(ERC1820NotManager { account, caller }));
        }
        Ok(())
    }
}
