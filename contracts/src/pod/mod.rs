//! Pods: pooled ticket positions whose shares are hook tokens.
//!
//! A pod share is worth a varying amount of the pod's collateral. Migrating a
//! pod share pays V3 tickets for that collateral value rather than for the
//! share count.
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
use stylus_sdk::{abi::Bytes, prelude::*, storage::StorageU256};

use crate::token::erc777::{Erc777, IErc777};

pub mod abi;

/// Interface of a pod.
pub trait IPod {
    /// Returns the collateral value of `tokens` pod shares.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `tokens` - Number of pod shares.
    #[must_use]
    fn token_to_collateral_value(&self, tokens: U256) -> U256;

    /// Returns the collateral value of the shares held by `user`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `user` - Account to query.
    #[must_use]
    fn balance_of_underlying(&self, user: Address) -> U256;
}

/// Pod whose collateral value is declared up front: every conversion returns
/// the configured [`MockPod::value`], whatever the number of shares.
#[storage]
pub struct MockPod {
    /// Pod shares.
    pub erc777: Erc777,
    /// Declared collateral value.
    pub(crate) value: StorageU256,
}

unsafe impl TopLevelStorage for MockPod {}

#[public]
#[implements(IErc777, IPod)]
impl MockPod {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `registry` - ERC-1820 registry consulted for recipient hooks.
    #[constructor]
    pub fn constructor(&mut self, registry: Address) {
        self.erc777.constructor(registry);
    }

    /// Returns the declared collateral value.
    pub fn value(&self) -> U256 {
        self.value.get()
    }

    /// Declares the collateral value reported by every conversion.
    pub fn set_value(&mut self, value: U256) {
        self.value.set(value);
    }

    /// Creates `amount` shares for `to`.
    ///
    /// # Errors
    ///
    /// * [`openzeppelin_stylus::token::erc20::ERC20InvalidReceiver`] - If
    ///   `to` is [`Address::ZERO`].
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        self.erc777._mint(to, amount)
    }
}

#[public]
impl IErc777 for MockPod {
    fn decimals(&self) -> u8 {
        self.erc777.decimals()
    }

    fn granularity(&self) -> U256 {
        self.erc777.granularity()
    }

    fn total_supply(&self) -> U256 {
        self.erc777.total_supply()
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.erc777.balance_of(owner)
    }

    fn registry(&self) -> Address {
        self.erc777.registry()
    }

    fn send(
        &mut self,
        recipient: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.erc777.send(recipient, amount, data)
    }

    fn transfer(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<bool, Vec<u8>> {
        self.erc777.transfer(recipient, amount)
    }
}

#[public]
impl IPod for MockPod {
    fn token_to_collateral_value(&self, _tokens: U256) -> U256 {
        self.value.get()
    }

    fn balance_of_underlying(&self, _user: Address) -> U256 {
        self.value.get()
    }
}
