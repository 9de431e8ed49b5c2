#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, U256},
    prelude::*,
};
use v3_migration::token::erc777::{Erc777, IErc777};

#[entrypoint]
#[storage]
struct Erc777Mintable {
    erc777: Erc777,
}

#[public]
#[implements(IErc777)]
impl Erc777Mintable {
    #[constructor]
    pub fn constructor(&mut self, registry: Address) {
        self.erc777.constructor(registry);
    }

    fn mint(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        self.erc777._mint(to, amount)
    }
}

#[public]
impl IErc777 for Erc777Mintable {
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
