#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use openzeppelin_stylus::token::erc20::{self, IErc20};
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
};
use v3_migration::mocks;

#[entrypoint]
#[storage]
struct Erc20Mintable {
    token: mocks::Erc20Mintable,
}

#[public]
#[implements(IErc20<Error = erc20::Error>)]
impl Erc20Mintable {
    fn mint(&mut self, to: Address, value: U256) -> Result<(), erc20::Error> {
        self.token.mint(to, value)
    }
}

#[public]
impl IErc20 for Erc20Mintable {
    type Error = erc20::Error;

    fn total_supply(&self) -> U256 {
        self.token.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.token.balance_of(account)
    }

    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.token.transfer(to, value)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.token.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.token.approve(spender, value)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.token.transfer_from(from, to, value)
    }
}
