#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, U256},
    prelude::*,
};
use v3_migration::{
    pod::{self, IPod},
    token::erc777::IErc777,
};

#[entrypoint]
#[storage]
struct MockPod {
    pod: pod::MockPod,
}

#[public]
#[implements(IErc777, IPod)]
impl MockPod {
    #[constructor]
    pub fn constructor(&mut self, registry: Address) {
        self.pod.constructor(registry);
    }

    fn value(&self) -> U256 {
        self.pod.value()
    }

    fn set_value(&mut self, value: U256) {
        self.pod.set_value(value);
    }

    fn mint(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        self.pod.mint(to, amount)
    }
}

#[public]
impl IErc777 for MockPod {
    fn decimals(&self) -> u8 {
        self.pod.decimals()
    }

    fn granularity(&self) -> U256 {
        self.pod.granularity()
    }

    fn total_supply(&self) -> U256 {
        self.pod.total_supply()
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.pod.balance_of(owner)
    }

    fn registry(&self) -> Address {
        self.pod.registry()
    }

    fn send(
        &mut self,
        recipient: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.pod.send(recipient, amount, data)
    }

    fn transfer(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<bool, Vec<u8>> {
        self.pod.transfer(recipient, amount)
    }
}

#[public]
impl IPod for MockPod {
    fn token_to_collateral_value(&self, tokens: U256) -> U256 {
        self.pod.token_to_collateral_value(tokens)
    }

    fn balance_of_underlying(&self, user: Address) -> U256 {
        self.pod.balance_of_underlying(user)
    }
}
