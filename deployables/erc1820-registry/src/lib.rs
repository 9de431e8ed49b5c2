#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::{Address, B256},
    prelude::*,
};
use v3_migration::registry::{self, IErc1820Registry};

#[entrypoint]
#[storage]
struct Erc1820Registry {
    registry: registry::Erc1820Registry,
}

#[public]
#[implements(IErc1820Registry<Error = registry::Error>)]
impl Erc1820Registry {}

#[public]
impl IErc1820Registry for Erc1820Registry {
    type Error = registry::Error;

    fn get_interface_implementer(
        &self,
        account: Address,
        interface_hash: B256,
    ) -> Address {
        self.registry.get_interface_implementer(account, interface_hash)
    }

    fn set_interface_implementer(
        &mut self,
        account: Address,
        interface_hash: B256,
        implementer: Address,
    ) -> Result<(), Self::Error> {
        self.registry.set_interface_implementer(
            account,
            interface_hash,
            implementer,
        )
    }

    fn get_manager(&self, account: Address) -> Address {
        self.registry.get_manager(account)
    }

    fn set_manager(
        &mut self,
        account: Address,
        new_manager: Address,
    ) -> Result<(), Self::Error> {
        self.registry.set_manager(account, new_manager)
    }
}
