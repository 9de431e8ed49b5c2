#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use openzeppelin_stylus::access::ownable::IOwnable;
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, U256},
    prelude::*,
};
use v3_migration::{
    migration::{self, IMigrateV2ToV3},
    token::erc777::IErc777Recipient,
};

#[entrypoint]
#[storage]
struct MigrateV2ToV3 {
    migration: migration::MigrateV2ToV3,
}

#[public]
#[implements(IMigrateV2ToV3<Error = migration::Error>, IErc777Recipient, IOwnable)]
impl MigrateV2ToV3 {
    #[constructor]
    #[allow(clippy::too_many_arguments)]
    pub fn constructor(
        &mut self,
        pool_dai_token: Address,
        pool_usdc_token: Address,
        pool_dai_pod: Address,
        pool_usdc_pod: Address,
        v3_token: Address,
        usdc_decimals: u8,
        registry: Address,
        initial_owner: Address,
    ) -> Result<(), migration::Error> {
        self.migration.constructor(
            pool_dai_token,
            pool_usdc_token,
            pool_dai_pod,
            pool_usdc_pod,
            v3_token,
            usdc_decimals,
            registry,
            initial_owner,
        )
    }
}

#[public]
impl IMigrateV2ToV3 for MigrateV2ToV3 {
    type Error = migration::Error;

    fn pool_dai_token(&self) -> Address {
        self.migration.pool_dai_token()
    }

    fn pool_usdc_token(&self) -> Address {
        self.migration.pool_usdc_token()
    }

    fn pool_dai_pod(&self) -> Address {
        self.migration.pool_dai_pod()
    }

    fn pool_usdc_pod(&self) -> Address {
        self.migration.pool_usdc_pod()
    }

    fn v3_token(&self) -> Address {
        self.migration.v3_token()
    }

    #[selector(name = "withdrawERC777")]
    fn withdraw_erc777(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.migration.withdraw_erc777(token, to)
    }

    #[selector(name = "withdrawERC20")]
    fn withdraw_erc20(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.migration.withdraw_erc20(token, to)
    }

    #[selector(name = "withdrawERC20Batch")]
    fn withdraw_erc20_batch(
        &mut self,
        tokens: Vec<Address>,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.migration.withdraw_erc20_batch(tokens, to)
    }

    #[selector(name = "withdrawERC721")]
    fn withdraw_erc721(
        &mut self,
        token: Address,
        token_id: U256,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.migration.withdraw_erc721(token, token_id, to)
    }
}

#[public]
impl IErc777Recipient for MigrateV2ToV3 {
    fn tokens_received(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_data: Bytes,
        operator_data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.migration.tokens_received(
            operator,
            from,
            to,
            amount,
            user_data,
            operator_data,
        )
    }
}

#[public]
impl IOwnable for MigrateV2ToV3 {
    fn owner(&self) -> Address {
        self.migration.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Vec<u8>> {
        self.migration.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), Vec<u8>> {
        self.migration.renounce_ownership()
    }
}
