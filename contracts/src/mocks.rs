//! Mintable tokens standing in for the V3 ticket and for tokens stuck in the
//! migration contract.
use alloc::{vec, vec::Vec};

use alloy_primitives::{aliases::B32, Address, U256};
use openzeppelin_stylus::{
    token::{
        erc20::{self, Erc20, IErc20},
        erc721::{self, Erc721, IErc721},
    },
    utils::introspection::erc165::IErc165,
};
use stylus_sdk::{abi::Bytes, prelude::*};

/// ERC-20 token anyone can mint.
#[storage]
pub struct Erc20Mintable {
    /// Token state.
    pub erc20: Erc20,
}

unsafe impl TopLevelStorage for Erc20Mintable {}

#[public]
#[implements(IErc20<Error = erc20::Error>)]
impl Erc20Mintable {
    /// Creates `value` tokens for `to`.
    ///
    /// # Errors
    ///
    /// * [`erc20::Error::InvalidReceiver`] - If `to` is [`Address::ZERO`].
    pub fn mint(&mut self, to: Address, value: U256) -> Result<(), erc20::Error> {
        self.erc20._mint(to, value)
    }
}

#[public]
impl IErc20 for Erc20Mintable {
    type Error = erc20::Error;

    fn total_supply(&self) -> U256 {
        self.erc20.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.erc20.balance_of(account)
    }

    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.transfer(to, value)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.erc20.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.approve(spender, value)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.transfer_from(from, to, value)
    }
}

/// ERC-721 token anyone can mint.
#[storage]
pub struct Erc721Mintable {
    /// Token state.
    pub erc721: Erc721,
}

unsafe impl TopLevelStorage for Erc721Mintable {}

#[public]
#[implements(IErc721<Error = erc721::Error>, IErc165)]
impl Erc721Mintable {
    /// Creates token `token_id` for `to`.
    ///
    /// # Errors
    ///
    /// * [`erc721::Error::InvalidReceiver`] - If `to` is [`Address::ZERO`].
    /// * [`erc721::Error::InvalidSender`] - If `token_id` already exists.
    pub fn mint(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), erc721::Error> {
        self.erc721._mint(to, token_id)
    }
}

#[public]
impl IErc721 for Erc721Mintable {
    type Error = erc721::Error;

    fn balance_of(&self, owner: Address) -> Result<U256, Self::Error> {
        self.erc721.balance_of(owner)
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error> {
        self.erc721.owner_of(token_id)
    }

    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.safe_transfer_from(from, to, token_id)
    }

    #[selector(name = "safeTransferFrom")]
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Self::Error> {
        self.erc721.safe_transfer_from_with_data(from, to, token_id, data)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.transfer_from(from, to, token_id)
    }

    fn approve(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.approve(to, token_id)
    }

    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Self::Error> {
        self.erc721.set_approval_for_all(operator, approved)
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error> {
        self.erc721.get_approved(token_id)
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.erc721.is_approved_for_all(owner, operator)
    }
}

#[public]
impl IErc165 for Erc721Mintable {
    fn supports_interface(&self, interface_id: B32) -> bool {
        self.erc721.supports_interface(interface_id)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address, U256};
    use motsu::prelude::*;

    use super::*;

    #[motsu::test]
    fn mints_erc20(contract: Contract<Erc20Mintable>, alice: Address) {
        let value = uint!(10_000_U256);
        contract.sender(alice).mint(alice, value).motsu_unwrap();

        assert_eq!(contract.sender(alice).balance_of(alice), value);
        assert_eq!(contract.sender(alice).total_supply(), value);
        contract.assert_emitted(&erc20::Transfer {
            from: Address::ZERO,
            to: alice,
            value,
        });
    }

    #[motsu::test]
    fn mints_erc721(
        contract: Contract<Erc721Mintable>,
        alice: Address,
        bob: Address,
    ) {
        let token_id = U256::from(1);
        contract.sender(alice).mint(bob, token_id).motsu_unwrap();

        assert_eq!(contract.sender(alice).owner_of(token_id).motsu_unwrap(), bob);

        let err = contract.sender(alice).mint(alice, token_id).motsu_unwrap_err();
        assert!(matches!(
            err,
            erc721::Error::InvalidSender(erc721::ERC721InvalidSender { sender })
                if sender.is_zero()
        ));
    }
}
