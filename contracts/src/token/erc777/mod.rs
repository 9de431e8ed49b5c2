//! Hook token in the style of [ERC-777].
//!
//! Balances are kept by an OpenZeppelin [`Erc20`], so plain transfers behave
//! exactly like ERC-20 ones and revert with the same [ERC-6093] errors. On top
//! of that, [`IErc777::send`] (and [`IErc777::transfer`]) notify the
//! recipient's registered `ERC777TokensRecipient` implementer, which may act on
//! the incoming tokens and revert the whole transfer.
//!
//! Only the receiving side of ERC-777 is implemented: there are no operators,
//! no `tokensToSend` hook and recipients are not required to register.
//!
//! [ERC-777]: https://eips.ethereum.org/EIPS/eip-777
//! [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolError;
use openzeppelin_stylus::token::erc20::{
    self, Erc20, ERC20InvalidReceiver, ERC20InvalidSender, IErc20,
};
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{self, Call},
    evm, msg,
    prelude::*,
    storage::StorageAddress,
};

use crate::{
    registry::{abi::Erc1820Interface, TOKENS_RECIPIENT_INTERFACE_HASH},
    token::erc777::abi::Erc777RecipientInterface,
};

pub mod abi;

/// Number of decimals of every hook token.
pub const DECIMALS: u8 = 18;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `operator` moves `amount` tokens from `from` to `to`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Sent(
            address indexed operator,
            address indexed from,
            address indexed to,
            uint256 amount,
            bytes data,
            bytes operator_data
        );

        /// Emitted when `operator` mints `amount` tokens to `to`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Minted(
            address indexed operator,
            address indexed to,
            uint256 amount,
            bytes data,
            bytes operator_data
        );
    }

    sol! {
        /// The interface registry could not be queried for a recipient's
        /// hook implementer.
        ///
        /// * `registry` - Address of the registry.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC777RegistryUnavailable(address registry);
    }
}

/// State of an [`Erc777`] token.
#[storage]
pub struct Erc777 {
    /// Balances and total supply.
    pub erc20: Erc20,
    /// ERC-1820 registry used to find recipient hooks.
    pub(crate) registry: StorageAddress,
}

unsafe impl TopLevelStorage for Erc777 {}

/// Interface of a hook token.
pub trait IErc777 {
    /// Returns the number of decimals used to display token amounts. Always
    /// [`DECIMALS`].
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn decimals(&self) -> u8;

    /// Returns the smallest part of the token that is not divisible.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn granularity(&self) -> U256;

    /// Returns the number of tokens in existence.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn total_supply(&self) -> U256;

    /// Returns the number of tokens owned by `owner`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account to query.
    #[must_use]
    fn balance_of(&self, owner: Address) -> U256;

    /// Returns the ERC-1820 registry consulted for recipient hooks.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn registry(&self) -> Address;

    /// Moves `amount` tokens from the caller to `recipient`, then notifies
    /// the recipient's hook implementer, if any.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `recipient` - Account receiving the tokens.
    /// * `amount` - Number of tokens to move.
    /// * `data` - Payload forwarded to the recipient's hook.
    ///
    /// # Errors
    ///
    /// * [`openzeppelin_stylus::token::erc20::ERC20InsufficientBalance`] - If
    ///   the caller holds fewer than `amount` tokens.
    /// * [`openzeppelin_stylus::token::erc20::ERC20InvalidReceiver`] - If
    ///   `recipient` is [`Address::ZERO`].
    /// * [`ERC777RegistryUnavailable`] - If the registry cannot be queried.
    /// * Any revert raised by the recipient's hook, unchanged.
    ///
    /// # Events
    ///
    /// * [`openzeppelin_stylus::token::erc20::Transfer`].
    /// * [`Sent`].
    fn send(
        &mut self,
        recipient: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<(), Vec<u8>>;

    /// Same as [`IErc777::send`] with an empty payload, returning `true` on
    /// success to remain usable as an ERC-20 token.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `recipient` - Account receiving the tokens.
    /// * `amount` - Number of tokens to move.
    ///
    /// # Errors
    ///
    /// See [`IErc777::send`].
    ///
    /// # Events
    ///
    /// * [`openzeppelin_stylus::token::erc20::Transfer`].
    /// * [`Sent`].
    fn transfer(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<bool, Vec<u8>>;
}

/// Interface of a contract notified when it receives hook tokens.
pub trait IErc777Recipient {
    /// Called by a hook token after `amount` tokens moved from `from` to
    /// `to`. Reverting rejects the transfer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `operator` - Account that triggered the transfer.
    /// * `from` - Previous holder of the tokens.
    /// * `to` - New holder of the tokens.
    /// * `amount` - Number of tokens moved.
    /// * `user_data` - Payload supplied by the holder.
    /// * `operator_data` - Payload supplied by the operator.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    #[allow(clippy::too_many_arguments)]
    fn tokens_received(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_data: Bytes,
        operator_data: Bytes,
    ) -> Result<(), Vec<u8>>;
}

#[public]
#[implements(IErc777)]
impl Erc777 {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `registry` - ERC-1820 registry consulted for recipient hooks.
    ///   [`Address::ZERO`] disables hooks.
    #[constructor]
    pub fn constructor(&mut self, registry: Address) {
        self.registry.set(registry);
    }
}

#[public]
impl IErc777 for Erc777 {
    fn decimals(&self) -> u8 {
        DECIMALS
    }

    fn granularity(&self) -> U256 {
        U256::from(1)
    }

    fn total_supply(&self) -> U256 {
        self.erc20.total_supply()
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.erc20.balance_of(owner)
    }

    fn registry(&self) -> Address {
        self.registry.get()
    }

    fn send(
        &mut self,
        recipient: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        let sender = msg::sender();
        self._send(sender, recipient, amount, &data, &Bytes::from(vec![]))
    }

    fn transfer(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<bool, Vec<u8>> {
        let sender = msg::sender();
        self._send(
            sender,
            recipient,
            amount,
            &Bytes::from(vec![]),
            &Bytes::from(vec![]),
        )?;
        Ok(true)
    }
}

impl Erc777 {
    /// Moves `amount` tokens from `from` to `to` and notifies the recipient's
    /// hook implementer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Current holder of the tokens.
    /// * `to` - Account receiving the tokens.
    /// * `amount` - Number of tokens to move.
    /// * `data` - Payload supplied by the holder.
    /// * `operator_data` - Payload supplied by the operator.
    ///
    /// # Errors
    ///
    /// See [`IErc777::send`].
    ///
    /// # Events
    ///
    /// * [`openzeppelin_stylus::token::erc20::Transfer`].
    /// * [`Sent`].
    pub fn _send(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
        data: &Bytes,
        operator_data: &Bytes,
    ) -> Result<(), Vec<u8>> {
        if from.is_zero() {
            return Err(erc20::Error::InvalidSender(ERC20InvalidSender {
                sender: from,
            })
            .into());
        }
        if to.is_zero() {
            return Err(erc20::Error::InvalidReceiver(ERC20InvalidReceiver {
                receiver: to,
            })
            .into());
        }
        self.erc20._update(from, to, amount)?;

        let operator = msg::sender();
        evm::log(Sent {
            operator,
            from,
            to,
            amount,
            data: data.to_vec().into(),
            operator_data: operator_data.to_vec().into(),
        });

        self._call_tokens_received(
            operator,
            from,
            to,
            amount,
            data,
            operator_data,
        )
    }

    /// Creates `amount` tokens for `account`. Minting does not notify the
    /// recipient.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `account` - Account receiving the tokens.
    /// * `amount` - Number of tokens to create.
    ///
    /// # Errors
    ///
    /// * [`openzeppelin_stylus::token::erc20::ERC20InvalidReceiver`] - If
    ///   `account` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`openzeppelin_stylus::token::erc20::Transfer`].
    /// * [`Minted`].
    pub fn _mint(
        &mut self,
        account: Address,
        amount: U256,
    ) -> Result<(), Vec<u8>> {
        self.erc20._mint(account, amount)?;
        evm::log(Minted {
            operator: msg::sender(),
            to: account,
            amount,
            data: vec![].into(),
            operator_data: vec![].into(),
        });
        Ok(())
    }

    /// Calls `tokensReceived` on the implementer `to` registered for
    /// [`TOKENS_RECIPIENT_INTERFACE_HASH`], if any.
    fn _call_tokens_received(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        amount: U256,
        data: &Bytes,
        operator_data: &Bytes,
    ) -> Result<(), Vec<u8>> {
        let registry = self.registry.get();
        if registry.is_zero() {
            return Ok(());
        }

        let implementer = Erc1820Interface::new(registry)
            .get_interface_implementer(
                Call::new_in(self),
                to,
                TOKENS_RECIPIENT_INTERFACE_HASH,
            )
            .map_err(|_| ERC777RegistryUnavailable { registry }.abi_encode())?;
        if implementer.is_zero() {
            return Ok(());
        }

        Erc777RecipientInterface::new(implementer)
            .tokens_received(
                Call::new_in(self),
                operator,
                from,
                to,
                amount,
                data.to_vec().into(),
                operator_data.to_vec().into(),
            )
            .map_err(|e| match e {
                // Propagate the recipient's errors directly.
                call::Error::Revert(reason) => reason,
                call::Error::AbiDecodingFailed(_) => vec![],
            })?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloy_primitives::{uint, Address, U256};
    use motsu::prelude::*;
    use openzeppelin_stylus::token::erc20;
    use stylus_sdk::{
        abi::Bytes,
        prelude::*,
        storage::{StorageAddress, StorageBool, StorageU256},
    };

    use super::*;
    use crate::registry::{Erc1820Registry, IErc1820Registry};

    /// Records the last notification it received.
    #[storage]
    pub(crate) struct RecordingRecipient {
        pub(crate) operator: StorageAddress,
        pub(crate) from: StorageAddress,
        pub(crate) amount: StorageU256,
        pub(crate) reject: StorageBool,
    }

    unsafe impl TopLevelStorage for RecordingRecipient {}

    #[public]
    #[implements(IErc777Recipient)]
    impl RecordingRecipient {
        fn set_reject(&mut self, reject: bool) {
            self.reject.set(reject);
        }
    }

    #[public]
    impl IErc777Recipient for RecordingRecipient {
        fn tokens_received(
            &mut self,
            operator: Address,
            from: Address,
            _to: Address,
            amount: U256,
            _user_data: Bytes,
            _operator_data: Bytes,
        ) -> Result<(), Vec<u8>> {
            if self.reject.get() {
                return Err(b"rejected".to_vec());
            }
            self.operator.set(operator);
            self.from.set(from);
            self.amount.set(amount);
            Ok(())
        }
    }

    fn register(
        registry: &Contract<Erc1820Registry>,
        account: Address,
        implementer: Address,
    ) {
        registry
            .sender(account)
            .set_interface_implementer(
                account,
                TOKENS_RECIPIENT_INTERFACE_HASH,
                implementer,
            )
            .motsu_expect("should register recipient hook");
    }

    #[motsu::test]
    fn reports_fixed_metadata(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(registry.address());

        assert_eq!(contract.sender(alice).decimals(), DECIMALS);
        assert_eq!(contract.sender(alice).granularity(), U256::from(1));
        assert_eq!(contract.sender(alice).registry(), registry.address());
    }

    #[motsu::test]
    fn mints(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        alice: Address,
    ) {
        let amount = uint!(100_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();

        assert_eq!(contract.sender(alice).balance_of(alice), amount);
        assert_eq!(contract.sender(alice).total_supply(), amount);
        contract.assert_emitted(&Minted {
            operator: alice,
            to: alice,
            amount,
            data: vec![].into(),
            operator_data: vec![].into(),
        });
    }

    #[motsu::test]
    fn sends_to_account_without_hook(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        alice: Address,
        bob: Address,
    ) {
        let amount = uint!(100_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();

        contract
            .sender(alice)
            .send(bob, amount, Bytes::from(vec![]))
            .motsu_expect("should send without a hook");

        assert_eq!(contract.sender(alice).balance_of(alice), U256::ZERO);
        assert_eq!(contract.sender(alice).balance_of(bob), amount);
        contract.assert_emitted(&erc20::Transfer {
            from: alice,
            to: bob,
            value: amount,
        });
        contract.assert_emitted(&Sent {
            operator: alice,
            from: alice,
            to: bob,
            amount,
            data: vec![].into(),
            operator_data: vec![].into(),
        });
    }

    #[motsu::test]
    fn send_notifies_registered_recipient(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        recipient: Contract<RecordingRecipient>,
        alice: Address,
    ) {
        let amount = uint!(7_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();
        register(&registry, recipient.address(), recipient.address());

        contract
            .sender(alice)
            .send(recipient.address(), amount, Bytes::from(vec![]))
            .motsu_expect("should notify the recipient");

        assert_eq!(recipient.sender(alice).operator.get(), alice);
        assert_eq!(recipient.sender(alice).from.get(), alice);
        assert_eq!(recipient.sender(alice).amount.get(), amount);
        assert_eq!(
            contract.sender(alice).balance_of(recipient.address()),
            amount
        );
    }

    #[motsu::test]
    fn transfer_notifies_registered_recipient(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        recipient: Contract<RecordingRecipient>,
        alice: Address,
    ) {
        let amount = uint!(3_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();
        register(&registry, recipient.address(), recipient.address());

        let ok = contract
            .sender(alice)
            .transfer(recipient.address(), amount)
            .motsu_unwrap();

        assert!(ok);
        assert_eq!(recipient.sender(alice).amount.get(), amount);
    }

    #[motsu::test]
    fn send_reverts_when_recipient_rejects(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        recipient: Contract<RecordingRecipient>,
        alice: Address,
    ) {
        let amount = uint!(7_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();
        register(&registry, recipient.address(), recipient.address());
        recipient.sender(alice).set_reject(true);

        let err = contract
            .sender(alice)
            .send(recipient.address(), amount, Bytes::from(vec![]))
            .motsu_unwrap_err();

        assert_eq!(err, b"rejected".to_vec());
        assert_eq!(contract.sender(alice).balance_of(alice), amount);
    }

    #[motsu::test]
    fn send_reverts_when_insufficient_balance(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        alice: Address,
        bob: Address,
    ) {
        let amount = uint!(100_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();

        let err = contract
            .sender(alice)
            .send(bob, amount + U256::from(1), Bytes::from(vec![]))
            .motsu_unwrap_err();

        let expected: Vec<u8> = erc20::Error::InsufficientBalance(
            erc20::ERC20InsufficientBalance {
                sender: alice,
                balance: amount,
                needed: amount + U256::from(1),
            },
        )
        .into();
        assert_eq!(err, expected);
    }

    #[motsu::test]
    fn send_reverts_when_recipient_is_zero(
        contract: Contract<Erc777>,
        registry: Contract<Erc1820Registry>,
        alice: Address,
    ) {
        let amount = uint!(100_U256);
        contract.sender(alice).constructor(registry.address());
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();

        let err = contract
            .sender(alice)
            .send(Address::ZERO, amount, Bytes::from(vec![]))
            .motsu_unwrap_err();

        let expected: Vec<u8> =
            erc20::Error::InvalidReceiver(ERC20InvalidReceiver {
                receiver: Address::ZERO,
            })
            .into();
        assert_eq!(err, expected);
        assert_eq!(contract.sender(alice).balance_of(alice), amount);
    }

    #[motsu::test]
    fn zero_registry_disables_hooks(
        contract: Contract<Erc777>,
        recipient: Contract<RecordingRecipient>,
        alice: Address,
    ) {
        let amount = uint!(5_U256);
        contract.sender(alice).constructor(Address::ZERO);
        contract.sender(alice)._mint(alice, amount).motsu_unwrap();

        contract
            .sender(alice)
            .send(recipient.address(), amount, Bytes::from(vec![]))
            .motsu_unwrap();

        assert_eq!(recipient.sender(alice).amount.get(), U256::ZERO);
    }
}
