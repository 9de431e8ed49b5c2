//! Migration of legacy pool tickets to the V3 ticket.
//!
//! [`MigrateV2ToV3`] registers itself in the ERC-1820 registry as its own
//! `ERC777TokensRecipient`. Sending one of the four legacy tickets to it runs
//! [`IErc777Recipient::tokens_received`], which pays the sender in V3 tickets
//! out of the contract's reserve:
//!
//! * pool tickets (Dai, Usdc) pay `amount * scale`;
//! * pod shares pay `tokenToCollateralValue(amount) * scale`,
//!
//! where `scale` lifts the source's denomination to the V3 ticket's
//! [`V3_DECIMALS`]. Dai amounts already carry 18 decimals; the decimals of
//! Usdc amounts are fixed at construction, since neither the Usdc ticket nor
//! the Usdc pod shares report them reliably. Legacy tickets stay in the contract; the owner can move
//! them, and any other token sent by mistake, out with the `withdraw*`
//! functions.
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
use openzeppelin_stylus::access::ownable::{self, IOwnable, Ownable};
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{self, Call, MethodError},
    contract, evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageMap, StorageU256},
};

use crate::{
    migration::abi::{Erc20Interface, Erc721Interface},
    pod::abi::PodInterface,
    registry::{abi::Erc1820Interface, TOKENS_RECIPIENT_INTERFACE_HASH},
    token::erc777::{abi::Erc777Interface, IErc777Recipient},
};

pub mod abi;

/// Number of decimals of the V3 ticket.
pub const V3_DECIMALS: u8 = 18;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `account` migrates `amount` of `token` and receives
        /// `v3_amount` V3 tickets.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TicketsMigrated(
            address indexed token,
            address indexed account,
            uint256 amount,
            uint256 v3_amount
        );

        /// Emitted when the owner moves `amount` of `token` to `to`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TokensWithdrawn(address indexed token, address indexed to, uint256 amount);

        /// Emitted when the owner moves NFT `token_id` of `token` to `to`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event NftWithdrawn(address indexed token, address indexed to, uint256 token_id);
    }

    sol! {
        /// `token` is not one of the legacy tickets.
        ///
        /// * `token` - Address of the token that called the hook.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MigrationUnsupportedToken(address token);

        /// `token` has more decimals than the V3 ticket.
        ///
        /// * `token` - Address of the legacy ticket.
        /// * `decimals` - Decimals reported by `token`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MigrationUnsupportedDecimals(address token, uint8 decimals);

        /// Legacy tickets were sent to `to` instead of the migration
        /// contract.
        ///
        /// * `to` - Recipient of the legacy tickets.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MigrationInvalidRecipient(address to);

        /// The V3 amount owed for `amount` of `token` does not fit in 256
        /// bits.
        ///
        /// * `token` - Address of the legacy ticket.
        /// * `amount` - Migrated amount.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MigrationConversionOverflow(address token, uint256 amount);

        /// The contract could not register itself in `registry`.
        ///
        /// * `registry` - Address of the ERC-1820 registry.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MigrationRegistrationFailed(address registry);

        /// A call to `token` failed.
        ///
        /// * `token` - Address of the called token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MigrationFailedOperation(address token);
    }
}

/// An error that occurred in the implementation of a [`MigrateV2ToV3`]
/// contract.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The token is not one of the legacy tickets.
    UnsupportedToken(MigrationUnsupportedToken),
    /// The token has more decimals than the V3 ticket.
    UnsupportedDecimals(MigrationUnsupportedDecimals),
    /// The tokens were not sent to the migration contract.
    InvalidRecipient(MigrationInvalidRecipient),
    /// The V3 amount owed overflows.
    ConversionOverflow(MigrationConversionOverflow),
    /// The contract could not register itself as a hook recipient.
    RegistrationFailed(MigrationRegistrationFailed),
    /// A call to a token failed.
    FailedOperation(MigrationFailedOperation),
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(ownable::OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    InvalidOwner(ownable::OwnableInvalidOwner),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl From<ownable::Error> for Error {
    fn from(value: ownable::Error) -> Self {
        match value {
            ownable::Error::UnauthorizedAccount(e) => {
                Error::UnauthorizedAccount(e)
            }
            ownable::Error::InvalidOwner(e) => Error::InvalidOwner(e),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// Returns the factor lifting an amount with `decimals` decimals to
/// [`V3_DECIMALS`], or [`None`] when `decimals` exceeds them.
#[must_use]
pub fn scale_for_decimals(decimals: u8) -> Option<U256> {
    let exponent = V3_DECIMALS.checked_sub(decimals)?;
    Some(U256::from(10).pow(U256::from(exponent)))
}

/// State of a [`MigrateV2ToV3`] contract.
#[storage]
pub struct MigrateV2ToV3 {
    /// Owner allowed to withdraw tokens.
    pub ownable: Ownable,
    /// Pool Dai ticket.
    pub(crate) pool_dai_token: StorageAddress,
    /// Pool Usdc ticket.
    pub(crate) pool_usdc_token: StorageAddress,
    /// Pool Dai pod.
    pub(crate) pool_dai_pod: StorageAddress,
    /// Pool Usdc pod.
    pub(crate) pool_usdc_pod: StorageAddress,
    /// V3 ticket paid out.
    pub(crate) v3_token: StorageAddress,
    /// Maps legacy tickets to their conversion scale. Zero for any other
    /// token.
    pub(crate) scales: StorageMap<Address, StorageU256>,
}

unsafe impl TopLevelStorage for MigrateV2ToV3 {}

/// Interface of a [`MigrateV2ToV3`] contract.
pub trait IMigrateV2ToV3 {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the Pool Dai ticket.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn pool_dai_token(&self) -> Address;

    /// Returns the Pool Usdc ticket.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn pool_usdc_token(&self) -> Address;

    /// Returns the Pool Dai pod.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn pool_dai_pod(&self) -> Address;

    /// Returns the Pool Usdc pod.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn pool_usdc_pod(&self) -> Address;

    /// Returns the V3 ticket paid out by migrations.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn v3_token(&self) -> Address;

    /// Sends the contract's whole balance of hook token `token` to `to`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token` - Hook token to withdraw.
    /// * `to` - Recipient of the tokens.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::FailedOperation`] - If a call to `token` fails.
    ///
    /// # Events
    ///
    /// * [`TokensWithdrawn`].
    fn withdraw_erc777(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Self::Error>;

    /// Transfers the contract's whole balance of ERC-20 `token` to `to`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token` - ERC-20 token to withdraw.
    /// * `to` - Recipient of the tokens.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::FailedOperation`] - If a call to `token` fails or the
    ///   transfer returns `false`.
    ///
    /// # Events
    ///
    /// * [`TokensWithdrawn`].
    fn withdraw_erc20(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Self::Error>;

    /// Transfers the contract's whole balance of every ERC-20 in `tokens` to
    /// `to`, in order.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `tokens` - ERC-20 tokens to withdraw.
    /// * `to` - Recipient of the tokens.
    ///
    /// # Errors
    ///
    /// See [`IMigrateV2ToV3::withdraw_erc20`].
    ///
    /// # Events
    ///
    /// * [`TokensWithdrawn`] for each token.
    fn withdraw_erc20_batch(
        &mut self,
        tokens: Vec<Address>,
        to: Address,
    ) -> Result<(), Self::Error>;

    /// Transfers NFT `token_id` of `token` to `to`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token` - ERC-721 token to withdraw.
    /// * `token_id` - Identifier of the NFT.
    /// * `to` - Recipient of the NFT.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::FailedOperation`] - If the transfer fails.
    ///
    /// # Events
    ///
    /// * [`NftWithdrawn`].
    fn withdraw_erc721(
        &mut self,
        token: Address,
        token_id: U256,
        to: Address,
    ) -> Result<(), Self::Error>;
}

#[public]
#[implements(IMigrateV2ToV3<Error = Error>, IErc777Recipient, IOwnable)]
impl MigrateV2ToV3 {
    /// Constructor.
    ///
    /// Records the legacy tickets with their conversion scales and registers
    /// the contract as its own hook recipient in `registry`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `pool_dai_token` - Pool Dai ticket.
    /// * `pool_usdc_token` - Pool Usdc ticket.
    /// * `pool_dai_pod` - Pool Dai pod.
    /// * `pool_usdc_pod` - Pool Usdc pod.
    /// * `v3_token` - V3 ticket paid out.
    /// * `usdc_decimals` - Decimals of Pool Usdc amounts and of the Usdc pod's
    ///   collateral value.
    /// * `registry` - ERC-1820 registry the legacy tickets consult.
    /// * `initial_owner` - The initial owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `initial_owner` is [`Address::ZERO`].
    /// * [`Error::UnsupportedDecimals`] - If `usdc_decimals` exceeds
    ///   [`V3_DECIMALS`].
    /// * [`Error::RegistrationFailed`] - If `registry` rejects the
    ///   registration.
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
    ) -> Result<(), Error> {
        self.ownable.constructor(initial_owner)?;

        let usdc_scale = scale_for_decimals(usdc_decimals).ok_or(
            Error::UnsupportedDecimals(MigrationUnsupportedDecimals {
                token: pool_usdc_token,
                decimals: usdc_decimals,
            }),
        )?;

        self.pool_dai_token.set(pool_dai_token);
        self.pool_usdc_token.set(pool_usdc_token);
        self.pool_dai_pod.set(pool_dai_pod);
        self.pool_usdc_pod.set(pool_usdc_pod);
        self.v3_token.set(v3_token);

        for (token, scale) in [
            (pool_dai_token, U256::from(1)),
            (pool_dai_pod, U256::from(1)),
            (pool_usdc_token, usdc_scale),
            (pool_usdc_pod, usdc_scale),
        ] {
            self.scales.setter(token).set(scale);
        }

        self.register(registry)
    }
}

#[public]
impl IMigrateV2ToV3 for MigrateV2ToV3 {
    type Error = Error;

    fn pool_dai_token(&self) -> Address {
        self.pool_dai_token.get()
    }

    fn pool_usdc_token(&self) -> Address {
        self.pool_usdc_token.get()
    }

    fn pool_dai_pod(&self) -> Address {
        self.pool_dai_pod.get()
    }

    fn pool_usdc_pod(&self) -> Address {
        self.pool_usdc_pod.get()
    }

    fn v3_token(&self) -> Address {
        self.v3_token.get()
    }

    #[selector(name = "withdrawERC777")]
    fn withdraw_erc777(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.only_owner()?;

        let erc777 = Erc777Interface::new(token);
        let amount = erc777
            .balance_of(Call::new_in(self), contract::address())
            .map_err(|_| failed_operation(token))?;
        erc777
            .send(Call::new_in(self), to, amount, alloy_primitives::Bytes::from(vec![]))
            .map_err(|_| failed_operation(token))?;

        evm::log(TokensWithdrawn { token, to, amount });
        Ok(())
    }

    #[selector(name = "withdrawERC20")]
    fn withdraw_erc20(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.only_owner()?;
        self._withdraw_erc20(token, to)
    }

    #[selector(name = "withdrawERC20Batch")]
    fn withdraw_erc20_batch(
        &mut self,
        tokens: Vec<Address>,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.only_owner()?;
        for token in tokens {
            self._withdraw_erc20(token, to)?;
        }
        Ok(())
    }

    #[selector(name = "withdrawERC721")]
    fn withdraw_erc721(
        &mut self,
        token: Address,
        token_id: U256,
        to: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.only_owner()?;

        Erc721Interface::new(token)
            .transfer_from(
                Call::new_in(self),
                contract::address(),
                to,
                token_id,
            )
            .map_err(|_| failed_operation(token))?;

        evm::log(NftWithdrawn { token, to, token_id });
        Ok(())
    }
}

#[public]
impl IErc777Recipient for MigrateV2ToV3 {
    fn tokens_received(
        &mut self,
        _operator: Address,
        from: Address,
        to: Address,
        amount: U256,
        _user_data: Bytes,
        _operator_data: Bytes,
    ) -> Result<(), Vec<u8>> {
        let token = msg::sender();
        let scale = self.scales.get(token);
        if scale.is_zero() {
            return Err(Error::UnsupportedToken(MigrationUnsupportedToken {
                token,
            })
            .into());
        }
        // Accounts may register this contract as their own hook implementer.
        if to != contract::address() {
            return Err(Error::InvalidRecipient(MigrationInvalidRecipient {
                to,
            })
            .into());
        }

        let basis = if self.is_pod(token) {
            PodInterface::new(token)
                .token_to_collateral_value(Call::new_in(self), amount)
                .map_err(|_| failed_operation(token))?
        } else {
            amount
        };
        let v3_amount = basis.checked_mul(scale).ok_or(
            Error::ConversionOverflow(MigrationConversionOverflow {
                token,
                amount,
            }),
        )?;

        Erc20Interface::new(self.v3_token.get())
            .transfer(Call::new_in(self), from, v3_amount)
            .map_err(|e| match e {
                // Propagate the V3 ticket's errors directly.
                call::Error::Revert(reason) => reason,
                call::Error::AbiDecodingFailed(_) => vec![],
            })?;

        evm::log(TicketsMigrated { token, account: from, amount, v3_amount });
        Ok(())
    }
}

#[public]
impl IOwnable for MigrateV2ToV3 {
    fn owner(&self) -> Address {
        self.ownable.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Vec<u8>> {
        self.ownable.transfer_ownership(new_owner).map_err(Into::into)
    }

    fn renounce_ownership(&mut self) -> Result<(), Vec<u8>> {
        self.ownable.renounce_ownership().map_err(Into::into)
    }
}

impl MigrateV2ToV3 {
    /// Returns whether `token` is one of the two pods.
    fn is_pod(&self, token: Address) -> bool {
        token == self.pool_dai_pod.get() || token == self.pool_usdc_pod.get()
    }

    /// Registers this contract as its own `ERC777TokensRecipient`.
    fn register(&mut self, registry: Address) -> Result<(), Error> {
        let failed = Error::RegistrationFailed(MigrationRegistrationFailed {
            registry,
        });
        if registry.is_zero() {
            return Err(failed);
        }

        let this = contract::address();
        Erc1820Interface::new(registry)
            .set_interface_implementer(
                Call::new_in(self),
                this,
                TOKENS_RECIPIENT_INTERFACE_HASH,
                this,
            )
            .map_err(|_| failed)
    }

    /// Transfers the whole balance of ERC-20 `token` to `to`.
    fn _withdraw_erc20(
        &mut self,
        token: Address,
        to: Address,
    ) -> Result<(), Error> {
        let erc20 = Erc20Interface::new(token);
        let amount = erc20
            .balance_of(Call::new_in(self), contract::address())
            .map_err(|_| failed_operation(token))?;
        let transferred = erc20
            .transfer(Call::new_in(self), to, amount)
            .map_err(|_| failed_operation(token))?;
        if !transferred {
            return Err(failed_operation(token));
        }

        evm::log(TokensWithdrawn { token, to, amount });
        Ok(())
    }
}

fn failed_operation(token: Address) -> Error {
    Error::FailedOperation(MigrationFailedOperation { token })
}
