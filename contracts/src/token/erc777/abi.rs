//! Solidity interfaces of hook tokens and their recipients, for cross-contract
//! calls.
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloc::vec;

use stylus_sdk::prelude::sol_interface;

sol_interface! {
    /// Hook token interface.
    interface Erc777Interface {
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function send(address recipient, uint256 amount, bytes calldata data) external;
    }

    /// Hook token recipient interface.
    ///
    /// Check [`crate::token::erc777::IErc777Recipient`] trait for more details.
    interface Erc777RecipientInterface {
        function tokensReceived(
            address operator,
            address from,
            address to,
            uint256 amount,
            bytes calldata user_data,
            bytes calldata operator_data
        ) external;
    }
}
