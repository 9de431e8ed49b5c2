//! Solidity interfaces of the tokens the migration contract pays out or
//! rescues, for cross-contract calls.
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloc::vec;

use stylus_sdk::prelude::sol_interface;

sol_interface! {
    /// ERC-20 standard interface.
    interface Erc20Interface {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
    }

    /// ERC-721 standard interface.
    interface Erc721Interface {
        function ownerOf(uint256 token_id) external view returns (address);
        function transferFrom(address from, address to, uint256 token_id) external;
    }
}
