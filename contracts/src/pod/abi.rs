//! Solidity interface of pods, for cross-contract calls.
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloc::vec;

use stylus_sdk::prelude::sol_interface;

sol_interface! {
    /// Pod interface.
    ///
    /// Check [`crate::pod::IPod`] trait for more details.
    interface PodInterface {
        function tokenToCollateralValue(uint256 tokens) external view returns (uint256);
        function balanceOfUnderlying(address user) external view returns (uint256);
    }
}
