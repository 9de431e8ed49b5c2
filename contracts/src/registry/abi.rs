//! Solidity interface of the ERC-1820 registry, for cross-contract calls.
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloc::vec;

use stylus_sdk::prelude::sol_interface;

sol_interface! {
    /// ERC-1820 registry interface.
    interface Erc1820Interface {
        function getInterfaceImplementer(address account, bytes32 interface_hash) external view returns (address);
        function setInterfaceImplementer(address account, bytes32 interface_hash, address implementer) external;
        function getManager(address account) external view returns (address);
        function setManager(address account, address new_manager) external;
    }
}
