//! Token standards used by pool tickets.
pub mod erc777;
