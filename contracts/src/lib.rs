/*!
# Pool Ticket Migration for Stylus

Contracts that move holders of legacy pool tickets onto the V3 ticket.

Legacy tickets are hook tokens: sending them with
[`token::erc777::IErc777::send`] notifies the recipient through its
`ERC777TokensRecipient` implementer registered in an
[`registry::Erc1820Registry`]. [`migration::MigrateV2ToV3`] registers itself
as that implementer and pays the sender in V3 tickets:

* plain pool tickets (Dai, Usdc) convert by amount;
* pod shares convert by the collateral value the pod declares for them.

Both bases are scaled from the source token's decimals to the V3 token's 18
decimals.

Test doubles used by the deployment scripts live in [`mocks`] and
[`pod::MockPod`].
*/

#![allow(clippy::pub_underscore_fields, clippy::module_name_repetitions)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std, no_main)]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod migration;
pub mod mocks;
pub mod pod;
pub mod registry;
pub mod token;
