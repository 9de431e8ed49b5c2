//! Procedural macros of the end-to-end test helpers.
use proc_macro::TokenStream;


/// Defines an end-to-end Stylus contract test. Every argument is a freshly
/// funded account created before the test body runs.
///
/// # Examples
///
/// ```rust,ignore
/// #[e2e::test]
/// async fn mints(alice: Account) -> eyre::Result<()> {
///     let contract_addr = alice.as_deployer().deploy().await?.contract_address;
///     let contract = Erc20Mintable::new(contract_addr, &alice.wallet);
///
///     watch!(contract.mint(alice.address(), U256::ONE))?;
///
///     let balance = contract.balanceOf(alice.address()).call().await?;
///     assert_eq!(balance, U256::ONE);
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, input: TokenStream) -> TokenStream {
    test::test(attr, input)
}
