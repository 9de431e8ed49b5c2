#![cfg(feature = "e2e")]

use abi::{
    Erc1820Registry, Erc20Mintable, Erc721Mintable, Erc777Mintable,
    MigrateV2ToV3, MockPod,
};
use alloy::primitives::{keccak256, uint, Address, Bytes, U256};
use e2e::{receipt, send, watch, Account, EventExt, Revert};
use eyre::Result;
use migrate_deploy::sequencer::{
    deploy_migration, MigrationAddresses, MOCK_DECIMALS,
};

mod abi;

const ONE_HUNDRED: U256 = uint!(100_000_000_000_000_000_000_U256);
const NINE_HUNDRED_NINETY_NINE: U256 = uint!(999_000_000_000_000_000_000_U256);
const ONE_THOUSAND: U256 = uint!(1_000_000_000_000_000_000_000_U256);
const TEN_THOUSAND: U256 = uint!(10_000_000_000_000_000_000_000_U256);

async fn deploy_plain(account: &Account, crate_dir: &str) -> Result<Address> {
    Ok(account.as_deployer().in_crate(crate_dir).deploy().await?.contract_address)
}

async fn deploy_hook_token(
    account: &Account,
    crate_dir: &str,
    registry: Address,
) -> Result<Address> {
    Ok(account
        .as_deployer()
        .in_crate(crate_dir)
        .with_constructor(vec![registry.to_string()])
        .deploy()
        .await?
        .contract_address)
}

/// Runs the deployment sequencer for `owner` against a fresh in-memory store,
/// then declares [`ONE_HUNDRED`] as the value of both pods.
async fn deploy_with(
    owner: &Account,
    usdc_decimals: u8,
) -> Result<MigrationAddresses> {
    let mut ctx = owner.deployment_context("..").await?;
    let addresses = deploy_migration(&mut ctx, usdc_decimals).await?;

    for pod in [addresses.pool_dai_pod, addresses.pool_usdc_pod] {
        let pod = MockPod::new(pod, &owner.wallet);
        watch!(pod.setValue(ONE_HUNDRED))?;
    }

    Ok(addresses)
}

async fn deploy(owner: &Account) -> Result<MigrationAddresses> {
    deploy_with(owner, MOCK_DECIMALS).await
}

async fn fund(
    owner: &Account,
    fixture: &MigrationAddresses,
    amount: U256,
) -> Result<()> {
    let v3 = Erc20Mintable::new(fixture.v3_token, &owner.wallet);
    watch!(v3.mint(fixture.migration, amount))?;
    Ok(())
}

// ============================================================================
// Integration Tests: construction
// ============================================================================

#[e2e::test]
async fn constructs(alice: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    let contract = MigrateV2ToV3::new(fixture.migration, &alice.wallet);

    assert_eq!(contract.poolDaiToken().call().await?, fixture.pool_dai_token);
    assert_eq!(contract.poolUsdcToken().call().await?, fixture.pool_usdc_token);
    assert_eq!(contract.poolDaiPod().call().await?, fixture.pool_dai_pod);
    assert_eq!(contract.poolUsdcPod().call().await?, fixture.pool_usdc_pod);
    assert_eq!(contract.v3Token().call().await?, fixture.v3_token);
    assert_eq!(contract.owner().call().await?, alice.address());
    assert_eq!(fixture.deployer, alice.address());

    let registry = Erc1820Registry::new(fixture.registry, &alice.wallet);
    let implementer = registry
        .getInterfaceImplementer(
            fixture.migration,
            keccak256(b"ERC777TokensRecipient"),
        )
        .call()
        .await?;
    assert_eq!(implementer, fixture.migration);

    Ok(())
}

// ============================================================================
// Integration Tests: migration
// ============================================================================

#[e2e::test]
async fn migrates_pool_dai(alice: Account, bob: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    watch!(Erc777Mintable::new(fixture.pool_dai_token, &alice.wallet)
        .mint(bob.address(), ONE_HUNDRED))?;

    let pool_dai = Erc777Mintable::new(fixture.pool_dai_token, &bob.wallet);
    let receipt =
        receipt!(pool_dai.send(fixture.migration, ONE_HUNDRED, Bytes::new()))?;

    assert!(receipt.emits(MigrateV2ToV3::TicketsMigrated {
        token: fixture.pool_dai_token,
        account: bob.address(),
        amount: ONE_HUNDRED,
        v3Amount: ONE_HUNDRED,
    }));
    let v3 = Erc20Mintable::new(fixture.v3_token, &bob.wallet);
    assert_eq!(v3.balanceOf(bob.address()).call().await?, ONE_HUNDRED);
    assert_eq!(pool_dai.balanceOf(bob.address()).call().await?, U256::ZERO);

    Ok(())
}

#[e2e::test]
async fn migrates_pool_usdc(alice: Account, bob: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    watch!(Erc777Mintable::new(fixture.pool_usdc_token, &alice.wallet)
        .mint(bob.address(), ONE_HUNDRED))?;

    let pool_usdc = Erc777Mintable::new(fixture.pool_usdc_token, &bob.wallet);
    watch!(pool_usdc.send(fixture.migration, ONE_HUNDRED, Bytes::new()))?;

    let v3 = Erc20Mintable::new(fixture.v3_token, &bob.wallet);
    assert_eq!(v3.balanceOf(bob.address()).call().await?, ONE_HUNDRED);
    assert_eq!(pool_usdc.balanceOf(bob.address()).call().await?, U256::ZERO);

    Ok(())
}

#[e2e::test]
async fn migrates_pods_by_collateral_value(
    alice: Account,
    bob: Account,
) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, ONE_THOUSAND + ONE_THOUSAND).await?;

    for pod_addr in [fixture.pool_dai_pod, fixture.pool_usdc_pod] {
        watch!(MockPod::new(pod_addr, &alice.wallet)
            .mint(bob.address(), NINE_HUNDRED_NINETY_NINE))?;

        let pod = MockPod::new(pod_addr, &bob.wallet);
        let receipt = receipt!(pod.send(
            fixture.migration,
            NINE_HUNDRED_NINETY_NINE,
            Bytes::new()
        ))?;

        assert!(receipt.emits(MigrateV2ToV3::TicketsMigrated {
            token: pod_addr,
            account: bob.address(),
            amount: NINE_HUNDRED_NINETY_NINE,
            v3Amount: ONE_HUNDRED,
        }));
        assert_eq!(pod.balanceOf(bob.address()).call().await?, U256::ZERO);
    }

    let v3 = Erc20Mintable::new(fixture.v3_token, &bob.wallet);
    assert_eq!(
        v3.balanceOf(bob.address()).call().await?,
        ONE_HUNDRED + ONE_HUNDRED
    );

    Ok(())
}

#[e2e::test]
async fn migrates_six_decimal_usdc_pod(alice: Account, bob: Account) -> Result<()> {
    let fixture = deploy_with(&alice, 6).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    let one_hundred_usdc = uint!(100_000_000_U256);
    watch!(MockPod::new(fixture.pool_usdc_pod, &alice.wallet)
        .setValue(one_hundred_usdc))?;
    watch!(MockPod::new(fixture.pool_usdc_pod, &alice.wallet)
        .mint(bob.address(), NINE_HUNDRED_NINETY_NINE))?;

    let pod = MockPod::new(fixture.pool_usdc_pod, &bob.wallet);
    let receipt = receipt!(pod.send(
        fixture.migration,
        NINE_HUNDRED_NINETY_NINE,
        Bytes::new()
    ))?;

    assert!(receipt.emits(MigrateV2ToV3::TicketsMigrated {
        token: fixture.pool_usdc_pod,
        account: bob.address(),
        amount: NINE_HUNDRED_NINETY_NINE,
        v3Amount: ONE_HUNDRED,
    }));
    let v3 = Erc20Mintable::new(fixture.v3_token, &bob.wallet);
    assert_eq!(v3.balanceOf(bob.address()).call().await?, ONE_HUNDRED);

    Ok(())
}

#[e2e::test]
async fn migration_rejects_tickets_sent_elsewhere(
    alice: Account,
    bob: Account,
    charlie: Account,
) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    let registry = Erc1820Registry::new(fixture.registry, &charlie.wallet);
    watch!(registry.setInterfaceImplementer(
        charlie.address(),
        keccak256(b"ERC777TokensRecipient"),
        fixture.migration
    ))?;
    watch!(Erc777Mintable::new(fixture.pool_dai_token, &alice.wallet)
        .mint(bob.address(), ONE_HUNDRED))?;

    let pool_dai = Erc777Mintable::new(fixture.pool_dai_token, &bob.wallet);
    let err = send!(pool_dai.send(charlie.address(), ONE_HUNDRED, Bytes::new()))
        .expect_err("should not pay for tickets sent elsewhere");

    assert!(err.reverted_with(MigrateV2ToV3::MigrationInvalidRecipient {
        to: charlie.address(),
    }));
    let v3 = Erc20Mintable::new(fixture.v3_token, &bob.wallet);
    assert_eq!(v3.balanceOf(bob.address()).call().await?, U256::ZERO);
    assert_eq!(v3.balanceOf(fixture.migration).call().await?, TEN_THOUSAND);

    Ok(())
}

#[e2e::test]
async fn migration_reverts_when_reserve_is_empty(
    alice: Account,
    bob: Account,
) -> Result<()> {
    let fixture = deploy(&alice).await?;

    for token in [
        fixture.pool_dai_token,
        fixture.pool_usdc_token,
        fixture.pool_dai_pod,
        fixture.pool_usdc_pod,
    ] {
        watch!(Erc777Mintable::new(token, &alice.wallet)
            .mint(bob.address(), ONE_HUNDRED))?;

        let token = Erc777Mintable::new(token, &bob.wallet);
        let err = send!(token.send(fixture.migration, ONE_HUNDRED, Bytes::new()))
            .expect_err("should not migrate without V3 reserve");

        assert!(err.reverted_with(Erc20Mintable::ERC20InsufficientBalance {
            sender: fixture.migration,
            balance: U256::ZERO,
            needed: ONE_HUNDRED,
        }));
        assert_eq!(token.balanceOf(bob.address()).call().await?, ONE_HUNDRED);
    }

    Ok(())
}

#[e2e::test]
async fn migration_rejects_unsupported_token(
    alice: Account,
    bob: Account,
) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    let stranger =
        deploy_hook_token(&alice, "../erc777-mintable", fixture.registry)
            .await?;
    watch!(Erc777Mintable::new(stranger, &alice.wallet)
        .mint(bob.address(), ONE_HUNDRED))?;

    let stranger = Erc777Mintable::new(stranger, &bob.wallet);
    let err = send!(stranger.send(fixture.migration, ONE_HUNDRED, Bytes::new()))
        .expect_err("should reject an unknown ticket");

    assert!(err.reverted_with(MigrateV2ToV3::MigrationUnsupportedToken {
        token: *stranger.address(),
    }));

    Ok(())
}

// ============================================================================
// Integration Tests: withdrawals
// ============================================================================

#[e2e::test]
async fn owner_withdraws_erc777(alice: Account, bob: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    watch!(Erc777Mintable::new(fixture.pool_dai_token, &alice.wallet)
        .mint(bob.address(), ONE_HUNDRED))?;
    let pool_dai = Erc777Mintable::new(fixture.pool_dai_token, &bob.wallet);
    watch!(pool_dai.send(fixture.migration, ONE_HUNDRED, Bytes::new()))?;

    let contract = MigrateV2ToV3::new(fixture.migration, &alice.wallet);
    let receipt =
        receipt!(contract.withdrawERC777(fixture.pool_dai_token, alice.address()))?;

    assert!(receipt.emits(MigrateV2ToV3::TokensWithdrawn {
        token: fixture.pool_dai_token,
        to: alice.address(),
        amount: ONE_HUNDRED,
    }));
    assert_eq!(pool_dai.balanceOf(alice.address()).call().await?, ONE_HUNDRED);
    assert_eq!(pool_dai.balanceOf(fixture.migration).call().await?, U256::ZERO);

    Ok(())
}

#[e2e::test]
async fn owner_withdraws_erc20_batch(alice: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    let other = deploy_plain(&alice, "../erc20-mintable").await?;
    let other = Erc20Mintable::new(other, &alice.wallet);
    watch!(other.mint(fixture.migration, ONE_HUNDRED))?;

    let contract = MigrateV2ToV3::new(fixture.migration, &alice.wallet);
    watch!(contract.withdrawERC20Batch(
        vec![fixture.v3_token, *other.address()],
        alice.address()
    ))?;

    let v3 = Erc20Mintable::new(fixture.v3_token, &alice.wallet);
    assert_eq!(v3.balanceOf(alice.address()).call().await?, TEN_THOUSAND);
    assert_eq!(other.balanceOf(alice.address()).call().await?, ONE_HUNDRED);
    assert_eq!(v3.balanceOf(fixture.migration).call().await?, U256::ZERO);
    assert_eq!(other.balanceOf(fixture.migration).call().await?, U256::ZERO);

    Ok(())
}

#[e2e::test]
async fn owner_withdraws_erc721(alice: Account, bob: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    let nft = deploy_plain(&alice, "../erc721-mintable").await?;
    let nft = Erc721Mintable::new(nft, &alice.wallet);
    let token_id = U256::from(1);
    watch!(nft.mint(fixture.migration, token_id))?;

    let contract = MigrateV2ToV3::new(fixture.migration, &alice.wallet);
    let receipt =
        receipt!(contract.withdrawERC721(*nft.address(), token_id, bob.address()))?;

    assert!(receipt.emits(MigrateV2ToV3::NftWithdrawn {
        token: *nft.address(),
        to: bob.address(),
        tokenId: token_id,
    }));
    assert_eq!(nft.ownerOf(token_id).call().await?, bob.address());

    Ok(())
}

#[e2e::test]
async fn withdrawals_reject_non_owner(alice: Account, bob: Account) -> Result<()> {
    let fixture = deploy(&alice).await?;
    fund(&alice, &fixture, TEN_THOUSAND).await?;
    let contract = MigrateV2ToV3::new(fixture.migration, &bob.wallet);
    let expected = || MigrateV2ToV3::OwnableUnauthorizedAccount {
        account: bob.address(),
    };

    let err = send!(contract.withdrawERC777(fixture.pool_dai_token, bob.address()))
        .expect_err("non-owner should not withdraw");
    assert!(err.reverted_with(expected()));

    let err = send!(contract.withdrawERC20(fixture.v3_token, bob.address()))
        .expect_err("non-owner should not withdraw");
    assert!(err.reverted_with(expected()));

    let err = send!(contract.withdrawERC20Batch(vec![fixture.v3_token], bob.address()))
        .expect_err("non-owner should not withdraw");
    assert!(err.reverted_with(expected()));

    let err = send!(contract.withdrawERC721(
        fixture.v3_token,
        U256::from(1),
        bob.address()
    ))
    .expect_err("non-owner should not withdraw");
    assert!(err.reverted_with(expected()));

    let v3 = Erc20Mintable::new(fixture.v3_token, &bob.wallet);
    assert_eq!(v3.balanceOf(fixture.migration).call().await?, TEN_THOUSAND);

    Ok(())
}
