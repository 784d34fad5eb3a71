use std::sync::Arc;

use assert_matches::assert_matches;
use doodlcorns_mint::{
    AccountKind, CANDY_GUARD_PROGRAM_ID, CANDY_MACHINE_PROGRAM_ID, MINT_COMPUTE_UNIT_LIMIT, MINT_SUCCESS_MESSAGE, MintError,
    MintPage, MintSdk, Session,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, compute_budget::ComputeBudgetInstruction,
    message::VersionedMessage, pubkey::Pubkey,
};

mod common;
use common::{Deployment, FakeChain, wallet_keypair};

async fn loaded_page(
    token_payment_amount: Option<u64>,
) -> (MintPage<FakeChain>, FakeChain, Deployment) {
    let chain = FakeChain::new();
    let deployment = Deployment::new();
    deployment.seed(&chain, token_payment_amount);

    let mut page = MintPage::new(MintSdk::new(chain.clone(), Some(deployment.lookup_table)));
    page.load(Some(deployment.candy_machine)).await.unwrap();

    (page, chain, deployment)
}

fn session() -> Session {
    let (keypair, _) = wallet_keypair();
    Session::new("memory", Arc::new(keypair))
}

#[tokio::test]
async fn test_mint_success() {
    let (mut page, chain, _) = loaded_page(Some(250)).await;
    let session = session();

    assert_eq!(page.cost(), "2.5 GEMS");
    assert!(page.mint_button_enabled(Some(&session)));

    let receipt = page.handle_mint(Some(&session)).await.unwrap();

    assert_eq!(page.form_message(), Some(MINT_SUCCESS_MESSAGE));
    assert!(!page.is_loading());

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].signatures[0], receipt.signature);
    assert!(
        sent[0]
            .message
            .static_account_keys()
            .contains(&receipt.nft_mint)
    );
}

#[tokio::test]
async fn test_mint_transaction_layout() {
    let (page, chain, deployment) = loaded_page(Some(250)).await;
    let session = session();
    let sdk = MintSdk::new(chain.clone(), Some(deployment.lookup_table));

    sdk.mint(Some(&session), page.candy_machine(), page.candy_guard())
        .await
        .unwrap();

    let transaction = chain.sent_transactions().remove(0);
    assert!(
        transaction
            .verify_with_results()
            .into_iter()
            .all(|verified| verified)
    );
    assert_eq!(transaction.signatures.len(), 2);

    let VersionedMessage::V0(message) = &transaction.message else {
        panic!("expected a v0 message");
    };
    assert_eq!(message.account_keys[0], session.address);

    assert_eq!(message.instructions.len(), 2);
    let compute_budget =
        ComputeBudgetInstruction::set_compute_unit_limit(MINT_COMPUTE_UNIT_LIMIT);
    assert_eq!(message.instructions[0].data, compute_budget.data);
    let mint_program = message.account_keys[message.instructions[1].program_id_index as usize];
    assert_eq!(mint_program, CANDY_GUARD_PROGRAM_ID);

    assert_eq!(message.address_table_lookups.len(), 1);
    assert_eq!(
        message.address_table_lookups[0].account_key,
        deployment.lookup_table
    );

    assert_eq!(chain.skip_preflight_flags(), vec![true]);
    assert_eq!(
        chain.confirmation_commitments(),
        vec![CommitmentConfig::finalized()]
    );
}

#[tokio::test]
async fn test_mint_not_observable_reports_failure() {
    let (mut page, chain, _) = loaded_page(Some(250)).await;
    chain.set_reveal_minted_assets(false);
    let session = session();

    let receipt = page.handle_mint(Some(&session)).await;

    assert!(receipt.is_none());
    assert_eq!(chain.sent_transactions().len(), 1);
    assert_eq!(page.form_message(), Some("Mint failed!"));
    assert!(!page.is_loading());
}

#[tokio::test]
async fn test_mint_confirmation_mismatch_error() {
    let (page, chain, deployment) = loaded_page(Some(250)).await;
    chain.set_reveal_minted_assets(false);
    let sdk = MintSdk::new(chain.clone(), Some(deployment.lookup_table));

    let result = sdk
        .mint(Some(&session()), page.candy_machine(), page.candy_guard())
        .await;

    assert_matches!(result, Err(MintError::ConfirmationMismatch(_)));
}

#[tokio::test]
async fn test_mint_without_token_payment_sends_nothing() {
    let (mut page, chain, _) = loaded_page(None).await;

    assert_eq!(page.cost(), "GEMS MINT");

    let receipt = page.handle_mint(Some(&session())).await;

    assert!(receipt.is_none());
    assert!(chain.sent_transactions().is_empty());
    assert_eq!(page.form_message(), Some("Error with token payment"));
    assert!(!page.is_loading());
}

#[tokio::test]
async fn test_mint_without_candy_machine_sends_nothing() {
    let chain = FakeChain::new();
    let mut page = MintPage::new(MintSdk::new(chain.clone(), Some(Pubkey::new_unique())));

    // no candy machine configured: nothing is fetched
    page.load(None).await.unwrap();
    assert!(page.candy_machine().is_none());
    assert!(page.candy_guard().is_none());

    page.handle_mint(Some(&session())).await;

    assert!(chain.sent_transactions().is_empty());
    assert_eq!(page.form_message(), Some("Error with Candy Machine"));
}

#[tokio::test]
async fn test_mint_with_unguarded_candy_machine() {
    let chain = FakeChain::new();
    let deployment = Deployment::new();
    chain.insert_account(deployment.candy_machine, deployment.candy_machine_data());

    let mut page = MintPage::new(MintSdk::new(chain.clone(), Some(deployment.lookup_table)));
    page.load(Some(deployment.candy_machine)).await.unwrap();

    assert!(page.candy_machine().is_some());
    assert!(page.candy_guard().is_none());
    assert_eq!(page.cost(), "GEMS MINT");

    page.handle_mint(Some(&session())).await;

    assert!(chain.sent_transactions().is_empty());
    assert_eq!(page.form_message(), Some("Error with Candy Machine"));
}

#[tokio::test]
async fn test_load_with_wallet_as_mint_authority() {
    let chain = FakeChain::new();
    let deployment = Deployment::new();
    chain.insert_owned_account(
        deployment.candy_machine,
        deployment.candy_machine_data(),
        CANDY_MACHINE_PROGRAM_ID,
    );
    // mint authority is a plain wallet that exists on chain
    chain.insert_account(deployment.candy_guard, Vec::new());

    let mut page = MintPage::new(MintSdk::new(chain.clone(), Some(deployment.lookup_table)));
    page.load(Some(deployment.candy_machine)).await.unwrap();

    assert!(page.candy_machine().is_some());
    assert!(page.candy_guard().is_none());
    assert_eq!(page.cost(), "GEMS MINT");

    page.handle_mint(Some(&session())).await;

    assert!(chain.sent_transactions().is_empty());
    assert_eq!(page.form_message(), Some("Error with Candy Machine"));
}

#[tokio::test]
async fn test_mint_button_disabled_without_wallet() {
    let (mut page, chain, _) = loaded_page(Some(250)).await;

    assert!(!page.mint_button_enabled(None));
    assert!(page.render(None).contains("[Mint] (disabled)"));

    let receipt = page.handle_mint(None).await;

    assert!(receipt.is_none());
    assert!(chain.sent_transactions().is_empty());
    assert_eq!(page.form_message(), None);
}

#[tokio::test]
async fn test_mint_without_wallet_errors_in_sdk() {
    let (page, chain, deployment) = loaded_page(Some(250)).await;
    let sdk = MintSdk::new(chain.clone(), Some(deployment.lookup_table));

    let result = sdk.mint(None, page.candy_machine(), page.candy_guard()).await;

    assert_matches!(result, Err(MintError::WalletNotConnected));
    assert!(chain.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_mint_missing_lookup_table() {
    let (page, chain, _) = loaded_page(Some(250)).await;
    let lookup_table = Pubkey::new_unique();
    let sdk = MintSdk::new(chain.clone(), Some(lookup_table));

    let result = sdk
        .mint(Some(&session()), page.candy_machine(), page.candy_guard())
        .await;

    assert_matches!(
        result,
        Err(MintError::NotFound { kind: AccountKind::LookupTable, address }) if address == lookup_table
    );
    assert!(chain.sent_transactions().is_empty());

    let unconfigured = MintSdk::new(chain.clone(), None);
    let result = unconfigured
        .mint(Some(&session()), page.candy_machine(), page.candy_guard())
        .await;
    assert_eq!(result.unwrap_err().to_string(), "Error with LUT");
}

#[tokio::test]
async fn test_submission_failure_is_reported_verbatim() {
    let (mut page, chain, _) = loaded_page(Some(250)).await;
    chain.fail_sends_with("Transaction simulation failed: Blockhash not found");

    page.handle_mint(Some(&session())).await;

    assert_eq!(
        page.form_message(),
        Some("Transaction simulation failed: Blockhash not found")
    );
    assert!(!page.is_loading());
    assert!(page.mint_button_enabled(Some(&session())));
}

#[tokio::test]
async fn test_each_mint_uses_a_new_nft_mint() {
    let (page, chain, deployment) = loaded_page(Some(250)).await;
    let sdk = MintSdk::new(chain.clone(), Some(deployment.lookup_table));
    let session = session();

    let first = sdk
        .mint(Some(&session), page.candy_machine(), page.candy_guard())
        .await
        .unwrap();
    let second = sdk
        .mint(Some(&session), page.candy_machine(), page.candy_guard())
        .await
        .unwrap();

    assert_ne!(first.nft_mint, second.nft_mint);
    assert_eq!(chain.sent_transactions().len(), 2);
}

#[tokio::test]
async fn test_load_missing_candy_machine_fails() {
    let chain = FakeChain::new();
    let mut page = MintPage::new(MintSdk::new(chain, None));
    let address = Pubkey::new_unique();

    let result = page.load(Some(address)).await;

    assert_matches!(
        result,
        Err(MintError::NotFound { kind: AccountKind::CandyMachine, .. })
    );
    assert!(page.candy_machine().is_none());
}

#[tokio::test]
async fn test_render_after_mint() {
    let (mut page, _, _) = loaded_page(Some(250)).await;
    let session = session();

    page.handle_mint(Some(&session)).await;
    let rendered = page.render(Some(&session));

    assert!(rendered.starts_with("Doodlcorns\n"));
    assert!(rendered.contains("GEMS  2.5 GEMS"));
    assert!(rendered.contains("Minted 12/5000"));
    assert!(rendered.contains("[Mint]\n"));
    assert!(rendered.contains(&session.address.to_string()));
    assert!(rendered.ends_with("MINTED!\n"));
}
