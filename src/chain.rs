use async_trait::async_trait;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::RpcSendTransactionConfig;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Result as TransactionResult, VersionedTransaction},
};
use tokio::time::{Duration, sleep};

use crate::{
    accounts::{CandyGuard, CandyMachine},
    constants::CANDY_GUARD_PROGRAM_ID,
    error::{AccountKind, MintError, Result},
    utils::find_metadata_pda,
};

const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Read/submit surface of the chain, implemented for the nonblocking `RpcClient`
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch an account, `None` when it does not exist
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>>;

    async fn latest_blockhash(&self) -> Result<Hash>;

    async fn send_versioned_transaction(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<Signature>;

    /// Wait until `signature` reaches `commitment`. Gives up only when the
    /// transaction fails or its blockhash expires before it lands.
    async fn confirm_signature(
        &self,
        signature: &Signature,
        recent_blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> Result<()>;
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        Ok(self
            .get_account_with_commitment(address, self.commitment())
            .await?
            .value)
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.get_latest_blockhash().await?)
    }

    async fn send_versioned_transaction(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight,
            ..RpcSendTransactionConfig::default()
        };
        Ok(self.send_transaction_with_config(transaction, config).await?)
    }

    async fn confirm_signature(
        &self,
        signature: &Signature,
        recent_blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> Result<()> {
        // once the transaction is visible at processed it no longer depends on its blockhash
        let mut landed = false;
        loop {
            let status = self
                .get_signature_status_with_commitment(signature, commitment)
                .await?;
            let processed_status = if landed || status.is_some() {
                None
            } else {
                self.get_signature_status_with_commitment(signature, CommitmentConfig::processed())
                    .await?
            };

            match poll_outcome(status, processed_status) {
                PollOutcome::Confirmed => return Ok(()),
                PollOutcome::Failed(err) => return Err(MintError::SubmissionFailure(err)),
                PollOutcome::Landed => landed = true,
                PollOutcome::Pending => {
                    if !landed
                        && !self
                            .is_blockhash_valid(recent_blockhash, CommitmentConfig::processed())
                            .await?
                    {
                        return Err(MintError::SubmissionFailure(format!(
                            "Transaction {} expired before reaching {:?} commitment",
                            signature, commitment.commitment
                        )));
                    }
                }
            }

            log::debug!("Waiting for {} to reach {:?}", signature, commitment.commitment);
            sleep(CONFIRMATION_POLL_INTERVAL).await;
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PollOutcome {
    Confirmed,
    Failed(String),
    /// Processed but not yet at the target commitment
    Landed,
    Pending,
}

fn poll_outcome(
    status: Option<TransactionResult<()>>,
    processed_status: Option<TransactionResult<()>>,
) -> PollOutcome {
    match (status, processed_status) {
        (Some(Ok(())), _) => PollOutcome::Confirmed,
        (Some(Err(err)), _) | (None, Some(Err(err))) => PollOutcome::Failed(err.to_string()),
        (None, Some(Ok(()))) => PollOutcome::Landed,
        (None, None) => PollOutcome::Pending,
    }
}

/// A minted NFT as observed on chain
#[derive(Debug, Clone)]
pub struct DigitalAsset {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub mint_account: Account,
    pub metadata_account: Account,
}

/// Fetch the candy machine at `address`
pub async fn fetch_candy_machine<C: ChainClient + ?Sized>(
    client: &C,
    address: &Pubkey,
) -> Result<CandyMachine> {
    let account = client
        .fetch_account(address)
        .await?
        .ok_or(MintError::NotFound {
            kind: AccountKind::CandyMachine,
            address: *address,
        })?;

    CandyMachine::parse(*address, &account.data)
}

/// Fetch the candy guard at `address`. A missing account, or one the candy
/// guard program does not own, means the candy machine is unguarded.
pub async fn safe_fetch_candy_guard<C: ChainClient + ?Sized>(
    client: &C,
    address: &Pubkey,
) -> Result<Option<CandyGuard>> {
    match client.fetch_account(address).await? {
        Some(account) if account.owner == CANDY_GUARD_PROGRAM_ID => {
            CandyGuard::parse(*address, &account.data).map(Some)
        }
        Some(account) => {
            log::debug!(
                "Mint authority {} is owned by {}, not a candy guard",
                address,
                account.owner
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Fetch the mint and metadata of an NFT, `None` unless both exist
pub async fn fetch_digital_asset<C: ChainClient + ?Sized>(
    client: &C,
    mint: &Pubkey,
) -> Result<Option<DigitalAsset>> {
    let Some(mint_account) = client.fetch_account(mint).await? else {
        return Ok(None);
    };

    let metadata = find_metadata_pda(mint);
    let Some(metadata_account) = client.fetch_account(&metadata).await? else {
        return Ok(None);
    };

    Ok(Some(DigitalAsset {
        mint: *mint,
        metadata,
        mint_account,
        metadata_account,
    }))
}
