use solana_sdk::{
    commitment_config::CommitmentConfig,
    compute_budget::ComputeBudgetInstruction,
    hash::Hash,
    instruction::Instruction,
    message::{VersionedMessage, v0},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};

use crate::{
    accounts::{CandyGuard, CandyMachine},
    chain::{ChainClient, fetch_candy_machine, fetch_digital_asset, safe_fetch_candy_guard},
    constants::MINT_COMPUTE_UNIT_LIMIT,
    error::{MintError, Result},
    instruction::get_mint_v2_and_account_metas,
    mint_params::{MintV2ParamsIx, TokenPaymentMintArgs},
    utils::get_address_lookup_table,
    wallet::Session,
};

/// Outcome of a successful mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub signature: Signature,
    pub nft_mint: Pubkey,
}

pub struct MintSdk<C: ChainClient> {
    client: C,
    lookup_table: Option<Pubkey>,
}

impl<C: ChainClient> MintSdk<C> {
    /// Create a new mint SDK instance
    ///
    /// # Arguments
    /// * `client` - Chain client used for every read and submission
    /// * `lookup_table` - Address lookup table attached to mint transactions
    pub fn new(client: C, lookup_table: Option<Pubkey>) -> Self {
        Self {
            client,
            lookup_table,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Load a candy machine and the candy guard set as its mint authority
    ///
    /// # Returns
    /// The candy machine and its guard, `None` when the machine is unguarded
    pub async fn load_candy_machine(
        &self,
        candy_machine: &Pubkey,
    ) -> Result<(CandyMachine, Option<CandyGuard>)> {
        let candy_machine = fetch_candy_machine(&self.client, candy_machine).await?;
        log::debug!("{:?}", candy_machine);

        let candy_guard = safe_fetch_candy_guard(&self.client, &candy_machine.mint_authority).await?;
        log::debug!("{:?}", candy_guard);

        Ok((candy_machine, candy_guard))
    }

    /// Create a mint instruction
    ///
    /// # Arguments
    /// * `mint_params` - The mint v2 parameters
    ///
    /// # Returns
    /// Returns an `Instruction` ready to be added to a transaction
    pub fn mint_ix(&self, mint_params: &MintV2ParamsIx) -> Result<Instruction> {
        Ok(get_mint_v2_and_account_metas(mint_params)?.into_instruction())
    }

    /// Build an unsigned mint transaction
    ///
    /// # Arguments
    /// * `payer` - Wallet paying for and receiving the NFT
    /// * `nft_mint` - Address of the new NFT mint, must sign the transaction
    /// * `candy_machine` - The loaded candy machine
    /// * `candy_guard` - The loaded candy guard
    ///
    /// # Returns
    /// Returns a `VersionedTransaction` and the blockhash it was compiled with
    pub async fn mint_tx(
        &self,
        payer: &Pubkey,
        nft_mint: &Pubkey,
        candy_machine: &CandyMachine,
        candy_guard: &CandyGuard,
    ) -> Result<(VersionedTransaction, Hash)> {
        let token_payment = resolve_token_payment(candy_guard)?;

        // fetched per attempt, the table may have been extended since load
        let lookup_table_address = self
            .lookup_table
            .ok_or(MintError::ConfigurationMissing("LUT"))?;
        let address_lookup_table_account =
            get_address_lookup_table(&self.client, &lookup_table_address).await?;

        let mint_params = MintV2ParamsIx {
            candy_machine: candy_machine.address,
            candy_guard: candy_guard.address,
            payer: *payer,
            minter: *payer,
            nft_mint: *nft_mint,
            collection_mint: candy_machine.collection_mint,
            collection_update_authority: candy_machine.authority,
            token_standard: candy_machine.token_standard,
            token_payment: Some(token_payment),
            group: None,
        };

        let compute_budget_ix =
            ComputeBudgetInstruction::set_compute_unit_limit(MINT_COMPUTE_UNIT_LIMIT);
        let mint_instruction = self.mint_ix(&mint_params)?;
        let instructions = vec![compute_budget_ix, mint_instruction];

        let recent_blockhash = self.client.latest_blockhash().await?;
        let message_v0 = v0::Message::try_compile(
            payer,
            &instructions,
            &[address_lookup_table_account],
            recent_blockhash,
        )?;

        let mint_transaction = VersionedTransaction {
            signatures: vec![],
            message: VersionedMessage::V0(message_v0),
        };

        Ok((mint_transaction, recent_blockhash))
    }

    /// Mint one NFT end to end
    ///
    /// Builds the transaction with a fresh NFT mint keypair, sends it without
    /// preflight, waits for `finalized` and then checks that the NFT exists.
    /// Nothing is retried: every error ends the attempt.
    ///
    /// # Arguments
    /// * `session` - The connected wallet, if any
    /// * `candy_machine` - The candy machine loaded at start, if any
    /// * `candy_guard` - Its candy guard, if any
    ///
    /// # Returns
    /// Returns the `MintReceipt` of the new NFT
    pub async fn mint(
        &self,
        session: Option<&Session>,
        candy_machine: Option<&CandyMachine>,
        candy_guard: Option<&CandyGuard>,
    ) -> Result<MintReceipt> {
        let (Some(candy_machine), Some(candy_guard)) = (candy_machine, candy_guard) else {
            return Err(MintError::ConfigurationMissing("Candy Machine"));
        };
        let session = session.ok_or(MintError::WalletNotConnected)?;

        let nft_mint = Keypair::new();

        let (unsigned_tx, recent_blockhash) = self
            .mint_tx(&session.address, &nft_mint.pubkey(), candy_machine, candy_guard)
            .await?;

        let mint_transaction = {
            let signers: Vec<&dyn Signer> = vec![
                session.signer.as_ref() as &dyn Signer,
                &nft_mint as &dyn Signer,
            ];
            VersionedTransaction::try_new(unsigned_tx.message, &signers)?
        };

        let signature = self
            .client
            .send_versioned_transaction(&mint_transaction, true)
            .await?;
        log::info!("Sent mint transaction {}", signature);

        self.client
            .confirm_signature(&signature, &recent_blockhash, CommitmentConfig::finalized())
            .await?;
        log::info!("Mint transaction {} finalized", signature);

        match fetch_digital_asset(&self.client, &nft_mint.pubkey()).await? {
            Some(asset) => {
                log::info!("Minted {}", asset.mint);
                Ok(MintReceipt {
                    signature,
                    nft_mint: asset.mint,
                })
            }
            None => {
                log::warn!(
                    "Transaction {} finalized but NFT {} was not found",
                    signature,
                    nft_mint.pubkey()
                );
                Err(MintError::ConfirmationMismatch(nft_mint.pubkey()))
            }
        }
    }
}

/// Token payment arguments the guard requires at mint time
pub fn resolve_token_payment(candy_guard: &CandyGuard) -> Result<TokenPaymentMintArgs> {
    match &candy_guard.guards.token_payment {
        Some(token_payment) => Ok(TokenPaymentMintArgs {
            mint: token_payment.mint,
            destination_ata: token_payment.destination_ata,
        }),
        None => Err(MintError::GuardUnsatisfied),
    }
}
