#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use doodlcorns_mint::{
    CANDY_GUARD_PROGRAM_ID, CANDY_MACHINE_PROGRAM_ID, ChainClient, METADATA_PROGRAM_ID, MintError,
};
use solana_sdk::{
    account::Account,
    address_lookup_table,
    commitment_config::CommitmentConfig,
    hash::{Hash, hash},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_program,
    transaction::VersionedTransaction,
};

#[derive(Default)]
struct FakeState {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    sent: Mutex<Vec<VersionedTransaction>>,
    send_error: Mutex<Option<String>>,
    skip_preflight: Mutex<Vec<bool>>,
    confirmations: Mutex<Vec<CommitmentConfig>>,
    reveal_minted_assets: Mutex<bool>,
}

/// In-memory chain: serves accounts from a map and records sent transactions.
/// When `reveal_minted_assets` is on, every account referenced by a sent
/// transaction reads back as existing, which makes the new NFT observable.
#[derive(Clone, Default)]
pub struct FakeChain {
    state: Arc<FakeState>,
}

impl FakeChain {
    pub fn new() -> Self {
        let chain = Self::default();
        chain.set_reveal_minted_assets(true);
        chain
    }

    pub fn insert_account(&self, address: Pubkey, data: Vec<u8>) {
        self.insert_owned_account(address, data, system_program::ID);
    }

    pub fn insert_owned_account(&self, address: Pubkey, data: Vec<u8>, owner: Pubkey) {
        self.state.accounts.lock().unwrap().insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn set_reveal_minted_assets(&self, reveal: bool) {
        *self.state.reveal_minted_assets.lock().unwrap() = reveal;
    }

    pub fn fail_sends_with(&self, message: &str) {
        *self.state.send_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn sent_transactions(&self) -> Vec<VersionedTransaction> {
        self.state.sent.lock().unwrap().clone()
    }

    /// `skip_preflight` flag of every submission, in order
    pub fn skip_preflight_flags(&self) -> Vec<bool> {
        self.state.skip_preflight.lock().unwrap().clone()
    }

    /// Commitment requested by every confirmation, in order
    pub fn confirmation_commitments(&self) -> Vec<CommitmentConfig> {
        self.state.confirmations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, MintError> {
        if let Some(account) = self.state.accounts.lock().unwrap().get(address) {
            return Ok(Some(account.clone()));
        }

        let reveal = *self.state.reveal_minted_assets.lock().unwrap();
        let referenced = self
            .state
            .sent
            .lock()
            .unwrap()
            .iter()
            .any(|tx| tx.message.static_account_keys().contains(address));

        Ok((reveal && referenced).then(Account::default))
    }

    async fn latest_blockhash(&self) -> Result<Hash, MintError> {
        Ok(Hash::new_unique())
    }

    async fn send_versioned_transaction(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<Signature, MintError> {
        self.state.skip_preflight.lock().unwrap().push(skip_preflight);
        if let Some(message) = self.state.send_error.lock().unwrap().clone() {
            return Err(MintError::SubmissionFailure(message));
        }

        self.state.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn confirm_signature(
        &self,
        _signature: &Signature,
        _recent_blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> Result<(), MintError> {
        self.state.confirmations.lock().unwrap().push(commitment);
        Ok(())
    }
}

/// Addresses of a candy machine deployment seeded into a `FakeChain`
pub struct Deployment {
    pub candy_machine: Pubkey,
    pub candy_guard: Pubkey,
    pub authority: Pubkey,
    pub collection_mint: Pubkey,
    pub payment_mint: Pubkey,
    pub destination_ata: Pubkey,
    pub lookup_table: Pubkey,
}

impl Deployment {
    pub fn new() -> Self {
        Self {
            candy_machine: Pubkey::new_unique(),
            candy_guard: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            collection_mint: Pubkey::new_unique(),
            payment_mint: Pubkey::new_unique(),
            destination_ata: Pubkey::new_unique(),
            lookup_table: Pubkey::new_unique(),
        }
    }

    /// Seed candy machine, guard (with or without a token payment) and lookup table
    pub fn seed(&self, chain: &FakeChain, token_payment_amount: Option<u64>) {
        chain.insert_owned_account(
            self.candy_machine,
            self.candy_machine_data(),
            CANDY_MACHINE_PROGRAM_ID,
        );
        chain.insert_owned_account(
            self.candy_guard,
            self.candy_guard_data(token_payment_amount),
            CANDY_GUARD_PROGRAM_ID,
        );
        chain.insert_owned_account(
            self.lookup_table,
            lookup_table_data(&[METADATA_PROGRAM_ID, spl_token::ID, system_program::ID]),
            address_lookup_table::program::id(),
        );
    }

    pub fn candy_machine_data(&self) -> Vec<u8> {
        let mut data = discriminator("account:CandyMachine").to_vec();
        data.push(1); // version
        data.push(0); // token standard: NonFungible
        data.extend_from_slice(&[0u8; 6]);
        data.extend_from_slice(self.authority.as_ref());
        data.extend_from_slice(self.candy_guard.as_ref());
        data.extend_from_slice(self.collection_mint.as_ref());
        data.extend_from_slice(&12u64.to_le_bytes()); // items redeemed
        data.extend_from_slice(&5_000u64.to_le_bytes()); // items available
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(b"DOOD");
        data.extend_from_slice(&500u16.to_le_bytes());
        data.extend_from_slice(&0u64.to_le_bytes());
        data.push(1); // is mutable
        data.extend_from_slice(&0u32.to_le_bytes()); // no creators
        data.push(0); // no config line settings
        data.push(0); // no hidden settings
        data
    }

    pub fn candy_guard_data(&self, token_payment_amount: Option<u64>) -> Vec<u8> {
        let mut data = discriminator("account:CandyGuard").to_vec();
        data.extend_from_slice(Pubkey::new_unique().as_ref()); // base
        data.push(254);
        data.extend_from_slice(self.authority.as_ref());

        match token_payment_amount {
            Some(amount) => {
                data.extend_from_slice(&(1u64 << 2).to_le_bytes());
                data.extend_from_slice(&amount.to_le_bytes());
                data.extend_from_slice(self.payment_mint.as_ref());
                data.extend_from_slice(self.destination_ata.as_ref());
            }
            None => data.extend_from_slice(&0u64.to_le_bytes()),
        }
        data.extend_from_slice(&0u32.to_le_bytes()); // no groups
        data
    }
}

/// Serialized address lookup table: 56 byte meta followed by the addresses
pub fn lookup_table_data(addresses: &[Pubkey]) -> Vec<u8> {
    let mut data = 1u32.to_le_bytes().to_vec(); // initialized lookup table
    data.extend_from_slice(&u64::MAX.to_le_bytes()); // deactivation slot
    data.extend_from_slice(&0u64.to_le_bytes()); // last extended slot
    data.push(0); // last extended slot start index
    data.push(0); // no authority
    data.resize(56, 0);
    for address in addresses {
        data.extend_from_slice(address.as_ref());
    }
    data
}

pub fn discriminator(preimage: &str) -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

pub fn wallet_keypair() -> (Keypair, Pubkey) {
    let keypair = Keypair::new();
    let pubkey = keypair.pubkey();
    (keypair, pubkey)
}
