//! # Doodlcorns Mint
//!
//! A client for minting Doodlcorns NFTs from a Metaplex Candy Machine (v3) wrapped by a Candy
//! Guard whose default guard set charges a token payment in GEMS.
//!
//! The crate is split along the same lines as the mint page it backs:
//!
//! 1. **Wallet session** ([`WalletSessionProvider`]): supported wallets and the connected [`Session`]
//! 2. **Chain reads** ([`ChainClient`], [`fetch_candy_machine`], [`safe_fetch_candy_guard`]): on-chain configuration
//! 3. **Mint flow** ([`MintSdk`]): builds, sends and confirms the mint transaction
//! 4. **Page** ([`MintPage`]): cost, mint button and a single status message
//!
//! ## 🚀 Quick Start
//!
//! ```rust,ignore
//! use doodlcorns_mint::{MintPage, MintSdk, Session};
//! use solana_rpc_client::nonblocking::rpc_client::RpcClient;
//! use solana_sdk::{commitment_config::CommitmentConfig, signature::Keypair};
//! use std::sync::Arc;
//!
//! let rpc_client = RpcClient::new_with_commitment(
//!     "https://api.devnet.solana.com".to_string(),
//!     CommitmentConfig::confirmed(),
//! );
//! let sdk = MintSdk::new(rpc_client, Some(lookup_table));
//!
//! let mut page = MintPage::new(sdk);
//! page.load(Some(candy_machine)).await?;
//! println!("Price: {}", page.cost()); // e.g. "2.5 GEMS"
//!
//! let session = Session::new("keypair", Arc::new(Keypair::new()));
//! page.handle_mint(Some(&session)).await;
//! println!("{}", page.form_message().unwrap_or_default()); // "MINTED!" on success
//! ```
//!
//! ## Mint transaction
//!
//! Every attempt uses a freshly generated NFT mint keypair and a lookup table fetched at that
//! moment. The transaction holds two instructions:
//! - a compute budget instruction raising the limit to 800,000 units
//! - the candy guard `mint_v2` instruction with the token payment accounts
//!
//! It is sent with preflight skipped and the client waits for `finalized` before looking the
//! NFT up. A finalized transaction whose NFT cannot be found is reported as
//! [`MintError::ConfirmationMismatch`] (`"Mint failed!"`); that check is not retried.
//!
//! ## Instruction level access
//!
//! [`MintSdk::mint_ix`] returns just the `mint_v2` instruction and [`MintSdk::mint_tx`] an unsigned
//! v0 transaction, for callers that sign and send on their own.
//!
//! ## Errors
//!
//! All operations return [`MintError`]. No error is retried; the page turns the error into its
//! status message.

mod account_metas;
mod accounts;
mod chain;
mod config;
mod constants;
mod error;
mod instruction;
mod mint_params;
mod page;
mod sdk;
mod utils;
mod wallet;

pub use sdk::{MintReceipt, MintSdk, resolve_token_payment};

pub use accounts::{
    BotTax, CandyGuard, CandyMachine, CandyMachineData, ConfigLineSettings, Creator, GuardSet,
    HiddenSettings, SolPayment, TokenPayment, TokenStandard, format_cost,
};
pub use chain::{
    ChainClient, DigitalAsset, fetch_candy_machine, fetch_digital_asset, safe_fetch_candy_guard,
};
pub use config::{Config, default_keypair_path};
pub use error::{AccountKind, MintError, Result};
pub use instruction::{MintV2AndAccountMetas, get_mint_v2_and_account_metas};
pub use mint_params::{MintV2ParamsIx, TokenPaymentMintArgs};
pub use page::{MINT_SUCCESS_MESSAGE, MintPage, PAGE_DESCRIPTION, PAGE_TITLE};
pub use utils::{
    find_candy_machine_authority_pda, find_master_edition_pda, find_metadata_pda,
    get_address_lookup_table, get_user_token_account,
};
pub use wallet::{
    KeypairFileWallet, KeypairWallet, Session, SharedSigner, WalletAdapter, WalletSessionProvider,
};

pub use constants::{
    CANDY_GUARD_PROGRAM_ID, CANDY_MACHINE_PROGRAM_ID, METADATA_PROGRAM_ID, MINT_COMPUTE_UNIT_LIMIT,
};
