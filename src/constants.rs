use lazy_static::lazy_static;
use solana_sdk::{hash::hash, pubkey, pubkey::Pubkey};

pub const CANDY_MACHINE_PROGRAM_ID: Pubkey = pubkey!("CndyV3LdqHUfDLmE5naZjVN8rBZz4tqhdefbAnjHG3JR");
pub const CANDY_GUARD_PROGRAM_ID: Pubkey = pubkey!("Guard1JwRhJkVH6XZhzoYxeBVQe872VH6QggF4BWmS9g");
pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

// mint_v2 needs far more than the default 200k
pub const MINT_COMPUTE_UNIT_LIMIT: u32 = 800_000;

// guard token payments are displayed in whole GEMS (2 decimals)
pub const GEMS_DISPLAY_DIVISOR: f64 = 100.0;
pub const GEMS_SUFFIX: &str = " GEMS";
pub const COST_PLACEHOLDER: &str = "GEMS MINT";

// SEEDS
pub const CANDY_MACHINE_SEED: &[u8] = b"candy_machine";
pub const METADATA_SEED: &[u8] = b"metadata";
pub const EDITION_SEED: &[u8] = b"edition";
pub const TOKEN_RECORD_SEED: &[u8] = b"token_record";
pub const COLLECTION_DELEGATE_SEED: &[u8] = b"collection_delegate";

/// candy guard account header: discriminator + base + bump + authority
pub const CANDY_GUARD_DATA_OFFSET: usize = 8 + 32 + 1 + 32;

lazy_static! {
    pub static ref CANDY_MACHINE_DISCRIMINATOR: [u8; 8] = anchor_discriminator("account:CandyMachine");
    pub static ref CANDY_GUARD_DISCRIMINATOR: [u8; 8] = anchor_discriminator("account:CandyGuard");
    pub static ref MINT_V2_DISCRIMINATOR: [u8; 8] = anchor_discriminator("global:mint_v2");
}

fn anchor_discriminator(preimage: &str) -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}
