// Candy guard mint input params

use solana_sdk::pubkey::Pubkey;

use crate::accounts::TokenStandard;

/// Token payment guard arguments supplied at mint time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPaymentMintArgs {
    pub mint: Pubkey,
    pub destination_ata: Pubkey,
}

/// Mint v2 parameters
#[derive(Debug, Clone)]
pub struct MintV2ParamsIx {
    pub candy_machine: Pubkey,
    pub candy_guard: Pubkey,
    pub payer: Pubkey,
    pub minter: Pubkey,
    pub nft_mint: Pubkey,
    pub collection_mint: Pubkey,
    pub collection_update_authority: Pubkey,
    pub token_standard: TokenStandard,
    pub token_payment: Option<TokenPaymentMintArgs>,
    pub group: Option<String>, // guard group label, None for the default set
}
