use anchor_lang::prelude::AccountMeta;
use solana_sdk::pubkey::Pubkey;

/// Accounts of the candy guard `mint_v2` instruction, in program order.
/// Optional accounts that are not used carry the candy guard program id.
pub(crate) struct CandyGuardMintV2 {
    pub candy_guard: Pubkey,
    pub candy_machine_program: Pubkey,
    pub candy_machine: Pubkey,
    pub candy_machine_authority_pda: Pubkey,
    pub payer: Pubkey,
    pub minter: Pubkey,
    pub nft_mint: Pubkey,
    pub nft_mint_authority: Pubkey,
    pub nft_metadata: Pubkey,
    pub nft_master_edition: Pubkey,
    pub token: Pubkey,
    pub token_record: Pubkey,
    pub collection_delegate_record: Pubkey,
    pub collection_mint: Pubkey,
    pub collection_metadata: Pubkey,
    pub collection_master_edition: Pubkey,
    pub collection_update_authority: Pubkey,
    pub token_metadata_program: Pubkey,
    pub spl_token_program: Pubkey,
    pub spl_ata_program: Pubkey,
    pub system_program: Pubkey,
    pub sysvar_instructions: Pubkey,
    pub recent_slothashes: Pubkey,
    pub authorization_rules_program: Pubkey,
    pub authorization_rules: Pubkey,
}

impl From<CandyGuardMintV2> for Vec<AccountMeta> {
    fn from(accounts: CandyGuardMintV2) -> Self {
        vec![
            AccountMeta::new_readonly(accounts.candy_guard, false),
            AccountMeta::new_readonly(accounts.candy_machine_program, false),
            AccountMeta::new(accounts.candy_machine, false),
            AccountMeta::new(accounts.candy_machine_authority_pda, false),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new(accounts.minter, true),
            AccountMeta::new(accounts.nft_mint, true),
            AccountMeta::new_readonly(accounts.nft_mint_authority, true),
            AccountMeta::new(accounts.nft_metadata, false),
            AccountMeta::new(accounts.nft_master_edition, false),
            AccountMeta::new(accounts.token, false),
            AccountMeta::new(accounts.token_record, false),
            AccountMeta::new_readonly(accounts.collection_delegate_record, false),
            AccountMeta::new_readonly(accounts.collection_mint, false),
            AccountMeta::new(accounts.collection_metadata, false),
            AccountMeta::new_readonly(accounts.collection_master_edition, false),
            AccountMeta::new_readonly(accounts.collection_update_authority, false),
            AccountMeta::new_readonly(accounts.token_metadata_program, false),
            AccountMeta::new_readonly(accounts.spl_token_program, false),
            AccountMeta::new_readonly(accounts.spl_ata_program, false),
            AccountMeta::new_readonly(accounts.system_program, false),
            AccountMeta::new_readonly(accounts.sysvar_instructions, false),
            AccountMeta::new_readonly(accounts.recent_slothashes, false),
            AccountMeta::new_readonly(accounts.authorization_rules_program, false),
            AccountMeta::new_readonly(accounts.authorization_rules, false),
        ]
    }
}

/// Remaining accounts the token payment guard reads during mint
pub(crate) struct TokenPaymentRemaining {
    pub token_account: Pubkey,
    pub destination_ata: Pubkey,
}

impl From<TokenPaymentRemaining> for Vec<AccountMeta> {
    fn from(accounts: TokenPaymentRemaining) -> Self {
        vec![
            AccountMeta::new(accounts.token_account, false),
            AccountMeta::new(accounts.destination_ata, false),
        ]
    }
}
