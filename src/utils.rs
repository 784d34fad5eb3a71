use solana_sdk::{
    address_lookup_table::{AddressLookupTableAccount, state::AddressLookupTable},
    pubkey::Pubkey,
};

use crate::{
    chain::ChainClient,
    constants::{
        CANDY_MACHINE_PROGRAM_ID, CANDY_MACHINE_SEED, COLLECTION_DELEGATE_SEED, EDITION_SEED,
        METADATA_PROGRAM_ID, METADATA_SEED, TOKEN_RECORD_SEED,
    },
    error::{AccountKind, MintError, Result},
};

/// Authority PDA the candy machine signs collection verification with
pub fn find_candy_machine_authority_pda(candy_machine: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[CANDY_MACHINE_SEED, candy_machine.as_ref()],
        &CANDY_MACHINE_PROGRAM_ID,
    )
    .0
}

pub fn find_metadata_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
    .0
}

pub fn find_master_edition_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &METADATA_PROGRAM_ID,
    )
    .0
}

/// Token record, only used by programmable NFTs
pub fn find_token_record_pda(mint: &Pubkey, token: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            TOKEN_RECORD_SEED,
            token.as_ref(),
        ],
        &METADATA_PROGRAM_ID,
    )
    .0
}

pub fn find_collection_delegate_record_pda(
    collection_mint: &Pubkey,
    collection_update_authority: &Pubkey,
    delegate: &Pubkey,
) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            METADATA_PROGRAM_ID.as_ref(),
            collection_mint.as_ref(),
            COLLECTION_DELEGATE_SEED,
            collection_update_authority.as_ref(),
            delegate.as_ref(),
        ],
        &METADATA_PROGRAM_ID,
    )
    .0
}

/// Associated token account of `owner` for a classic SPL token mint
pub fn get_user_token_account(owner: &Pubkey, token_mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), spl_token::ID.as_ref(), token_mint.as_ref()],
        &spl_associated_token_account::ID,
    )
    .0
}

/// Fetch and decode an address lookup table
pub async fn get_address_lookup_table<C: ChainClient + ?Sized>(
    client: &C,
    address: &Pubkey,
) -> Result<AddressLookupTableAccount> {
    let account = client
        .fetch_account(address)
        .await?
        .ok_or(MintError::NotFound {
            kind: AccountKind::LookupTable,
            address: *address,
        })?;

    let table =
        AddressLookupTable::deserialize(&account.data).map_err(|e| MintError::InvalidAccountData {
            kind: AccountKind::LookupTable,
            address: *address,
            reason: e.to_string(),
        })?;

    Ok(AddressLookupTableAccount {
        key: *address,
        addresses: table.addresses.to_vec(),
    })
}
