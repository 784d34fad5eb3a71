use anchor_lang::{AnchorSerialize, prelude::AccountMeta};
use solana_sdk::{instruction::Instruction, system_program, sysvar};

use crate::{
    account_metas::{CandyGuardMintV2, TokenPaymentRemaining},
    accounts::TokenStandard,
    constants::{
        CANDY_GUARD_PROGRAM_ID, CANDY_MACHINE_PROGRAM_ID, METADATA_PROGRAM_ID,
        MINT_V2_DISCRIMINATOR,
    },
    error::{MintError, Result},
    mint_params::MintV2ParamsIx,
    utils::{
        find_candy_machine_authority_pda, find_collection_delegate_record_pda,
        find_master_edition_pda, find_metadata_pda, find_token_record_pda,
        get_user_token_account,
    },
};

/// Mint v2 instruction data and accounts
#[derive(Debug, Clone)]
pub struct MintV2AndAccountMetas {
    pub data: Vec<u8>,
    pub account_metas: Vec<AccountMeta>,
}

impl MintV2AndAccountMetas {
    pub fn into_instruction(self) -> Instruction {
        Instruction {
            program_id: CANDY_GUARD_PROGRAM_ID,
            accounts: self.account_metas,
            data: self.data,
        }
    }
}

pub fn get_mint_v2_and_account_metas(params: &MintV2ParamsIx) -> Result<MintV2AndAccountMetas> {
    let MintV2ParamsIx {
        candy_machine,
        candy_guard,
        payer,
        minter,
        nft_mint,
        collection_mint,
        collection_update_authority,
        token_standard,
        token_payment,
        group,
    } = params;

    let candy_machine_authority_pda = find_candy_machine_authority_pda(candy_machine);
    let token = get_user_token_account(minter, nft_mint);

    let token_record = if *token_standard == TokenStandard::ProgrammableNonFungible {
        find_token_record_pda(nft_mint, &token)
    } else {
        CANDY_GUARD_PROGRAM_ID
    };

    // token payment contributes remaining accounts only, no argument bytes
    let mint_args: Vec<u8> = Vec::new();

    let mut data = MINT_V2_DISCRIMINATOR.to_vec();
    (mint_args, group.clone())
        .serialize(&mut data)
        .map_err(|e| MintError::SubmissionFailure(format!("Failed to encode mint args: {}", e)))?;

    let mut account_metas: Vec<AccountMeta> = CandyGuardMintV2 {
        candy_guard: *candy_guard,
        candy_machine_program: CANDY_MACHINE_PROGRAM_ID,
        candy_machine: *candy_machine,
        candy_machine_authority_pda,
        payer: *payer,
        minter: *minter,
        nft_mint: *nft_mint,
        nft_mint_authority: *minter,
        nft_metadata: find_metadata_pda(nft_mint),
        nft_master_edition: find_master_edition_pda(nft_mint),
        token,
        token_record,
        collection_delegate_record: find_collection_delegate_record_pda(
            collection_mint,
            collection_update_authority,
            &candy_machine_authority_pda,
        ),
        collection_mint: *collection_mint,
        collection_metadata: find_metadata_pda(collection_mint),
        collection_master_edition: find_master_edition_pda(collection_mint),
        collection_update_authority: *collection_update_authority,
        token_metadata_program: METADATA_PROGRAM_ID,
        spl_token_program: spl_token::ID,
        spl_ata_program: spl_associated_token_account::ID,
        system_program: system_program::ID,
        sysvar_instructions: sysvar::instructions::ID,
        recent_slothashes: sysvar::slot_hashes::ID,
        authorization_rules_program: CANDY_GUARD_PROGRAM_ID,
        authorization_rules: CANDY_GUARD_PROGRAM_ID,
    }
    .into();

    if let Some(token_payment) = token_payment {
        let remaining: Vec<AccountMeta> = TokenPaymentRemaining {
            token_account: get_user_token_account(payer, &token_payment.mint),
            destination_ata: token_payment.destination_ata,
        }
        .into();
        account_metas.extend(remaining);
    }

    Ok(MintV2AndAccountMetas {
        data,
        account_metas,
    })
}
