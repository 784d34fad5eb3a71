use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize, borsh};
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{
        CANDY_GUARD_DATA_OFFSET, CANDY_GUARD_DISCRIMINATOR, CANDY_MACHINE_DISCRIMINATOR,
        COST_PLACEHOLDER, GEMS_DISPLAY_DIVISOR, GEMS_SUFFIX,
    },
    error::{AccountKind, MintError, Result},
};

/// Candy Machine core account, decoded up to the end of its `CandyMachineData`.
/// Config lines stored after that are not read.
#[derive(Debug, Clone)]
pub struct CandyMachine {
    pub address: Pubkey,
    pub version: u8,
    pub token_standard: TokenStandard,
    pub features: [u8; 6],
    pub authority: Pubkey,
    /// The candy guard wrapping this machine
    pub mint_authority: Pubkey,
    pub collection_mint: Pubkey,
    pub items_redeemed: u64,
    pub data: CandyMachineData,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
struct CandyMachineAccount {
    version: u8,
    token_standard: u8,
    features: [u8; 6],
    authority: Pubkey,
    mint_authority: Pubkey,
    collection_mint: Pubkey,
    items_redeemed: u64,
    data: CandyMachineData,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct CandyMachineData {
    pub items_available: u64,
    pub symbol: String,
    pub seller_fee_basis_points: u16,
    pub max_supply: u64,
    pub is_mutable: bool,
    pub creators: Vec<Creator>,
    pub config_line_settings: Option<ConfigLineSettings>,
    pub hidden_settings: Option<HiddenSettings>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    pub percentage_share: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct ConfigLineSettings {
    pub prefix_name: String,
    pub name_length: u32,
    pub prefix_uri: String,
    pub uri_length: u32,
    pub is_sequential: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct HiddenSettings {
    pub name: String,
    pub uri: String,
    pub hash: [u8; 32],
}

/// Token standard of the NFTs a candy machine mints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStandard {
    NonFungible,
    ProgrammableNonFungible,
    Other(u8),
}

impl From<u8> for TokenStandard {
    fn from(value: u8) -> Self {
        match value {
            0 => TokenStandard::NonFungible,
            4 => TokenStandard::ProgrammableNonFungible,
            other => TokenStandard::Other(other),
        }
    }
}

impl CandyMachine {
    pub fn parse(address: Pubkey, data: &[u8]) -> Result<Self> {
        let body = strip_discriminator(
            AccountKind::CandyMachine,
            &address,
            data,
            &CANDY_MACHINE_DISCRIMINATOR,
        )?;

        let account = CandyMachineAccount::deserialize(&mut &body[..])
            .map_err(|e| invalid(AccountKind::CandyMachine, &address, e.to_string()))?;

        Ok(CandyMachine {
            address,
            version: account.version,
            token_standard: TokenStandard::from(account.token_standard),
            features: account.features,
            authority: account.authority,
            mint_authority: account.mint_authority,
            collection_mint: account.collection_mint,
            items_redeemed: account.items_redeemed,
            data: account.data,
        })
    }

    pub fn items_remaining(&self) -> u64 {
        self.data
            .items_available
            .saturating_sub(self.items_redeemed)
    }
}

/// Candy Guard account with its default guard set. Guard groups are not decoded.
#[derive(Debug, Clone)]
pub struct CandyGuard {
    pub address: Pubkey,
    pub base: Pubkey,
    pub bump: u8,
    pub authority: Pubkey,
    pub guards: GuardSet,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
struct CandyGuardHeader {
    base: Pubkey,
    bump: u8,
    authority: Pubkey,
}

/// Default guard set. `features` is the raw enabled-guard bitmask; the guards
/// up to and including token payment are decoded, later ones are only flagged.
#[derive(Debug, Clone, Default)]
pub struct GuardSet {
    pub features: u64,
    pub bot_tax: Option<BotTax>,
    pub sol_payment: Option<SolPayment>,
    pub token_payment: Option<TokenPayment>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct BotTax {
    pub lamports: u64,
    pub last_instruction: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SolPayment {
    pub lamports: u64,
    pub destination: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenPayment {
    pub amount: u64,
    pub mint: Pubkey,
    pub destination_ata: Pubkey,
}

// feature bit of each guard in the default guard set
const BOT_TAX_INDEX: u32 = 0;
const SOL_PAYMENT_INDEX: u32 = 1;
const TOKEN_PAYMENT_INDEX: u32 = 2;

impl GuardSet {
    pub fn is_enabled(&self, feature_index: u32) -> bool {
        self.features & (1u64 << feature_index) != 0
    }

    fn deserialize_guards(buf: &mut &[u8]) -> std::io::Result<Self> {
        let features = u64::deserialize(buf)?;
        let mut guards = GuardSet {
            features,
            ..Default::default()
        };

        if guards.is_enabled(BOT_TAX_INDEX) {
            guards.bot_tax = Some(BotTax::deserialize(buf)?);
        }
        if guards.is_enabled(SOL_PAYMENT_INDEX) {
            guards.sol_payment = Some(SolPayment::deserialize(buf)?);
        }
        if guards.is_enabled(TOKEN_PAYMENT_INDEX) {
            guards.token_payment = Some(TokenPayment::deserialize(buf)?);
        }

        Ok(guards)
    }
}

impl CandyGuard {
    pub fn parse(address: Pubkey, data: &[u8]) -> Result<Self> {
        let body = strip_discriminator(
            AccountKind::CandyGuard,
            &address,
            data,
            &CANDY_GUARD_DISCRIMINATOR,
        )?;

        let header = CandyGuardHeader::deserialize(&mut &body[..])
            .map_err(|e| invalid(AccountKind::CandyGuard, &address, e.to_string()))?;

        let mut guard_data = data.get(CANDY_GUARD_DATA_OFFSET..).unwrap_or_default();
        let guards = GuardSet::deserialize_guards(&mut guard_data)
            .map_err(|e| invalid(AccountKind::CandyGuard, &address, e.to_string()))?;

        Ok(CandyGuard {
            address,
            base: header.base,
            bump: header.bump,
            authority: header.authority,
            guards,
        })
    }
}

/// Displayed price for a guard: the token payment amount in GEMS, or the
/// placeholder when the guard charges no token payment.
pub fn format_cost(candy_guard: Option<&CandyGuard>) -> String {
    match candy_guard.and_then(|guard| guard.guards.token_payment.as_ref()) {
        Some(token_payment) => format!(
            "{}{}",
            token_payment.amount as f64 / GEMS_DISPLAY_DIVISOR,
            GEMS_SUFFIX
        ),
        None => COST_PLACEHOLDER.to_string(),
    }
}

fn strip_discriminator<'a>(
    kind: AccountKind,
    address: &Pubkey,
    data: &'a [u8],
    discriminator: &[u8; 8],
) -> Result<&'a [u8]> {
    match data.split_at_checked(8) {
        Some((head, body)) if head == discriminator => Ok(body),
        Some(_) => Err(invalid(kind, address, "discriminator mismatch".to_string())),
        None => Err(invalid(kind, address, "account data too short".to_string())),
    }
}

fn invalid(kind: AccountKind, address: &Pubkey, reason: String) -> MintError {
    MintError::InvalidAccountData {
        kind,
        address: *address,
        reason,
    }
}
