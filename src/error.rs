use std::fmt;

use solana_rpc_client_api::client_error::Error as ClientError;
use solana_sdk::{message::CompileError, pubkey::Pubkey, signer::SignerError};
use thiserror::Error;

/// The on-chain record a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    CandyMachine,
    CandyGuard,
    LookupTable,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::CandyMachine => write!(f, "Candy Machine"),
            AccountKind::CandyGuard => write!(f, "Candy Guard"),
            AccountKind::LookupTable => write!(f, "LUT"),
        }
    }
}

/// Mint flow errors. Every variant is terminal for the attempt that raised it.
///
/// The `Display` text is what the page shows as its status message.
#[derive(Debug, Error)]
pub enum MintError {
    /// A piece of configuration (env or loaded on-chain state) is missing
    #[error("Error with {0}")]
    ConfigurationMissing(&'static str),

    /// No wallet is connected, so there is nothing to sign with
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Wallet adapter could not produce a signer
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Expected on-chain record is absent
    #[error("Error with {kind}: account {address} not found")]
    NotFound { kind: AccountKind, address: Pubkey },

    /// Record exists but does not decode as the expected layout
    #[error("Error with {kind}: invalid account data at {address}: {reason}")]
    InvalidAccountData {
        kind: AccountKind,
        address: Pubkey,
        reason: String,
    },

    /// The guard has no token payment rule to pay with
    #[error("Error with token payment")]
    GuardUnsatisfied,

    /// Transport, signing or on-chain execution failure, message kept verbatim
    #[error("{0}")]
    SubmissionFailure(String),

    /// Transaction finalized but the new NFT is not observable
    #[error("Mint failed!")]
    ConfirmationMismatch(Pubkey),
}

impl From<ClientError> for MintError {
    fn from(err: ClientError) -> Self {
        MintError::SubmissionFailure(err.to_string())
    }
}

impl From<CompileError> for MintError {
    fn from(err: CompileError) -> Self {
        MintError::SubmissionFailure(err.to_string())
    }
}

impl From<SignerError> for MintError {
    fn from(err: SignerError) -> Self {
        MintError::SubmissionFailure(err.to_string())
    }
}

/// Result type alias for mint operations
pub type Result<T> = std::result::Result<T, MintError>;
