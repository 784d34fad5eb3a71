//! Environment configuration for the mint client

use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use solana_sdk::{commitment_config::CommitmentLevel, pubkey::Pubkey};

#[derive(Debug, Clone)]
pub struct Config {
    /// Solana RPC URL
    pub rpc_endpoint: String,

    /// Candy machine to mint from, `None` disables the mint page
    pub candy_machine: Option<Pubkey>,

    /// Address lookup table attached to mint transactions
    pub lookup_table: Option<Pubkey>,

    /// Keypair file of the wallet
    pub keypair_path: PathBuf,

    /// Commitment used for account reads
    pub commitment: CommitmentLevel,
}

impl Config {
    /// Load configuration from the process environment (after `.env`)
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("Could not load .env file: {}", e);
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let rpc_endpoint = get("RPC_ENDPOINT").context("RPC_ENDPOINT environment variable is required")?;
        if !rpc_endpoint.starts_with("http") {
            anyhow::bail!("RPC_ENDPOINT must start with http or https");
        }

        let candy_machine = get("CANDY_MACHINE_ID")
            .map(|value| Pubkey::from_str(value.trim()))
            .transpose()
            .context("Invalid CANDY_MACHINE_ID")?;

        let lookup_table = get("LUT_ACCOUNT")
            .map(|value| Pubkey::from_str(value.trim()))
            .transpose()
            .context("Invalid LUT_ACCOUNT")?;

        let keypair_path = get("KEYPAIR_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_keypair_path);

        let commitment = get("COMMITMENT")
            .map(|value| CommitmentLevel::from_str(value.trim()))
            .transpose()
            .map_err(|e| anyhow::anyhow!("Invalid COMMITMENT: {:?}", e))?
            .unwrap_or(CommitmentLevel::Confirmed);

        Ok(Config {
            rpc_endpoint,
            candy_machine,
            lookup_table,
            keypair_path,
            commitment,
        })
    }
}

/// Solana CLI default keypair location
pub fn default_keypair_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/solana/id.json")
}
