//! Doodlcorns mint page in the terminal

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use doodlcorns_mint::{
    Config, KeypairFileWallet, MintPage, MintSdk, WalletAdapter, WalletSessionProvider,
    default_keypair_path,
};
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Keypair file of the wallet to connect
    #[arg(long, env = "KEYPAIR_PATH")]
    keypair: Option<PathBuf>,

    /// Wallet to connect, auto connects the first working one when unset
    #[arg(long, env = "WALLET")]
    wallet: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the mint page
    Show,
    /// Mint one NFT and show the result
    Mint,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // before parsing so .env values can back the env-aware flags
    dotenvy::dotenv().ok();
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let mut config = Config::from_env()?;
    if let Some(keypair) = args.keypair {
        config.keypair_path = keypair;
    }

    let rpc_client = RpcClient::new_with_commitment(
        config.rpc_endpoint.clone(),
        CommitmentConfig {
            commitment: config.commitment,
        },
    );
    let mut page = MintPage::new(MintSdk::new(rpc_client, config.lookup_table));
    page.load(config.candy_machine).await?;

    let mut wallets: Vec<Box<dyn WalletAdapter>> = Vec::new();
    wallets.push(Box::new(KeypairFileWallet::new(
        "keypair",
        config.keypair_path.clone(),
    )));
    if config.keypair_path != default_keypair_path() {
        wallets.push(Box::new(KeypairFileWallet::new(
            "solana-cli",
            default_keypair_path(),
        )));
    }

    let mut provider = WalletSessionProvider::new(wallets, args.wallet.is_none());
    match &args.wallet {
        Some(name) => {
            provider.connect(name)?;
        }
        None => {
            provider.try_auto_connect();
        }
    }

    match args.command {
        Command::Show => {}
        Command::Mint => {
            if let Some(receipt) = page.handle_mint(provider.session()).await {
                log::info!(
                    "NFT {} minted in transaction {}",
                    receipt.nft_mint,
                    receipt.signature
                );
            }
        }
    }

    print!("{}", page.render(provider.session()));

    Ok(())
}
