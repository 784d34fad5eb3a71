use std::{path::PathBuf, sync::Arc};

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, read_keypair_file},
    signer::Signer,
};

use crate::error::{MintError, Result};

/// Signer shared between the session and the transactions it signs
pub type SharedSigner = Arc<dyn Signer + Send + Sync>;

/// A wallet integration the user can connect with
pub trait WalletAdapter: Send + Sync {
    fn name(&self) -> &str;

    /// Produce the signer for this wallet
    fn connect(&self) -> Result<SharedSigner>;
}

/// Wallet backed by a Solana CLI keypair file
pub struct KeypairFileWallet {
    name: String,
    path: PathBuf,
}

impl KeypairFileWallet {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl WalletAdapter for KeypairFileWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&self) -> Result<SharedSigner> {
        let keypair = read_keypair_file(&self.path).map_err(|e| {
            MintError::Wallet(format!(
                "Failed to read keypair file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let signer: SharedSigner = Arc::new(keypair);
        Ok(signer)
    }
}

/// Wallet holding a keypair in memory
pub struct KeypairWallet {
    name: String,
    keypair: Arc<Keypair>,
}

impl KeypairWallet {
    pub fn new(name: impl Into<String>, keypair: Keypair) -> Self {
        Self {
            name: name.into(),
            keypair: Arc::new(keypair),
        }
    }
}

impl WalletAdapter for KeypairWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&self) -> Result<SharedSigner> {
        let signer: SharedSigner = self.keypair.clone();
        Ok(signer)
    }
}

/// The connected account and its signing capability
#[derive(Clone)]
pub struct Session {
    pub wallet_name: String,
    pub address: Pubkey,
    pub signer: SharedSigner,
}

impl Session {
    pub fn new(wallet_name: impl Into<String>, signer: SharedSigner) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            address: signer.pubkey(),
            signer,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("wallet_name", &self.wallet_name)
            .field("address", &self.address)
            .finish()
    }
}

/// Supported wallets plus the currently connected session
pub struct WalletSessionProvider {
    wallets: Vec<Box<dyn WalletAdapter>>,
    auto_connect: bool,
    session: Option<Session>,
}

impl WalletSessionProvider {
    pub fn new(wallets: Vec<Box<dyn WalletAdapter>>, auto_connect: bool) -> Self {
        Self {
            wallets,
            auto_connect,
            session: None,
        }
    }

    pub fn wallet_names(&self) -> Vec<&str> {
        self.wallets.iter().map(|wallet| wallet.name()).collect()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Connect the wallet called `name`, replacing any existing session
    pub fn connect(&mut self, name: &str) -> Result<&Session> {
        let wallet = self
            .wallets
            .iter()
            .find(|wallet| wallet.name() == name)
            .ok_or_else(|| MintError::Wallet(format!("Unknown wallet: {}", name)))?;

        let session = Session::new(wallet.name(), wallet.connect()?);
        log::info!("Connected {} wallet {}", session.wallet_name, session.address);

        Ok(self.session.insert(session))
    }

    /// Connect the first wallet that succeeds, when auto connect is on
    pub fn try_auto_connect(&mut self) -> Option<&Session> {
        if !self.auto_connect || self.session.is_some() {
            return self.session.as_ref();
        }

        for wallet in &self.wallets {
            match wallet.connect() {
                Ok(signer) => {
                    let session = Session::new(wallet.name(), signer);
                    log::info!("Auto connected {} wallet {}", session.wallet_name, session.address);
                    self.session = Some(session);
                    break;
                }
                Err(e) => log::debug!("Skipping wallet {}: {}", wallet.name(), e),
            }
        }

        self.session.as_ref()
    }

    pub fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Disconnected wallet {}", session.address);
        }
    }
}
