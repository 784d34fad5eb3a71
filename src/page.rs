use std::fmt::Write;

use solana_sdk::pubkey::Pubkey;

use crate::{
    accounts::{CandyGuard, CandyMachine, format_cost},
    chain::ChainClient,
    error::Result,
    sdk::{MintReceipt, MintSdk},
    wallet::Session,
};

pub const PAGE_TITLE: &str = "Doodlcorns";
pub const PAGE_DESCRIPTION: &str = "5,000 totally rad Doodlcorns chillin' on Solana.";
pub const MINT_SUCCESS_MESSAGE: &str = "MINTED!";
const MINT_BUTTON_LABEL: &str = "Mint";
const MINT_BUTTON_LOADING_LABEL: &str = "Minting your NFT...";

/// The mint page: loaded configuration, cost, loading flag and status message
pub struct MintPage<C: ChainClient> {
    sdk: MintSdk<C>,
    candy_machine: Option<CandyMachine>,
    candy_guard: Option<CandyGuard>,
    cost: String,
    form_message: Option<String>,
    is_loading: bool,
}

impl<C: ChainClient> MintPage<C> {
    pub fn new(sdk: MintSdk<C>) -> Self {
        Self {
            sdk,
            candy_machine: None,
            candy_guard: None,
            cost: format_cost(None),
            form_message: None,
            is_loading: false,
        }
    }

    /// Fetch the candy machine and guard once. Without a configured candy
    /// machine nothing is fetched and the page stays inert.
    pub async fn load(&mut self, candy_machine: Option<Pubkey>) -> Result<()> {
        let Some(candy_machine) = candy_machine else {
            log::warn!("No candy machine!");
            return Ok(());
        };

        let (candy_machine, candy_guard) = self.sdk.load_candy_machine(&candy_machine).await?;
        self.candy_machine = Some(candy_machine);
        self.set_candy_guard(candy_guard);

        Ok(())
    }

    pub fn set_candy_guard(&mut self, candy_guard: Option<CandyGuard>) {
        self.cost = format_cost(candy_guard.as_ref());
        self.candy_guard = candy_guard;
    }

    pub fn candy_machine(&self) -> Option<&CandyMachine> {
        self.candy_machine.as_ref()
    }

    pub fn candy_guard(&self) -> Option<&CandyGuard> {
        self.candy_guard.as_ref()
    }

    pub fn cost(&self) -> &str {
        &self.cost
    }

    pub fn form_message(&self) -> Option<&str> {
        self.form_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn mint_button_enabled(&self, session: Option<&Session>) -> bool {
        session.is_some() && !self.is_loading
    }

    pub fn mint_button_label(&self) -> &'static str {
        if self.is_loading {
            MINT_BUTTON_LOADING_LABEL
        } else {
            MINT_BUTTON_LABEL
        }
    }

    /// Run one mint attempt and turn its outcome into the status message.
    /// Does nothing while the button is disabled.
    pub async fn handle_mint(&mut self, session: Option<&Session>) -> Option<MintReceipt> {
        if !self.mint_button_enabled(session) {
            return None;
        }

        self.is_loading = true;
        let result = self
            .sdk
            .mint(session, self.candy_machine.as_ref(), self.candy_guard.as_ref())
            .await;
        self.is_loading = false;

        match result {
            Ok(receipt) => {
                self.form_message = Some(MINT_SUCCESS_MESSAGE.to_string());
                Some(receipt)
            }
            Err(e) => {
                log::error!("Mint failed: {:?}", e);
                self.form_message = Some(e.to_string());
                None
            }
        }
    }

    /// Render the page as text
    pub fn render(&self, session: Option<&Session>) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", PAGE_TITLE);
        let _ = writeln!(out, "{}", PAGE_DESCRIPTION);
        let _ = writeln!(out);
        let _ = writeln!(out, "GEMS  {}", self.cost);
        if let Some(candy_machine) = &self.candy_machine {
            let _ = writeln!(
                out,
                "Minted {}/{}",
                candy_machine.items_redeemed, candy_machine.data.items_available
            );
        }

        let button_state = if self.mint_button_enabled(session) {
            ""
        } else {
            " (disabled)"
        };
        let _ = writeln!(out, "[{}]{}", self.mint_button_label(), button_state);

        match session {
            Some(session) => {
                let _ = writeln!(out, "Wallet: {} ({})", session.address, session.wallet_name);
            }
            None => {
                let _ = writeln!(out, "Wallet: not connected");
            }
        }

        if let Some(message) = &self.form_message {
            let _ = writeln!(out, "{}", message);
        }

        out
    }
}
