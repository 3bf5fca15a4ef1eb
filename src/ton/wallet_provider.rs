use crate::ton::client::TonApi;
use crate::ton::wallet::{mnemonic_to_key_pair, wallet_for_key};
use crate::ton::wallet_contract::{MessageSender, WalletV4Sender};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tonlib_core::mnemonic::KeyPair;

/// Turns wallet credentials into something that can send messages
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Derive the key pair encoded by a mnemonic
    async fn derive_key_pair(&self, mnemonic: &[String]) -> Result<KeyPair>;

    /// Open the wallet contract controlled by `keys`
    async fn open_sender(&self, keys: KeyPair) -> Result<Box<dyn MessageSender>>;
}

/// v4r2 basechain wallets reached through the TON API
pub struct TonWalletProvider {
    api: Arc<dyn TonApi>,
    message_ttl_secs: u32,
}

impl TonWalletProvider {
    pub fn new(api: Arc<dyn TonApi>, message_ttl_secs: u32) -> Self {
        Self {
            api,
            message_ttl_secs,
        }
    }
}

#[async_trait]
impl WalletProvider for TonWalletProvider {
    async fn derive_key_pair(&self, mnemonic: &[String]) -> Result<KeyPair> {
        let words = mnemonic.to_vec();
        // 100k PBKDF2 rounds; keep them off the async workers
        let keys = tokio::task::spawn_blocking(move || mnemonic_to_key_pair(&words))
            .await
            .map_err(|e| anyhow!("Key derivation task failed: {}", e))??;
        Ok(keys)
    }

    async fn open_sender(&self, keys: KeyPair) -> Result<Box<dyn MessageSender>> {
        let wallet = wallet_for_key(&keys)?;
        debug!("Opened wallet {}", wallet.address);

        Ok(Box::new(WalletV4Sender::new(
            self.api.clone(),
            wallet,
            self.message_ttl_secs,
        )))
    }
}
