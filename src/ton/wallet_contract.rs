use crate::entity::BatchError;
use crate::ton::client::TonApi;
use crate::ton::models::AccountState;
use crate::ton::utils::from_nano;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use num_bigint::BigUint;
use std::sync::Arc;
use tonlib_core::cell::Cell;
use tonlib_core::message::TransferMessage;
use tonlib_core::wallet::TonWallet;
use tonlib_core::TonAddress;

/// Bounceable internal message a wallet is asked to send
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub to: TonAddress,
    pub value: u128,
    pub body: Option<Cell>,
}

/// Something that can send internal messages on behalf of a wallet
#[async_trait]
pub trait MessageSender: Send + Sync {
    fn address(&self) -> &TonAddress;

    async fn send(&self, message: OutgoingMessage) -> Result<()>;
}

/// Sender backed by the v4r2 wallet contract of a key pair.
///
/// A wallet that is not deployed yet gets its state init attached to the
/// first message and starts at seqno 0.
pub struct WalletV4Sender {
    api: Arc<dyn TonApi>,
    wallet: TonWallet,
    message_ttl_secs: u32,
}

impl WalletV4Sender {
    pub fn new(api: Arc<dyn TonApi>, wallet: TonWallet, message_ttl_secs: u32) -> Self {
        Self {
            api,
            wallet,
            message_ttl_secs,
        }
    }

    pub async fn seqno(&self) -> Result<u32> {
        let stack = self
            .api
            .run_get_method(&self.wallet.address, "seqno", &[])
            .await?;
        let seqno = stack
            .first()
            .ok_or_else(|| anyhow!("seqno get-method returned an empty stack"))?
            .as_u128()?;

        u32::try_from(seqno).map_err(|_| anyhow!("seqno {} out of range", seqno))
    }
}

#[async_trait]
impl MessageSender for WalletV4Sender {
    fn address(&self) -> &TonAddress {
        &self.wallet.address
    }

    async fn send(&self, message: OutgoingMessage) -> Result<()> {
        let deployed = self.api.get_account_state(&self.wallet.address).await? == AccountState::Active;
        let seqno = if deployed { self.seqno().await? } else { 0 };
        let valid_until = Utc::now().timestamp() as u32 + self.message_ttl_secs;

        debug!(
            "Wallet {} sending {} TON to {} (seqno {}, deployed: {})",
            self.wallet.address,
            from_nano(message.value),
            message.to,
            seqno,
            deployed
        );

        let signed = sign_transfer(&self.wallet, &message, seqno, valid_until)?;
        let external = self
            .wallet
            .wrap_signed_body(signed, !deployed)
            .map_err(|e| BatchError::Boc(e.to_string()))?;

        self.api.send_message(&external).await?;

        info!("Wallet {} message accepted for broadcast", self.wallet.address);
        Ok(())
    }
}

pub(crate) fn build_internal_message(message: &OutgoingMessage) -> Result<Cell, BatchError> {
    let mut transfer = TransferMessage::new(&message.to, &BigUint::from(message.value));
    if let Some(body) = &message.body {
        transfer.with_data(body.clone());
    }
    transfer.build().map_err(|e| BatchError::Boc(e.to_string()))
}

/// Signed v4 transfer body carrying `message` with send mode 3
pub(crate) fn sign_transfer(
    wallet: &TonWallet,
    message: &OutgoingMessage,
    seqno: u32,
    valid_until: u32,
) -> Result<Cell, BatchError> {
    let internal = build_internal_message(message)?;
    let body = wallet
        .create_external_body(valid_until, seqno, vec![Arc::new(internal)])
        .map_err(|e| BatchError::Boc(e.to_string()))?;

    wallet
        .sign_external_body(&body)
        .map_err(|e| BatchError::Boc(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ton::models::{StackArg, StackEntry};
    use crate::ton::utils::parse_address;
    use crate::ton::wallet::{wallet_for_key, WALLET_V4_SUBWALLET_ID};
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};
    use std::sync::Mutex;
    use tonlib_core::cell::CellBuilder;
    use tonlib_core::mnemonic::KeyPair;

    const VAULT: &str = "EQACAgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAsoi";

    fn key_pair() -> KeyPair {
        let signing = ed25519_dalek::SigningKey::from_bytes(&[42u8; 32]);
        KeyPair {
            public_key: signing.verifying_key().to_bytes().to_vec(),
            secret_key: signing.to_keypair_bytes().to_vec(),
        }
    }

    fn sample_message() -> OutgoingMessage {
        let mut body = CellBuilder::new();
        body.store_u32(32, 0xea06185d).unwrap();
        OutgoingMessage {
            to: parse_address(VAULT).unwrap(),
            value: 1_250_000_000,
            body: Some(body.build().unwrap()),
        }
    }

    #[test]
    fn test_internal_message_layout() {
        let message = sample_message();
        let cell = build_internal_message(&message).unwrap();
        let mut parser = cell.parser();

        assert!(!parser.load_bit().unwrap());
        assert!(parser.load_bit().unwrap());
        assert!(parser.load_bit().unwrap(), "swap messages must bounce");
        assert!(!parser.load_bit().unwrap());
        assert_eq!(parser.load_u8(2).unwrap(), 0);
        assert_eq!(parser.load_address().unwrap(), message.to);
        assert_eq!(parser.load_coins().unwrap(), BigUint::from(1_250_000_000u64));

        let body = cell.reference(0).unwrap();
        assert_eq!(
            body.cell_hash(),
            message.body.as_ref().unwrap().cell_hash()
        );
    }

    #[test]
    fn test_transfer_is_signed_by_wallet_key() {
        let keys = key_pair();
        let wallet = wallet_for_key(&keys).unwrap();
        let message = sample_message();

        let signed = sign_transfer(&wallet, &message, 7, 1_700_000_060).unwrap();
        let mut parser = signed.parser();
        let mut signature = [0u8; 64];
        for byte in signature.iter_mut() {
            *byte = parser.load_u8(8).unwrap();
        }
        assert_eq!(parser.load_u32(32).unwrap(), WALLET_V4_SUBWALLET_ID as u32);
        assert_eq!(parser.load_u32(32).unwrap(), 1_700_000_060);
        assert_eq!(parser.load_u32(32).unwrap(), 7);
        assert_eq!(parser.load_u8(8).unwrap(), 0);
        assert_eq!(parser.load_u8(8).unwrap(), 3);

        let unsigned = wallet
            .create_external_body(
                1_700_000_060,
                7,
                vec![Arc::new(build_internal_message(&message).unwrap())],
            )
            .unwrap();
        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(&keys.public_key);
        let verifying = VerifyingKey::from_bytes(&public_key).unwrap();
        assert!(verifying
            .verify(&unsigned.cell_hash()[..], &Signature::from_bytes(&signature))
            .is_ok());
    }

    struct FakeApi {
        state: AccountState,
        get_methods: Mutex<Vec<String>>,
        sent: Mutex<Vec<Cell>>,
    }

    #[async_trait]
    impl TonApi for FakeApi {
        async fn run_get_method(
            &self,
            _address: &TonAddress,
            method: &str,
            _stack: &[StackArg],
        ) -> Result<Vec<StackEntry>> {
            self.get_methods.lock().unwrap().push(method.to_string());
            Ok(vec![StackEntry::Num {
                negative: false,
                magnitude: vec![5],
            }])
        }

        async fn get_account_state(&self, _address: &TonAddress) -> Result<AccountState> {
            Ok(self.state)
        }

        async fn send_message(&self, message: &Cell) -> Result<()> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn sender(state: AccountState) -> (Arc<FakeApi>, WalletV4Sender) {
        let api = Arc::new(FakeApi {
            state,
            get_methods: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        });
        let wallet = wallet_for_key(&key_pair()).unwrap();
        (api.clone(), WalletV4Sender::new(api, wallet, 60))
    }

    #[tokio::test]
    async fn test_deployed_wallet_reads_seqno() {
        let (api, sender) = sender(AccountState::Active);
        sender.send(sample_message()).await.unwrap();

        assert_eq!(*api.get_methods.lock().unwrap(), vec!["seqno".to_string()]);

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let mut parser = sent[0].parser();
        parser.load_u8(4).unwrap();
        parser.load_address().unwrap();
        parser.load_coins().unwrap();
        assert!(!parser.load_bit().unwrap(), "deployed wallets need no state init");
    }

    #[tokio::test]
    async fn test_undeployed_wallet_sends_with_state_init() {
        let (api, sender) = sender(AccountState::Uninitialized);
        sender.send(sample_message()).await.unwrap();

        assert!(api.get_methods.lock().unwrap().is_empty());

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);

        let mut parser = sent[0].parser();
        assert_eq!(parser.load_u8(2).unwrap(), 0b10);
        assert_eq!(parser.load_u8(2).unwrap(), 0);
        assert_eq!(&parser.load_address().unwrap(), sender.address());
        assert_eq!(parser.load_coins().unwrap(), BigUint::from(0u8));
        assert!(parser.load_bit().unwrap(), "state init must be attached");
    }
}
