use anyhow::Result;
use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use ton_batch_swap::config::ReadinessCheck;
use ton_batch_swap::entity::ReadinessStatus;
use ton_batch_swap::interactor::{BatchInteractor, BatchInteractorImpl, SwapSettings};
use ton_batch_swap::ton::dedust::{Asset, ExchangeFactory, PoolType, SwapRequest};
use ton_batch_swap::ton::{parse_address, parse_mnemonic, MessageSender, OutgoingMessage, WalletProvider};
use tonlib_core::mnemonic::KeyPair;
use tonlib_core::TonAddress;

const MNEMONIC: &str = "dose ice enrich trigger test dove century still betray gas diet dune use other base gym mad law immense village world example praise game";
const ADDRESS: &str = "EQACAgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAsoi";

/// Keeps info-and-above records emitted by this crate
struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) && record.target().starts_with("ton_batch_swap") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

fn address() -> TonAddress {
    parse_address(ADDRESS).unwrap()
}

struct ReadyFactory;

#[async_trait]
impl ExchangeFactory for ReadyFactory {
    async fn native_vault(&self) -> Result<TonAddress> {
        Ok(address())
    }

    async fn pool(&self, _pool_type: PoolType, _assets: [Asset; 2]) -> Result<TonAddress> {
        Ok(address())
    }

    async fn vault_readiness(&self, _vault: &TonAddress) -> Result<ReadinessStatus> {
        Ok(ReadinessStatus::Ready)
    }

    async fn pool_readiness(&self, _pool: &TonAddress) -> Result<ReadinessStatus> {
        Ok(ReadinessStatus::Ready)
    }

    async fn send_swap(
        &self,
        _sender: &dyn MessageSender,
        _vault: &TonAddress,
        _request: &SwapRequest,
    ) -> Result<()> {
        Ok(())
    }
}

struct NullSender(TonAddress);

#[async_trait]
impl MessageSender for NullSender {
    fn address(&self) -> &TonAddress {
        &self.0
    }

    async fn send(&self, _message: OutgoingMessage) -> Result<()> {
        Ok(())
    }
}

struct CheckingWalletProvider;

#[async_trait]
impl WalletProvider for CheckingWalletProvider {
    async fn derive_key_pair(&self, mnemonic: &[String]) -> Result<KeyPair> {
        parse_mnemonic(mnemonic)?;
        Ok(KeyPair {
            public_key: vec![1u8; 32],
            secret_key: vec![1u8; 64],
        })
    }

    async fn open_sender(&self, _keys: KeyPair) -> Result<Box<dyn MessageSender>> {
        Ok(Box::new(NullSender(address())))
    }
}

#[tokio::test]
async fn test_batch_log_lines() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "EQgood,{}", MNEMONIC).unwrap();
    writeln!(file, "EQshort,dose ice enrich").unwrap();

    let runner = BatchInteractorImpl::new(
        Arc::new(ReadyFactory),
        Arc::new(CheckingWalletProvider),
        SwapSettings {
            pool_type: PoolType::Volatile,
            target: Asset::Jetton(address()),
            amount_in: 1_000_000_000,
            gas_amount: 250_000_000,
            readiness_check: ReadinessCheck::PerLine,
        },
    );
    runner.process_wallets(file.path()).await.unwrap();

    let records = LOGGER.records.lock().unwrap();
    let messages: Vec<&str> = records.iter().map(|(_, m)| m.as_str()).collect();

    assert!(messages.contains(&"Swap successful for wallet: EQgood"));

    let failure = records
        .iter()
        .find(|(_, m)| m.starts_with("Error processing wallet EQshort: "))
        .expect("failure record");
    assert_eq!(failure.0, Level::Error);
    assert!(failure.1.contains("expected 24 words, got 3"));

    let done = messages
        .iter()
        .position(|m| *m == "All wallets processed.")
        .expect("completion record");
    assert_eq!(messages[done + 1], "1 succeeded, 1 failed");
    assert_eq!(messages.len(), done + 2, "summary is the last record");
}
