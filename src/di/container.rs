use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::interactor::{BatchInteractor, BatchInteractorImpl, SwapSettings};
use crate::ton::client::{create_ton_client, TonApi};
use crate::ton::dedust::{DeDustFactory, ExchangeFactory};
use crate::ton::{parse_address, TonWalletProvider, WalletProvider};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    ton_client: Arc<dyn TonApi>,

    // Exchange and wallet services
    exchange_factory: Arc<dyn ExchangeFactory>,
    wallet_provider: Arc<dyn WalletProvider>,

    batch_interactor: Arc<dyn BatchInteractor>,

    // Configuration
    config: Config,
}

impl ServiceContainer {
    /// Create a new service container; every client is built once here
    pub fn new(config: Config) -> Result<Self> {
        let ton_client = create_ton_client(&config).context("Failed to create TON client")?;

        let factory_address = parse_address(&config.factory_address)
            .context("DEDUST_FACTORY_ADDRESS is not a valid address")?;

        let exchange_factory = Arc::new(DeDustFactory::new(ton_client.clone(), factory_address))
            as Arc<dyn ExchangeFactory>;

        let wallet_provider = Arc::new(TonWalletProvider::new(
            ton_client.clone(),
            config.message_ttl_secs,
        )) as Arc<dyn WalletProvider>;

        let batch_interactor = Arc::new(BatchInteractorImpl::new(
            exchange_factory.clone(),
            wallet_provider.clone(),
            SwapSettings::from_config(&config)?,
        )) as Arc<dyn BatchInteractor>;

        Ok(Self {
            ton_client,
            exchange_factory,
            wallet_provider,
            batch_interactor,
            config,
        })
    }

    // Accessor methods

    pub fn ton_client(&self) -> Arc<dyn TonApi> {
        self.ton_client.clone()
    }

    pub fn exchange_factory(&self) -> Arc<dyn ExchangeFactory> {
        self.exchange_factory.clone()
    }

    pub fn wallet_provider(&self) -> Arc<dyn WalletProvider> {
        self.wallet_provider.clone()
    }

    pub fn batch_interactor(&self) -> Arc<dyn BatchInteractor> {
        self.batch_interactor.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
