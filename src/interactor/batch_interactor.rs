use crate::config::{Config, ReadinessCheck};
use crate::entity::{BatchError, BatchReport, LineOutcome, WalletRecord};
use crate::ton::dedust::{Asset, ExchangeFactory, PoolType, SwapRequest, SwapRoute};
use crate::ton::{parse_address, to_nano, WalletProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::OnceCell;

/// Fixed parameters applied to every wallet of a batch
#[derive(Debug, Clone)]
pub struct SwapSettings {
    pub pool_type: PoolType,
    pub target: Asset,
    pub amount_in: u128,
    pub gas_amount: u128,
    pub readiness_check: ReadinessCheck,
}

impl SwapSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let target = parse_address(&config.target_jetton_address)
            .context("TARGET_JETTON_ADDRESS is not a valid address")?;

        Ok(Self {
            pool_type: PoolType::Volatile,
            target: Asset::Jetton(target),
            amount_in: to_nano(&config.swap_amount).context("Invalid swap amount")?,
            gas_amount: to_nano(&config.gas_amount).context("Invalid gas amount")?,
            readiness_check: config.readiness_check,
        })
    }
}

#[async_trait]
pub trait BatchInteractor: Send + Sync {
    /// Swap for every wallet listed in `path`, one line at a time.
    ///
    /// Per-line failures are logged and recorded in the report; only failing
    /// to open or read the file (or an unready route in `once` mode) is an error.
    async fn process_wallets(&self, path: &Path) -> Result<BatchReport>;
}

pub struct BatchInteractorImpl {
    factory: Arc<dyn ExchangeFactory>,
    wallet_provider: Arc<dyn WalletProvider>,
    settings: SwapSettings,
    route: OnceCell<SwapRoute>,
}

impl BatchInteractorImpl {
    pub fn new(
        factory: Arc<dyn ExchangeFactory>,
        wallet_provider: Arc<dyn WalletProvider>,
        settings: SwapSettings,
    ) -> Self {
        Self {
            factory,
            wallet_provider,
            settings,
            route: OnceCell::new(),
        }
    }

    /// Vault and pool addresses, resolved on first use and cached on success
    async fn route(&self) -> Result<SwapRoute> {
        let route = self
            .route
            .get_or_try_init(|| async {
                let vault = self.factory.native_vault().await?;
                let pool = self
                    .factory
                    .pool(
                        self.settings.pool_type,
                        [Asset::Native, self.settings.target.clone()],
                    )
                    .await?;
                info!("Swap route: vault {} -> pool {}", vault, pool);
                Ok::<_, anyhow::Error>(SwapRoute { vault, pool })
            })
            .await?;

        Ok(route.clone())
    }

    async fn ensure_ready(&self, route: &SwapRoute) -> Result<()> {
        let pool_status = self.factory.pool_readiness(&route.pool).await?;
        if !pool_status.is_ready() {
            debug!("Pool {} readiness: {}", route.pool, pool_status);
            return Err(BatchError::PoolUnavailable(format!(
                "{}, {}",
                Asset::Native,
                self.settings.target
            ))
            .into());
        }

        let vault_status = self.factory.vault_readiness(&route.vault).await?;
        if !vault_status.is_ready() {
            debug!("Vault {} readiness: {}", route.vault, vault_status);
            return Err(BatchError::VaultUnavailable(Asset::Native.to_string()).into());
        }

        Ok(())
    }

    /// Returns the address listed on the line on success.
    ///
    /// That address only labels the line; the swap is sent from the v4r2
    /// wallet of the derived key.
    async fn process_line(&self, line: &str) -> Result<String> {
        let route = self.route().await?;
        if self.settings.readiness_check == ReadinessCheck::PerLine {
            self.ensure_ready(&route).await?;
        }

        let record = WalletRecord::parse_line(line)?;

        let keys = self
            .wallet_provider
            .derive_key_pair(&record.mnemonic)
            .await?;
        let sender = self.wallet_provider.open_sender(keys).await?;
        debug!(
            "Wallet {} sends from {}",
            record.address,
            sender.address()
        );

        let request = SwapRequest {
            pool_address: route.pool.clone(),
            amount_in: self.settings.amount_in,
            gas_amount: self.settings.gas_amount,
        };
        self.factory
            .send_swap(sender.as_ref(), &route.vault, &request)
            .await?;

        Ok(record.address)
    }
}

#[async_trait]
impl BatchInteractor for BatchInteractorImpl {
    async fn process_wallets(&self, path: &Path) -> Result<BatchReport> {
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open wallet file {}", path.display()))?;

        if self.settings.readiness_check == ReadinessCheck::Once {
            let route = self.route().await?;
            self.ensure_ready(&route).await?;
        }

        let mut lines = BufReader::new(file).lines();
        let mut report = BatchReport::default();
        let mut index = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .with_context(|| format!("Failed to read wallet file {}", path.display()))?
        {
            index += 1;
            if line.trim().is_empty() {
                continue;
            }

            let label = line.split(',').next().unwrap_or_default().trim().to_string();

            match self.process_line(&line).await {
                Ok(address) => {
                    info!("Swap successful for wallet: {}", address);
                    report.outcomes.push(LineOutcome {
                        index,
                        address,
                        error_message: None,
                    });
                }
                Err(e) => {
                    error!("Error processing wallet {}: {:#}", label, e);
                    debug!("Failed wallet {} is on line {}", label, index);
                    report.outcomes.push(LineOutcome {
                        index,
                        address: label,
                        error_message: Some(format!("{:#}", e)),
                    });
                }
            }
        }

        info!("All wallets processed.");
        info!(
            "{} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );

        Ok(report)
    }
}
