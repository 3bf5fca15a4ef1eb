use crate::entity::{BatchError, ReadinessStatus};
use crate::ton::client::TonApi;
use crate::ton::dedust::models::{Asset, PoolType, SwapRequest};
use crate::ton::dedust::vault::send_native_swap;
use crate::ton::models::{AccountState, StackArg, StackEntry};
use crate::ton::wallet_contract::MessageSender;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use tonlib_core::TonAddress;

/// Exchange operations the batch runner needs
#[async_trait]
pub trait ExchangeFactory: Send + Sync {
    /// Address of the vault holding native TON
    async fn native_vault(&self) -> Result<TonAddress>;

    /// Address of the pool trading `assets`
    async fn pool(&self, pool_type: PoolType, assets: [Asset; 2]) -> Result<TonAddress>;

    async fn vault_readiness(&self, vault: &TonAddress) -> Result<ReadinessStatus>;

    async fn pool_readiness(&self, pool: &TonAddress) -> Result<ReadinessStatus>;

    /// Submit a native-coin swap through `vault`; no confirmation is awaited
    async fn send_swap(
        &self,
        sender: &dyn MessageSender,
        vault: &TonAddress,
        request: &SwapRequest,
    ) -> Result<()>;
}

/// DeDust factory contract reached through the TON API
pub struct DeDustFactory {
    api: Arc<dyn TonApi>,
    factory_address: TonAddress,
}

impl DeDustFactory {
    pub fn new(api: Arc<dyn TonApi>, factory_address: TonAddress) -> Self {
        Self {
            api,
            factory_address,
        }
    }

    async fn address_from_get_method(&self, method: &str, stack: &[StackArg]) -> Result<TonAddress> {
        let result = self
            .api
            .run_get_method(&self.factory_address, method, stack)
            .await?;

        let cell = result
            .first()
            .ok_or_else(|| anyhow!("{} returned an empty stack", method))?
            .as_cell()?;

        let address = cell.parser().load_address().map_err(BatchError::from)?;
        if address == TonAddress::NULL {
            return Err(BatchError::TonApi(format!("{} returned addr_none", method)).into());
        }
        Ok(address)
    }
}

#[async_trait]
impl ExchangeFactory for DeDustFactory {
    async fn native_vault(&self) -> Result<TonAddress> {
        let vault = self
            .address_from_get_method("get_vault_address", &[StackArg::Slice(Asset::Native.to_cell()?)])
            .await?;

        debug!("Native vault resolved to {}", vault);
        Ok(vault)
    }

    async fn pool(&self, pool_type: PoolType, assets: [Asset; 2]) -> Result<TonAddress> {
        let stack = [
            StackArg::Int(pool_type.id()),
            StackArg::Slice(assets[0].to_cell()?),
            StackArg::Slice(assets[1].to_cell()?),
        ];
        let pool = self.address_from_get_method("get_pool_address", &stack).await?;

        debug!(
            "Pool {:?} ({}, {}) resolved to {}",
            pool_type, assets[0], assets[1], pool
        );
        Ok(pool)
    }

    async fn vault_readiness(&self, vault: &TonAddress) -> Result<ReadinessStatus> {
        match self.api.get_account_state(vault).await? {
            AccountState::Active => Ok(ReadinessStatus::Ready),
            _ => Ok(ReadinessStatus::NotDeployed),
        }
    }

    async fn pool_readiness(&self, pool: &TonAddress) -> Result<ReadinessStatus> {
        if self.api.get_account_state(pool).await? != AccountState::Active {
            return Ok(ReadinessStatus::NotDeployed);
        }

        let reserves = self.api.run_get_method(pool, "get_reserves", &[]).await?;
        let (reserve0, reserve1) = match reserves.as_slice() {
            [first, second, ..] => (first.as_u128()?, second.as_u128()?),
            _ => return Err(anyhow!("get_reserves returned {} entries", reserves.len())),
        };

        debug!("Pool {} reserves: {} / {}", pool, reserve0, reserve1);

        if reserve0 > 0 && reserve1 > 0 {
            Ok(ReadinessStatus::Ready)
        } else {
            Ok(ReadinessStatus::NotReady)
        }
    }

    async fn send_swap(
        &self,
        sender: &dyn MessageSender,
        vault: &TonAddress,
        request: &SwapRequest,
    ) -> Result<()> {
        send_native_swap(sender, vault, request).await?;
        info!("Swap submitted for wallet {}", sender.address());
        Ok(())
    }
}
