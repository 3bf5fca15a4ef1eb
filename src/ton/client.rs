use crate::config::Config;
use crate::entity::BatchError;
use crate::ton::models::{
    AccountState, ApiResponse, RunGetMethodRequest, RunGetMethodResult, SendBocRequest, StackArg,
    StackEntry,
};
use crate::ton::rate_limiter::RateLimiter;
use crate::ton::utils::cell_to_base64;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tonlib_core::cell::Cell;
use tonlib_core::TonAddress;

/// Read and broadcast access to the TON network
#[async_trait]
pub trait TonApi: Send + Sync {
    /// Run a get-method and return its result stack
    async fn run_get_method(
        &self,
        address: &TonAddress,
        method: &str,
        stack: &[StackArg],
    ) -> Result<Vec<StackEntry>>;

    async fn get_account_state(&self, address: &TonAddress) -> Result<AccountState>;

    /// Broadcast a serialized external message
    async fn send_message(&self, message: &Cell) -> Result<()>;
}

/// toncenter v2 JSON API client
pub struct ToncenterClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: RateLimiter,
}

impl ToncenterClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            rate_limiter: RateLimiter::new(Duration::from_millis(config.request_interval_ms)),
        })
    }

    fn with_api_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) if !key.is_empty() => request.header("X-API-Key", key),
            _ => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T> {
        self.rate_limiter.wait_if_needed().await;

        let response = self.with_api_key(request).send().await.map_err(|e| {
            error!("Failed to call TON API [{}]: {}", what, e);
            anyhow!("Failed to call TON API [{}]: {}", what, e)
        })?;

        let status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            error!("Failed to parse TON API response [{}]: {}", what, e);
            anyhow!("Failed to parse TON API response [{}] (HTTP {}): {}", what, status, e)
        })?;

        Ok(body.into_result()?)
    }
}

#[async_trait]
impl TonApi for ToncenterClient {
    async fn run_get_method(
        &self,
        address: &TonAddress,
        method: &str,
        stack: &[StackArg],
    ) -> Result<Vec<StackEntry>> {
        debug!("Running get-method {} on {}", method, address);

        let request = RunGetMethodRequest {
            address: address.to_base64_url(),
            method: method.to_string(),
            stack: stack
                .iter()
                .map(StackArg::to_json)
                .collect::<Result<Vec<_>, _>>()?,
        };

        let result: RunGetMethodResult = self
            .execute(
                self.http_client
                    .post(format!("{}/runGetMethod", self.base_url))
                    .json(&request),
                method,
            )
            .await?;

        // Exit codes 0 and 1 are both successful TVM terminations
        if result.exit_code != 0 && result.exit_code != 1 {
            return Err(BatchError::TonApi(format!(
                "get-method {} on {} failed with exit code {}",
                method, address, result.exit_code
            ))
            .into());
        }

        let entries = result
            .stack
            .iter()
            .map(StackEntry::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    async fn get_account_state(&self, address: &TonAddress) -> Result<AccountState> {
        debug!("Getting account state of {}", address);

        self.execute(
            self.http_client
                .get(format!("{}/getAddressState", self.base_url))
                .query(&[("address", address.to_base64_url())]),
            "getAddressState",
        )
        .await
    }

    async fn send_message(&self, message: &Cell) -> Result<()> {
        let request = SendBocRequest {
            boc: cell_to_base64(message)?,
        };
        debug!("Sending external message, boc length {}", request.boc.len());

        let _: serde_json::Value = self
            .execute(
                self.http_client
                    .post(format!("{}/sendBoc", self.base_url))
                    .json(&request),
                "sendBoc",
            )
            .await?;

        Ok(())
    }
}

/// Create a shared toncenter client from configuration
pub fn create_ton_client(config: &Config) -> Result<Arc<dyn TonApi>> {
    Ok(Arc::new(ToncenterClient::new(config)?))
}
