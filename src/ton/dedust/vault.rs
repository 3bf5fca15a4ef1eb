use crate::entity::BatchError;
use crate::ton::dedust::models::{SwapRequest, VAULT_NATIVE_SWAP_OP};
use crate::ton::utils::from_nano;
use crate::ton::wallet_contract::{MessageSender, OutgoingMessage};
use anyhow::Result;
use log::info;
use num_bigint::BigUint;
use std::sync::Arc;
use tonlib_core::cell::{Cell, CellBuilder};
use tonlib_core::TonAddress;

/// Swap params with no deadline, recipient, referral or payloads
fn build_swap_params() -> Result<Cell, BatchError> {
    let mut builder = CellBuilder::new();
    builder
        .store_u32(32, 0)?
        .store_address(&TonAddress::NULL)?
        .store_address(&TonAddress::NULL)?
        .store_bit(false)?
        .store_bit(false)?;
    Ok(builder.build()?)
}

/// Body of a native vault swap: a single step into `pool_address` with no limit
pub fn build_swap_body(request: &SwapRequest) -> Result<Cell, BatchError> {
    let mut builder = CellBuilder::new();
    builder
        .store_u32(32, VAULT_NATIVE_SWAP_OP)?
        .store_u64(64, 0)?
        .store_coins(&BigUint::from(request.amount_in))?
        .store_address(&request.pool_address)?
        .store_bit(false)?
        .store_coins(&BigUint::from(0u8))?
        .store_bit(false)?
        .store_reference(&Arc::new(build_swap_params()?))?;
    Ok(builder.build()?)
}

/// Send `amount_in + gas_amount` to the native vault with a swap body
pub async fn send_native_swap(
    sender: &dyn MessageSender,
    vault: &TonAddress,
    request: &SwapRequest,
) -> Result<()> {
    let value = request
        .amount_in
        .checked_add(request.gas_amount)
        .ok_or_else(|| BatchError::InvalidAmount("swap amount overflows".to_string()))?;

    let message = OutgoingMessage {
        to: vault.clone(),
        value,
        body: Some(build_swap_body(request)?),
    };

    info!(
        "Swapping {} TON (+{} TON gas) from {} via pool {}",
        from_nano(request.amount_in),
        from_nano(request.gas_amount),
        sender.address(),
        request.pool_address
    );

    sender.send(message).await
}
