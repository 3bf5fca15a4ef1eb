use crate::entity::BatchError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tonlib_core::cell::{ArcCell, BagOfCells, Cell};
use tonlib_core::TonAddress;

// Constants for conversion
pub const NANOTONS_PER_TON: u64 = 1_000_000_000;
pub const TON_DECIMALS: u32 = 9;

/// Convert a decimal TON amount ("1", "0.25") to nanotons
pub fn to_nano(amount: &str) -> Result<u128, BatchError> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|e| BatchError::InvalidAmount(format!("{}: {}", amount, e)))?;

    if value.is_sign_negative() {
        return Err(BatchError::InvalidAmount(format!("{} is negative", amount)));
    }

    let nano = value
        .checked_mul(Decimal::from(NANOTONS_PER_TON))
        .ok_or_else(|| BatchError::InvalidAmount(format!("{} is too large", amount)))?;

    if !nano.fract().is_zero() {
        return Err(BatchError::InvalidAmount(format!(
            "{} has more than {} decimals",
            amount, TON_DECIMALS
        )));
    }

    nano.to_u128()
        .ok_or_else(|| BatchError::InvalidAmount(amount.to_string()))
}

/// Convert nanotons to a TON string for display
pub fn from_nano(nano: u128) -> String {
    i128::try_from(nano)
        .ok()
        .and_then(|value| Decimal::try_from_i128_with_scale(value, TON_DECIMALS).ok())
        .map(|value| value.normalize().to_string())
        .unwrap_or_else(|| format!("{} nanoton", nano))
}

/// Parse a raw (`0:abcd...`) or user-friendly address
pub fn parse_address(address: &str) -> Result<TonAddress, BatchError> {
    TonAddress::from_str(address.trim())
        .map_err(|e| BatchError::InvalidAddress(format!("{}: {}", address, e)))
}

/// Single-root bag of cells, base64 encoded, as the HTTP API expects
pub fn cell_to_base64(cell: &Cell) -> Result<String, BatchError> {
    let bytes = BagOfCells::from_root(cell.clone())
        .serialize(false)
        .map_err(|e| BatchError::Boc(e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}

pub fn cell_from_base64(boc: &str) -> Result<ArcCell, BatchError> {
    let bag = BagOfCells::parse_base64(boc).map_err(|e| BatchError::Boc(e.to_string()))?;
    bag.single_root()
        .map(|root| root.clone())
        .map_err(|e| BatchError::Boc(e.to_string()))
}
