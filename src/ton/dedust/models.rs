use crate::entity::BatchError;
use std::fmt;
use std::str::FromStr;
use tonlib_core::cell::{Cell, CellBuilder};
use tonlib_core::TonAddress;

/// Native vault `swap` operation
pub const VAULT_NATIVE_SWAP_OP: u32 = 0xea06185d;

/// Asset as understood by the DeDust factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Native,
    Jetton(TonAddress),
}

impl Asset {
    /// `native$0000` or `jetton$0001 workchain:int8 address:uint256`
    pub fn to_cell(&self) -> Result<Cell, BatchError> {
        let mut builder = CellBuilder::new();
        match self {
            Asset::Native => {
                builder.store_u8(4, 0b0000)?;
            }
            Asset::Jetton(master) => {
                builder
                    .store_u8(4, 0b0001)?
                    .store_u8(8, master.workchain as i8 as u8)?
                    .store_slice(master.hash_part.as_slice())?;
            }
        }
        Ok(builder.build()?)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "TON"),
            Asset::Jetton(master) => write!(f, "jetton:{}", master),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolType {
    #[default]
    Volatile,
    Stable,
}

impl PoolType {
    pub fn id(&self) -> u128 {
        match self {
            PoolType::Volatile => 0,
            PoolType::Stable => 1,
        }
    }
}

impl FromStr for PoolType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "volatile" => Ok(Self::Volatile),
            "stable" => Ok(Self::Stable),
            _ => Err(anyhow::anyhow!("Parse PoolType error: Invalid value '{}'", s)),
        }
    }
}

/// Fixed-amount swap of native TON into a pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub pool_address: TonAddress,
    /// Nanotons sold
    pub amount_in: u128,
    /// Nanotons attached for gas on top of `amount_in`
    pub gas_amount: u128,
}

/// Pool and vault the batch swaps through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRoute {
    pub vault: TonAddress,
    pub pool: TonAddress,
}
