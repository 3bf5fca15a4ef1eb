pub mod factory;
pub mod models;
pub mod vault;

pub use factory::{DeDustFactory, ExchangeFactory};
pub use models::{Asset, PoolType, SwapRequest, SwapRoute, VAULT_NATIVE_SWAP_OP};
