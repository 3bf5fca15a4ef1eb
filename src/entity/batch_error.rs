#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Pool ({0}) does not exist or is not ready")]
    PoolUnavailable(String),

    #[error("Vault ({0}) does not exist or is not ready")]
    VaultUnavailable(String),

    #[error("Malformed wallet line: {0}")]
    MalformedLine(String),

    #[error("Failed to derive keys from mnemonic: {0}")]
    KeyDerivation(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("TON API error: {0}")]
    TonApi(String),

    #[error("Cell/BOC error: {0}")]
    Boc(String),

    #[error("Cell error: {0}")]
    Cell(#[from] tonlib_core::cell::TonCellError),
}
