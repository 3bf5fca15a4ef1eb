use crate::entity::BatchError;
use tonlib_core::mnemonic::{KeyPair, Mnemonic};
use tonlib_core::wallet::{TonWallet, WalletVersion};

pub const MNEMONIC_WORD_COUNT: usize = 24;

/// Default subwallet id of v4 wallets in the basechain
pub const WALLET_V4_SUBWALLET_ID: i32 = 698_983_191;

/// Check a mnemonic without running the full seed derivation.
///
/// Words are trimmed and lowercased before they are matched against the
/// wordlist.
pub fn parse_mnemonic(words: &[String]) -> Result<Mnemonic, BatchError> {
    if words.len() != MNEMONIC_WORD_COUNT {
        return Err(BatchError::KeyDerivation(format!(
            "expected {} words, got {}",
            MNEMONIC_WORD_COUNT,
            words.len()
        )));
    }

    let normalized: Vec<String> = words.iter().map(|w| w.trim().to_lowercase()).collect();
    Mnemonic::new(normalized.iter().map(String::as_str).collect(), &None)
        .map_err(|e| BatchError::KeyDerivation(e.to_string()))
}

/// Derive the wallet key pair from a 24-word mnemonic
pub fn mnemonic_to_key_pair(words: &[String]) -> Result<KeyPair, BatchError> {
    parse_mnemonic(words)?
        .to_key_pair()
        .map_err(|e| BatchError::KeyDerivation(e.to_string()))
}

/// The v4r2 wallet of `keys` in the basechain
pub fn wallet_for_key(keys: &KeyPair) -> Result<TonWallet, BatchError> {
    TonWallet::derive(0, WalletVersion::V4R2, keys, WALLET_V4_SUBWALLET_ID)
        .map_err(|e| BatchError::KeyDerivation(e.to_string()))
}
