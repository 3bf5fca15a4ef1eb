pub mod client;
pub mod dedust;
pub mod models;
pub mod rate_limiter;
pub mod utils;
pub mod wallet;
pub mod wallet_contract;
pub mod wallet_provider;

// Re-export commonly used items
pub use client::{create_ton_client, TonApi, ToncenterClient};
pub use utils::{from_nano, parse_address, to_nano};
pub use wallet::{mnemonic_to_key_pair, parse_mnemonic, wallet_for_key};
pub use wallet_contract::{MessageSender, OutgoingMessage, WalletV4Sender};
pub use wallet_provider::{TonWalletProvider, WalletProvider};
