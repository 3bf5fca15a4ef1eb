use crate::entity::BatchError;

/// One `address,mnemonic words...` line of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub address: String,
    pub mnemonic: Vec<String>,
}

impl WalletRecord {
    /// Split on the first comma; the rest is the whitespace-separated mnemonic.
    pub fn parse_line(line: &str) -> Result<Self, BatchError> {
        let (address, mnemonic) = line
            .split_once(',')
            .ok_or_else(|| BatchError::MalformedLine("missing ',' separator".to_string()))?;

        let address = address.trim();
        if address.is_empty() {
            return Err(BatchError::MalformedLine("empty wallet address".to_string()));
        }

        let mnemonic: Vec<String> = mnemonic.split_whitespace().map(str::to_string).collect();
        if mnemonic.is_empty() {
            return Err(BatchError::MalformedLine(format!(
                "no mnemonic words for wallet {}",
                address
            )));
        }

        Ok(Self {
            address: address.to_string(),
            mnemonic,
        })
    }
}
