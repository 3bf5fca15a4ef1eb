use clap::ValueEnum;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://toncenter.com/api/v2";
pub const DEDUST_MAINNET_FACTORY: &str = "EQBfBWT7X2BHg9tXAxzhz2aKiNTU1tpt5NsiK0uSDW_YAJ67";
pub const SCALE_JETTON: &str = "EQBlqsm144Dq6SjbPI4jjZvA1hqTIP3CvHovbIfW_t-SCALE";
pub const DEFAULT_WALLETS_FILE: &str = "wallets.txt";

/// toncenter allows one request per second without an API key
const ANONYMOUS_REQUEST_INTERVAL_MS: u64 = 1100;

/// Where pool and vault readiness is verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReadinessCheck {
    /// Before every wallet; a pool outage fails each line
    #[default]
    PerLine,
    /// Once before the first wallet; a pool outage aborts the batch
    Once,
}

impl FromStr for ReadinessCheck {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-line" | "per_line" | "perline" => Ok(Self::PerLine),
            "once" => Ok(Self::Once),
            _ => Err(anyhow::anyhow!(
                "Parse ReadinessCheck error: Invalid value '{}'",
                s
            )),
        }
    }
}

impl fmt::Display for ReadinessCheck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::PerLine => write!(f, "per-line"),
            Self::Once => write!(f, "once"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// toncenter v2 API base URL
    pub api_url: String,

    /// toncenter API key (optional, lifts the anonymous rate limit)
    pub api_key: Option<String>,

    /// Minimum pause between API requests
    pub request_interval_ms: u64,

    pub http_timeout_secs: u64,

    /// DeDust factory contract
    pub factory_address: String,

    /// Jetton bought with TON
    pub target_jetton_address: String,

    /// TON sent into the swap
    pub swap_amount: String,

    /// TON attached for swap gas
    pub gas_amount: String,

    pub readiness_check: ReadinessCheck,

    /// Validity window of signed wallet messages
    pub message_ttl_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            request_interval_ms: ANONYMOUS_REQUEST_INTERVAL_MS,
            http_timeout_secs: 30,
            factory_address: DEDUST_MAINNET_FACTORY.to_string(),
            target_jetton_address: SCALE_JETTON.to_string(),
            swap_amount: "1".to_string(),
            gas_amount: "0.25".to_string(),
            readiness_check: ReadinessCheck::PerLine,
            message_ttl_secs: 60,
        }
    }
}

impl Config {
    /// Creates configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let api_key = env::var("TON_API_KEY").ok().filter(|k| !k.is_empty());
        let default_interval = if api_key.is_some() {
            0
        } else {
            ANONYMOUS_REQUEST_INTERVAL_MS
        };

        Ok(Self {
            api_url: env::var("TON_API_URL").unwrap_or(defaults.api_url),
            api_key,
            request_interval_ms: parse_var("TON_REQUEST_INTERVAL_MS", default_interval)?,
            http_timeout_secs: parse_var("TON_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            factory_address: env::var("DEDUST_FACTORY_ADDRESS").unwrap_or(defaults.factory_address),
            target_jetton_address: env::var("TARGET_JETTON_ADDRESS")
                .unwrap_or(defaults.target_jetton_address),
            swap_amount: env::var("SWAP_AMOUNT").unwrap_or(defaults.swap_amount),
            gas_amount: env::var("SWAP_GAS_AMOUNT").unwrap_or(defaults.gas_amount),
            readiness_check: parse_var("READINESS_CHECK", defaults.readiness_check)?,
            message_ttl_secs: parse_var("WALLET_MESSAGE_TTL_SECS", defaults.message_ttl_secs)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, value, e)),
        _ => Ok(default),
    }
}
