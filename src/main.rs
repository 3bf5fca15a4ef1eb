//! Batch TON → jetton swapper - Main executable
//!
//! Reads `address,mnemonic` lines from a wallet file and submits one fixed
//! DeDust swap per wallet, logging the outcome of every line.
use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use log::{error, info};
use std::path::PathBuf;
use ton_batch_swap::config::DEFAULT_WALLETS_FILE;
use ton_batch_swap::{Config, ReadinessCheck, ServiceContainer};

#[derive(Parser, Debug)]
#[command(name = "ton-batch-swap")]
#[command(about = "Swap a fixed TON amount into a jetton for every wallet in a file")]
struct Args {
    /// File with one `address,mnemonic words...` line per wallet
    #[arg(default_value = DEFAULT_WALLETS_FILE)]
    file: PathBuf,

    /// TON to swap per wallet (overrides SWAP_AMOUNT)
    #[arg(long)]
    amount: Option<String>,

    /// TON attached for gas (overrides SWAP_GAS_AMOUNT)
    #[arg(long)]
    gas: Option<String>,

    /// Jetton master to buy (overrides TARGET_JETTON_ADDRESS)
    #[arg(long)]
    jetton: Option<String>,

    /// When to verify pool and vault readiness (overrides READINESS_CHECK)
    #[arg(long, value_enum)]
    readiness_check: Option<ReadinessCheck>,
}

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting TON batch swap v{}", ton_batch_swap::VERSION);

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(amount) = args.amount {
        config.swap_amount = amount;
    }
    if let Some(gas) = args.gas {
        config.gas_amount = gas;
    }
    if let Some(jetton) = args.jetton {
        config.target_jetton_address = jetton;
    }
    if let Some(readiness_check) = args.readiness_check {
        config.readiness_check = readiness_check;
    }

    info!(
        "Swapping {} TON (+{} TON gas) into {} for wallets in {} (readiness check: {})",
        config.swap_amount,
        config.gas_amount,
        config.target_jetton_address,
        args.file.display(),
        config.readiness_check
    );

    let container = ServiceContainer::new(config).context("Failed to initialize services")?;

    if let Err(e) = container
        .batch_interactor()
        .process_wallets(&args.file)
        .await
    {
        error!("Error processing wallets: {:#}", e);
        return Err(e);
    }

    Ok(())
}
