mod batch_error;
mod readiness;
mod swap_result;
mod wallet_record;

pub use batch_error::BatchError;
pub use readiness::ReadinessStatus;
pub use swap_result::{BatchReport, LineOutcome};
pub use wallet_record::WalletRecord;
