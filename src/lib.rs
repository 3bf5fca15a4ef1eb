pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod ton;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items
pub use config::{Config, ReadinessCheck};
pub use di::*;
pub use entity::*;
pub use interactor::*;
