pub mod app;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod test_utils;
pub mod utils;

pub use error::{KtError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
