//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod classify;
pub mod convert;
pub mod inspect;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Convert(args) => convert::run(ctx, args),
        Commands::Inspect(args) => inspect::run(ctx, args),
        Commands::Classify(args) => classify::run(ctx, args),
    }
}
