//! Per-invocation application context.

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Loaded configuration plus the selected output format.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Ok(Self {
            config,
            output_format: cli.output_format(),
        })
    }

    #[must_use]
    pub const fn machine_mode(&self) -> bool {
        self.output_format.is_machine_readable()
    }
}
