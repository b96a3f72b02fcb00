//! CLI command handlers.

pub mod build;
pub mod config;
pub mod extract;

use std::path::PathBuf;

use anyhow::Result;

use kgraph_config::LoadedConfig;
use kgraph_domain::DomainServices;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Explicit user config directory, if one was given.
    pub config_dir: Option<PathBuf>,
    /// Merged configuration with CLI overrides applied.
    pub loaded: LoadedConfig,
}

impl Context {
    /// Build domain services from the loaded configuration.
    pub fn services(&self) -> Result<DomainServices> {
        Ok(DomainServices::from_config(&self.loaded.config)?)
    }
}
