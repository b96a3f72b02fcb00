//! Configuration system for kgraph.
//!
//! Provides TOML-based configuration with:
//! - Extraction limits (`[extraction]`)
//! - Session registry bounds (`[session]`)
//! - Tagger backend and user lexicons (`[tagger]`)
//! - Log file location (`[logging]`)
//!
//! Files are layered: the user config directory first, then `./kgraph.toml`.

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    ConfigSource, LoadedConfig, load_config, load_config_file, load_config_with_options,
    xdg_config_dir, xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
