//! DropCraft Settings
//!
//! Deployment configuration for the `dropcraft` binary.
//!
//! ## Features
//!
//! - Wave inputs (allocation lists, alias lists, distributors)
//! - Relay parameters (chain, Bridgehub, gas limits, L1 endpoint)
//! - JSON serialization with zkSync Era mainnet defaults
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use dropcraft_settings::Settings;
//!
//! // Missing file → defaults
//! let settings = Settings::load_from(Path::new("dropcraft.json"))?;
//! let inputs = settings.load_wave_inputs(Path::new("."))?;
//! # Ok::<(), dropcraft_settings::SettingsError>(())
//! ```

mod config;

pub use config::{RelaySettings, Settings, WaveInputs, WaveSettings, DEFAULT_L1_RPC_URL};

use std::path::PathBuf;

use dropcraft_core::DropCraftError;
use thiserror::Error;

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "dropcraft.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    ParseError(serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error(transparent)]
    Input(#[from] DropCraftError),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

impl From<SettingsError> for DropCraftError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Input(inner) => inner,
            other => DropCraftError::Configuration(other.to_string()),
        }
    }
}
