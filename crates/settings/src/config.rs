//! Configuration types

use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dropcraft_core::{
    parse_alias_table, parse_allocation_table, parse_amount, AliasSet, AllocationRow, RelayConfig,
};

use crate::{Result, SettingsError};

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Wave inputs
    #[serde(default)]
    pub waves: WaveSettings,

    /// L1 → L2 relay settings
    #[serde(default)]
    pub relay: RelaySettings,
}

impl Settings {
    /// Load settings from a specific path, or fall back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&content).map_err(SettingsError::ParseError)?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Read every wave's allocation and alias list.
    ///
    /// Relative paths resolve against `data_dir`. List lengths are not
    /// checked here; the allocation index rejects mismatched inputs.
    pub fn load_wave_inputs(&self, data_dir: &Path) -> Result<WaveInputs> {
        let allocations = self
            .waves
            .allocation_paths
            .iter()
            .map(|p| -> Result<Vec<AllocationRow>> {
                let path = data_dir.join(p);
                let content = read_list(&path)?;
                let rows = parse_allocation_table(&path.display().to_string(), &content)?;
                debug!("Read {} allocation rows from {:?}", rows.len(), path);
                Ok(rows)
            })
            .collect::<Result<Vec<_>>>()?;

        let aliases = self
            .waves
            .alias_paths
            .iter()
            .map(|p| -> Result<AliasSet> {
                let path = data_dir.join(p);
                let content = read_list(&path)?;
                let set = parse_alias_table(&path.display().to_string(), &content)?;
                debug!("Read {} L1 contract addresses from {:?}", set.len(), path);
                Ok(set)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(WaveInputs {
            allocations,
            aliases,
            distributors: self.waves.distributors.clone(),
        })
    }
}

fn read_list(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SettingsError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Raw per-wave inputs, ready for the allocation index.
#[derive(Debug, Clone, Default)]
pub struct WaveInputs {
    pub allocations: Vec<Vec<AllocationRow>>,
    pub aliases: Vec<AliasSet>,
    pub distributors: Vec<Address>,
}

/// Wave settings. The three lists are parallel: entry `i` of each
/// describes wave `i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSettings {
    /// `address,amount` CSV per wave
    #[serde(default = "default_allocation_paths")]
    pub allocation_paths: Vec<PathBuf>,

    /// L1 contract list per wave
    #[serde(default = "default_alias_paths")]
    pub alias_paths: Vec<PathBuf>,

    /// L2 Merkle distributor per wave
    #[serde(default = "default_distributors")]
    pub distributors: Vec<Address>,
}

fn default_allocation_paths() -> Vec<PathBuf> {
    (1..=3)
        .map(|wave| PathBuf::from(format!("airdrop-allocations-wave-{}.csv", wave)))
        .collect()
}

fn default_alias_paths() -> Vec<PathBuf> {
    (1..=3)
        .map(|wave| PathBuf::from(format!("l1_eligibility_list-wave-{}.csv", wave)))
        .collect()
}

fn default_distributors() -> Vec<Address> {
    vec![
        address!("66Fd4FC8FA52c9bec2AbA368047A0b27e24ecfe4"),
        address!("b294F411cB52c7C6B6c0B0b61DBDf398a8b0725d"),
        address!("f29D698E74EF1904BCFDb20Ed38f9F3EF0A89E5b"),
    ]
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            allocation_paths: default_allocation_paths(),
            alias_paths: default_alias_paths(),
            distributors: default_distributors(),
        }
    }
}

/// Relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    /// Chain, Bridgehub and gas limits
    #[serde(flatten)]
    pub config: RelayConfig,

    /// L1 JSON-RPC endpoint (overridden by `--l1-json-rpc`)
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// L1 request timeout in seconds
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_secs: u64,

    /// Offline mode: decimal base cost in wei used instead of querying L1
    #[serde(default)]
    pub fixed_base_cost: Option<String>,

    /// Airdropped token on L2
    #[serde(default = "default_l2_token")]
    pub l2_token: Address,
}

/// Public Ethereum mainnet endpoint used when none is configured
pub const DEFAULT_L1_RPC_URL: &str = "https://ethereum-rpc.publicnode.com";

fn default_rpc_url() -> String {
    DEFAULT_L1_RPC_URL.to_string()
}

fn default_rpc_timeout() -> u64 {
    30
}

fn default_l2_token() -> Address {
    address!("5a7d6b2f92c77fad6ccabd7ee0624e64907eaf3e")
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            config: RelayConfig::default(),
            rpc_url: default_rpc_url(),
            rpc_timeout_secs: default_rpc_timeout(),
            fixed_base_cost: None,
            l2_token: default_l2_token(),
        }
    }
}

impl RelaySettings {
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Parsed offline base cost, if configured.
    pub fn fixed_base_cost_wei(&self) -> Result<Option<U256>> {
        self.fixed_base_cost
            .as_deref()
            .map(parse_amount)
            .transpose()
            .map_err(|e| SettingsError::Invalid(format!("fixed_base_cost: {}", e)))
    }
}
