//! Relay configuration

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// zkSync Era mainnet chain id
pub const ZKSYNC_ERA_CHAIN_ID: u64 = 324;

/// Bridgehub on Ethereum mainnet
pub const L1_BRIDGEHUB_ADDRESS: Address = address!("303a465B659cBB0ab36eE643eA362c509EEb5213");

/// L2 gas limit used for every relayed call
pub const DEFAULT_L2_TX_GAS_LIMIT: u64 = 2_097_152;

/// Gas per pubdata byte required by the bridge
pub const REQUIRED_L2_GAS_PRICE_PER_PUBDATA: u64 = 800;

/// Parameters of an L1 → L2 relay through the Bridgehub.
///
/// Passed explicitly to the relay assembler so one binary can target
/// several deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Destination chain id
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Bridgehub contract on L1
    #[serde(default = "default_bridgehub")]
    pub bridgehub: Address,

    /// L2 gas limit for the relayed call
    #[serde(default = "default_l2_gas_limit")]
    pub l2_gas_limit: u64,

    /// L2 gas per pubdata byte limit
    #[serde(default = "default_gas_per_pubdata_limit")]
    pub gas_per_pubdata_limit: u64,
}

fn default_chain_id() -> u64 {
    ZKSYNC_ERA_CHAIN_ID
}

fn default_bridgehub() -> Address {
    L1_BRIDGEHUB_ADDRESS
}

fn default_l2_gas_limit() -> u64 {
    DEFAULT_L2_TX_GAS_LIMIT
}

fn default_gas_per_pubdata_limit() -> u64 {
    REQUIRED_L2_GAS_PRICE_PER_PUBDATA
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            bridgehub: default_bridgehub(),
            l2_gas_limit: default_l2_gas_limit(),
            gas_per_pubdata_limit: default_gas_per_pubdata_limit(),
        }
    }
}

impl RelayConfig {
    /// zkSync Era mainnet parameters
    pub fn zksync_era() -> Self {
        Self::default()
    }
}
