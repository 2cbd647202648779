//! Base cost oracle for L1 → L2 transactions.
//!
//! Two implementations:
//! - **Live**: `RpcCostOracle` performs a read-only `eth_call` of
//!   `Bridgehub.l2TransactionBaseCost` against an L1 JSON-RPC endpoint.
//! - **Mock**: `FixedCostOracle` returns a configured value without any I/O.

use std::time::Duration;

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use dropcraft_core::DropCraftError;

use crate::abi::IBridgehub;

/// Errors from the cost oracle.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<OracleError> for DropCraftError {
    fn from(err: OracleError) -> Self {
        DropCraftError::external(err)
    }
}

/// Inputs to `l2TransactionBaseCost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCostRequest {
    pub chain_id: u64,
    /// L1 gas price in wei
    pub gas_price: U256,
    pub l2_gas_limit: u64,
    pub gas_per_pubdata_limit: u64,
}

impl BaseCostRequest {
    fn to_call(self) -> IBridgehub::l2TransactionBaseCostCall {
        IBridgehub::l2TransactionBaseCostCall {
            _chainId: U256::from(self.chain_id),
            _gasPrice: self.gas_price,
            _l2GasLimit: U256::from(self.l2_gas_limit),
            _l2GasPerPubdataByteLimit: U256::from(self.gas_per_pubdata_limit),
        }
    }
}

/// Read-only source of the minimum mint value for a relay.
#[async_trait]
pub trait BaseCostOracle: Send + Sync {
    /// Minimum native amount (wei) the L1 transaction must carry.
    async fn base_cost(&self, request: &BaseCostRequest) -> Result<U256, OracleError>;
}

/// Oracle returning a fixed base cost.
#[derive(Debug, Clone, Copy)]
pub struct FixedCostOracle {
    value: U256,
}

impl FixedCostOracle {
    pub fn new(value: U256) -> Self {
        Self { value }
    }
}

#[async_trait]
impl BaseCostOracle for FixedCostOracle {
    async fn base_cost(&self, request: &BaseCostRequest) -> Result<U256, OracleError> {
        debug!("Fixed base cost {} for chain {}", self.value, request.chain_id);
        Ok(self.value)
    }
}

/// JSON-RPC request body
#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallObject<'a>, &'static str),
}

#[derive(Serialize)]
struct CallObject<'a> {
    to: String,
    data: &'a str,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Oracle backed by an L1 JSON-RPC endpoint.
pub struct RpcCostOracle {
    url: String,
    bridgehub: Address,
    http: reqwest::Client,
    max_attempts: u32,
    base_delay: Duration,
}

impl RpcCostOracle {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create with the default timeout and retry policy
    /// (3 attempts, 500ms exponential backoff).
    pub fn new(url: impl Into<String>, bridgehub: Address) -> Result<Self, OracleError> {
        Self::with_timeout(url, bridgehub, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        url: impl Into<String>,
        bridgehub: Address,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            bridgehub,
            http,
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.base_delay = base_delay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait before retry number `attempt` (1-based): `base_delay * 2^(attempt - 1)`.
    /// The multiplier stops growing at `u32::MAX`.
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    async fn call_once(&self, body: &RpcRequest<'_>) -> Result<String, OracleError> {
        let resp = self.http.post(&self.url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let parsed: RpcResponse = resp.json().await?;
        if let Some(err) = parsed.error {
            return Err(OracleError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        parsed
            .result
            .ok_or_else(|| OracleError::Malformed("empty result".to_string()))
    }
}

/// Decode the `uint256` returned by `l2TransactionBaseCost`.
fn decode_base_cost(result: &str) -> Result<U256, OracleError> {
    let bytes = hex::decode(result)
        .map_err(|e| OracleError::Malformed(format!("result is not hex: {}", e)))?;
    let decoded = IBridgehub::l2TransactionBaseCostCall::abi_decode_returns(&bytes, true)
        .map_err(|e| OracleError::Malformed(format!("cannot decode uint256: {}", e)))?;
    Ok(decoded.baseCost)
}

#[async_trait]
impl BaseCostOracle for RpcCostOracle {
    async fn base_cost(&self, request: &BaseCostRequest) -> Result<U256, OracleError> {
        let data = hex::encode_prefixed(request.to_call().abi_encode());
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallObject {
                    to: self.bridgehub.to_checksum(None),
                    data: &data,
                },
                "latest",
            ),
        };

        debug!(
            "Querying base cost: chain {} gas price {} via {}",
            request.chain_id, request.gas_price, self.url
        );

        let mut last_err = OracleError::Malformed("no attempts made".into());
        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.backoff(attempt)).await;
            }

            match self.call_once(&body).await {
                Ok(result) => {
                    let cost = decode_base_cost(&result)?;
                    debug!("Base cost: {} wei", cost);
                    return Ok(cost);
                }
                Err(e) => {
                    warn!(
                        "Base cost query attempt {}/{} failed: {}",
                        attempt + 1,
                        self.max_attempts,
                        e
                    );
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }
}
