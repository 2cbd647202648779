//! L1 → L2 relay assembly through the Bridgehub.
//!
//! An L1 contract cannot call L2 directly. It sends
//! `requestL2TransactionDirect` to the Bridgehub with enough native value to
//! cover the L2 execution, which the cost oracle prices at the given L1 gas
//! price.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info};

use dropcraft_core::{parse_address, parse_amount, RelayConfig, Result};

use crate::abi::{IBridgehub, IERC20};
use crate::claim::ClaimResponse;
use crate::encoding::{checksummed, decimal, hex_bytes, hex_bytes_list};
use crate::oracle::{BaseCostOracle, BaseCostRequest};

/// Fields of the Bridgehub's `L2TransactionRequestDirect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayParams {
    pub chain_id: u64,
    #[serde(serialize_with = "decimal")]
    pub mint_value: U256,
    #[serde(serialize_with = "checksummed")]
    pub l2_contract: Address,
    pub l2_value: u64,
    #[serde(serialize_with = "hex_bytes")]
    pub l2_calldata: Bytes,
    pub l2_gas_limit: u64,
    pub l2_gas_per_pubdata_byte_limit: u64,
    #[serde(serialize_with = "hex_bytes_list")]
    pub factory_deps: Vec<Bytes>,
    #[serde(serialize_with = "checksummed")]
    pub refund_recipient: Address,
}

impl RelayParams {
    fn to_call(&self) -> IBridgehub::requestL2TransactionDirectCall {
        IBridgehub::requestL2TransactionDirectCall {
            _request: IBridgehub::L2TransactionRequestDirect {
                chainId: U256::from(self.chain_id),
                mintValue: self.mint_value,
                l2Contract: self.l2_contract,
                l2Value: U256::from(self.l2_value),
                l2Calldata: self.l2_calldata.clone(),
                l2GasLimit: U256::from(self.l2_gas_limit),
                l2GasPerPubdataByteLimit: U256::from(self.l2_gas_per_pubdata_byte_limit),
                factoryDeps: self.factory_deps.clone(),
                refundRecipient: self.refund_recipient,
            },
        }
    }
}

/// A ready-to-send L1 transaction to the Bridgehub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayTransactionDescription {
    #[serde(serialize_with = "checksummed")]
    pub to: Address,
    pub function: &'static str,
    pub params: RelayParams,
    #[serde(serialize_with = "hex_bytes")]
    pub l1_raw_calldata: Bytes,
    /// Native value to attach, equal to `mintValue`
    #[serde(serialize_with = "decimal")]
    pub value: U256,
    #[serde(serialize_with = "decimal")]
    pub gas_price: U256,
}

/// Relayed claims for an L1 contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayClaimResponse {
    pub address: String,
    pub calls_to_claim: Vec<RelayTransactionDescription>,
}

/// Relayed L2 token transfer from an L1 contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayTransferResponse {
    pub address: String,
    pub call_to_transfer: RelayTransactionDescription,
}

/// Wraps L2 calls into Bridgehub requests.
#[derive(Clone)]
pub struct RelayAssembler {
    config: RelayConfig,
    oracle: Arc<dyn BaseCostOracle>,
}

impl RelayAssembler {
    pub fn new(config: RelayConfig, oracle: Arc<dyn BaseCostOracle>) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Price and encode one relayed call.
    ///
    /// Queries the oracle exactly once.
    pub async fn assemble(
        &self,
        l2_contract: Address,
        l2_calldata: Bytes,
        refund_recipient: Address,
        gas_price: U256,
    ) -> Result<RelayTransactionDescription> {
        let request = BaseCostRequest {
            chain_id: self.config.chain_id,
            gas_price,
            l2_gas_limit: self.config.l2_gas_limit,
            gas_per_pubdata_limit: self.config.gas_per_pubdata_limit,
        };
        let mint_value = self.oracle.base_cost(&request).await?;
        debug!("Relay to {} needs {} wei", l2_contract, mint_value);

        let params = RelayParams {
            chain_id: self.config.chain_id,
            mint_value,
            l2_contract,
            l2_value: 0,
            l2_calldata,
            l2_gas_limit: self.config.l2_gas_limit,
            l2_gas_per_pubdata_byte_limit: self.config.gas_per_pubdata_limit,
            factory_deps: Vec::new(),
            refund_recipient,
        };
        let l1_raw_calldata = Bytes::from(params.to_call().abi_encode());

        Ok(RelayTransactionDescription {
            to: self.config.bridgehub,
            function: "requestL2TransactionDirect",
            params,
            l1_raw_calldata,
            value: mint_value,
            gas_price,
        })
    }

    /// Relay every claim of an L1 contract, refunding to the contract.
    ///
    /// All relays are priced concurrently; any failure fails the batch.
    pub async fn relay_claims(
        &self,
        claims: &ClaimResponse,
        gas_price: U256,
    ) -> Result<RelayClaimResponse> {
        let refund_recipient = parse_address(&claims.address)?;
        let calls_to_claim = try_join_all(claims.calls_to_claim.iter().map(|call| {
            self.assemble(
                call.to,
                call.l2_raw_calldata.clone(),
                refund_recipient,
                gas_price,
            )
        }))
        .await?;

        info!(
            "Relayed {} claim(s) for {}",
            calls_to_claim.len(),
            claims.address
        );

        Ok(RelayClaimResponse {
            address: claims.address.clone(),
            calls_to_claim,
        })
    }

    /// Relay an L2 token `transfer` owned by an L1 contract.
    pub async fn relay_transfer(
        &self,
        token: Address,
        from: &str,
        to: &str,
        amount: &str,
        gas_price: U256,
    ) -> Result<RelayTransferResponse> {
        let sender = parse_address(from)?;
        let call = IERC20::transferCall {
            to: parse_address(to)?,
            amount: parse_amount(amount)?,
        };

        let call_to_transfer = self
            .assemble(token, Bytes::from(call.abi_encode()), sender, gas_price)
            .await?;

        Ok(RelayTransferResponse {
            address: from.to_string(),
            call_to_transfer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{FixedCostOracle, OracleError};
    use async_trait::async_trait;
    use dropcraft_core::DropCraftError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOracle {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BaseCostOracle for CountingOracle {
        async fn base_cost(&self, request: &BaseCostRequest) -> std::result::Result<U256, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(request.gas_price * U256::from(2u64))
        }
    }

    struct FailingOracle;

    #[async_trait]
    impl BaseCostOracle for FailingOracle {
        async fn base_cost(&self, _: &BaseCostRequest) -> std::result::Result<U256, OracleError> {
            Err(OracleError::Status(502))
        }
    }

    fn assembler(value: u64) -> RelayAssembler {
        RelayAssembler::new(
            RelayConfig::zksync_era(),
            Arc::new(FixedCostOracle::new(U256::from(value))),
        )
    }

    #[tokio::test]
    async fn test_assemble_with_stub_cost() {
        let relay = assembler(500)
            .assemble(
                Address::repeat_byte(0xD1),
                Bytes::from(vec![0xae, 0x0b, 0x51, 0xdf]),
                Address::repeat_byte(0xC1),
                U256::from(1_000_000_000u64),
            )
            .await
            .unwrap();

        assert_eq!(relay.to, dropcraft_core::L1_BRIDGEHUB_ADDRESS);
        assert_eq!(relay.function, "requestL2TransactionDirect");
        assert_eq!(relay.value, U256::from(500u64));
        assert_eq!(relay.params.mint_value, relay.value);
        assert_eq!(relay.params.l2_value, 0);
        assert!(relay.params.factory_deps.is_empty());
        assert_eq!(relay.params.chain_id, 324);
        assert_eq!(relay.params.l2_gas_limit, 2_097_152);
        assert_eq!(relay.params.l2_gas_per_pubdata_byte_limit, 800);

        let json = serde_json::to_value(&relay).unwrap();
        assert_eq!(json["value"], "500");
        assert_eq!(json["gas_price"], "1000000000");
        assert_eq!(json["params"]["l2Value"], 0);
        assert_eq!(json["params"]["factoryDeps"], serde_json::json!([]));
        assert_eq!(json["params"]["mintValue"], "500");
    }

    #[tokio::test]
    async fn test_calldata_round_trips_through_abi() {
        let relay = assembler(500)
            .assemble(
                Address::repeat_byte(0xD1),
                Bytes::from(vec![1, 2, 3]),
                Address::repeat_byte(0xC1),
                U256::from(7u64),
            )
            .await
            .unwrap();

        assert_eq!(&relay.l1_raw_calldata[..4], &[0xd5, 0x24, 0x71, 0xc1]);
        let decoded =
            IBridgehub::requestL2TransactionDirectCall::abi_decode(&relay.l1_raw_calldata, true)
                .unwrap();
        let request = decoded._request;
        assert_eq!(request.mintValue, U256::from(500u64));
        assert_eq!(request.l2Contract, Address::repeat_byte(0xD1));
        assert_eq!(request.l2Calldata, Bytes::from(vec![1, 2, 3]));
        assert_eq!(request.refundRecipient, Address::repeat_byte(0xC1));
        assert!(request.factoryDeps.is_empty());
    }

    #[tokio::test]
    async fn test_oracle_queried_once_per_relay() {
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
        });
        let relay = RelayAssembler::new(RelayConfig::default(), oracle.clone());

        let description = relay
            .assemble(
                Address::repeat_byte(1),
                Bytes::new(),
                Address::repeat_byte(2),
                U256::from(21u64),
            )
            .await
            .unwrap();

        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
        assert_eq!(description.value, U256::from(42u64));
    }

    #[tokio::test]
    async fn test_oracle_failure_is_external_query_error() {
        let relay = RelayAssembler::new(RelayConfig::default(), Arc::new(FailingOracle));
        let err = relay
            .assemble(
                Address::repeat_byte(1),
                Bytes::new(),
                Address::repeat_byte(2),
                U256::from(1u64),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DropCraftError::ExternalQuery(_)));
    }

    #[tokio::test]
    async fn test_transfer_calldata() {
        let from = Address::repeat_byte(0xC1).to_string();
        let to = Address::repeat_byte(0xC2).to_string();
        let token = Address::repeat_byte(0x70);

        let response = assembler(9)
            .relay_transfer(token, &from, &to, "1000", U256::from(1u64))
            .await
            .unwrap();

        assert_eq!(response.address, from);
        let relay = &response.call_to_transfer;
        assert_eq!(relay.params.l2_contract, token);
        assert_eq!(relay.params.refund_recipient, Address::repeat_byte(0xC1));

        let transfer = IERC20::transferCall::abi_decode(&relay.params.l2_calldata, true).unwrap();
        assert_eq!(transfer.to, Address::repeat_byte(0xC2));
        assert_eq!(transfer.amount, U256::from(1000u64));
    }

    #[tokio::test]
    async fn test_transfer_rejects_bad_amount() {
        let from = Address::repeat_byte(0xC1).to_string();
        let to = Address::repeat_byte(0xC2).to_string();

        let err = assembler(9)
            .relay_transfer(Address::repeat_byte(0x70), &from, &to, "-5", U256::from(1u64))
            .await
            .unwrap_err();
        assert!(matches!(err, DropCraftError::Validation(_)));
    }
}
