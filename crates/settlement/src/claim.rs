//! Claim call assembly.
//!
//! Turns the wave matches for an address into `claim(uint256,uint256,bytes32[])`
//! call descriptions, one per wave the address is eligible in.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use serde::Serialize;
use tracing::{debug, info};

use dropcraft_aggregator::{Allocation, WaveMatch};
use dropcraft_core::{parse_address, DropCraftError, Result};

use crate::abi::IMerkleDistributor;
use crate::encoding::{checksummed, checksummed_opt, decimal, hex_bytes, hex_digests};

/// Arguments of a distributor `claim` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimParams {
    pub index: u64,
    #[serde(serialize_with = "decimal")]
    pub amount: U256,
    #[serde(serialize_with = "hex_digests")]
    pub merkle_proof: Vec<B256>,
}

/// A ready-to-send L2 `claim` call against one wave's distributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimCallDescription {
    /// L2 address the leaf pays out to
    #[serde(serialize_with = "checksummed")]
    pub address: Address,
    /// L1 contract behind an aliased leaf
    #[serde(
        serialize_with = "checksummed_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin_address: Option<Address>,
    #[serde(serialize_with = "checksummed")]
    pub to: Address,
    pub function: &'static str,
    pub params: ClaimParams,
    #[serde(serialize_with = "hex_bytes")]
    pub l2_raw_calldata: Bytes,
}

/// Every claim an address can make, across waves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimResponse {
    /// The address as supplied by the caller
    pub address: String,
    pub calls_to_claim: Vec<ClaimCallDescription>,
}

/// Builds claim calls from an allocation index.
#[derive(Debug, Clone, Copy)]
pub struct ClaimAssembler<'a> {
    allocation: &'a Allocation,
}

impl<'a> ClaimAssembler<'a> {
    pub fn new(allocation: &'a Allocation) -> Self {
        Self { allocation }
    }

    /// Claims for an address that claims directly on L2.
    pub fn l2_claims(&self, supplied: &str) -> Result<ClaimResponse> {
        let address = parse_address(supplied)?;
        self.claims_for(supplied, address)
    }

    /// Claims for an L1 contract, looked up under its L2 alias.
    pub fn l1_claims(&self, supplied: &str) -> Result<ClaimResponse> {
        let l1 = parse_address(supplied)?;
        let l2 = self.allocation.aliaser().alias(l1);
        debug!("L1 contract {} claims as {}", l1, l2);
        self.claims_for(supplied, l2)
    }

    fn claims_for(&self, supplied: &str, lookup: Address) -> Result<ClaimResponse> {
        let matches = self.allocation.find_all(&lookup);
        if matches.is_empty() {
            return Err(DropCraftError::NotEligible {
                address: supplied.to_string(),
            });
        }

        let calls_to_claim: Vec<_> = matches.iter().map(|m| self.describe(m)).collect();
        info!(
            "{} eligible in {} wave(s)",
            supplied,
            calls_to_claim.len()
        );

        Ok(ClaimResponse {
            address: supplied.to_string(),
            calls_to_claim,
        })
    }

    fn describe(&self, found: &WaveMatch<'_>) -> ClaimCallDescription {
        let leaf = found.leaf;
        let call = IMerkleDistributor::claimCall {
            _index: leaf.index(),
            _amount: leaf.amount,
            _merkleProof: found.proof.siblings.clone(),
        };

        ClaimCallDescription {
            address: leaf.address,
            origin_address: leaf
                .aliased
                .then(|| self.allocation.aliaser().unalias(leaf.address)),
            to: found.wave.distributor(),
            function: "claim",
            params: ClaimParams {
                index: leaf.position as u64,
                amount: leaf.amount,
                merkle_proof: found.proof.siblings.clone(),
            },
            l2_raw_calldata: Bytes::from(call.abi_encode()),
        }
    }
}
