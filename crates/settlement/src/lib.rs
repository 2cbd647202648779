//! DropCraft Settlement
//!
//! Builds the transactions that actually move the airdrop on chain.
//!
//! ## Claim Flow
//!
//! 1. **L2 claim**: an address eligible in one or more waves calls
//!    `claim(index, amount, proof)` on each wave's distributor.
//! 2. **L1 claim**: an L1 contract is listed under its L2 alias. Its claim
//!    calldata is wrapped into a Bridgehub `requestL2TransactionDirect`
//!    whose `mintValue` comes from `l2TransactionBaseCost`.
//! 3. **L1 transfer**: the same relay carries an L2 token `transfer` so the
//!    contract can move what it claimed.

pub mod abi;
mod claim;
pub mod encoding;
mod oracle;
mod relay;

pub use claim::{ClaimAssembler, ClaimCallDescription, ClaimParams, ClaimResponse};
pub use encoding::to_json_pretty;
pub use oracle::{BaseCostOracle, BaseCostRequest, FixedCostOracle, OracleError, RpcCostOracle};
pub use relay::{
    RelayAssembler, RelayClaimResponse, RelayParams, RelayTransactionDescription,
    RelayTransferResponse,
};
