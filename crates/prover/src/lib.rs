//! DropCraft Prover
//!
//! Sorted-pair binary Merkle tree over leaf digests.
//!
//! The `MerkleTree` is used by the aggregator to commit to each wave's
//! allocations and to extract per-leaf inclusion proofs. Its pairing rule
//! mirrors the distributor contract's verifier exactly: a proof built here
//! verifies on-chain iff `MerkleTree::verify` accepts it.

pub mod merkle;

pub use merkle::{MerkleProof, MerkleTree};
