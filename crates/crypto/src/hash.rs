//! Hashing and leaf encoding.
//!
//! The leaf formula MUST match the distributor contract:
//! `keccak256(abi.encodePacked(uint256 index, address account, uint256 amount))`.
//! Internal nodes hash the two children in ascending byte order, which is
//! what OpenZeppelin's `MerkleProof.verify` expects.

use alloy_primitives::{keccak256, Address, U256};
use alloy_sol_types::SolValue;

use dropcraft_core::Digest;

/// Fixed-size digest function used for leaves and internal nodes.
pub trait Hasher: Send + Sync {
    fn hash(&self, data: &[u8]) -> Digest;

    /// Hash two nodes after ordering them `(min, max)`.
    fn hash_sorted_pair(&self, a: &Digest, b: &Digest) -> Digest {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(low.as_slice());
        buf[32..].copy_from_slice(high.as_slice());
        self.hash(&buf)
    }
}

/// Keccak-256, the EVM hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl Hasher for Keccak256Hasher {
    fn hash(&self, data: &[u8]) -> Digest {
        keccak256(data)
    }
}

/// Packed encoding of a leaf tuple: 32-byte index, 20-byte address,
/// 32-byte amount.
pub fn encode_leaf(position: U256, address: Address, amount: U256) -> Vec<u8> {
    (position, address, amount).abi_encode_packed()
}

/// Digest of a leaf tuple.
pub fn leaf_digest<H: Hasher + ?Sized>(
    hasher: &H,
    position: U256,
    address: Address,
    amount: U256,
) -> Digest {
    hasher.hash(&encode_leaf(position, address, amount))
}
