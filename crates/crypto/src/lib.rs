//! DropCraft Cryptography
//!
//! Narrow interfaces over the primitives the on-chain contracts define:
//! Keccak-256 hashing, packed leaf encoding and L1 → L2 address aliasing.
//! Everything above this crate depends on the `Hasher` and
//! `AddressAliaser` traits only.

mod alias;
mod hash;

pub use alias::*;
pub use hash::*;
