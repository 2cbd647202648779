use std::collections::HashSet;

use alloy_primitives::{Address, B256, U256};

/// 32-byte Keccak-256 digest identifying a leaf or an internal tree node
pub type Digest = B256;

/// One row of a wave's allocation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRow {
    /// Address exactly as listed (origin-chain form for contract rows)
    pub address: Address,
    /// Token amount in the smallest unit
    pub amount: U256,
    /// Zero-based ordinal of the row in its list, header excluded.
    /// Part of the leaf identity; must match the order used on-chain.
    pub position: usize,
}

impl AllocationRow {
    pub fn new(address: Address, amount: U256, position: usize) -> Self {
        Self { address, amount, position }
    }
}

/// Addresses that are L1 contracts and must be aliased before they are
/// treated as L2 addresses.
///
/// Membership is decided on raw address bytes, so the textual case of the
/// source list does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSet {
    addresses: HashSet<Address>,
}

impl AliasSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Address) -> bool {
        self.addresses.insert(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl FromIterator<Address> for AliasSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}

/// Canonical, hashed form of one allocation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// L2 address the distributor pays out to (aliased for L1 contracts)
    pub address: Address,
    pub amount: U256,
    /// Row position in the source list, not the position in the sorted tree
    pub position: usize,
    /// `keccak256(abi.encodePacked(uint256 position, address, uint256 amount))`
    pub digest: Digest,
    /// Whether `address` is the alias of an L1 contract address
    pub aliased: bool,
}

impl Leaf {
    /// Leaf position as the `uint256` index passed to `claim`.
    pub fn index(&self) -> U256 {
        U256::from(self.position)
    }
}
