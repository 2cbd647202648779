//! A single allocation wave: one Merkle tree, one distributor contract.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use alloy_primitives::Address;
use tracing::{debug, warn};

use dropcraft_core::{AliasSet, AllocationRow, Digest, Leaf};
use dropcraft_crypto::{AddressAliaser, Hasher};
use dropcraft_prover::{MerkleProof, MerkleTree};

use crate::canonical::canonicalize;

/// One independently rooted batch of allocations.
///
/// Built once from its source rows and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Wave {
    /// Leaves sorted ascending by digest; index = tree leaf index
    leaves: Vec<Leaf>,
    tree: MerkleTree,
    /// Distributor contract that verifies this wave's root
    distributor: Address,
    /// Canonical address → index of its first leaf in `leaves`
    lookup: HashMap<Address, usize>,
}

impl Wave {
    /// Canonicalize every row, sort by digest and build the tree.
    pub fn build(
        rows: &[AllocationRow],
        aliases: &AliasSet,
        distributor: Address,
        aliaser: &dyn AddressAliaser,
        hasher: &dyn Hasher,
    ) -> Self {
        let mut leaves: Vec<Leaf> = rows
            .iter()
            .map(|row| canonicalize(row, aliases, aliaser, hasher))
            .collect();

        // Stable sort: equal digests keep row order.
        leaves.sort_by(|a, b| a.digest.cmp(&b.digest));

        let mut lookup: HashMap<Address, usize> = HashMap::with_capacity(leaves.len());
        for (index, leaf) in leaves.iter().enumerate() {
            match lookup.entry(leaf.address) {
                Entry::Occupied(first) => warn!(
                    "Wave {}: address {} listed more than once (rows {} and {})",
                    distributor,
                    leaf.address,
                    leaves[*first.get()].position,
                    leaf.position
                ),
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }

        let tree = MerkleTree::from_leaves(hasher, leaves.iter().map(|l| l.digest).collect());
        debug!(
            "Built wave for {} with {} leaves ({} aliased), root {}",
            distributor,
            leaves.len(),
            leaves.iter().filter(|l| l.aliased).count(),
            tree.root()
        );

        Self {
            leaves,
            tree,
            distributor,
            lookup,
        }
    }

    pub fn root(&self) -> Digest {
        self.tree.root()
    }

    pub fn distributor(&self) -> Address {
        self.distributor
    }

    /// Leaves in tree order (ascending digest).
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Find the first leaf paying out to `address`, with its tree index.
    pub fn find(&self, address: &Address) -> Option<(usize, &Leaf)> {
        let index = *self.lookup.get(address)?;
        Some((index, &self.leaves[index]))
    }

    /// Inclusion proof for the leaf at tree index `leaf_index`.
    pub fn proof(&self, leaf_index: usize) -> Option<MerkleProof> {
        self.tree.proof(leaf_index)
    }

    /// Check a proof against this wave's root.
    pub fn verify(&self, hasher: &dyn Hasher, leaf: &Digest, proof: &MerkleProof) -> bool {
        MerkleTree::verify(hasher, &self.root(), leaf, proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use dropcraft_crypto::{Keccak256Hasher, L1ToL2Aliaser};

    fn rows(entries: &[(u8, u64)]) -> Vec<AllocationRow> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (byte, amount))| {
                AllocationRow::new(Address::repeat_byte(*byte), U256::from(*amount), i)
            })
            .collect()
    }

    fn build(rows: &[AllocationRow], aliases: &AliasSet) -> Wave {
        Wave::build(rows, aliases, Address::repeat_byte(0xD1), &L1ToL2Aliaser, &Keccak256Hasher)
    }

    #[test]
    fn test_leaves_sorted_by_digest() {
        let wave = build(&rows(&[(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]), &AliasSet::new());
        let digests: Vec<_> = wave.leaves().iter().map(|l| l.digest).collect();
        let mut sorted = digests.clone();
        sorted.sort();
        assert_eq!(digests, sorted);
    }

    #[test]
    fn test_every_leaf_verifies() {
        let wave = build(&rows(&[(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]), &AliasSet::new());
        for (i, leaf) in wave.leaves().iter().enumerate() {
            let proof = wave.proof(i).unwrap();
            assert!(wave.verify(&Keccak256Hasher, &leaf.digest, &proof));
        }
    }

    #[test]
    fn test_build_twice_identical() {
        let input = rows(&[(1, 10), (2, 20), (3, 30)]);
        let a = build(&input, &AliasSet::new());
        let b = build(&input, &AliasSet::new());
        assert_eq!(a.root(), b.root());
        for i in 0..a.len() {
            assert_eq!(a.proof(i), b.proof(i));
        }
    }

    #[test]
    fn test_find_by_canonical_address() {
        let aliases: AliasSet = [Address::repeat_byte(2)].into_iter().collect();
        let wave = build(&rows(&[(1, 10), (2, 20)]), &aliases);

        assert!(wave.find(&Address::repeat_byte(2)).is_none());
        let (index, leaf) = wave.find(&L1ToL2Aliaser.alias(Address::repeat_byte(2))).unwrap();
        assert_eq!(leaf.amount, U256::from(20u64));
        assert_eq!(leaf.position, 1);
        assert_eq!(wave.leaves()[index], *leaf);
    }

    #[test]
    fn test_duplicate_address_keeps_both_leaves() {
        let wave = build(&rows(&[(1, 10), (1, 99)]), &AliasSet::new());
        assert_eq!(wave.len(), 2);

        // Lookup returns the first leaf in tree order
        let (index, _) = wave.find(&Address::repeat_byte(1)).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_empty_wave() {
        let wave = build(&[], &AliasSet::new());
        assert!(wave.is_empty());
        assert_eq!(wave.root(), Digest::ZERO);
        assert!(wave.find(&Address::repeat_byte(1)).is_none());
    }
}
