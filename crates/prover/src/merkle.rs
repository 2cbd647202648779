//! Binary Merkle tree for distributor proofs.
//!
//! Internal nodes: `H(min(left, right) || max(left, right))`.
//! If a level has an odd number of nodes, the last one is promoted to the
//! next level unchanged (no duplication, no zero padding).
//!
//! Leaves are taken in the order given. Callers that need an
//! order-independent commitment sort the digests first.

use dropcraft_core::Digest;
use dropcraft_crypto::Hasher;
use tracing::trace;

/// A Merkle proof consisting of sibling hashes along the path to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    /// Sibling hashes from leaf level to root (bottom-up). Levels where the
    /// node was promoted without a sibling contribute nothing.
    pub siblings: Vec<Digest>,
    /// Index of the leaf in the tree's leaf layer
    pub leaf_index: usize,
}

/// A binary Merkle tree with sorted-pair hashing.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// All nodes stored level by level, bottom-up. `layers[0]` = leaves.
    layers: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree from pre-hashed leaves.
    pub fn from_leaves<H: Hasher + ?Sized>(hasher: &H, leaves: Vec<Digest>) -> Self {
        let mut layers = vec![leaves];

        while layers[layers.len() - 1].len() > 1 {
            let prev = &layers[layers.len() - 1];
            let mut next_layer = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                match pair {
                    [left, right] => next_layer.push(hasher.hash_sorted_pair(left, right)),
                    [single] => next_layer.push(*single),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                }
            }
            trace!("Built tree level with {} nodes", next_layer.len());
            layers.push(next_layer);
        }

        Self { layers }
    }

    /// Get the Merkle root. An empty tree has the all-zero 32-byte root,
    /// never an empty byte string.
    pub fn root(&self) -> Digest {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(Digest::ZERO)
    }

    /// Generate a proof for the leaf at the given index.
    ///
    /// Returns `None` if the index is out of range.
    pub fn proof(&self, leaf_index: usize) -> Option<MerkleProof> {
        if leaf_index >= self.layers[0].len() {
            return None;
        }

        let mut siblings = Vec::with_capacity(self.layers.len().saturating_sub(1));
        let mut idx = leaf_index;

        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling_idx = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            if let Some(sibling) = layer.get(sibling_idx) {
                siblings.push(*sibling);
            }
            idx /= 2;
        }

        Some(MerkleProof {
            siblings,
            leaf_index,
        })
    }

    /// Verify a Merkle proof against a given root and leaf hash.
    ///
    /// Position is irrelevant under sorted-pair hashing, so only the sibling
    /// list is consulted. This is the same fold the distributor contract runs.
    pub fn verify<H: Hasher + ?Sized>(
        hasher: &H,
        root: &Digest,
        leaf: &Digest,
        proof: &MerkleProof,
    ) -> bool {
        let computed = proof
            .siblings
            .iter()
            .fold(*leaf, |current, sibling| hasher.hash_sorted_pair(&current, sibling));
        computed == *root
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of levels including the leaf level.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.layers[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use dropcraft_crypto::Keccak256Hasher;

    const H: Keccak256Hasher = Keccak256Hasher;

    fn leaf(seed: u8) -> Digest {
        H.hash(&[seed])
    }

    fn sorted_leaves(n: u8) -> Vec<Digest> {
        let mut leaves: Vec<Digest> = (0..n).map(leaf).collect();
        leaves.sort();
        leaves
    }

    #[test]
    fn test_single_leaf() {
        let tree = MerkleTree::from_leaves(&H, vec![leaf(1)]);

        // Single leaf: root == leaf, empty proof
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.root(), leaf(1));
        let proof = tree.proof(0).unwrap();
        assert!(proof.siblings.is_empty());
        assert!(MerkleTree::verify(&H, &tree.root(), &leaf(1), &proof));
    }

    #[test]
    fn test_power_of_two() {
        let l = sorted_leaves(4);
        let tree = MerkleTree::from_leaves(&H, l.clone());

        let h01 = H.hash_sorted_pair(&l[0], &l[1]);
        let h23 = H.hash_sorted_pair(&l[2], &l[3]);
        assert_eq!(tree.root(), H.hash_sorted_pair(&h01, &h23));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_odd_node_promoted_unchanged() {
        // 3 leaves: l2 is promoted to level 1 without hashing
        let l = sorted_leaves(3);
        let tree = MerkleTree::from_leaves(&H, l.clone());

        let h01 = H.hash_sorted_pair(&l[0], &l[1]);
        assert_eq!(tree.root(), H.hash_sorted_pair(&h01, &l[2]));

        // The promoted leaf has a one-element proof, the others two.
        assert_eq!(tree.proof(2).unwrap().siblings, vec![h01]);
        assert_eq!(tree.proof(1).unwrap().siblings, vec![l[0], l[2]]);
    }

    #[test]
    fn test_pair_order_does_not_change_parent() {
        let a = leaf(1);
        let b = leaf(2);
        let forward = MerkleTree::from_leaves(&H, vec![a, b]);
        let backward = MerkleTree::from_leaves(&H, vec![b, a]);
        assert_eq!(forward.root(), backward.root());
    }

    #[test]
    fn test_proof_verify_roundtrip() {
        for n in 1..=17u8 {
            let leaves = sorted_leaves(n);
            let tree = MerkleTree::from_leaves(&H, leaves.clone());
            let root = tree.root();

            for (i, l) in leaves.iter().enumerate() {
                let proof = tree.proof(i).expect("proof should exist");
                assert_eq!(proof.leaf_index, i);
                assert!(
                    MerkleTree::verify(&H, &root, l, &proof),
                    "proof for leaf {} of {} should verify",
                    i,
                    n
                );
            }
        }
    }

    #[test]
    fn test_single_bit_mutation_of_sibling_fails() {
        let leaves = sorted_leaves(7);
        let tree = MerkleTree::from_leaves(&H, leaves.clone());
        let root = tree.root();

        for (i, l) in leaves.iter().enumerate() {
            let proof = tree.proof(i).unwrap();
            for s in 0..proof.siblings.len() {
                for bit in [0usize, 7, 128, 255] {
                    let mut tampered = proof.clone();
                    tampered.siblings[s].0[bit / 8] ^= 1 << (bit % 8);
                    assert!(!MerkleTree::verify(&H, &root, l, &tampered));
                }
            }
        }
    }

    #[test]
    fn test_single_bit_mutation_of_leaf_fails() {
        let leaves = sorted_leaves(5);
        let tree = MerkleTree::from_leaves(&H, leaves.clone());
        let proof = tree.proof(3).unwrap();

        let mut tampered = leaves[3];
        tampered.0[31] ^= 0x01;
        assert!(!MerkleTree::verify(&H, &tree.root(), &tampered, &proof));
    }

    #[test]
    fn test_wrong_root_fails() {
        let tree = MerkleTree::from_leaves(&H, sorted_leaves(2));
        let proof = tree.proof(0).unwrap();
        let wrong_root = B256::repeat_byte(0xFF);
        assert!(!MerkleTree::verify(&H, &wrong_root, &tree.leaves()[0], &proof));
    }

    #[test]
    fn test_empty_tree() {
        let tree = MerkleTree::from_leaves(&H, Vec::new());
        assert_eq!(tree.root(), B256::ZERO);
        assert_eq!(tree.leaf_count(), 0);
        assert!(tree.proof(0).is_none());
    }

    #[test]
    fn test_proof_out_of_range() {
        let tree = MerkleTree::from_leaves(&H, sorted_leaves(2));
        assert!(tree.proof(5).is_none());
    }

    #[test]
    fn test_deterministic() {
        let tree1 = MerkleTree::from_leaves(&H, sorted_leaves(9));
        let tree2 = MerkleTree::from_leaves(&H, sorted_leaves(9));
        assert_eq!(tree1.root(), tree2.root());
        for i in 0..9 {
            assert_eq!(tree1.proof(i), tree2.proof(i));
        }
    }

    #[test]
    fn test_duplicate_digests_allowed() {
        let l = leaf(1);
        let tree = MerkleTree::from_leaves(&H, vec![l, l, leaf(2)]);
        let proof = tree.proof(1).unwrap();
        assert!(MerkleTree::verify(&H, &tree.root(), &l, &proof));
    }
}
