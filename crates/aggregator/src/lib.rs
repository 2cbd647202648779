//! DropCraft Aggregator
//!
//! Builds the multi-wave allocation index. Each wave is an independent
//! `(allocation list, alias list, distributor)` triple with its own Merkle
//! tree; the index answers "which waves is this address eligible in, and
//! with what proof".
//!
//! The index is built once at startup and never mutated.

pub mod canonical;
mod wave;

use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, info};

use dropcraft_core::{AliasSet, AllocationRow, Digest, DropCraftError, Leaf, Result};
use dropcraft_crypto::{AddressAliaser, Hasher, Keccak256Hasher, L1ToL2Aliaser};
use dropcraft_prover::MerkleProof;

pub use canonical::canonicalize;
pub use wave::Wave;

/// A leaf found in one wave, with everything needed to claim it.
#[derive(Debug, Clone)]
pub struct WaveMatch<'a> {
    /// Position of the wave in the configured wave list
    pub wave_index: usize,
    pub wave: &'a Wave,
    /// Index of the leaf in the wave's tree
    pub leaf_index: usize,
    pub leaf: &'a Leaf,
    pub proof: MerkleProof,
}

/// Ordered set of waves.
pub struct Allocation {
    waves: Vec<Wave>,
    aliaser: Arc<dyn AddressAliaser>,
    hasher: Arc<dyn Hasher>,
}

impl std::fmt::Debug for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocation")
            .field("waves", &self.waves.len())
            .finish()
    }
}

impl Allocation {
    /// Build with Keccak-256 leaves and the L1 → L2 alias.
    pub fn build(
        allocations: &[Vec<AllocationRow>],
        aliases: &[AliasSet],
        distributors: &[Address],
    ) -> Result<Self> {
        Self::build_with(
            allocations,
            aliases,
            distributors,
            Arc::new(L1ToL2Aliaser),
            Arc::new(Keccak256Hasher),
        )
    }

    /// Build from three parallel lists, one entry per wave.
    ///
    /// Fails with a configuration error if the lists differ in length.
    pub fn build_with(
        allocations: &[Vec<AllocationRow>],
        aliases: &[AliasSet],
        distributors: &[Address],
        aliaser: Arc<dyn AddressAliaser>,
        hasher: Arc<dyn Hasher>,
    ) -> Result<Self> {
        if allocations.len() != aliases.len() || aliases.len() != distributors.len() {
            return Err(DropCraftError::Configuration(format!(
                "mismatch between wave inputs: {} allocation lists, {} alias lists, {} distributors",
                allocations.len(),
                aliases.len(),
                distributors.len()
            )));
        }

        let waves: Vec<Wave> = allocations
            .iter()
            .zip(aliases)
            .zip(distributors)
            .map(|((rows, alias_set), distributor)| {
                Wave::build(rows, alias_set, *distributor, aliaser.as_ref(), hasher.as_ref())
            })
            .collect();

        info!(
            "Built allocation index: {} waves, {} leaves",
            waves.len(),
            waves.iter().map(Wave::len).sum::<usize>()
        );

        Ok(Self {
            waves,
            aliaser,
            hasher,
        })
    }

    /// Waves in configured order.
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// Root of every wave, in configured order.
    pub fn roots(&self) -> Vec<Digest> {
        self.waves.iter().map(Wave::root).collect()
    }

    pub fn aliaser(&self) -> &dyn AddressAliaser {
        self.aliaser.as_ref()
    }

    pub fn hasher(&self) -> &dyn Hasher {
        self.hasher.as_ref()
    }

    /// First wave (in configured order) containing `address`.
    pub fn find_by_address(&self, address: &Address) -> Option<WaveMatch<'_>> {
        self.matches(*address).next()
    }

    /// Every wave containing `address`, one match per wave, in wave order.
    pub fn find_all(&self, address: &Address) -> Vec<WaveMatch<'_>> {
        let found: Vec<_> = self.matches(*address).collect();
        debug!("Address {} found in {} wave(s)", address, found.len());
        found
    }

    fn matches(&self, address: Address) -> impl Iterator<Item = WaveMatch<'_>> + '_ {
        self.waves
            .iter()
            .enumerate()
            .filter_map(move |(wave_index, wave)| {
                let (leaf_index, leaf) = wave.find(&address)?;
                let proof = wave.proof(leaf_index)?;
                Some(WaveMatch {
                    wave_index,
                    wave,
                    leaf_index,
                    leaf,
                    proof,
                })
            })
    }

    /// Check a match's proof against its wave root.
    pub fn verify(&self, found: &WaveMatch<'_>) -> bool {
        found
            .wave
            .verify(self.hasher.as_ref(), &found.leaf.digest, &found.proof)
    }
}
