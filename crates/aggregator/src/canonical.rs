//! Leaf canonicalization.
//!
//! A row becomes a leaf in two steps: rows listed in the wave's alias set
//! are L1 contracts and get the L1 → L2 alias applied, then the
//! `(position, address, amount)` tuple is packed and hashed.

use alloy_primitives::U256;
use dropcraft_core::{AliasSet, AllocationRow, Leaf};
use dropcraft_crypto::{leaf_digest, AddressAliaser, Hasher};
use tracing::trace;

/// Turn one allocation row into its canonical leaf.
pub fn canonicalize(
    row: &AllocationRow,
    aliases: &AliasSet,
    aliaser: &dyn AddressAliaser,
    hasher: &dyn Hasher,
) -> Leaf {
    let aliased = aliases.contains(&row.address);
    let address = if aliased {
        let l2 = aliaser.alias(row.address);
        trace!("Row {}: aliased {} -> {}", row.position, row.address, l2);
        l2
    } else {
        row.address
    };

    let position = U256::from(row.position);
    Leaf {
        address,
        amount: row.amount,
        position: row.position,
        digest: leaf_digest(hasher, position, address, row.amount),
        aliased,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use dropcraft_crypto::{Keccak256Hasher, L1ToL2Aliaser};

    fn row(byte: u8, amount: u64, position: usize) -> AllocationRow {
        AllocationRow::new(Address::repeat_byte(byte), U256::from(amount), position)
    }

    #[test]
    fn test_unlisted_address_unchanged() {
        let leaf = canonicalize(&row(0xAA, 100, 0), &AliasSet::new(), &L1ToL2Aliaser, &Keccak256Hasher);
        assert_eq!(leaf.address, Address::repeat_byte(0xAA));
        assert!(!leaf.aliased);
        assert_eq!(leaf.amount, U256::from(100u64));
        assert_eq!(leaf.position, 0);
    }

    #[test]
    fn test_listed_address_aliased() {
        let aliases: AliasSet = [Address::repeat_byte(0xAA)].into_iter().collect();
        let leaf = canonicalize(&row(0xAA, 100, 4), &aliases, &L1ToL2Aliaser, &Keccak256Hasher);

        assert_eq!(leaf.address, L1ToL2Aliaser.alias(Address::repeat_byte(0xAA)));
        assert_ne!(leaf.address, Address::repeat_byte(0xAA));
        assert!(leaf.aliased);
    }

    #[test]
    fn test_digest_hashes_canonical_address() {
        let aliases: AliasSet = [Address::repeat_byte(0xAA)].into_iter().collect();
        let leaf = canonicalize(&row(0xAA, 100, 4), &aliases, &L1ToL2Aliaser, &Keccak256Hasher);

        let expected = leaf_digest(
            &Keccak256Hasher,
            U256::from(4u64),
            L1ToL2Aliaser.alias(Address::repeat_byte(0xAA)),
            U256::from(100u64),
        );
        assert_eq!(leaf.digest, expected);
    }

    #[test]
    fn test_digest_tied_to_row_position() {
        let a = canonicalize(&row(0xAA, 100, 0), &AliasSet::new(), &L1ToL2Aliaser, &Keccak256Hasher);
        let b = canonicalize(&row(0xAA, 100, 1), &AliasSet::new(), &L1ToL2Aliaser, &Keccak256Hasher);
        assert_ne!(a.digest, b.digest);
    }
}
