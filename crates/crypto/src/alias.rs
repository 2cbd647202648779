//! L1 → L2 address aliasing.
//!
//! When an L1 contract sends a message to L2, the bridge rewrites the
//! sender as `l1_address + 0x1111000000000000000000000000000000001111`
//! modulo 2^160. Allocations granted to L1 contracts are therefore paid out
//! to the aliased address.

use alloy_primitives::{address, Address, U256};

/// Offset added by the bridge to L1 contract senders.
pub const L1_TO_L2_ALIAS_OFFSET: Address = address!("1111000000000000000000000000000000001111");

/// Deterministic, injective mapping between two chains' address spaces.
pub trait AddressAliaser: Send + Sync {
    /// Origin-chain address → destination-chain address.
    fn alias(&self, address: Address) -> Address;

    /// Inverse of [`alias`](Self::alias).
    fn unalias(&self, address: Address) -> Address;
}

/// The zkSync-family L1 → L2 alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct L1ToL2Aliaser;

fn to_uint(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

fn from_uint(value: U256) -> Address {
    let masked: U256 = value & (U256::MAX >> 96);
    Address::from_slice(&masked.to_be_bytes::<32>()[12..])
}

impl AddressAliaser for L1ToL2Aliaser {
    fn alias(&self, address: Address) -> Address {
        from_uint(to_uint(address).wrapping_add(to_uint(L1_TO_L2_ALIAS_OFFSET)))
    }

    fn unalias(&self, address: Address) -> Address {
        from_uint(to_uint(address).wrapping_sub(to_uint(L1_TO_L2_ALIAS_OFFSET)))
    }
}
