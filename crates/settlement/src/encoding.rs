//! Serde helpers for the JSON output.
//!
//! Addresses are rendered EIP-55 checksummed, amounts as decimal strings
//! (they routinely exceed JSON's safe integer range) and byte strings as
//! `0x`-prefixed lowercase hex.

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

pub fn checksummed<S: Serializer>(address: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&address.to_checksum(None))
}

pub fn checksummed_opt<S: Serializer>(address: &Option<Address>, s: S) -> Result<S::Ok, S::Error> {
    match address {
        Some(address) => checksummed(address, s),
        None => s.serialize_none(),
    }
}

pub fn decimal<S: Serializer>(value: &U256, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&value.to_string())
}

pub fn hex_bytes<S: Serializer>(bytes: &Bytes, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode_prefixed(bytes))
}

pub fn hex_bytes_list<S: Serializer>(list: &[Bytes], s: S) -> Result<S::Ok, S::Error> {
    let mut seq = s.serialize_seq(Some(list.len()))?;
    for bytes in list {
        seq.serialize_element(&hex::encode_prefixed(bytes))?;
    }
    seq.end()
}

pub fn hex_digests<S: Serializer>(digests: &[B256], s: S) -> Result<S::Ok, S::Error> {
    let mut seq = s.serialize_seq(Some(digests.len()))?;
    for digest in digests {
        seq.serialize_element(&hex::encode_prefixed(digest))?;
    }
    seq.end()
}

/// Render a document as JSON with four-space indentation.
pub fn to_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
