//! Allocation table parsing
//!
//! Input lists are RFC 4180 CSV: a header row that is always discarded, then
//! one `address,amount` row per allocation. Alias lists reuse the format and
//! only read the first column. Row order defines leaf positions, so blank
//! lines are skipped without consuming a position.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::{AliasSet, AllocationRow, DropCraftError, Result};

/// Parse a hex address, with or without `0x`, in any letter case.
pub fn parse_address(text: &str) -> Result<Address> {
    let trimmed = text.trim();
    Address::from_str(trimmed)
        .map_err(|e| DropCraftError::Validation(format!("invalid address '{}': {}", trimmed, e)))
}

/// Parse a non-negative decimal amount that fits in a `uint256`.
pub fn parse_amount(text: &str) -> Result<U256> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DropCraftError::Validation("empty amount".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(DropCraftError::Validation(format!(
            "negative amount '{}'",
            trimmed
        )));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DropCraftError::Validation(format!(
            "non-numeric amount '{}'",
            trimmed
        )));
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| {
        DropCraftError::Validation(format!("amount '{}' overflows uint256", trimmed))
    })
}

/// Read the data records of a CSV document, skipping the header.
///
/// Each record carries its 1-based line number. Rows with no content are
/// dropped.
fn data_rows(source: &str, content: &str) -> Result<Vec<(u64, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            DropCraftError::Validation(format!("{}:{}: malformed CSV: {}", source, line, e))
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push((line, record));
    }
    Ok(rows)
}

/// Parse an allocation list. `source` names the input in error messages.
pub fn parse_allocation_table(source: &str, content: &str) -> Result<Vec<AllocationRow>> {
    let mut rows = Vec::new();

    for (line_no, record) in data_rows(source, content)? {
        if record.len() < 2 {
            return Err(DropCraftError::Validation(format!(
                "{}:{}: expected 'address,amount', got {} column(s)",
                source,
                line_no,
                record.len()
            )));
        }
        let address = parse_address(&record[0])
            .map_err(|e| DropCraftError::Validation(format!("{}:{}: {}", source, line_no, e)))?;
        let amount = parse_amount(&record[1])
            .map_err(|e| DropCraftError::Validation(format!("{}:{}: {}", source, line_no, e)))?;

        let position = rows.len();
        rows.push(AllocationRow::new(address, amount, position));
    }

    debug!("Parsed {} allocation rows from {}", rows.len(), source);
    Ok(rows)
}

/// Parse an alias list (first column holds the L1 contract address).
pub fn parse_alias_table(source: &str, content: &str) -> Result<AliasSet> {
    let mut set = AliasSet::new();

    for (line_no, record) in data_rows(source, content)? {
        let address = parse_address(record.get(0).unwrap_or_default())
            .map_err(|e| DropCraftError::Validation(format!("{}:{}: {}", source, line_no, e)))?;
        set.insert(address);
    }

    debug!("Parsed {} alias entries from {}", set.len(), source);
    Ok(set)
}
