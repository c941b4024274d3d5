// Core models
pub mod battle;
pub mod character;
pub mod deck;

// Re-export commonly used types
pub use battle::*;
pub use character::*;
pub use deck::*;

use thiserror::Error;

/// Ledger addresses travel as 0x-prefixed hex strings; the all-zero address
/// means "unset" (no winner yet, contract not deployed).
pub type Address = String;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub fn is_zero_address(addr: &str) -> bool {
    addr.trim().is_empty() || addr.trim() == ZERO_ADDRESS
}

/// A ledger view call returned a tuple the client could not decode.
#[derive(Debug, Error)]
#[error("malformed ledger tuple: {0}")]
pub struct DecodeError(pub String);

pub(crate) fn tuple_field<'a>(
    value: &'a serde_json::Value,
    idx: usize,
    what: &str,
) -> Result<&'a serde_json::Value, DecodeError> {
    value
        .as_array()
        .and_then(|fields| fields.get(idx))
        .ok_or_else(|| DecodeError(format!("missing field {} ({})", idx, what)))
}

pub(crate) fn field_str(
    value: &serde_json::Value,
    idx: usize,
    what: &str,
) -> Result<String, DecodeError> {
    tuple_field(value, idx, what)?
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| DecodeError(format!("field {} ({}) is not a string", idx, what)))
}

pub(crate) fn field_u64(
    value: &serde_json::Value,
    idx: usize,
    what: &str,
) -> Result<u64, DecodeError> {
    tuple_field(value, idx, what)?
        .as_u64()
        .ok_or_else(|| DecodeError(format!("field {} ({}) is not an unsigned integer", idx, what)))
}

pub(crate) fn field_bool(
    value: &serde_json::Value,
    idx: usize,
    what: &str,
) -> Result<bool, DecodeError> {
    tuple_field(value, idx, what)?
        .as_bool()
        .ok_or_else(|| DecodeError(format!("field {} ({}) is not a bool", idx, what)))
}

pub(crate) fn field_u64_array(
    value: &serde_json::Value,
    idx: usize,
    what: &str,
) -> Result<Vec<u64>, DecodeError> {
    tuple_field(value, idx, what)?
        .as_array()
        .ok_or_else(|| DecodeError(format!("field {} ({}) is not an array", idx, what)))?
        .iter()
        .map(|v| {
            v.as_u64()
                .ok_or_else(|| DecodeError(format!("field {} ({}) holds a non-integer", idx, what)))
        })
        .collect()
}
