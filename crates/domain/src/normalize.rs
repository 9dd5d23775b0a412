//! JSON normalization for API boundaries.
//!
//! 256-bit integers serialize as `0x…` hex strings (the `primitive-types`
//! serde convention), which downstream consumers expecting plain decimal
//! numbers cannot read. [`normalize_value`] rewrites every such leaf to its
//! decimal string form, recursing through arrays and objects while
//! preserving structure and key order.

use primitive_types::U256;
use serde::Serialize;
use serde_json::Value;

/// Serializes `value` and normalizes every big-integer-like leaf.
///
/// # Errors
///
/// Returns an error only if `value` fails to serialize.
pub fn normalize<T: Serialize>(value: &T) -> serde_json::Result<Value> {
    let mut json = serde_json::to_value(value)?;
    normalize_value(&mut json);
    Ok(json)
}

/// Rewrites every `0x…` hex-quantity string leaf (optionally `-`-prefixed)
/// to its plain decimal form, in place.
///
/// Numbers, ordinary strings, booleans and null pass through untouched.
/// Never fails; terminates on any tree `serde_json::Value` can represent.
///
/// Hex strings are assumed to be quantities, not identifiers: a payload
/// carrying hex-encoded addresses or hashes must not be passed through
/// this pass.
pub fn normalize_value(value: &mut Value) {
    match value {
        Value::String(s) => {
            if let Some(decimal) = hex_quantity_to_decimal(s) {
                *s = decimal;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_value),
        Value::Object(map) => map.values_mut().for_each(normalize_value),
        _ => {}
    }
}

fn hex_quantity_to_decimal(s: &str) -> Option<String> {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let hex = unsigned.strip_prefix("0x")?;
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    // Quantities wider than 256 bits are left as-is rather than mangled.
    let magnitude = U256::from_str_radix(hex, 16).ok()?;
    Some(format!("{sign}{magnitude}"))
}
