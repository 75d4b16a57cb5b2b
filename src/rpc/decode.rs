//! Lenient decoding of the daemon's loosely-typed wire values.
//!
//! The upstream RPC surface is not strictly typed: booleans can arrive
//! as the string `"false"`, counters as `"0x"`-prefixed hex strings and
//! amounts as decimal strings. Every special case lives here instead of
//! being scattered through the method wrappers.

use num_bigint::BigUint;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::rpc::types::{RpcError, RpcResult};

/// Interpret a result payload as a boolean outcome.
///
/// The exact string `"false"` means logical false; anything else,
/// including a hex hash echoed back on success, means true.
pub fn lenient_bool(value: &Value) -> bool {
    !matches!(value, Value::String(s) if s == "false")
}

/// Parse an integer sent as a hex string with an optional `0x` prefix.
pub fn hex_u64(text: &str) -> RpcResult<u64> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::Decode(format!("hex integer '{}': {}", text, e)))
}

/// Parse an amount sent as a decimal string into an arbitrary-precision
/// unsigned integer.
pub fn decimal_biguint(text: &str) -> RpcResult<BigUint> {
    text.parse::<BigUint>()
        .map_err(|e| RpcError::Decode(format!("decimal amount '{}': {}", text, e)))
}

/// True when a hash string is the canonical all-zero value, with or
/// without a `0x` prefix. The signer returns it instead of failing when
/// the account is locked.
pub fn is_zero_hash(hash: &str) -> bool {
    let digits = hash.strip_prefix("0x").unwrap_or(hash);
    !digits.is_empty() && digits.bytes().all(|b| b == b'0')
}

/// SHA-256 of a payload, hex-encoded with a `0x` prefix, as the signing
/// call expects its digest parameter.
pub fn sha256_hex(payload: &[u8]) -> String {
    let digest = Sha256::digest(payload);
    format!("0x{}", hex::encode(digest))
}
