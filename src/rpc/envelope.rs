//! JSON-RPC request and response envelope.
//!
//! # Wire Contract
//! Request body: `{"jsonrpc":"2.0","method":<name>,"params":<params>,"id":0}`.
//! The id is constant: calls are synchronous and unpipelined, so responses
//! never need to be correlated.
//!
//! The daemon's response envelope is not uniform. Most methods deliver
//! their payload under `result`, but some arrive under method-specific
//! keys (`balance`, `transaction`) instead. The [`Slot`] enum names the
//! known payload slots in one place so wrappers never reach into raw
//! field names.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rpc::types::{RpcError, RpcResult};

/// Outgoing JSON-RPC request object.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    pub id: u32,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: 0,
        }
    }
}

/// Named payload slot of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The generic `result` field.
    Result,
    /// The `balance` field used by balance queries.
    Balance,
    /// The `transaction` field used by transfer and receipt queries.
    Transaction,
}

impl Slot {
    fn key(self) -> &'static str {
        match self {
            Slot::Result => "result",
            Slot::Balance => "balance",
            Slot::Transaction => "transaction",
        }
    }
}

/// Error object inside a response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

/// Decoded response envelope. A JSON `null` in any payload slot is
/// treated the same as an absent slot.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    balance: Option<Value>,
    #[serde(default)]
    transaction: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

impl Envelope {
    /// Daemon-reported error, if any.
    pub fn error(&self) -> Option<&ErrorObject> {
        self.error.as_ref()
    }

    /// Raw payload of a slot, if present and non-null.
    pub fn slot(&self, slot: Slot) -> Option<&Value> {
        let value = match slot {
            Slot::Result => self.result.as_ref(),
            Slot::Balance => self.balance.as_ref(),
            Slot::Transaction => self.transaction.as_ref(),
        };
        value.filter(|v| !v.is_null())
    }

    /// Raw payload of a slot that must be present. A response carrying
    /// neither an error nor the expected payload violates the protocol.
    pub fn require(&self, slot: Slot) -> RpcResult<&Value> {
        self.slot(slot).ok_or_else(|| {
            RpcError::Decode(format!("response carries no `{}` payload", slot.key()))
        })
    }

    /// Decode a mandatory payload slot into a typed value.
    pub fn decode<T: DeserializeOwned>(&self, slot: Slot) -> RpcResult<T> {
        let value = self.require(slot)?;
        serde_json::from_value(value.clone())
            .map_err(|e| RpcError::Decode(format!("`{}` payload: {}", slot.key(), e)))
    }

    /// Decode a payload slot where absence is a normal outcome (e.g. no
    /// pending block yet).
    pub fn decode_optional<T: DeserializeOwned>(&self, slot: Slot) -> RpcResult<Option<T>> {
        match self.slot(slot) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| RpcError::Decode(format!("`{}` payload: {}", slot.key(), e))),
            None => Ok(None),
        }
    }
}
