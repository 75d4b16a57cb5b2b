//! Daemon reply types and error definitions.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to the upstream daemon.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Connection failure or unreadable/undecodable HTTP body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The round trip did not complete within the configured timeout.
    #[error("request timed out after {0}")]
    Timeout(humantime::Duration),

    /// The daemon answered with an error object.
    #[error("daemon error: {0}")]
    Daemon(String),

    /// The response decoded structurally, but the expected payload slot
    /// is missing or has the wrong shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The daemon returned an all-zero signature. The signing account is
    /// most likely locked.
    #[error("got zero-hash signature, signing account may be locked")]
    SignerLocked,

    /// Invalid construction-time settings (URL, timeout).
    #[error("upstream config error: {0}")]
    Config(String),
}

impl RpcError {
    /// True for outcomes that count against the upstream's health:
    /// transport failures and daemon-reported errors. Decode and
    /// domain-level failures do not.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            RpcError::Transport(_) | RpcError::Timeout(_) | RpcError::Daemon(_)
        )
    }
}

/// Result type for upstream daemon operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Full block header as the daemon reports it. All fields arrive as
/// strings regardless of their numeric nature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockHeader {
    #[serde(rename = "bits")]
    pub difficulty: String,
    pub hash: String,
    pub merkle_tree_hash: String,
    pub nonce: String,
    pub previous_block_hash: String,
    pub time_stamp: String,
    pub version: String,
    pub mixhash: String,
    pub number: String,
    pub transaction_count: String,
}

/// Header subset used when polling for new work: enough to detect a
/// height or difficulty change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockHeaderSummary {
    pub number: String,
    #[serde(rename = "bits")]
    pub difficulty: String,
}

/// Payload of the `balance` envelope slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceReply {
    /// Unspent amount as a decimal string.
    pub unspent: String,
}

/// Payload of the `transaction` envelope slot for `sendfrom`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendTransactionReply {
    pub hash: String,
}

/// Transaction receipt lookup reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TxReceipt {
    pub hash: String,
}
