//! Upstream RPC subsystem.
//!
//! # Data Flow
//! ```text
//! Typed wrapper (client.rs surface)
//!     → call(): build request, POST, decode envelope (envelope.rs)
//!     → outcome recorded on the health tracker
//!     → wrapper decodes one payload slot (decode.rs, types.rs)
//!     → typed value or RpcError to the caller
//! ```
//!
//! # Design Decisions
//! - One health mutation per round trip, success or failure
//! - Envelope payload slots are named in one enum, not per-method strings
//! - All lenient wire-value parsing is concentrated in decode.rs

pub mod client;
pub mod decode;
pub mod envelope;
pub mod types;

pub use client::UpstreamClient;
pub use envelope::{Envelope, Slot};
pub use types::{
    BalanceReply, BlockHeader, BlockHeaderSummary, RpcError, RpcResult, SendTransactionReply,
    TxReceipt,
};
