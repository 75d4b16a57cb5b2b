//! Health tracking subsystem.
//!
//! # Data Flow
//! ```text
//! Passive tracking:
//!     Every RPC round trip outcome
//!     → record_failure / record_success on state.rs
//!     → sick flag flips on threshold breach
//!
//! Active probing:
//!     UpstreamClient::check() issues a lightweight getwork
//!     → outcome feeds the same state machine
//!     → selection layer reads is_sick()
//! ```
//!
//! # Design Decisions
//! - Passive and active observations feed one state machine
//! - State transitions require consecutive successes/failures
//! - Health state is per-upstream, advisory only

pub mod state;

pub use state::{HealthSnapshot, HealthState, FAIL_THRESHOLD, SUCCESS_THRESHOLD};
