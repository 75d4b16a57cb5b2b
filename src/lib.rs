//! Upstream daemon RPC adapter for a mining-pool backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │               UPSTREAM CLIENT                 │
//!   pool backend   │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!   ──────────────▶│  │  typed  │──▶│ transport │──▶│ envelope │  │──▶ daemon
//!   (get work,     │  │ wrapper │   │  (POST +  │   │  decode  │  │    (JSON-RPC
//!    submit, ...)  │  └─────────┘   │  timeout) │   └────┬─────┘  │     over HTTP)
//!                  │       ▲        └─────┬─────┘        │        │
//!                  │       │              │ outcome      │ slot   │
//!                  │       │        ┌─────▼─────┐        │        │
//!                  │       └────────│  health   │◀───────┘        │
//!                  │   typed value  │  tracker  │  success/fail   │
//!                  │   or RpcError  └───────────┘                 │
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! Every call is one awaited round trip; the only shared mutable state
//! is the per-upstream health tracker, whose sick/alive flag an external
//! selection layer reads to decide whether this daemon still gets work.

// Core subsystems
pub mod config;
pub mod rpc;

// Cross-cutting concerns
pub mod health;

pub use config::UpstreamConfig;
pub use health::{HealthSnapshot, HealthState, FAIL_THRESHOLD, SUCCESS_THRESHOLD};
pub use rpc::{RpcError, RpcResult, UpstreamClient};
