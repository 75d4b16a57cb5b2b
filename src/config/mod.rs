//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! embedding application (its own file/env plumbing)
//!     → UpstreamConfig (serde, all fields defaulted)
//!     → UpstreamClient::from_config (URL and timeout validated here)
//!     → immutable for the client's lifetime
//! ```
//!
//! # Design Decisions
//! - This crate deserializes and validates; loading files is the caller's job
//! - All fields have defaults to allow minimal configs
//! - Timeouts are humantime strings ("10s"), parsed once at construction

pub mod schema;

pub use schema::UpstreamConfig;
