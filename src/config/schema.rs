//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Settings for one upstream daemon endpoint.
///
/// Deserialized from whatever config source the embedding application
/// uses; every field has a default so minimal configs work. Validation
/// of the URL and timeout happens when the client is constructed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Display name used in logs and by the selection layer.
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Daemon account used for authenticated calls.
    pub account: String,

    /// Password for the daemon account.
    pub password: String,

    /// Request timeout as a humantime string (e.g. "10s", "500ms").
    pub timeout: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            url: "http://127.0.0.1:8820/rpc".to_string(),
            account: String::new(),
            password: String::new(),
            timeout: "10s".to_string(),
        }
    }
}
