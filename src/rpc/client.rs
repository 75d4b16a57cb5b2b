//! Upstream daemon RPC client with timeout, envelope and health handling.
//!
//! # Responsibilities
//! - Build and POST JSON-RPC requests to the daemon endpoint
//! - Decode the heterogeneous response envelope
//! - Feed every round trip outcome into the health tracker
//! - Expose the typed method surface the pool backend calls

use std::fmt;
use std::time::Duration;

use num_bigint::BigUint;
use reqwest::header;
use serde_json::{json, Value};
use tokio::time;
use url::Url;

use crate::config::UpstreamConfig;
use crate::health::{HealthSnapshot, HealthState};
use crate::rpc::decode;
use crate::rpc::envelope::{Envelope, RpcRequest, Slot};
use crate::rpc::types::{
    BalanceReply, BlockHeader, BlockHeaderSummary, RpcError, RpcResult, SendTransactionReply,
    TxReceipt,
};

/// Client for one upstream daemon endpoint.
///
/// Shared across caller tasks; every public method is one awaited HTTP
/// round trip with no internal queueing or retrying. Whether the daemon
/// may still serve work is advisory state read through [`is_sick`].
///
/// [`is_sick`]: UpstreamClient::is_sick
pub struct UpstreamClient {
    name: String,
    url: Url,
    account: String,
    password: String,
    timeout: Duration,
    health: HealthState,
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Create a client for a daemon endpoint.
    ///
    /// `timeout` is a human-readable duration such as `"10s"` or
    /// `"50ms"`; invalid durations and unparseable URLs fail here, not
    /// on the first call.
    pub fn new(
        name: &str,
        url: &str,
        account: &str,
        password: &str,
        timeout: &str,
    ) -> RpcResult<Self> {
        let url: Url = url
            .parse()
            .map_err(|e| RpcError::Config(format!("invalid upstream url '{}': {}", url, e)))?;
        let timeout = humantime::parse_duration(timeout)
            .map_err(|e| RpcError::Config(format!("invalid timeout '{}': {}", timeout, e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RpcError::Config(format!("http transport: {}", e)))?;

        tracing::info!(
            upstream = %name,
            url = %url,
            timeout = %humantime::format_duration(timeout),
            "upstream client initialized"
        );

        Ok(Self {
            name: name.to_string(),
            url,
            account: account.to_string(),
            password: password.to_string(),
            timeout,
            health: HealthState::new(),
            http,
        })
    }

    /// Create a client from a configuration block.
    pub fn from_config(config: &UpstreamConfig) -> RpcResult<Self> {
        Self::new(
            &config.name,
            &config.url,
            &config.account,
            &config.password,
            &config.timeout,
        )
    }

    /// Upstream display name, for the selection layer's logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this upstream is currently considered sick.
    pub fn is_sick(&self) -> bool {
        self.health.is_sick()
    }

    /// Diagnostic view of the health counters.
    pub fn health(&self) -> HealthSnapshot {
        self.health.snapshot()
    }

    /// Liveness probe: exercise the transport with a `getwork` call.
    ///
    /// The probe's own success/failure feeds the health tracker like any
    /// other call; the work payload is discarded. Returns false on any
    /// call error, otherwise the inverse of [`is_sick`], so a sick
    /// upstream only reports healthy again once enough consecutive
    /// probes have succeeded.
    ///
    /// [`is_sick`]: UpstreamClient::is_sick
    pub async fn check(&self) -> bool {
        if self.get_work().await.is_err() {
            return false;
        }
        !self.is_sick()
    }

    /// Fetch the current work package as the daemon hands it out.
    pub async fn get_work(&self) -> RpcResult<Vec<String>> {
        let envelope = self.call("getwork", json!([])).await?;
        envelope.decode(Slot::Result)
    }

    /// Point the daemon's miner at a payout address.
    pub async fn set_mining_account(&self, address: &str) -> RpcResult<Vec<String>> {
        let envelope = self
            .call(
                "setminingaccount",
                json!([self.account, self.password, address]),
            )
            .await?;
        envelope.decode(Slot::Result)
    }

    /// Current chain height.
    pub async fn get_height(&self) -> RpcResult<u64> {
        let envelope = self.call("fetch-height", json!([])).await?;
        envelope.decode(Slot::Result)
    }

    /// Header of the block currently being assembled, if any.
    pub async fn get_pending_block(&self) -> RpcResult<Option<BlockHeaderSummary>> {
        let envelope = self
            .call(
                "fetchheaderext",
                json!([self.account, self.password, "pending"]),
            )
            .await?;
        envelope.decode_optional(Slot::Result)
    }

    /// Block header at a height, or None for an unknown block.
    pub async fn get_block_by_height(&self, height: u64) -> RpcResult<Option<BlockHeader>> {
        self.get_block_by("fetch-header", json!(["-t", height]))
            .await
    }

    /// Block header by hash, or None for an unknown block.
    pub async fn get_block_by_hash(&self, hash: &str) -> RpcResult<Option<BlockHeader>> {
        self.get_block_by("eth_getBlockByHash", json!([hash, true]))
            .await
    }

    async fn get_block_by(&self, method: &str, params: Value) -> RpcResult<Option<BlockHeader>> {
        let envelope = self.call(method, params).await?;
        envelope.decode_optional(Slot::Result)
    }

    /// Receipt of a transaction, or None while it is unknown.
    pub async fn get_tx_receipt(&self, hash: &str) -> RpcResult<Option<TxReceipt>> {
        let envelope = self.call("fetch-tx", json!([hash])).await?;
        // The daemon signals a known transaction through `result` but
        // ships the receipt itself in the `transaction` slot.
        if envelope.slot(Slot::Result).is_none() {
            return Ok(None);
        }
        envelope.decode_optional(Slot::Transaction)
    }

    /// Submit a solved block. The daemon acknowledges acceptance with an
    /// arbitrary result payload and rejection with the string `"false"`.
    pub async fn submit_block(&self, solution: &[String]) -> RpcResult<bool> {
        let envelope = self.call("submitwork", json!(solution)).await?;
        Ok(decode::lenient_bool(envelope.require(Slot::Result)?))
    }

    /// Unspent balance of an address.
    pub async fn get_balance(&self, address: &str) -> RpcResult<BigUint> {
        let envelope = self.call("fetch-balance", json!([address])).await?;
        let reply: BalanceReply = envelope.decode(Slot::Balance)?;
        decode::decimal_biguint(&reply.unspent)
    }

    /// Have the daemon sign a payload on behalf of `from`. The payload
    /// is hashed locally; only the digest crosses the wire. A zero-hash
    /// signature means the signing account is locked and surfaces as
    /// [`RpcError::SignerLocked`] without counting against health.
    pub async fn sign(&self, from: &str, payload: &str) -> RpcResult<String> {
        let digest = decode::sha256_hex(payload.as_bytes());
        let envelope = self.call("eth_sign", json!([from, digest])).await?;
        let signature: String = envelope.decode(Slot::Result)?;
        if decode::is_zero_hash(&signature) {
            return Err(RpcError::SignerLocked);
        }
        Ok(signature)
    }

    /// Number of peers the daemon is connected to.
    pub async fn get_peer_count(&self) -> RpcResult<u64> {
        let envelope = self.call("net_peerCount", Value::Null).await?;
        let count: String = envelope.decode(Slot::Result)?;
        decode::hex_u64(&count)
    }

    /// Transfer funds between daemon-managed addresses, returning the
    /// transaction hash.
    pub async fn send_transaction(&self, from: &str, to: &str, amount: &str) -> RpcResult<String> {
        let envelope = self
            .call(
                "sendfrom",
                json!([self.account, self.password, from, to, amount]),
            )
            .await?;
        let reply: SendTransactionReply = envelope.decode(Slot::Transaction)?;
        Ok(reply.hash)
    }

    /// One JSON-RPC round trip. Records exactly one health outcome per
    /// invocation: a failure for transport and daemon errors, a success
    /// for any structurally sound error-free response.
    pub async fn call(&self, method: &str, params: Value) -> RpcResult<Envelope> {
        let outcome = self.dispatch(method, params).await;
        match &outcome {
            Ok(_) => {
                if self.health.record_success() {
                    tracing::info!(upstream = %self.name, "upstream recovered, marking alive");
                }
            }
            Err(e) if e.is_connectivity() => {
                tracing::warn!(upstream = %self.name, method, error = %e, "upstream call failed");
                if self.health.record_failure() {
                    tracing::warn!(
                        upstream = %self.name,
                        "upstream marked sick after repeated failures"
                    );
                }
            }
            // dispatch only produces connectivity errors
            Err(_) => {}
        }
        outcome
    }

    async fn dispatch(&self, method: &str, params: Value) -> RpcResult<Envelope> {
        let request = RpcRequest::new(method, params);
        let round_trip = async {
            self.http
                .post(self.url.clone())
                .json(&request)
                .send()
                .await?
                .json::<Envelope>()
                .await
        };
        let envelope = match time::timeout(self.timeout, round_trip).await {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(e)) => return Err(RpcError::Transport(e)),
            Err(_) => return Err(RpcError::Timeout(self.timeout.into())),
        };
        if let Some(error) = envelope.error() {
            return Err(RpcError::Daemon(error.message.clone()));
        }
        Ok(envelope)
    }
}

impl fmt::Debug for UpstreamClient {
    // Account credentials stay out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}
