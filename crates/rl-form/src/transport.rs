//! Outbound HTTP seam.

/// Failure to obtain a response body. Protocol-level problems with the body
/// itself are reported separately as [`rl_core::ProtocolError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Posts a JSON body and yields the raw response text.
///
/// No timeout and no cancellation: a hung server leaves the future pending.
/// Browser futures are not `Send`, so neither is this one.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, path: &str, body: String) -> Result<String, TransportError>;
}
