use thiserror::Error;

/// Errors raised while persisting or decoding a catalog.
///
/// None of these escape `CatalogStore::load`; they surface in logs and in
/// the background write outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    /// World storage could not be read or written.
    #[error("world storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document is not valid JSON for the catalog model.
    #[error("document parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The channel payload could not be encoded or decoded.
    #[error("channel serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// The channel payload is not valid base64.
    #[error("channel payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded catalog violates the schema or catalog invariants.
    #[error("invalid catalog: {0:#}")]
    Invalid(anyhow::Error),

    /// The shared channel holds no value under the key.
    #[error("shared variable '{0}' is not set")]
    MissingVariable(String),

    /// The background writer stopped without reporting an outcome.
    #[error("background write worker exited without reporting")]
    WorkerGone,
}
