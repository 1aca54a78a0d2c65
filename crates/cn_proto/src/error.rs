use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    /// Locator string cannot be decoded — missing/empty id or key segment,
    /// or the key segment is not valid base64url-encoded JSON. No partial
    /// recovery is attempted.
    #[error("Malformed locator: {0}")]
    MalformedLocator(String),

    /// A persisted record holds iv/ciphertext that is not valid base64.
    #[error("Invalid record field: {0}")]
    InvalidRecord(String),
}
