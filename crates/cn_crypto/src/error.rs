use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Malformed key: {0}")]
    KeyFormat(String),

    #[error("Unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("AEAD encryption failed")]
    Encrypt,

    // One variant for every authentication failure — wrong key, tampered
    // ciphertext, tampered nonce, truncation. Callers must not be able to
    // tell these apart.
    #[error("AEAD decryption failed (authentication tag mismatch — possible tampering)")]
    Decrypt,

    #[error("Decrypted bytes are not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
