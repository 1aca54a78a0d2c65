//! cn_proto — Wire types and serialisation for CipherNote
//!
//! Everything a backend or a shared link ever carries is defined here:
//!
//! - `record`  — the persisted `EncryptedNote` (what the store sees: opaque
//!   ciphertext plus routing metadata, never plaintext or keys)
//! - `locator` — the shareable string combining note id + serialized key
//! - `error`   — codec error type
//!
//! All on-wire binary values are base64-encoded; the key inside a locator is
//! base64url with no padding so the whole token survives a URL fragment
//! without escaping.

pub mod error;
pub mod locator;
pub mod record;

pub use error::ProtoError;
pub use locator::Locator;
pub use record::EncryptedNote;
