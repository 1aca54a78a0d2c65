//! cn_crypto — CipherNote cryptographic core
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - The storage side of the system only ever sees ciphertext: every key is
//!   generated here, used for exactly one note, and leaves the process only
//!   inside the locator the user explicitly shares.
//!
//! # Module layout
//! - `key`   — per-note AES-256-GCM key generation + JWK-style export/import
//! - `aead`  — AES-256-GCM encrypt/decrypt of note text
//! - `error` — unified error type

pub mod aead;
pub mod error;
pub mod key;

pub use aead::EncryptedPayload;
pub use error::CryptoError;
pub use key::{NoteKey, SerializedKey};
