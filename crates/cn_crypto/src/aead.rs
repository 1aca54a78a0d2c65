//! Authenticated encryption of note text
//!
//! Uses AES-256-GCM (the algorithm the browser client speaks via WebCrypto).
//! Key size: 32 bytes.  Nonce: 12 bytes (random, fresh per call).  Tag: 16
//! bytes, appended to the ciphertext.  No associated data.
//!
//! The nonce travels in the clear next to the ciphertext — standard for AEAD;
//! secrecy rests entirely on the key. Nonce reuse under the same key would be
//! catastrophic for GCM, which is why encryption draws a fresh random nonce
//! internally instead of accepting one from the caller.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
    Aes256Gcm, Nonce,
};

use crate::error::CryptoError;
use crate::key::NoteKey;

/// Nonce length in bytes (96-bit IV, the GCM standard).
pub const NONCE_LEN: usize = 12;

/// Output of one encryption call: the fresh nonce plus tag-carrying
/// ciphertext. Kept as separate fields because the persisted record stores
/// them separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub iv: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

/// Encrypt UTF-8 note text under `key` with a fresh random 12-byte nonce.
pub fn encrypt(key: &NoteKey, plaintext: &str) -> Result<EncryptedPayload, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::Encrypt)?;

    let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| CryptoError::Encrypt)?;

    let mut iv = [0u8; NONCE_LEN];
    iv.copy_from_slice(nonce.as_slice());
    Ok(EncryptedPayload { iv, ciphertext })
}

/// Decrypt and verify. All-or-nothing: the tag is checked before any
/// plaintext is returned, and every authentication failure — wrong key,
/// tampered ciphertext or nonce, truncation — collapses into the same
/// [`CryptoError::Decrypt`].
pub fn decrypt(key: &NoteKey, iv: &[u8], ciphertext: &[u8]) -> Result<String, CryptoError> {
    if iv.len() != NONCE_LEN {
        return Err(CryptoError::Decrypt);
    }
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::Decrypt)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| CryptoError::Decrypt)?;

    // Verified bytes that are not valid UTF-8 cannot come from our own
    // encrypt path, but a record written by another client could contain
    // anything — fail cleanly rather than panic.
    Ok(String::from_utf8(plaintext)?)
}
