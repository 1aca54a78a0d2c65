//! Per-note symmetric keys
//!
//! Each note gets one fresh 256-bit AES-256-GCM key. The key is never
//! persisted: it lives in memory during the encrypt flow, is exported once
//! into the share locator, and is reconstructed from that locator on view.
//!
//! The export format is a JWK-style JSON object
//! (`{"kty":"oct","alg":"A256GCM","k":"<base64url>",...}`), the same shape
//! WebCrypto produces for `exportKey("jwk")`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// Key length in bytes (256-bit AES-GCM).
pub const KEY_LEN: usize = 32;

/// JWK key type for raw symmetric keys.
const JWK_KTY: &str = "oct";
/// JWK algorithm tag for AES-256-GCM.
const JWK_ALG: &str = "A256GCM";

/// 32-byte AES-256-GCM key for a single note. Zeroized on drop.
///
/// Two keys are equal iff their raw material is equal; there is no other
/// identity.
#[derive(Clone, ZeroizeOnDrop)]
pub struct NoteKey {
    key: [u8; KEY_LEN],
}

impl NoteKey {
    /// Generate a fresh uniformly random key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut key);
        Self { key }
    }

    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes. Use only for immediate cipher operations; never log.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Lossless, deterministic serialization for embedding in a locator.
    /// No I/O, no randomness.
    pub fn export(&self) -> SerializedKey {
        SerializedKey {
            kty: JWK_KTY.to_string(),
            alg: JWK_ALG.to_string(),
            k: URL_SAFE_NO_PAD.encode(self.key),
            key_ops: vec!["encrypt".to_string(), "decrypt".to_string()],
            ext: true,
        }
    }
}

impl PartialEq for NoteKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NoteKey {}

impl std::fmt::Debug for NoteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteKey").field("key", &"[REDACTED]").finish()
    }
}

/// Self-describing wire form of a [`NoteKey`]: raw material plus algorithm
/// metadata. Travels base64url-encoded inside the locator's `k` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedKey {
    /// JWK key type — always `"oct"` (raw octet sequence).
    pub kty: String,
    /// JWK algorithm tag — always `"A256GCM"`.
    pub alg: String,
    /// base64url (no padding) raw key bytes.
    pub k: String,
    /// Declared usages; informational, not enforced.
    #[serde(default)]
    pub key_ops: Vec<String>,
    /// JWK extractability flag; always true for our keys.
    #[serde(default = "default_ext")]
    pub ext: bool,
}

fn default_ext() -> bool {
    true
}

impl SerializedKey {
    /// Validate metadata and reconstruct a usable key.
    ///
    /// A key for a different algorithm is never silently accepted: the
    /// `kty`/`alg` tags must match exactly, and the decoded material must be
    /// exactly 32 bytes.
    pub fn import(&self) -> Result<NoteKey, CryptoError> {
        if self.kty != JWK_KTY {
            return Err(CryptoError::UnsupportedAlgorithm(format!(
                "key type must be {JWK_KTY}, got {}",
                self.kty
            )));
        }
        if self.alg != JWK_ALG {
            return Err(CryptoError::UnsupportedAlgorithm(format!(
                "algorithm must be {JWK_ALG}, got {}",
                self.alg
            )));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(&self.k)
            .map_err(|e| CryptoError::KeyFormat(format!("key material is not valid base64url: {e}")))?;
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::KeyFormat(format!(
                "key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(NoteKey::from_bytes(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_distinct() {
        let a = NoteKey::generate();
        let b = NoteKey::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn export_import_round_trip() {
        let key = NoteKey::generate();
        let serialized = key.export();
        let restored = serialized.import().expect("import exported key");
        assert_eq!(key, restored);
    }

    #[test]
    fn export_is_deterministic() {
        let key = NoteKey::generate();
        assert_eq!(key.export(), key.export());
    }

    #[test]
    fn import_rejects_wrong_algorithm() {
        let mut serialized = NoteKey::generate().export();
        serialized.alg = "A128GCM".to_string();
        let err = serialized.import().unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn import_rejects_wrong_key_type() {
        let mut serialized = NoteKey::generate().export();
        serialized.kty = "RSA".to_string();
        let err = serialized.import().unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn import_rejects_truncated_key() {
        let mut serialized = NoteKey::generate().export();
        serialized.k = URL_SAFE_NO_PAD.encode([0u8; 16]);
        let err = serialized.import().unwrap_err();
        assert!(matches!(err, CryptoError::KeyFormat(_)));
    }

    #[test]
    fn import_rejects_invalid_base64() {
        let mut serialized = NoteKey::generate().export();
        serialized.k = "not!valid!base64url".to_string();
        let err = serialized.import().unwrap_err();
        assert!(matches!(err, CryptoError::KeyFormat(_)));
    }

    #[test]
    fn serialized_key_json_round_trip() {
        let serialized = NoteKey::generate().export();
        let json = serde_json::to_string(&serialized).unwrap();
        let parsed: SerializedKey = serde_json::from_str(&json).unwrap();
        assert_eq!(serialized, parsed);
    }

    #[test]
    fn debug_never_prints_key_material() {
        let key = NoteKey::generate();
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains(&key.export().k));
    }
}
