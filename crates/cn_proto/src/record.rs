//! Persisted note record — what the storage backend sees.
//!
//! The backend is a DUMB KEY-VALUE MAP: it only sees:
//!   - id         (random UUID, no semantic meaning)
//!   - iv         (12 random bytes, base64 — not secret)
//!   - ciphertext (opaque AEAD output incl. tag, base64)
//!   - created_at (unix millis, needed only for retention/display)
//!
//! The backend CANNOT see: plaintext, key material, or anything derived from
//! them. A record is immutable once written; deletion is a backend concern.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cn_crypto::EncryptedPayload;

use crate::error::ProtoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedNote {
    /// Random UUIDv4. Enough entropy that id collisions are negligible.
    pub id: String,
    /// Base64 of the 12-byte AEAD nonce.
    pub iv: String,
    /// Base64 of ciphertext + 16-byte authentication tag.
    pub ciphertext: String,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl EncryptedNote {
    /// Wrap a freshly encrypted payload into a persistable record with a
    /// new random id and the current timestamp.
    pub fn seal(payload: &EncryptedPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            iv: STANDARD.encode(payload.iv),
            ciphertext: STANDARD.encode(&payload.ciphertext),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn iv_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        STANDARD
            .decode(&self.iv)
            .map_err(|e| ProtoError::InvalidRecord(format!("iv is not valid base64: {e}")))
    }

    pub fn ciphertext_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| ProtoError::InvalidRecord(format!("ciphertext is not valid base64: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_crypto::{aead, NoteKey};

    #[test]
    fn seal_round_trips_payload_bytes() {
        let key = NoteKey::generate();
        let payload = aead::encrypt(&key, "record body").unwrap();
        let note = EncryptedNote::seal(&payload);

        assert_eq!(note.iv_bytes().unwrap(), payload.iv);
        assert_eq!(note.ciphertext_bytes().unwrap(), payload.ciphertext);
        assert!(!note.id.is_empty());
        assert!(note.created_at > 0);
    }

    #[test]
    fn seal_assigns_distinct_ids() {
        let key = NoteKey::generate();
        let payload = aead::encrypt(&key, "x").unwrap();
        assert_ne!(EncryptedNote::seal(&payload).id, EncryptedNote::seal(&payload).id);
    }

    #[test]
    fn corrupt_base64_is_rejected() {
        let key = NoteKey::generate();
        let payload = aead::encrypt(&key, "x").unwrap();
        let mut note = EncryptedNote::seal(&payload);
        note.ciphertext = "***".to_string();
        assert!(matches!(
            note.ciphertext_bytes().unwrap_err(),
            ProtoError::InvalidRecord(_)
        ));
        note.iv = "###".to_string();
        assert!(matches!(note.iv_bytes().unwrap_err(), ProtoError::InvalidRecord(_)));
    }

    #[test]
    fn json_shape_matches_store_contract() {
        let key = NoteKey::generate();
        let payload = aead::encrypt(&key, "x").unwrap();
        let note = EncryptedNote::seal(&payload);
        let json = serde_json::to_value(&note).unwrap();
        for field in ["id", "iv", "ciphertext", "created_at"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}
