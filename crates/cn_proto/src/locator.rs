//! Share locator — one string carrying note id + decryption key.
//!
//! Wire form: `view/<noteId>?k=<base64url(serializedKeyJSON)>`
//!
//! The id sits in a fixed path position and the key in a single designated
//! query field, so the two are unambiguously separable even though both are
//! drawn from overlapping alphabets. base64url with no padding keeps the
//! whole token safe inside a URL fragment without percent-escaping.
//!
//! Anyone holding the full locator can decrypt the note — that is the
//! explicit trade-off of key-in-link sharing, not a defect.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use cn_crypto::SerializedKey;

use crate::error::ProtoError;

const VIEW_PREFIX: &str = "view/";
const KEY_PARAM: &str = "k";

/// Decoded locator: which note, and the key that opens it.
/// Never persisted — exists only transiently for sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub note_id: String,
    pub key: SerializedKey,
}

impl Locator {
    pub fn new(note_id: impl Into<String>, key: SerializedKey) -> Self {
        Self { note_id: note_id.into(), key }
    }

    /// Encode into the shareable fragment string.
    pub fn encode(&self) -> String {
        let key_json = serde_json::to_string(&self.key)
            .expect("SerializedKey contains only string/bool/vec fields");
        format!(
            "{VIEW_PREFIX}{}?{KEY_PARAM}={}",
            self.note_id,
            URL_SAFE_NO_PAD.encode(key_json)
        )
    }

    /// Decode a locator string. Accepts a bare fragment or a full pasted URL
    /// (everything before the first `#` is ignored, as is a leading `/` or
    /// `view/`). Fails with [`ProtoError::MalformedLocator`] on a missing or
    /// invalid id/key segment — never partially recovers.
    pub fn decode(input: &str) -> Result<Self, ProtoError> {
        let fragment = match input.split_once('#') {
            Some((_, frag)) => frag,
            None => input,
        };
        let fragment = fragment.trim_start_matches('/');
        let fragment = fragment.strip_prefix(VIEW_PREFIX).unwrap_or(fragment);

        let (note_id, query) = fragment
            .split_once('?')
            .ok_or_else(|| ProtoError::MalformedLocator("key segment missing".into()))?;

        if note_id.is_empty() {
            return Err(ProtoError::MalformedLocator("note id missing".into()));
        }
        if note_id.contains('/') {
            return Err(ProtoError::MalformedLocator(format!(
                "unexpected path segment in note id: {note_id}"
            )));
        }

        let key_b64 = query
            .split('&')
            .find_map(|pair| match pair.split_once('=') {
                Some((KEY_PARAM, value)) => Some(value),
                _ => None,
            })
            .ok_or_else(|| ProtoError::MalformedLocator("key parameter `k` missing".into()))?;
        if key_b64.is_empty() {
            return Err(ProtoError::MalformedLocator("key parameter `k` is empty".into()));
        }

        let key_json = URL_SAFE_NO_PAD.decode(key_b64).map_err(|e| {
            ProtoError::MalformedLocator(format!("key segment is not valid base64url: {e}"))
        })?;
        let key: SerializedKey = serde_json::from_slice(&key_json).map_err(|e| {
            ProtoError::MalformedLocator(format!("key segment is not a serialized key: {e}"))
        })?;

        Ok(Self { note_id: note_id.to_string(), key })
    }
}
