//! Note creation and viewing flows — the thin wiring around the core.
//!
//! Create: plaintext → fresh key → AEAD encrypt → seal record → store write;
//! the key leaves the process only inside the returned locator.
//!
//! View: locator decode (always BEFORE any store access) → store read →
//! key import → AEAD decrypt.
//!
//! Store I/O is the only step that can stall on external latency, so both
//! flows bound it with a deadline; everything else is local compute.

use std::time::Duration;

use anyhow::Result;

use cn_crypto::{aead, NoteKey};
use cn_proto::{EncryptedNote, Locator};
use cn_store::{NoteStore, StoreError};

/// Deadline for a single store read/write.
const STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of the create flow. The locator is the only copy of the key.
#[derive(Debug)]
pub struct CreatedNote {
    pub note_id: String,
    pub locator: String,
}

/// Result of the view flow.
#[derive(Debug)]
pub struct ViewedNote {
    pub note_id: String,
    pub content: String,
}

pub async fn create_note(store: &dyn NoteStore, content: &str) -> Result<CreatedNote> {
    create_note_bounded(store, content, STORE_TIMEOUT).await
}

pub async fn view_note(store: &dyn NoteStore, locator_str: &str) -> Result<ViewedNote> {
    view_note_bounded(store, locator_str, STORE_TIMEOUT).await
}

async fn create_note_bounded(
    store: &dyn NoteStore,
    content: &str,
    deadline: Duration,
) -> Result<CreatedNote> {
    let key = NoteKey::generate();
    let payload = aead::encrypt(&key, content)?;
    let note = EncryptedNote::seal(&payload);

    tokio::time::timeout(deadline, store.write(&note))
        .await
        .map_err(|_| StoreError::Timeout)??;

    let locator = Locator::new(note.id.clone(), key.export());
    Ok(CreatedNote {
        note_id: note.id,
        locator: locator.encode(),
    })
}

async fn view_note_bounded(
    store: &dyn NoteStore,
    locator_str: &str,
    deadline: Duration,
) -> Result<ViewedNote> {
    // A bad locator must fail here, before the store is touched at all.
    let locator = Locator::decode(locator_str)?;

    let note = tokio::time::timeout(deadline, store.read(&locator.note_id))
        .await
        .map_err(|_| StoreError::Timeout)??;

    let key = locator.key.import()?;
    let iv = note.iv_bytes()?;
    let ciphertext = note.ciphertext_bytes()?;
    let content = aead::decrypt(&key, &iv, &ciphertext)?;

    Ok(ViewedNote {
        note_id: note.id,
        content,
    })
}
