//! cn_store — Ciphertext persistence for CipherNote
//!
//! # Zero-knowledge contract
//! A backend stores and returns [`cn_proto::EncryptedNote`] records verbatim.
//! It never receives plaintext or key material and has no way to derive
//! either; everything it holds is safe to leak short of the locator.
//!
//! The [`NoteStore`] trait is the whole interface: `write` + `read` against
//! an opaque id. Backends are explicitly constructed and passed as handles —
//! there is no ambient global store.
//!
//! # Backends
//! - `memory` — `HashMap` behind a tokio `RwLock`; tests and demos.
//! - `sqlite` — sqlx SQLite pool, WAL mode, embedded migrations.

pub mod error;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use cn_proto::EncryptedNote;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Opaque key-value persistence for encrypted notes.
///
/// Records are immutable once written: a backend may reject or ignore a
/// second write for an existing id, but must never overwrite.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a record under its id.
    async fn write(&self, note: &EncryptedNote) -> Result<(), StoreError>;

    /// Fetch a record by id. [`StoreError::NotFound`] if absent.
    async fn read(&self, id: &str) -> Result<EncryptedNote, StoreError>;
}
