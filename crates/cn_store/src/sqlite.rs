//! SQLite backend via sqlx.
//!
//! Records are already ciphertext when they arrive, so no column-level
//! encryption happens here — the table is a durable version of the opaque
//! key-value map the core expects.
//!
//! WAL journal mode is configured at connection time, NOT inside a
//! migration: SQLite forbids changing `journal_mode` inside a transaction
//! and sqlx wraps every migration in one.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};

use cn_proto::EncryptedNote;

use crate::{error::StoreError, NoteStore};

/// Store handle. Cheap to clone (pool is Arc internally).
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: String,
    iv: String,
    ciphertext: String,
    created_at: i64,
}

impl From<NoteRow> for EncryptedNote {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            iv: row.iv,
            ciphertext: row.ciphertext,
            created_at: row.created_at,
        }
    }
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and run pending
    /// migrations.
    pub async fn open(db_path: &Path) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePool::connect_with(opts).await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl NoteStore for SqliteStore {
    async fn write(&self, note: &EncryptedNote) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO notes (id, iv, ciphertext, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&note.id)
        .bind(&note.iv)
        .bind(&note.ciphertext)
        .bind(note.created_at)
        .execute(&self.pool)
        .await?;

        // Records are immutable; an existing id must never be overwritten.
        if result.rows_affected() == 0 {
            return Err(StoreError::WriteFailed(format!(
                "id already exists: {}",
                note.id
            )));
        }
        tracing::debug!(id = %note.id, "sqlite store write");
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<EncryptedNote, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>(
            "SELECT id, iv, ciphertext, created_at FROM notes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                tracing::debug!(id, "sqlite store read");
                Ok(row.into())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_crypto::{aead, NoteKey};

    fn sample_note() -> EncryptedNote {
        let key = NoteKey::generate();
        EncryptedNote::seal(&aead::encrypt(&key, "sqlite body").unwrap())
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("notes.db")).await.unwrap();

        let note = sample_note();
        store.write(&note).await.unwrap();
        assert_eq!(store.read(&note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn read_missing_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("notes.db")).await.unwrap();

        let err = store.read("no-such-id").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_write_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("notes.db")).await.unwrap();

        let note = sample_note();
        store.write(&note).await.unwrap();

        let mut clobber = note.clone();
        clobber.ciphertext = "AAAA".to_string();
        let err = store.write(&clobber).await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert_eq!(store.read(&note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("notes.db");
        let note = sample_note();

        {
            let store = SqliteStore::open(&db_path).await.unwrap();
            store.write(&note).await.unwrap();
            store.close().await;
        }

        let store = SqliteStore::open(&db_path).await.unwrap();
        assert_eq!(store.read(&note.id).await.unwrap(), note);
    }
}
