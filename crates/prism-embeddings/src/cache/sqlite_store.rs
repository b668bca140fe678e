//! SQLite-backed snapshot store.
//!
//! One metadata row plus one row per record. `save` replaces both tables
//! inside a single transaction, so readers see the old snapshot or the new
//! one and never a mix.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use prism_core::catalog::CatalogFingerprint;
use prism_core::constants::SNAPSHOT_SCHEMA_VERSION;
use prism_core::errors::{PrismError, PrismResult, StorageError};
use prism_core::models::{CacheSnapshot, EmbeddingRecord};
use prism_core::traits::ISnapshotStore;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS snapshot_meta (
        slot                INTEGER PRIMARY KEY CHECK (slot = 1),
        schema_version      INTEGER NOT NULL,
        catalog_fingerprint TEXT NOT NULL,
        model               TEXT NOT NULL,
        dimensions          INTEGER NOT NULL,
        created_at          TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS snapshot_records (
        position  INTEGER PRIMARY KEY,
        effect_id TEXT NOT NULL UNIQUE,
        embedding BLOB NOT NULL
    );
";

fn to_storage_err(e: rusqlite::Error) -> PrismError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
    .into()
}

fn corrupt(details: impl Into<String>) -> PrismError {
    StorageError::CorruptionDetected {
        details: details.into(),
    }
    .into()
}

pub(crate) fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub(crate) fn bytes_to_f32_vec(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

/// Persistent snapshot store in a SQLite database.
pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> PrismResult<Self> {
        let conn = Connection::open(path.as_ref()).map_err(to_storage_err)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )
        .map_err(to_storage_err)?;
        Self::with_connection(conn)
    }

    /// In-memory database, for tests and ephemeral runs.
    pub fn open_in_memory() -> PrismResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_storage_err)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> PrismResult<Self> {
        conn.execute_batch(SCHEMA).map_err(to_storage_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-transaction rolls back on drop; the connection stays usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ISnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> PrismResult<Option<CacheSnapshot>> {
        let conn = self.conn();

        let meta = conn
            .query_row(
                "SELECT schema_version, catalog_fingerprint, model, dimensions, created_at
                 FROM snapshot_meta WHERE slot = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(to_storage_err)?;

        let Some((version, fingerprint, model, dimensions, created_at)) = meta else {
            return Ok(None);
        };
        if version != SNAPSHOT_SCHEMA_VERSION {
            return Err(corrupt(format!(
                "snapshot schema version {version}, expected {SNAPSHOT_SCHEMA_VERSION}"
            )));
        }
        let dimensions = usize::try_from(dimensions)
            .map_err(|_| corrupt(format!("negative dimensions: {dimensions}")))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| corrupt(format!("bad created_at {created_at:?}: {e}")))?
            .with_timezone(&Utc);

        let mut stmt = conn
            .prepare("SELECT effect_id, embedding FROM snapshot_records ORDER BY position")
            .map_err(to_storage_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .map_err(to_storage_err)?;

        let mut records = Vec::new();
        for row in rows {
            let (id, blob) = row.map_err(to_storage_err)?;
            let vector = bytes_to_f32_vec(&blob).ok_or_else(|| {
                corrupt(format!("embedding for {id} is {} bytes", blob.len()))
            })?;
            records.push(EmbeddingRecord { id, vector });
        }

        debug!(records = records.len(), "loaded snapshot from SQLite");
        Ok(Some(CacheSnapshot {
            catalog_fingerprint: CatalogFingerprint::from_hex(fingerprint),
            model,
            dimensions,
            created_at,
            records,
        }))
    }

    fn save(&self, snapshot: &CacheSnapshot) -> PrismResult<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().map_err(to_storage_err)?;

        tx.execute("DELETE FROM snapshot_records", [])
            .map_err(to_storage_err)?;
        tx.execute(
            "INSERT OR REPLACE INTO snapshot_meta
                (slot, schema_version, catalog_fingerprint, model, dimensions, created_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)",
            params![
                SNAPSHOT_SCHEMA_VERSION,
                snapshot.catalog_fingerprint.as_str(),
                snapshot.model,
                snapshot.dimensions as i64,
                snapshot.created_at.to_rfc3339(),
            ],
        )
        .map_err(to_storage_err)?;

        {
            let mut insert = tx
                .prepare(
                    "INSERT INTO snapshot_records (position, effect_id, embedding)
                     VALUES (?1, ?2, ?3)",
                )
                .map_err(to_storage_err)?;
            for (position, record) in snapshot.records.iter().enumerate() {
                insert
                    .execute(params![
                        position as i64,
                        record.id,
                        f32_vec_to_bytes(&record.vector)
                    ])
                    .map_err(to_storage_err)?;
            }
        }

        tx.commit().map_err(to_storage_err)?;
        debug!(records = snapshot.records.len(), "saved snapshot to SQLite");
        Ok(())
    }

    fn clear(&self) -> PrismResult<()> {
        self.conn()
            .execute_batch("DELETE FROM snapshot_records; DELETE FROM snapshot_meta;")
            .map_err(to_storage_err)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(fingerprint: &str, records: &[(&str, &[f32])]) -> CacheSnapshot {
        CacheSnapshot {
            catalog_fingerprint: CatalogFingerprint::from_hex(fingerprint),
            model: "concept-axes".to_string(),
            dimensions: records.first().map_or(0, |(_, v)| v.len()),
            created_at: Utc::now(),
            records: records
                .iter()
                .map(|(id, v)| EmbeddingRecord {
                    id: id.to_string(),
                    vector: v.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_store_loads_none() {
        let store = SqliteSnapshotStore::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_preserves_order_and_values() {
        let store = SqliteSnapshotStore::open_in_memory().unwrap();
        let snap = snapshot("abc", &[("b", &[1.0, -2.5]), ("a", &[0.0, 3.25])]);
        store.save(&snap).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.catalog_fingerprint, snap.catalog_fingerprint);
        assert_eq!(loaded.records, snap.records);
        assert_eq!(loaded.dimensions, 2);
    }

    #[test]
    fn save_replaces_whole_snapshot() {
        let store = SqliteSnapshotStore::open_in_memory().unwrap();
        store
            .save(&snapshot("old", &[("a", &[1.0]), ("b", &[2.0]), ("c", &[3.0])]))
            .unwrap();
        store.save(&snapshot("new", &[("a", &[9.0])])).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.catalog_fingerprint.as_str(), "new");
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].vector, vec![9.0]);
    }

    #[test]
    fn corrupt_blob_is_reported() {
        let store = SqliteSnapshotStore::open_in_memory().unwrap();
        store.save(&snapshot("fp", &[("a", &[1.0])])).unwrap();
        store
            .conn()
            .execute(
                "UPDATE snapshot_records SET embedding = ?1 WHERE effect_id = 'a'",
                params![vec![0u8, 0, 0, 0, 0xFF]],
            )
            .unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            PrismError::StorageError(StorageError::CorruptionDetected { .. })
        ));
    }

    #[test]
    fn clear_removes_snapshot() {
        let store = SqliteSnapshotStore::open_in_memory().unwrap();
        store.save(&snapshot("fp", &[("a", &[1.0])])).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn byte_codec_rejects_partial_floats() {
        assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&[1.5, -0.25])), Some(vec![1.5, -0.25]));
        assert_eq!(bytes_to_f32_vec(&[0, 0, 0]), None);
        assert_eq!(bytes_to_f32_vec(&[]), Some(vec![]));
    }
}
