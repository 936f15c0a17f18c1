//! SQLite-backed review store.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use study_core::{ReviewRecord, ReviewStore, Snapshot};

use crate::db::error::DbError;
use crate::db::schema::{INIT_SCHEMA_VERSION, SCHEMA, SCHEMA_VERSION};

type Result<T> = std::result::Result<T, DbError>;

const SELECT_RECORD: &str =
    "SELECT card_id, ease_factor, interval_days, repetition, next_review FROM review_records";

/// Review records persisted in SQLite. Every `put` is written through.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute_batch(INIT_SCHEMA_VERSION)?;

        let found: i32 = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
        if found != SCHEMA_VERSION {
            return Err(DbError::SchemaVersion {
                found,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Delete a card's record. Returns whether a row was removed.
    pub fn delete_record(&self, card_id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM review_records WHERE card_id = ?1", params![card_id])?;
        Ok(count > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM review_records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Merge a snapshot into the database in one transaction.
    ///
    /// Records in the snapshot replace existing rows with the same card id.
    pub fn import_snapshot(&mut self, snapshot: &Snapshot) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for (card_id, record) in snapshot {
            upsert(&tx, card_id, record)?;
        }
        tx.commit()?;
        tracing::info!(records = snapshot.len(), "imported snapshot");
        Ok(snapshot.len())
    }

    pub fn export_snapshot(&self) -> Result<Snapshot> {
        Ok(self
            .load_all()?
            .into_iter()
            .map(|record| (record.card_id.clone(), record))
            .collect())
    }

    fn load_all(&self) -> Result<Vec<ReviewRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_RECORD} ORDER BY card_id"))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

impl ReviewStore for SqliteRepository {
    type Error = DbError;

    fn get(&self, card_id: &str) -> Result<Option<ReviewRecord>> {
        self.conn
            .query_row(
                &format!("{SELECT_RECORD} WHERE card_id = ?1"),
                params![card_id],
                row_to_record,
            )
            .optional()
            .map_err(Into::into)
    }

    fn put(&mut self, card_id: &str, record: ReviewRecord) -> Result<()> {
        upsert(&self.conn, card_id, &record)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT card_id FROM review_records ORDER BY card_id")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }

    fn records(&self) -> Result<Vec<ReviewRecord>> {
        self.load_all()
    }
}

fn upsert(conn: &Connection, card_id: &str, record: &ReviewRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO review_records (card_id, ease_factor, interval_days, repetition, next_review) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            card_id,
            record.ease_factor,
            record.interval,
            record.repetition,
            record.next_review.to_rfc3339()
        ],
    )?;
    Ok(())
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ReviewRecord> {
    let next_review: String = row.get(4)?;
    let next_review = DateTime::parse_from_rfc3339(&next_review)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    // Out-of-range integers are clamped here and repaired by the scheduler
    let interval: i64 = row.get(2)?;
    let repetition: i64 = row.get(3)?;

    Ok(ReviewRecord {
        card_id: row.get(0)?,
        ease_factor: row.get(1)?,
        interval: interval.clamp(0, i64::from(u32::MAX)) as u32,
        repetition: repetition.clamp(0, i64::from(u32::MAX)) as u32,
        next_review,
    })
}
