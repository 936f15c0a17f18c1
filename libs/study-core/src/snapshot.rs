//! JSON snapshot of a whole record collection.
//!
//! The study app keeps its review data as one JSON object mapping card id
//! to record. Snapshots use that same shape so a session can be loaded at
//! start and flushed at end.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::error::Result;
use crate::store::MemoryStore;
use crate::types::ReviewRecord;

/// Records keyed by card id.
pub type Snapshot = BTreeMap<String, ReviewRecord>;

/// Parse a snapshot from JSON text.
///
/// The map key is authoritative: a record whose `cardId` disagrees with its
/// key is rewritten to match.
pub fn from_json(json: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    Ok(normalize(snapshot))
}

pub fn from_reader<R: Read>(reader: R) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    Ok(normalize(snapshot))
}

pub fn to_writer<W: Write>(writer: W, snapshot: &Snapshot) -> Result<()> {
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

fn normalize(snapshot: Snapshot) -> Snapshot {
    snapshot
        .into_iter()
        .map(|(key, mut record)| {
            if record.card_id != key {
                tracing::debug!(key = %key, card_id = %record.card_id, "snapshot record id differs from key");
                record.card_id = key.clone();
            }
            (key, record)
        })
        .collect()
}

impl MemoryStore {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from(snapshot)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
