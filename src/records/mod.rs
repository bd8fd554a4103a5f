//! Analysis record persistence
//!
//! Uses the sled embedded database. Records are stored by id; a secondary
//! tree maps object names back to record ids so the dashboard can find
//! the analysis for a given video.

pub mod export;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

use crate::types::{AnalysisRecord, RecordId};

/// Storage for analysis records using sled
pub struct RecordStore {
    /// Sled database, keyed by record id
    db: sled::Db,
    /// Secondary index: object_name -> record id
    name_index: sled::Tree,
}

impl RecordStore {
    /// Open or create the record database under `data_dir`
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let db_path = data_dir.as_ref().join("records.sled");
        let db = sled::open(&db_path)
            .with_context(|| format!("Failed to open record database at {:?}", db_path))?;

        let name_index = db
            .open_tree("name_index")
            .context("Failed to open object name index tree")?;

        Ok(Self { db, name_index })
    }

    /// Insert or replace a record
    pub fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        let data = bincode::serialize(record)
            .with_context(|| format!("Failed to serialize record {}", record.id))?;

        self.db
            .insert(record.id.as_bytes(), data)
            .with_context(|| format!("Failed to store record {}", record.id))?;

        if let Err(e) = self
            .name_index
            .insert(record.object_name.as_bytes(), record.id.as_bytes())
        {
            warn!("Failed to update name index for {}: {}", record.object_name, e);
        }

        Ok(())
    }

    /// Fetch a record by id
    pub fn get(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        let Some(data) = self
            .db
            .get(id.as_bytes())
            .with_context(|| format!("Failed to read record {}", id))?
        else {
            return Ok(None);
        };

        let record = bincode::deserialize(&data)
            .with_context(|| format!("Failed to deserialize record {}", id))?;
        Ok(Some(record))
    }

    /// Look up the record id for an object name
    pub fn find_by_object_name(&self, object_name: &str) -> Result<Option<RecordId>> {
        let Some(data) = self
            .name_index
            .get(object_name.as_bytes())
            .with_context(|| format!("Failed to read name index for {}", object_name))?
        else {
            return Ok(None);
        };
        Ok(Some(String::from_utf8_lossy(&data).to_string()))
    }

    /// All records, newest first
    pub fn list(&self) -> Result<Vec<AnalysisRecord>> {
        let mut records = Vec::with_capacity(self.db.len());
        for entry in self.db.iter() {
            let (key, data) = entry.context("Failed to iterate record database")?;
            match bincode::deserialize::<AnalysisRecord>(&data) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Skipping undecodable record {}: {}",
                        String::from_utf8_lossy(&key),
                        e
                    );
                }
            }
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Remove a record; returns whether it existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let Some(data) = self
            .db
            .remove(id.as_bytes())
            .with_context(|| format!("Failed to delete record {}", id))?
        else {
            return Ok(false);
        };

        // Drop the name index entry too, if it still points at this record
        if let Ok(record) = bincode::deserialize::<AnalysisRecord>(&data) {
            if let Ok(Some(indexed)) = self.name_index.get(record.object_name.as_bytes()) {
                if indexed.as_ref() == id.as_bytes() {
                    let _ = self.name_index.remove(record.object_name.as_bytes());
                }
            }
        }

        Ok(true)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush().context("Failed to flush record database")?;
        Ok(())
    }
}
