//! Path bookmark store.
//!
//! Implements `PathStoreTrait` — save/update with conflict resolution,
//! rename, delete, navigation bookkeeping, and import/export, persisted as a
//! single JSON blob through a `StorageBackend`.
//!
//! Every operation is a full read-modify-write cycle against the backend.
//! Independent call sites (an interactive surface, a background handler) each
//! construct a store over the same backend and key; concurrent writers race
//! and the last write wins.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;

use crate::clock::Clock;
use crate::naming;
use crate::storage::StorageBackend;
use crate::types::errors::StoreError;
use crate::types::record::{NameMode, PathRecord, RenameOutcome, SaveOutcome};
use crate::types::settings::StoreSettings;

/// Default storage key holding the bookmark collection.
pub const COLLECTION_KEY: &str = "quickpaths";

/// Storage key holding the store settings.
pub const SETTINGS_KEY: &str = "settings";

/// Trait defining path bookmark store operations.
#[async_trait]
pub trait PathStoreTrait {
    /// First-run seeding: writes an empty collection and default settings for
    /// keys that are still absent. Idempotent; never overwrites existing data.
    async fn initialize(&self) -> Result<(), StoreError>;
    /// Saves a path, creating a new record or updating the one already
    /// holding that path. `proposed_name` of `None` derives a name from the
    /// path; `replace` is the caller's confirmation to evict another record
    /// holding the chosen name.
    async fn save(
        &self,
        path: &str,
        proposed_name: Option<&str>,
        hostname: &str,
        replace: bool,
    ) -> Result<SaveOutcome, StoreError>;
    /// Renames the record with the given ID. `replace` as in `save`.
    async fn rename(&self, id: i64, new_name: &str, replace: bool)
        -> Result<RenameOutcome, StoreError>;
    /// Removes the record with the given ID. Succeeds whether or not the
    /// record existed.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
    /// Empties the whole collection.
    async fn clear(&self) -> Result<(), StoreError>;
    /// Marks the record as used and returns its path. Building the full URL
    /// and driving the tab is the caller's job.
    async fn navigate(&self, id: i64) -> Result<String, StoreError>;
    /// All records in stored order.
    async fn list(&self) -> Result<Vec<PathRecord>, StoreError>;
    /// All records, most recently used first. Display order; never persisted.
    async fn list_recent(&self) -> Result<Vec<PathRecord>, StoreError>;
    /// Records whose name or path contains the query, case-insensitively,
    /// most recently used first.
    async fn search(&self, query: &str) -> Result<Vec<PathRecord>, StoreError>;
    /// Whether any record other than `exclude_id` carries the name.
    async fn name_exists(&self, name: &str, exclude_id: Option<i64>)
        -> Result<bool, StoreError>;
    /// The full collection as a pretty-printed JSON array.
    async fn export(&self) -> Result<String, StoreError>;
    /// Appends records from an exported snapshot whose paths are not present
    /// yet, keeping their IDs and timestamps verbatim. Returns the number of
    /// records appended.
    async fn import(&self, data: &str) -> Result<usize, StoreError>;
    /// Current settings; defaults when none were stored.
    async fn settings(&self) -> Result<StoreSettings, StoreError>;
    /// Replaces the stored settings.
    async fn update_settings(&self, settings: StoreSettings) -> Result<(), StoreError>;
}

/// Path bookmark store over a pluggable storage backend.
pub struct PathBookmarkStore<B: StorageBackend> {
    backend: B,
    mode: NameMode,
    clock: Box<dyn Clock>,
    collection_key: String,
}

impl<B: StorageBackend> PathBookmarkStore<B> {
    /// Creates a store over the given backend with the default collection key.
    pub fn new(backend: B, mode: NameMode, clock: Box<dyn Clock>) -> Self {
        Self {
            backend,
            mode,
            clock,
            collection_key: COLLECTION_KEY.to_string(),
        }
    }

    /// Overrides the storage key the collection is persisted under.
    pub fn with_collection_key(mut self, key: impl Into<String>) -> Self {
        self.collection_key = key.into();
        self
    }

    pub fn mode(&self) -> NameMode {
        self.mode
    }

    fn is_root(path: &str) -> bool {
        path.is_empty() || path == "/"
    }

    /// Mints an ID strictly above every live ID and at least the current
    /// epoch-milliseconds, so IDs stay unique under a pinned test clock and
    /// are never re-minted after a delete under a real one.
    fn mint_id(records: &[PathRecord], now: DateTime<Utc>) -> i64 {
        let millis = now.timestamp_millis();
        match records.iter().map(|r| r.id).max() {
            Some(max) => millis.max(max + 1),
            None => millis,
        }
    }

    async fn read_collection(&self) -> Result<Vec<PathRecord>, StoreError> {
        let raw = self
            .backend
            .get(&self.collection_key)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        match raw {
            None => Ok(Vec::new()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                StoreError::Persistence(format!("Stored collection is corrupt: {}", e))
            }),
        }
    }

    async fn write_collection(&self, records: &[PathRecord]) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Persistence(format!("Failed to serialize collection: {}", e)))?;
        self.backend
            .set(&self.collection_key, &blob)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        debug!("persisted {} path records", records.len());
        Ok(())
    }
}

#[async_trait]
impl<B: StorageBackend> PathStoreTrait for PathBookmarkStore<B> {
    async fn initialize(&self) -> Result<(), StoreError> {
        let collection = self
            .backend
            .get(&self.collection_key)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        if collection.is_none() {
            self.write_collection(&[]).await?;
        }

        let settings = self
            .backend
            .get(SETTINGS_KEY)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        if settings.is_none() {
            self.update_settings(StoreSettings::default()).await?;
        }
        Ok(())
    }

    async fn save(
        &self,
        path: &str,
        proposed_name: Option<&str>,
        hostname: &str,
        replace: bool,
    ) -> Result<SaveOutcome, StoreError> {
        if Self::is_root(path) {
            return Err(StoreError::RootPath);
        }

        let mut records = self.read_collection().await?;
        let existing_id = records.iter().find(|r| r.path == path).map(|r| r.id);

        let final_name = match proposed_name {
            Some(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(StoreError::EmptyName);
                }
                name.to_string()
            }
            None => naming::generate_name(path),
        };

        // A different record already holding this name
        let conflict = records
            .iter()
            .any(|r| r.name == final_name && Some(r.id) != existing_id);

        if conflict {
            match (proposed_name, self.mode) {
                // Auto-named quick save: hand the decision back to the caller
                (None, _) => {
                    return Ok(SaveOutcome::NameConflict {
                        suggested_name: final_name,
                        existing_path_present: true,
                    });
                }
                (Some(_), NameMode::Strict) => {
                    if !replace {
                        return Ok(SaveOutcome::NameConflict {
                            suggested_name: final_name,
                            existing_path_present: true,
                        });
                    }
                    // Last name wins: evict every other record holding it
                    records.retain(|r| r.name != final_name || Some(r.id) == existing_id);
                }
                (Some(_), NameMode::Permissive) => {}
            }
        }

        let now = self.clock.now();
        match records.iter().position(|r| r.path == path) {
            Some(idx) => {
                let record = &mut records[idx];
                record.name = final_name.clone();
                record.saved_from = hostname.to_string();
                record.last_used = now;
                self.write_collection(&records).await?;
                Ok(SaveOutcome::Updated { name: final_name })
            }
            None => {
                let record = PathRecord {
                    id: Self::mint_id(&records, now),
                    path: path.to_string(),
                    name: final_name.clone(),
                    saved_from: hostname.to_string(),
                    created_at: now,
                    last_used: now,
                };
                records.insert(0, record);
                self.write_collection(&records).await?;
                Ok(SaveOutcome::Created { name: final_name })
            }
        }
    }

    async fn rename(
        &self,
        id: i64,
        new_name: &str,
        replace: bool,
    ) -> Result<RenameOutcome, StoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let mut records = self.read_collection().await?;
        let Some(idx) = records.iter().position(|r| r.id == id) else {
            return Err(StoreError::NotFound(id));
        };

        if records[idx].name == new_name {
            return Ok(RenameOutcome::Unchanged);
        }

        let conflict = records.iter().any(|r| r.name == new_name && r.id != id);
        if conflict && self.mode == NameMode::Strict {
            if !replace {
                return Ok(RenameOutcome::NameConflict {
                    name: new_name.to_string(),
                });
            }
            records.retain(|r| r.name != new_name || r.id == id);
        }

        let now = self.clock.now();
        // The renamed record survived any eviction above; find it again since
        // eviction may have shifted positions.
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.name = new_name.to_string();
            record.last_used = now;
        }
        self.write_collection(&records).await?;
        Ok(RenameOutcome::Renamed)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut records = self.read_collection().await?;
        records.retain(|r| r.id != id);
        self.write_collection(&records).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.write_collection(&[]).await
    }

    async fn navigate(&self, id: i64) -> Result<String, StoreError> {
        let mut records = self.read_collection().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::NotFound(id));
        };

        record.last_used = self.clock.now();
        let path = record.path.clone();
        self.write_collection(&records).await?;
        Ok(path)
    }

    async fn list(&self) -> Result<Vec<PathRecord>, StoreError> {
        self.read_collection().await
    }

    async fn list_recent(&self) -> Result<Vec<PathRecord>, StoreError> {
        let mut records = self.read_collection().await?;
        records.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        Ok(records)
    }

    async fn search(&self, query: &str) -> Result<Vec<PathRecord>, StoreError> {
        let needle = query.to_lowercase();
        let mut records = self.list_recent().await?;
        records.retain(|r| {
            r.name.to_lowercase().contains(&needle) || r.path.to_lowercase().contains(&needle)
        });
        Ok(records)
    }

    async fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, StoreError> {
        let records = self.read_collection().await?;
        Ok(records
            .iter()
            .any(|r| r.name == name && Some(r.id) != exclude_id))
    }

    async fn export(&self) -> Result<String, StoreError> {
        let records = self.read_collection().await?;
        serde_json::to_string_pretty(&records)
            .map_err(|e| StoreError::Persistence(format!("Failed to serialize collection: {}", e)))
    }

    async fn import(&self, data: &str) -> Result<usize, StoreError> {
        let imported: Vec<PathRecord> = serde_json::from_str(data)
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

        let mut records = self.read_collection().await?;
        let mut present: HashSet<String> = records.iter().map(|r| r.path.clone()).collect();

        let mut appended = 0;
        for record in imported {
            // Duplicates by path are dropped, not merged; entries are trusted
            // as-is, IDs and timestamps included.
            if present.contains(&record.path) {
                continue;
            }
            present.insert(record.path.clone());
            records.push(record);
            appended += 1;
        }

        self.write_collection(&records).await?;
        debug!("imported {} new path records", appended);
        Ok(appended)
    }

    async fn settings(&self) -> Result<StoreSettings, StoreError> {
        let raw = self
            .backend
            .get(SETTINGS_KEY)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        match raw {
            None => Ok(StoreSettings::default()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                StoreError::Persistence(format!("Stored settings are corrupt: {}", e))
            }),
        }
    }

    async fn update_settings(&self, settings: StoreSettings) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(&settings)
            .map_err(|e| StoreError::Persistence(format!("Failed to serialize settings: {}", e)))?;
        self.backend
            .set(SETTINGS_KEY, &blob)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }
}
