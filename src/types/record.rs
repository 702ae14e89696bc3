use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved path bookmark.
///
/// Serializes to the wire shape used by export files and backend storage:
/// camelCase field names, ISO-8601 timestamps, numeric IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRecord {
    /// Opaque identifier, assigned at creation and never reassigned.
    pub id: i64,
    /// Path, query, and fragment portion of a URL. Unique within a collection.
    pub path: String,
    /// Human-readable label.
    pub name: String,
    /// Hostname the record was saved from. Informational only.
    pub saved_from: String,
    /// Set once at creation, preserved across updates.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every save, rename, and navigation.
    pub last_used: DateTime<Utc>,
}

/// Controls how strictly the store enforces name uniqueness for
/// explicitly-named saves and renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMode {
    /// At most one record per name. A colliding explicit name must be
    /// confirmed, and confirmation evicts the other record (last name wins).
    Strict,
    /// Duplicate names are tolerated for explicit saves and renames.
    Permissive,
}

/// Result of a save operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was created with the given name.
    Created { name: String },
    /// An existing record for the path was updated in place.
    Updated { name: String },
    /// The effective name is held by a different path; nothing was written.
    /// The caller decides whether to disambiguate or replace.
    /// `existing_path_present` reports that the record holding the name is
    /// present in the collection.
    NameConflict {
        suggested_name: String,
        existing_path_present: bool,
    },
}

/// Result of a rename operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The record now carries the new name.
    Renamed,
    /// The new name equals the current one; nothing was written.
    Unchanged,
    /// The name is held by another record; nothing was written.
    NameConflict { name: String },
}
