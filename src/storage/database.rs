//! Database operations using rusqlite.
//!
//! Holds the preference key-value table backing [`PreferenceStore`] and the
//! stored year progress presets.

use crate::error::{YearProgressError, YearProgressResult};
use crate::preferences::{PreferenceStore, YearProgressPreset};
use crate::progress::ProgressType;
use crate::services::PresetProvider;
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    // ========== Preference Key-Value Operations ==========

    /// Read the raw preference value stored under `key`.
    pub fn get_preference(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Insert or replace a preference value.
    pub fn set_preference(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Delete a preference key. Returns whether a row was removed.
    pub fn remove_preference(&self, key: &str) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(deleted > 0)
    }

    // ========== Preset Operations ==========

    /// Insert a new preset.
    pub fn insert_preset(&self, preset: &YearProgressPreset) -> Result<(), DatabaseError> {
        let activity_types_json = serde_json::to_string(&preset.activity_types)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO year_progress_presets
                 (id, name, progress_type, activity_types_json, include_commute_ride,
                  include_indoor_ride, target_value, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    preset.id.to_string(),
                    preset.name,
                    preset.progress_type.tag(),
                    activity_types_json,
                    preset.include_commute_ride,
                    preset.include_indoor_ride,
                    preset.target_value,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    DatabaseError::ConstraintViolation(format!("Preset {} already exists", preset.id))
                }
                e => DatabaseError::QueryFailed(e.to_string()),
            })?;

        Ok(())
    }

    /// List all presets in creation order.
    pub fn list_presets(&self) -> Result<Vec<YearProgressPreset>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, progress_type, activity_types_json, include_commute_ride,
                        include_indoor_ride, target_value
                 FROM year_progress_presets
                 ORDER BY created_at ASC, rowid ASC",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PresetRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    progress_type: row.get(2)?,
                    activity_types_json: row.get(3)?,
                    include_commute_ride: row.get(4)?,
                    include_indoor_ride: row.get(5)?,
                    target_value: row.get(6)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut presets = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            presets.push(row.into_preset()?);
        }

        Ok(presets)
    }

    /// Delete a preset by ID.
    pub fn delete_preset(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM year_progress_presets WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(deleted > 0)
    }
}

/// Raw preset row before decoding.
struct PresetRow {
    id: String,
    name: String,
    progress_type: i64,
    activity_types_json: String,
    include_commute_ride: bool,
    include_indoor_ride: bool,
    target_value: Option<f64>,
}

impl PresetRow {
    fn into_preset(self) -> Result<YearProgressPreset, DatabaseError> {
        Ok(YearProgressPreset {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?,
            name: self.name,
            progress_type: ProgressType::try_from(self.progress_type)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?,
            activity_types: serde_json::from_str(&self.activity_types_json)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?,
            include_commute_ride: self.include_commute_ride,
            include_indoor_ride: self.include_indoor_ride,
            target_value: self.target_value,
        })
    }
}

impl PreferenceStore for Database {
    fn get(&self, key: &str) -> YearProgressResult<Option<String>> {
        Ok(self.get_preference(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> YearProgressResult<()> {
        Ok(self.set_preference(key, value)?)
    }

    fn remove(&mut self, key: &str) -> YearProgressResult<()> {
        self.remove_preference(key)?;
        Ok(())
    }
}

impl PresetProvider for Database {
    async fn presets(&self) -> YearProgressResult<Vec<YearProgressPreset>> {
        Ok(self.list_presets()?)
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<DatabaseError> for YearProgressError {
    fn from(err: DatabaseError) -> Self {
        YearProgressError::Storage(err.to_string())
    }
}
