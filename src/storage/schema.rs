//! Database schema definitions for year progress storage.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Preference key-value table (one JSON value per key)
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Year progress presets table
CREATE TABLE IF NOT EXISTS year_progress_presets (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    progress_type INTEGER NOT NULL,
    activity_types_json TEXT NOT NULL,
    include_commute_ride INTEGER NOT NULL DEFAULT 1,
    include_indoor_ride INTEGER NOT NULL DEFAULT 1,
    target_value REAL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_year_progress_presets_created_at ON year_progress_presets(created_at);
"#;

/// Schema version tracking table
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
