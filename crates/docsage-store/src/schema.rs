//! SQL schema for the SQLite index.

/// `seq` preserves first-insertion order across upserts.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS chunks (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    text TEXT NOT NULL,
    metadata_json TEXT NOT NULL,
    vector BLOB NOT NULL
);
"#;

pub const UPSERT_CHUNK_SQL: &str = r#"
INSERT INTO chunks (id, text, metadata_json, vector) VALUES (?1, ?2, ?3, ?4)
ON CONFLICT(id) DO UPDATE SET
    text = excluded.text,
    metadata_json = excluded.metadata_json,
    vector = excluded.vector
"#;
