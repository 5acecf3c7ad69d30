//! SQLite-backed persistent index.
//!
//! Chunks, metadata and term vectors live in one table. Similarity is a
//! brute-force scan, which is adequate for a single-user document set.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::index::{check_batch, matches_filter, IndexMatch, IndexRecords, VectorIndex};
use crate::schema::{SCHEMA_SQL, UPSERT_CHUNK_SQL};
use crate::vectorize::{cosine_distance, from_bytes, to_bytes, HashedTermVectorizer, Vectorizer};
use docsage_core::{Error, Metadata, Result};

pub struct SqliteIndex {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    vectorizer: Arc<dyn Vectorizer>,
}

fn db_err(e: rusqlite::Error) -> Error {
    Error::IndexUnavailable(e.to_string())
}

fn parse_metadata(json: &str) -> Result<Metadata> {
    Ok(serde_json::from_str(json)?)
}

impl SqliteIndex {
    /// Open or create the index. The file will be `db_dir/docsage.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_vectorizer(db_dir, Arc::new(HashedTermVectorizer::default()))
    }

    pub fn open_with_vectorizer(
        db_dir: impl AsRef<Path>,
        vectorizer: Arc<dyn Vectorizer>,
    ) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join("docsage.db");

        let conn = Connection::open(&db_path).map_err(db_err)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(db_err)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::IndexUnavailable(format!("Schema init failed: {}", e)))?;

        let index = Self {
            conn: Mutex::new(conn),
            db_path,
            vectorizer,
        };
        info!(
            "SqliteIndex initialized: {} chunks, dim={}, path={}",
            index.count()?,
            index.vectorizer.dimension(),
            index.db_path.display()
        );
        Ok(index)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl VectorIndex for SqliteIndex {
    fn add(&self, ids: &[String], texts: &[String], metadatas: &[Metadata]) -> Result<()> {
        check_batch(ids, texts, metadatas)?;

        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(db_err)?;
        {
            let mut stmt = tx.prepare_cached(UPSERT_CHUNK_SQL).map_err(db_err)?;
            for ((id, text), metadata) in ids.iter().zip(texts).zip(metadatas) {
                let meta_json = serde_json::to_string(metadata)?;
                let vector = to_bytes(&self.vectorizer.vectorize(text));
                stmt.execute(params![id, text, meta_json, vector])
                    .map_err(db_err)?;
            }
        }
        tx.commit().map_err(db_err)?;
        debug!("SqliteIndex: upserted {} chunks", ids.len());
        Ok(())
    }

    fn query(&self, text: &str, top_k: usize) -> Result<Vec<IndexMatch>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let q = self.vectorizer.vectorize(text);

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT id, text, metadata_json, vector FROM chunks ORDER BY seq")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                ))
            })
            .map_err(db_err)?;

        let mut matches = Vec::new();
        for row in rows {
            let (id, text, meta_json, blob) = row.map_err(db_err)?;
            matches.push(IndexMatch {
                id,
                text,
                metadata: parse_metadata(&meta_json)?,
                distance: cosine_distance(&q, &from_bytes(&blob)),
            });
        }
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(top_k);
        Ok(matches)
    }

    fn get(&self, filter: &Metadata) -> Result<IndexRecords> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT id, metadata_json FROM chunks ORDER BY seq")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(db_err)?;

        let mut records = IndexRecords::default();
        for row in rows {
            let (id, meta_json) = row.map_err(db_err)?;
            let metadata = parse_metadata(&meta_json)?;
            if matches_filter(&metadata, filter) {
                records.ids.push(id);
                records.metadatas.push(metadata);
            }
        }
        Ok(records)
    }

    fn delete(&self, ids: &[String]) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(db_err)?;
        {
            let mut stmt = tx
                .prepare_cached("DELETE FROM chunks WHERE id = ?1")
                .map_err(db_err)?;
            for id in ids {
                stmt.execute(params![id]).map_err(db_err)?;
            }
        }
        tx.commit().map_err(db_err)?;
        debug!("SqliteIndex: deleted {} chunks", ids.len());
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(n as usize)
    }
}
