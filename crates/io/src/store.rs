// Parent sample persistence using SQLite

use std::path::Path;

use rusqlite::{params, Connection};

use nettow_recon::{ParentSamples, SampleMetadata};

use crate::error::IoError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS samples (
    cast_name TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    depth TEXT NOT NULL,             -- as recorded on the field sheet, may be blank
    sample_type TEXT NOT NULL,
    volume TEXT NOT NULL,
    filter_diameter TEXT NOT NULL,
    filter_pore_size REAL NOT NULL   -- micrometres
);
"#;

/// Destination for reconciled parent samples.
pub trait SampleLoader {
    /// Persist every sample; returns the number of rows written.
    fn load(&mut self, samples: &ParentSamples) -> Result<usize, IoError>;
}

/// Loads parent samples into the `samples` table of a SQLite database.
///
/// Loading is an upsert keyed by cast, so re-loading a file is idempotent.
pub struct SqliteSampleLoader {
    conn: Connection,
}

impl SqliteSampleLoader {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| IoError::file(parent, e))?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Wrap an existing connection (e.g. in-memory) and ensure the schema.
    pub fn with_connection(conn: Connection) -> Result<Self, IoError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Every stored sample, keyed by cast.
    pub fn stored_samples(&self) -> Result<ParentSamples, IoError> {
        let mut stmt = self.conn.prepare(
            "SELECT cast_name, name, depth, sample_type, volume, filter_diameter, filter_pore_size FROM samples",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                SampleMetadata {
                    name: row.get(1)?,
                    depth: row.get(2)?,
                    sample_type: row.get(3)?,
                    volume: row.get(4)?,
                    filter_diameter: row.get(5)?,
                    filter_pore_size: row.get(6)?,
                },
            ))
        })?;

        let mut samples = ParentSamples::new();
        for row in rows {
            let (cast, metadata) = row?;
            samples.insert(cast, metadata);
        }
        Ok(samples)
    }
}

impl SampleLoader for SqliteSampleLoader {
    fn load(&mut self, samples: &ParentSamples) -> Result<usize, IoError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO samples (cast_name, name, depth, sample_type, volume, filter_diameter, filter_pore_size) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (cast, m) in samples {
                stmt.execute(params![
                    cast,
                    m.name,
                    m.depth,
                    m.sample_type,
                    m.volume,
                    m.filter_diameter,
                    m.filter_pore_size,
                ])?;
                log::debug!("stored cast '{cast}'");
            }
        }
        tx.commit()?;
        Ok(samples.len())
    }
}
