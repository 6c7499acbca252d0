//! Navigation history log
//!
//! Append-only: one record per completed top-level navigation. Callers
//! treat writes as best-effort; nothing here retries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use nimbus_storage::Database;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub visited_at: DateTime<Utc>,
}

pub struct HistoryLog {
    db: Database,
}

impl HistoryLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append a completed navigation to the log.
    pub fn append(&self, url: &str, title: &str) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO history (url, title, visited_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![url, title, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })?)
    }

    /// Most recent entries, newest first.
    pub fn entries(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, url, title, visited_at FROM history
                 ORDER BY id DESC
                 LIMIT ?1",
            )?;

            let records: Vec<HistoryRecord> = stmt
                .query_map([limit as i64], |row| {
                    let visited_str: String = row.get(3)?;
                    let visited_at = DateTime::parse_from_rfc3339(&visited_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now());

                    Ok(HistoryRecord {
                        id: row.get(0)?,
                        url: row.get(1)?,
                        title: row.get(2)?,
                        visited_at,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(records)
        })?)
    }

    /// Clear the entire log.
    pub fn clear(&self) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM history", [])?;
            Ok(())
        })?;

        tracing::info!("Cleared navigation history");
        Ok(())
    }
}

impl Clone for HistoryLog {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
