use rusqlite::{Connection, OpenFlags, ffi, params};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::types::NormalizedRelease;

/// Style-keyed release cache. One ordered row set per style, replaced
/// wholesale on refill — never merged, so stale rows cannot accumulate
/// next to fresh ones. No TTL, no eviction; staleness is caller-managed.
#[derive(Debug)]
pub struct StyleCache {
    conn: Mutex<Connection>,
}

pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cratescope")
        .join("releases.sqlite3")
}

impl StyleCache {
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let store_path = std::path::Path::new(path);
        if let Some(parent) = store_path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                rusqlite::Error::SqliteFailure(
                    ffi::Error::new(ffi::SQLITE_CANTOPEN),
                    Some(format!(
                        "failed to create parent directory {} for {}: {}",
                        parent.display(),
                        store_path.display(),
                        err
                    )),
                )
            })?;
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA synchronous = NORMAL;",
        )?;
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, rusqlite::Error> {
        self.conn.lock().map_err(|_| {
            rusqlite::Error::SqliteFailure(
                ffi::Error::new(ffi::SQLITE_MISUSE),
                Some("style cache lock poisoned".to_string()),
            )
        })
    }

    /// Cached releases for `style`, in the order they arrived from upstream.
    /// Unknown styles yield an empty list, not an error. Keys are
    /// case-sensitive: "Rock" and "rock" are distinct entries.
    pub fn releases_for_style(&self, style: &str) -> Result<Vec<NormalizedRelease>, rusqlite::Error> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT discogs_id, title, artist, year, label, format, genre, style,
                    want_count, collect_count, thumbnail_url
             FROM style_releases
             WHERE style = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![style], map_release)?;
        rows.collect()
    }

    /// Atomically drops any previous rows for `style` and inserts `releases`
    /// in order. Repeating an identical call leaves the same rows behind.
    pub fn replace_style(
        &self,
        style: &str,
        releases: &[NormalizedRelease],
    ) -> Result<(), rusqlite::Error> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM style_releases WHERE style = ?1", params![style])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO style_releases
                     (discogs_id, title, artist, year, label, format, genre, style,
                      want_count, collect_count, thumbnail_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for release in releases {
                stmt.execute(params![
                    release.discogs_id,
                    release.title,
                    release.artist,
                    release.year,
                    release.label,
                    release.format,
                    release.genre,
                    release.style,
                    release.want_count,
                    release.collect_count,
                    release.thumbnail_url,
                ])?;
            }
        }
        tx.commit()
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS style_releases (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            discogs_id    TEXT NOT NULL,
            title         TEXT NOT NULL,
            artist        TEXT NOT NULL,
            year          TEXT,
            label         TEXT,
            format        TEXT,
            genre         TEXT,
            style         TEXT NOT NULL,
            want_count    INTEGER NOT NULL DEFAULT 0,
            collect_count INTEGER NOT NULL DEFAULT 0,
            thumbnail_url TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_style_releases_style ON style_releases(style);
        PRAGMA user_version = 1;",
    )?;
    Ok(())
}

fn map_release(row: &rusqlite::Row) -> Result<NormalizedRelease, rusqlite::Error> {
    Ok(NormalizedRelease {
        discogs_id: row.get(0)?,
        title: row.get(1)?,
        artist: row.get(2)?,
        year: row.get(3)?,
        label: row.get(4)?,
        format: row.get(5)?,
        genre: row.get(6)?,
        style: row.get(7)?,
        want_count: row.get(8)?,
        collect_count: row.get(9)?,
        thumbnail_url: row.get(10)?,
    })
}
