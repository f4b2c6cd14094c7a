//! Region store backed by SQLite.
//!
//! The store is the source of truth for which regions exist. It is read-only
//! from the server's point of view: rows are created and deleted externally.
//!
//! The `region` table is read with an unqualified `SELECT *`, so the first
//! three columns must be `(name TEXT, lat REAL, long REAL)` in that order.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags};

use crate::error::StoreError;

/// In-memory database name understood by SQLite.
const MEMORY_URL: &str = ":memory:";

// =============================================================================
// Region
// =============================================================================

/// A named geographic bucket of images.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Lowercase region name, also the directory name on disk
    pub name: String,

    /// Latitude in degrees
    pub lat: f32,

    /// Longitude in degrees
    pub long: f32,
}

// =============================================================================
// RegionStore Trait
// =============================================================================

/// Read access to the region allow-list.
///
/// This abstraction lets the HTTP layer run against SQLite in production and
/// against mock stores in tests.
#[async_trait]
pub trait RegionStore: Send + Sync {
    /// Return every region row in the store.
    async fn list_regions(&self) -> Result<Vec<Region>, StoreError>;

    /// Return whether a row with exactly this name exists.
    async fn region_exists(&self, name: &str) -> Result<bool, StoreError>;
}

// =============================================================================
// SqliteRegionStore
// =============================================================================

/// SQLite implementation of [`RegionStore`].
///
/// A single connection is shared between requests. Queries take the lock on
/// the blocking thread pool so they never stall the async workers.
#[derive(Clone)]
pub struct SqliteRegionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRegionStore {
    /// Open the store named by a connection string.
    ///
    /// Accepts a plain path, a `sqlite://` or `sqlite:` prefixed path, a
    /// `file:` URI, or `:memory:`. Files are opened read-only and must exist.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let target = strip_scheme(url);

        let opened = if target == MEMORY_URL {
            Connection::open_in_memory()
        } else {
            Connection::open_with_flags(
                target,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        };

        let conn = opened.map_err(|e| StoreError::Open {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self::from_connection(conn))
    }

    /// Wrap an already opened connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl RegionStore for SqliteRegionStore {
    async fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM region")?;
            let rows = stmt.query_map([], |row| {
                Ok(Region {
                    name: row.get(0)?,
                    lat: row.get::<_, f64>(1)? as f32,
                    long: row.get::<_, f64>(2)? as f32,
                })
            })?;

            let regions = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(regions)
        })
        .await
    }

    async fn region_exists(&self, name: &str) -> Result<bool, StoreError> {
        let name = name.to_string();

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare("SELECT * FROM region WHERE name = ?1")?;
            Ok(stmt.exists([name.as_str()])?)
        })
        .await
    }
}

/// Strip an optional `sqlite://` or `sqlite:` scheme from a connection string.
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

// =============================================================================
// Tests
// =============================================================================
