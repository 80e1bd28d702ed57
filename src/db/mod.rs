//! Schema-less JSON document storage.
//!
//! Documents live in named collections and are addressed by an id the store
//! generates on insert. [`Database`] keeps them in SQLite as JSON text.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Top-level fields of a document.
pub type Fields = Map<String, Value>;

/// A stored document together with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Failures talking to or reading from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid document data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("document {0} is not a JSON object")]
    NotAnObject(String),

    #[error("database lock poisoned")]
    LockPoisoned,

    /// Backend could not be reached. SQLite never raises this; it is for
    /// `DocumentStore` implementations that talk to a remote service.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Collection-oriented document storage.
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return the id generated for it.
    fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Every document in the collection. Order is store-defined.
    fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Merge `fields` into an existing document.
    /// Returns false if no document has that id.
    fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<bool, StoreError>;

    /// Remove a document. Removing a missing id is not an error.
    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "notes-keeper")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("notes.db"))
    }

    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> anyhow::Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl DocumentStore for Database {
    fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                collection,
                &id,
                serde_json::to_string(&fields)?,
                &now,
                &now,
            ),
        )?;

        Ok(id)
    }

    fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, data FROM documents WHERE collection = ? ORDER BY seq")?;

        let rows = stmt
            .query_map([collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, data)| {
                let fields = parse_fields(&id, &data)?;
                Ok(Document { id, fields })
            })
            .collect()
    }

    fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<bool, StoreError> {
        let conn = self.lock()?;

        let existing: Option<String> = conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ? AND id = ?",
                (collection, id),
                |row| row.get(0),
            )
            .optional()?;

        let Some(data) = existing else {
            return Ok(false);
        };

        let mut merged = parse_fields(id, &data)?;
        merged.extend(fields);

        conn.execute(
            "UPDATE documents SET data = ?, updated_at = ? WHERE collection = ? AND id = ?",
            (
                serde_json::to_string(&merged)?,
                Utc::now().to_rfc3339(),
                collection,
                id,
            ),
        )?;

        Ok(true)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM documents WHERE collection = ? AND id = ?",
            (collection, id),
        )?;
        Ok(())
    }
}

fn parse_fields(id: &str, data: &str) -> Result<Fields, StoreError> {
    match serde_json::from_str(data)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(StoreError::NotAnObject(id.to_string())),
    }
}
