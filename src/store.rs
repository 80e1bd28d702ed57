//! Note gateway over the document store's `notes` collection.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

use crate::db::{DocumentStore, Fields, StoreError};
use crate::models::{Note, NoteInput};

/// Name of the collection holding notes.
pub const NOTES_COLLECTION: &str = "notes";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("note not found: {0}")]
    NotFound(String),
}

/// Thin adapter mapping note operations onto a [`DocumentStore`].
///
/// Cloning is cheap; every clone talks to the same store.
#[derive(Clone)]
pub struct NoteStore {
    store: Arc<dyn DocumentStore>,
}

impl NoteStore {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a note and return its store-assigned id. `pinned` is left unset.
    pub fn create(&self, input: NoteInput) -> Result<String, GatewayError> {
        let id = self.store.insert(NOTES_COLLECTION, text_fields(input))?;
        tracing::debug!("Created note {}", id);
        Ok(id)
    }

    /// Every note in the collection, in store order.
    pub fn list_all(&self) -> Result<Vec<Note>, GatewayError> {
        let documents = self.store.get_all(NOTES_COLLECTION)?;

        documents
            .into_iter()
            .map(|doc| {
                let mut fields = doc.fields;
                fields.insert("id".to_string(), Value::String(doc.id));
                serde_json::from_value(Value::Object(fields))
                    .map_err(|e| GatewayError::Store(StoreError::Serialization(e)))
            })
            .collect()
    }

    /// Replace title, tagline and body of an existing note.
    pub fn update(&self, id: &str, input: NoteInput) -> Result<(), GatewayError> {
        self.apply(id, text_fields(input))
    }

    /// Replace only the pin flag of an existing note.
    pub fn set_pinned(&self, id: &str, pinned: bool) -> Result<(), GatewayError> {
        self.apply(id, object(json!({ "pinned": pinned })))
    }

    /// Delete a note. Deleting an unknown id succeeds.
    pub fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.store.delete(NOTES_COLLECTION, id)?;
        tracing::debug!("Deleted note {}", id);
        Ok(())
    }

    fn apply(&self, id: &str, fields: Fields) -> Result<(), GatewayError> {
        if self.store.update(NOTES_COLLECTION, id, fields)? {
            Ok(())
        } else {
            Err(GatewayError::NotFound(id.to_string()))
        }
    }
}

fn text_fields(input: NoteInput) -> Fields {
    object(json!({
        "title": input.title,
        "tagline": input.tagline,
        "body": input.body,
    }))
}

fn object(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        _ => Fields::new(),
    }
}
