use serde::{Deserialize, Serialize};

/// A note as stored in the `notes` collection.
///
/// `pinned` stays absent until the note is pinned or unpinned for the first
/// time; an absent flag reads as not pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl Note {
    pub fn is_pinned(&self) -> bool {
        self.pinned.unwrap_or(false)
    }
}

/// Input for creating a note or replacing its text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub tagline: String,
    pub body: String,
}

impl From<&Note> for NoteInput {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            tagline: note.tagline.clone(),
            body: note.body.clone(),
        }
    }
}

/// Partial update applied on top of a note's text fields. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub body: Option<String>,
}

impl NotePatch {
    pub fn apply(self, base: NoteInput) -> NoteInput {
        NoteInput {
            title: self.title.unwrap_or(base.title),
            tagline: self.tagline.unwrap_or(base.tagline),
            body: self.body.unwrap_or(base.body),
        }
    }
}

/// Input for pinning or unpinning a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinInput {
    pub pinned: bool,
}
