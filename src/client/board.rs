//! Client-side board state and its transitions.

use crate::models::{Note, NoteInput, NotePatch};

use super::pagination::{paginate, total_pages, BoardView, DEFAULT_PAGE_SIZE};

/// The create/edit dialog. A draft only exists while the dialog is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Creating(NoteInput),
    Editing { id: String, draft: NoteInput },
}

impl DialogState {
    pub fn draft(&self) -> Option<&NoteInput> {
        match self {
            DialogState::Closed => None,
            DialogState::Creating(draft) | DialogState::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut NoteInput> {
        match self {
            DialogState::Closed => None,
            DialogState::Creating(draft) | DialogState::Editing { draft, .. } => Some(draft),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Tagline,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
}

/// A short notification about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub status: ToastStatus,
}

/// User actions that talk to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete,
    Pin,
}

impl Action {
    /// Toast shown on success. Loading and pinning show none.
    pub fn success_toast(self) -> Option<Toast> {
        let title = match self {
            Action::Create => "Note Created",
            Action::Update => "Note Updated",
            Action::Delete => "Note Deleted",
            Action::Load | Action::Pin => return None,
        };
        Some(Toast {
            title: title.to_string(),
            status: ToastStatus::Success,
        })
    }

    pub fn error_toast(self) -> Toast {
        let title = match self {
            Action::Load => "Error While Loading Notes",
            Action::Create => "Error While Creating Note",
            Action::Update => "Error While Updating Note",
            Action::Delete => "Error While Deleting Note",
            Action::Pin => "Error While Pinning Note",
        };
        Toast {
            title: title.to_string(),
            status: ToastStatus::Error,
        }
    }
}

/// Identifies one list fetch. Only the newest ticket may update the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Everything the client knows: the last fetched notes, the page being
/// viewed, the dialog and pending toasts.
#[derive(Debug, Clone)]
pub struct NoteBoard {
    notes: Vec<Note>,
    page: usize,
    page_size: usize,
    loading: bool,
    dialog: DialogState,
    toasts: Vec<Toast>,
    last_ticket: u64,
}

impl Default for NoteBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl NoteBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            notes: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            loading: false,
            dialog: DialogState::Closed,
            toasts: Vec::new(),
            last_ticket: 0,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn view(&self) -> BoardView {
        paginate(&self.notes, self.page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        let remaining = self.notes.iter().filter(|n| !n.is_pinned()).count();
        total_pages(remaining, self.page_size)
    }

    // ============================================================
    // Paging
    // ============================================================

    /// Returns true when the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Returns true when the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped to the pages that exist.
    /// Returns true when the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages().max(1));
        let changed = target != self.page;
        self.page = target;
        changed
    }

    pub fn first_page(&mut self) -> bool {
        let changed = self.page != 1;
        self.page = 1;
        changed
    }

    // ============================================================
    // Fetching
    // ============================================================

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        self.loading = true;
        FetchTicket(self.last_ticket)
    }

    /// Apply a fetched list. Returns false and leaves the board untouched if
    /// a newer fetch was started after this one.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, notes: Vec<Note>) -> bool {
        if ticket.0 != self.last_ticket {
            tracing::debug!("Discarding stale fetch {}", ticket.0);
            return false;
        }
        self.notes = notes;
        self.loading = false;

        // Deleting the last note of the last page would otherwise strand us
        // on an empty page. An empty list still has page 1.
        let last = self.total_pages().max(1);
        if self.page > last {
            self.page = last;
        }
        true
    }

    /// Record a failed fetch. The previous notes stay visible.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        if ticket.0 != self.last_ticket {
            return false;
        }
        self.loading = false;
        true
    }

    // ============================================================
    // Dialog
    // ============================================================

    pub fn open_create(&mut self) {
        self.dialog = DialogState::Creating(NoteInput::default());
    }

    /// Open the dialog on an existing note, seeding the draft from the note
    /// with `patch` applied. Returns false if the note is not on the board.
    pub fn open_edit(&mut self, id: &str, patch: NotePatch) -> bool {
        let Some(note) = self.note(id) else {
            return false;
        };
        let draft = patch.apply(NoteInput::from(note));
        self.dialog = DialogState::Editing {
            id: id.to_string(),
            draft,
        };
        true
    }

    /// Change one field of the open draft. Returns false if no dialog is open.
    pub fn edit_draft(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        let Some(draft) = self.dialog.draft_mut() else {
            return false;
        };
        let value = value.into();
        match field {
            DraftField::Title => draft.title = value,
            DraftField::Tagline => draft.tagline = value,
            DraftField::Body => draft.body = value,
        }
        true
    }

    /// Close the dialog, discarding any unsaved draft.
    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::Closed;
    }

    // ============================================================
    // Toasts
    // ============================================================

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
