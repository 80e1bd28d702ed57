use crate::models::{NoteInput, NotePatch};

use super::board::{Action, DialogState, NoteBoard};
use super::NotesApi;

/// Drives a [`NoteBoard`] through a [`NotesApi`].
///
/// Every successful mutation is followed by a full refetch; the board only
/// ever shows what the server confirmed. Failures are logged and surface as
/// an error toast named after the action.
pub struct NotesApp<A> {
    api: A,
    board: NoteBoard,
}

impl<A: NotesApi> NotesApp<A> {
    pub fn new(api: A) -> Self {
        Self::with_board(api, NoteBoard::default())
    }

    pub fn with_board(api: A, board: NoteBoard) -> Self {
        Self { api, board }
    }

    pub fn board(&self) -> &NoteBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut NoteBoard {
        &mut self.board
    }

    /// Fetch the full note list. Returns true on success.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.board.begin_fetch();
        match self.api.list_notes().await {
            Ok(notes) => {
                self.board.finish_fetch(ticket, notes);
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch notes: {}", e);
                if self.board.fail_fetch(ticket) {
                    self.board.push_toast(Action::Load.error_toast());
                }
                false
            }
        }
    }

    pub async fn next_page(&mut self) -> bool {
        self.board.next_page() && self.refresh().await
    }

    pub async fn prev_page(&mut self) -> bool {
        self.board.prev_page() && self.refresh().await
    }

    /// Submit the open dialog: create in create mode, save in edit mode.
    /// The dialog stays open with its draft if the request fails.
    pub async fn submit_dialog(&mut self) -> bool {
        match self.board.dialog().clone() {
            DialogState::Closed => false,
            DialogState::Creating(draft) => self.create(draft).await,
            DialogState::Editing { id, draft } => self.save(&id, draft).await,
        }
    }

    /// Open an edit dialog for `id` with `patch` applied and save it.
    pub async fn edit_note(&mut self, id: &str, patch: NotePatch) -> bool {
        if !self.board.open_edit(id, patch) {
            tracing::warn!("Cannot edit unknown note {}", id);
            self.board.push_toast(Action::Update.error_toast());
            return false;
        }
        self.submit_dialog().await
    }

    pub async fn delete_note(&mut self, id: &str) -> bool {
        match self.api.delete_note(id).await {
            Ok(()) => {
                self.succeed(Action::Delete);
                self.refresh().await;
                true
            }
            Err(e) => self.fail(Action::Delete, e),
        }
    }

    /// Flip the pin flag of a note to the opposite of what the board shows.
    pub async fn toggle_pin(&mut self, id: &str) -> bool {
        let Some(note) = self.board.note(id) else {
            tracing::warn!("Cannot pin unknown note {}", id);
            self.board.push_toast(Action::Pin.error_toast());
            return false;
        };
        let pinned = !note.is_pinned();

        match self.api.set_pinned(id, pinned).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => self.fail(Action::Pin, e),
        }
    }

    async fn create(&mut self, draft: NoteInput) -> bool {
        match self.api.create_note(&draft).await {
            Ok(()) => {
                self.board.close_dialog();
                self.board.first_page();
                self.succeed(Action::Create);
                self.refresh().await;
                true
            }
            Err(e) => self.fail(Action::Create, e),
        }
    }

    async fn save(&mut self, id: &str, draft: NoteInput) -> bool {
        match self.api.update_note(id, &draft).await {
            Ok(()) => {
                self.board.close_dialog();
                self.succeed(Action::Update);
                self.refresh().await;
                true
            }
            Err(e) => self.fail(Action::Update, e),
        }
    }

    fn succeed(&mut self, action: Action) {
        if let Some(toast) = action.success_toast() {
            self.board.push_toast(toast);
        }
    }

    fn fail(&mut self, action: Action, e: super::ClientError) -> bool {
        tracing::error!("{:?} failed: {}", action, e);
        self.board.push_toast(action.error_toast());
        false
    }
}
