//! Partition and paginate a fetched note list.
//!
//! Pinned notes are always shown in full. Only the remaining notes are
//! split into pages.

use crate::models::Note;

/// Number of unpinned notes shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// What the board shows for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub pinned: Vec<Note>,
    pub current: Vec<Note>,
    /// 1-based page number the slice was taken from.
    pub page: usize,
    pub total_pages: usize,
}

impl BoardView {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Split notes into (pinned, remaining), keeping store order in both.
pub fn partition(notes: &[Note]) -> (Vec<Note>, Vec<Note>) {
    notes.iter().cloned().partition(Note::is_pinned)
}

pub fn total_pages(remaining: usize, page_size: usize) -> usize {
    remaining.div_ceil(page_size.max(1))
}

/// Build the view for `page` (1-based). Pages past the end yield an empty
/// slice rather than an error.
pub fn paginate(notes: &[Note], page: usize, page_size: usize) -> BoardView {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let (pinned, remaining) = partition(notes);

    let start = ((page - 1) * page_size).min(remaining.len());
    let end = (start + page_size).min(remaining.len());

    BoardView {
        total_pages: total_pages(remaining.len(), page_size),
        current: remaining[start..end].to_vec(),
        pinned,
        page,
    }
}
