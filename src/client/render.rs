//! Plain-text rendering of the board for the terminal.

use crate::models::Note;

use super::board::{DialogState, Toast, ToastStatus};
use super::pagination::BoardView;

const PINNED: char = '●';
const UNPINNED: char = '○';
const SUCCESS: char = '✓';
const FAILURE: char = '✗';

/// Render the board.
///
/// Example output:
/// ```text
/// Notes Keeper
///
/// Pinned Notes
/// ● Groceries [4f1c]
///   Saturday
///   Milk, eggs
///
/// Notes
/// ○ Ideas [9a2e]
///   Someday
///   Write a CLI
///
/// [Previous] Page 1 of 1 [Next]
/// ```
pub fn render_board(view: &BoardView, loading: bool) -> String {
    let mut output = String::from("Notes Keeper\n");

    if !view.pinned.is_empty() {
        output.push_str("\nPinned Notes\n");
        for note in &view.pinned {
            render_note(&mut output, note);
        }
    }

    output.push_str("\nNotes\n");
    if loading {
        output.push_str("Loading...\n");
    } else if view.current.is_empty() {
        output.push_str("No data available\n");
    } else {
        for note in &view.current {
            render_note(&mut output, note);
        }
        output.push('\n');
        output.push_str(&render_pager(view));
        output.push('\n');
    }

    output
}

fn render_note(output: &mut String, note: &Note) {
    let symbol = if note.is_pinned() { PINNED } else { UNPINNED };
    output.push(symbol);
    output.push(' ');
    output.push_str(&note.title);
    output.push_str(&format!(" [{}]\n", note.id));
    for line in [&note.tagline, &note.body] {
        if !line.is_empty() {
            output.push_str("  ");
            output.push_str(line);
            output.push('\n');
        }
    }
}

/// Disabled buttons are shown in parentheses.
fn render_pager(view: &BoardView) -> String {
    let button = |label: &str, enabled: bool| {
        if enabled {
            format!("[{}]", label)
        } else {
            format!("({})", label)
        }
    };
    format!(
        "{} Page {} of {} {}",
        button("Previous", view.has_previous()),
        view.page,
        view.total_pages,
        button("Next", view.has_next()),
    )
}

/// Render the open dialog, or nothing when it is closed.
pub fn render_dialog(dialog: &DialogState) -> Option<String> {
    let (heading, submit, draft) = match dialog {
        DialogState::Closed => return None,
        DialogState::Creating(draft) => ("Create New Note", "Create", draft),
        DialogState::Editing { draft, .. } => ("Edit Note", "Save", draft),
    };
    Some(format!(
        "{}\nTitle: {}\nTagline: {}\nBody: {}\n[{}] [Cancel]\n",
        heading, draft.title, draft.tagline, draft.body, submit
    ))
}

pub fn render_toasts(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|toast| {
            let symbol = match toast.status {
                ToastStatus::Success => SUCCESS,
                ToastStatus::Error => FAILURE,
            };
            format!("{} {}\n", symbol, toast.title)
        })
        .collect()
}
